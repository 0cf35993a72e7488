//! HTTP client construction for probing
//!
//! Certificate verification is always off: the hosts being probed are
//! third-party endpoints that routinely serve invalid certificates.

use std::collections::BTreeMap;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Proxy};

use sdto_common::{ScanOptions, SdtoError, SdtoResult};

/// Request settings shared by every probe of a run.
#[derive(Debug, Clone, Default)]
pub struct ProbeConfig {
    pub headers: BTreeMap<String, String>,
    pub timeout: Option<Duration>,
    pub proxy: Option<String>,
    pub use_tls: bool,
}

impl ProbeConfig {
    pub fn new() -> Self {
        Self {
            use_tls: true,
            ..Default::default()
        }
    }

    pub fn with_header<N: AsRef<str>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.headers
            .insert(name.as_ref().to_ascii_lowercase(), value.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_proxy<S: Into<String>>(mut self, proxy: S) -> Self {
        self.proxy = Some(proxy.into());
        self
    }

    pub fn with_tls(mut self, use_tls: bool) -> Self {
        self.use_tls = use_tls;
        self
    }
}

impl From<&ScanOptions> for ProbeConfig {
    fn from(options: &ScanOptions) -> Self {
        Self {
            headers: options.headers.clone(),
            timeout: options.timeout,
            proxy: options.proxy.clone(),
            use_tls: options.use_tls,
        }
    }
}

/// Build the client every probe of a run shares.
///
/// Fails with [`SdtoError::Config`] for an invalid header or proxy.
pub fn build_client(config: &ProbeConfig) -> SdtoResult<Client> {
    let mut headers = HeaderMap::with_capacity(config.headers.len());
    for (name, value) in &config.headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| SdtoError::Config(format!("invalid header name {name:?}: {e}")))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|e| SdtoError::Config(format!("invalid value for header {name:?}: {e}")))?;
        headers.insert(header_name, header_value);
    }

    let mut builder = Client::builder()
        .default_headers(headers)
        .danger_accept_invalid_certs(true);

    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }

    // Without an explicit proxy, environment proxy variables are ignored.
    builder = match &config.proxy {
        Some(proxy) => builder.proxy(
            Proxy::all(proxy.as_str())
                .map_err(|e| SdtoError::Config(format!("invalid proxy {proxy:?}: {e}")))?,
        ),
        None => builder.no_proxy(),
    };

    builder
        .build()
        .map_err(|e| SdtoError::Config(format!("failed to build HTTP client: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_headers_timeout_and_proxy() {
        let config = ProbeConfig::new()
            .with_header("X-Scan", "sdto")
            .with_timeout(Duration::from_secs(3))
            .with_proxy("http://127.0.0.1:8080");
        assert!(build_client(&config).is_ok());
    }

    #[test]
    fn rejects_invalid_header() {
        let config = ProbeConfig::new().with_header("bad header", "x");
        assert!(matches!(build_client(&config), Err(SdtoError::Config(_))));

        let config = ProbeConfig::new().with_header("x-ok", "line\nbreak");
        assert!(matches!(build_client(&config), Err(SdtoError::Config(_))));
    }

    #[test]
    fn rejects_invalid_proxy() {
        let config = ProbeConfig::new().with_proxy("not a proxy url");
        assert!(matches!(build_client(&config), Err(SdtoError::Config(_))));
    }

    #[test]
    fn config_from_options() {
        use sdto_common::{Fingerprint, ScanOptions};
        use std::sync::Arc;

        let options = ScanOptions::new(vec!["a.com".into()], Arc::from(Vec::<Fingerprint>::new()))
            .with_header("Accept", "*/*")
            .with_tls(false)
            .with_timeout(Some(Duration::from_millis(1500)));
        let config = ProbeConfig::from(&options);
        assert!(!config.use_tls);
        assert_eq!(config.timeout, Some(Duration::from_millis(1500)));
        assert_eq!(config.headers.get("accept").map(String::as_str), Some("*/*"));
    }
}
