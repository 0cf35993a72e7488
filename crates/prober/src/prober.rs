// crates/prober/src/prober.rs
//! HTTP takeover prober implementation

use async_trait::async_trait;
use reqwest::Client;
use std::error::Error as StdError;
use std::time::Instant;
use tracing::{debug, error, info, instrument};

use sdto_common::{Fingerprint, ProbeOutcome, Prober, ScanOptions, SdtoError, SdtoResult, Target};
use sdto_fingerprint::FingerprintEngine;

use crate::client::{build_client, ProbeConfig};
use crate::normalizer::normalize;

/// Issues one GET per target and classifies the response.
pub struct HttpProber {
    client: Client,
    use_tls: bool,
    engine: FingerprintEngine,
}

impl HttpProber {
    /// Build a prober with its own client.
    pub fn new(config: &ProbeConfig, engine: FingerprintEngine) -> SdtoResult<Self> {
        Ok(Self::with_client(build_client(config)?, config.use_tls, engine))
    }

    /// Prober for a full scan configuration, fingerprints included.
    pub fn from_options(options: &ScanOptions) -> SdtoResult<Self> {
        Self::new(
            &ProbeConfig::from(options),
            FingerprintEngine::new(options.fingerprints.clone()),
        )
    }

    /// Reuse an already configured client.
    pub fn with_client(client: Client, use_tls: bool, engine: FingerprintEngine) -> Self {
        Self {
            client,
            use_tls,
            engine,
        }
    }

    /// Request/response/match cycle. Per-target failures come back as `Err`;
    /// an undecodable body is a non-match.
    #[instrument(skip_all, fields(domain = %target))]
    async fn check(&self, target: &Target) -> SdtoResult<Option<&Fingerprint>> {
        let url = normalize(target.as_str(), self.use_tls)?;
        debug!(url = %url, "Sending request");

        let response = self.client.get(url).send().await.map_err(network_error)?;
        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(network_error)?;

        let text = match decode_body(&body) {
            Ok(text) => text,
            Err(e) => {
                debug!(status, error = %e, "Response body is not text, treating as no match");
                return Ok(None);
            }
        };

        Ok(self.engine.find_match(text, status))
    }
}

#[async_trait]
impl Prober for HttpProber {
    async fn probe(&self, target: &Target) -> ProbeOutcome {
        info!(domain = %target, "Checking target");
        let start = Instant::now();

        match self.check(target).await {
            Ok(Some(fingerprint)) => {
                info!(
                    domain = %target,
                    fingerprint = %fingerprint.name,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Finished target: matched"
                );
                ProbeOutcome::matched(target.clone(), fingerprint)
            }
            Ok(None) => {
                info!(
                    domain = %target,
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Finished target: no matches"
                );
                ProbeOutcome::NoMatch
            }
            Err(cause) => {
                error!(domain = %target, error = %cause, "Got error while checking target");
                debug!(domain = %target, error = ?cause, "Probe failure detail");
                ProbeOutcome::failed(target.clone(), cause)
            }
        }
    }

    fn name(&self) -> &str {
        "http"
    }
}

fn decode_body(body: &[u8]) -> SdtoResult<&str> {
    std::str::from_utf8(body).map_err(|e| SdtoError::Decode(e.to_string()))
}

/// Flatten a reqwest error and its source chain into a `Network` error.
fn network_error(e: reqwest::Error) -> SdtoError {
    let kind = if e.is_timeout() {
        "timeout"
    } else if e.is_connect() {
        "connect"
    } else if e.is_body() || e.is_decode() {
        "body"
    } else if e.is_redirect() {
        "redirect"
    } else {
        "request"
    };

    let mut message = format!("{kind}: {e}");
    let mut current: Option<&dyn StdError> = e.source();
    while let Some(err) = current {
        message.push_str(": ");
        message.push_str(&err.to_string());
        current = err.source();
    }
    SdtoError::Network(message)
}
