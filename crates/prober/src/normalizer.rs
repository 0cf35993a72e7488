//! Target to URL normalization

use sdto_common::{SdtoError, SdtoResult};
use url::Url;

/// Turn a raw target into an absolute `http`/`https` URL.
///
/// - `http://…` / `https://…` are kept as given
/// - `host:port` is schemeless
/// - schemeless targets get `https://` (or `http://` without TLS) and a trailing `/`
/// - any other explicit scheme fails with [`SdtoError::InvalidScheme`]
pub fn normalize(target: &str, use_tls: bool) -> SdtoResult<Url> {
    let candidate = match explicit_scheme(target) {
        Some(scheme) if is_http(scheme) => target.to_string(),
        Some(_) => return Err(SdtoError::InvalidScheme(target.to_string())),
        None => {
            let scheme = if use_tls { "https" } else { "http" };
            format!("{scheme}://{target}/")
        }
    };

    Url::parse(&candidate).map_err(|e| SdtoError::InvalidTarget(format!("{target:?}: {e}")))
}

/// Scheme token of the target, if it carries one.
///
/// `scheme://...` and opaque forms like `mailto:user@host` both count;
/// `host:port` (digits up to the first `/`) has no scheme.
fn explicit_scheme(target: &str) -> Option<&str> {
    let (scheme, rest) = target.split_once(':')?;
    if !is_scheme_token(scheme) {
        return None;
    }
    if rest.starts_with("//") {
        return Some(scheme);
    }
    let port = rest.split_once('/').map_or(rest, |(port, _)| port);
    if port.bytes().all(|b| b.is_ascii_digit()) {
        None
    } else {
        Some(scheme)
    }
}

fn is_scheme_token(token: &str) -> bool {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => {
            first.is_ascii_alphabetic()
                && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
        }
        None => false,
    }
}

#[inline]
fn is_http(scheme: &str) -> bool {
    scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
}
