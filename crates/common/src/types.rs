//! Core data types for the sdto scan engine
//!
//! Fields are `pub` so the coordinator and probers can read them directly;
//! builder-style methods consume `self` to avoid extra clones.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

use crate::error::{SdtoError, SdtoResult};

/// Default `user-agent` sent when the caller does not configure one.
pub const DEFAULT_USER_AGENT: &str =
    "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";

/// Default `accept-language` sent when the caller does not configure one.
pub const DEFAULT_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

/// Default number of concurrently outstanding requests.
pub const DEFAULT_CONCURRENCY: usize = 5;

/// A domain or URL to probe, kept exactly as supplied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Target(String);

impl Target {
    #[inline]
    #[must_use]
    pub fn new<S: Into<String>>(raw: S) -> Self {
        Self(raw.into())
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Target {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for Target {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl AsRef<str> for Target {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A named signature for an unclaimed third-party service.
#[derive(Debug, Clone)]
pub struct Fingerprint {
    pub name: String,
    /// Compiled case-insensitively.
    pub pattern: Regex,
    /// Also fire on a plain `200 OK`.
    pub process_on_200: bool,
}

impl Fingerprint {
    /// Compile a fingerprint. Fails with [`SdtoError::Format`] for an empty
    /// name or a pattern that does not compile.
    pub fn new<S: Into<String>>(name: S, pattern: &str, process_on_200: bool) -> SdtoResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(SdtoError::Format("fingerprint name must not be empty".into()));
        }
        let pattern = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| SdtoError::Format(format!("pattern of {name:?} does not compile: {e}")))?;
        Ok(Self {
            name,
            pattern,
            process_on_200,
        })
    }

    /// "Contains at least one match" test against a response body.
    #[inline]
    #[must_use]
    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// A target that matched a fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub target: Target,
    #[serde(rename = "match")]
    pub fingerprint: String,
}

impl Finding {
    #[inline]
    #[must_use]
    pub fn new<S: Into<String>>(target: Target, fingerprint: S) -> Self {
        Self {
            target,
            fingerprint: fingerprint.into(),
        }
    }
}

/// Result of probing a single target.
#[derive(Debug)]
pub enum ProbeOutcome {
    Match(Finding),
    NoMatch,
    Failed { target: Target, cause: SdtoError },
}

impl ProbeOutcome {
    #[inline]
    #[must_use]
    pub fn matched(target: Target, fingerprint: &Fingerprint) -> Self {
        ProbeOutcome::Match(Finding::new(target, fingerprint.name.clone()))
    }

    #[inline]
    #[must_use]
    pub fn failed(target: Target, cause: SdtoError) -> Self {
        ProbeOutcome::Failed { target, cause }
    }

    #[inline]
    #[must_use]
    pub const fn is_match(&self) -> bool {
        matches!(self, ProbeOutcome::Match(_))
    }

    #[inline]
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, ProbeOutcome::Failed { .. })
    }

    /// Only matches survive into a scan result.
    #[inline]
    #[must_use]
    pub fn into_finding(self) -> Option<Finding> {
        match self {
            ProbeOutcome::Match(finding) => Some(finding),
            _ => None,
        }
    }
}

/// Everything a scan run needs, already parsed from flags and files.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub targets: Vec<Target>,
    /// Header names are stored lowercased.
    pub headers: BTreeMap<String, String>,
    pub concurrency: usize,
    /// Total per-request timeout.
    pub timeout: Option<Duration>,
    pub proxy: Option<String>,
    /// Scheme used for targets given without one.
    pub use_tls: bool,
    pub fingerprints: Arc<[Fingerprint]>,
}

impl ScanOptions {
    #[must_use]
    pub fn new(targets: Vec<Target>, fingerprints: Arc<[Fingerprint]>) -> Self {
        Self {
            targets,
            headers: BTreeMap::new(),
            concurrency: DEFAULT_CONCURRENCY,
            timeout: None,
            proxy: None,
            use_tls: true,
            fingerprints,
        }
    }

    #[inline]
    #[must_use]
    pub fn with_header<N: AsRef<str>, V: Into<String>>(mut self, name: N, value: V) -> Self {
        self.headers
            .insert(name.as_ref().trim().to_ascii_lowercase(), value.into());
        self
    }

    /// Fill in `user-agent` and `accept-language` unless already configured.
    #[must_use]
    pub fn with_default_headers(mut self) -> Self {
        self.headers
            .entry("user-agent".to_string())
            .or_insert_with(|| DEFAULT_USER_AGENT.to_string());
        self.headers
            .entry("accept-language".to_string())
            .or_insert_with(|| DEFAULT_ACCEPT_LANGUAGE.to_string());
        self
    }

    #[inline]
    #[must_use]
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    #[inline]
    #[must_use]
    pub fn with_tls(mut self, use_tls: bool) -> Self {
        self.use_tls = use_tls;
        self
    }

    /// Check the invariants a run relies on before any request is issued.
    pub fn validate(&self) -> SdtoResult<()> {
        if self.concurrency == 0 {
            return Err(SdtoError::Config("concurrency must be at least 1".into()));
        }
        if let Some(timeout) = self.timeout {
            if timeout.is_zero() {
                return Err(SdtoError::Config("timeout must be strictly positive".into()));
            }
        }
        if self.targets.is_empty() {
            return Err(SdtoError::Config("no targets specified".into()));
        }
        Ok(())
    }
}

/// Aggregate counters for one scan run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanStats {
    pub total_targets: usize,
    pub matched: usize,
    pub unmatched: usize,
    pub failed: usize,
    pub elapsed: Duration,
}

impl ScanStats {
    #[inline]
    #[must_use]
    pub fn new(total_targets: usize) -> Self {
        Self {
            total_targets,
            ..Default::default()
        }
    }

    /// Probes that reached an outcome, whatever it was.
    #[inline]
    #[must_use]
    pub fn completed(&self) -> usize {
        self.matched + self.unmatched + self.failed
    }
}

/// Findings of a finished scan, in completion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanResult {
    pub id: Uuid,
    pub findings: Vec<Finding>,
    pub stats: ScanStats,
}

impl ScanResult {
    #[must_use]
    pub fn new(id: Uuid, findings: Vec<Finding>, stats: ScanStats) -> Self {
        Self { id, findings, stats }
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.findings.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.findings.is_empty()
    }

    /// `(target, fingerprint name)` pairs, the shape formatters consume.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.findings
            .iter()
            .map(|f| (f.target.as_str(), f.fingerprint.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_fingerprints() -> Arc<[Fingerprint]> {
        Arc::from(Vec::<Fingerprint>::new())
    }

    #[test]
    fn target_is_kept_verbatim() {
        let t = Target::from("  Example.COM ");
        assert_eq!(t.as_str(), "  Example.COM ");
        assert_eq!(t.to_string(), "  Example.COM ");
    }

    #[test]
    fn fingerprint_is_case_insensitive() {
        let fp =
            Fingerprint::new("Github", r"There isn't a Github Pages site here\.", false).unwrap();
        assert!(fp.is_match("<p>THERE ISN'T A GITHUB PAGES SITE HERE.</p>"));
        assert!(!fp.is_match("There is a Github Pages site here."));
    }

    #[test]
    fn fingerprint_rejects_bad_input() {
        assert!(matches!(
            Fingerprint::new("", "x", false),
            Err(SdtoError::Format(_))
        ));
        assert!(matches!(
            Fingerprint::new("broken", "(unclosed", false),
            Err(SdtoError::Format(_))
        ));
    }

    #[test]
    fn headers_are_lowercased_and_defaults_do_not_override() {
        let opts = ScanOptions::new(vec!["a.com".into()], no_fingerprints())
            .with_header("User-Agent", "custom")
            .with_default_headers();
        assert_eq!(opts.headers.get("user-agent").map(String::as_str), Some("custom"));
        assert_eq!(
            opts.headers.get("accept-language").map(String::as_str),
            Some(DEFAULT_ACCEPT_LANGUAGE)
        );
    }

    #[test]
    fn options_validation() {
        let base = ScanOptions::new(vec!["a.com".into()], no_fingerprints());
        assert!(base.validate().is_ok());
        assert!(base.clone().with_concurrency(0).validate().is_err());
        assert!(base
            .clone()
            .with_timeout(Some(Duration::ZERO))
            .validate()
            .is_err());
        assert!(ScanOptions::new(Vec::new(), no_fingerprints()).validate().is_err());
    }

    #[test]
    fn finding_serializes_with_match_key() {
        let f = Finding::new("a.com".into(), "Github");
        let json = serde_json::to_string(&f).unwrap();
        assert_eq!(json, r#"{"target":"a.com","match":"Github"}"#);
    }

    #[test]
    fn only_matches_become_findings() {
        assert!(ProbeOutcome::NoMatch.into_finding().is_none());
        let failed = ProbeOutcome::failed("x".into(), SdtoError::Network("refused".into()));
        assert!(failed.is_failed());
        assert!(failed.into_finding().is_none());
        let m = ProbeOutcome::Match(Finding::new("a.com".into(), "Surge"));
        assert_eq!(m.into_finding().unwrap().fingerprint, "Surge");
    }

    #[test]
    fn stats_completed() {
        let mut stats = ScanStats::new(4);
        stats.matched = 1;
        stats.unmatched = 2;
        stats.failed = 1;
        assert_eq!(stats.completed(), 4);
    }
}
