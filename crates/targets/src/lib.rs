//! Target loading - command-line values and target list files
//!
//! Targets are kept as given: no deduplication, no canonicalization.
//! Supported sources:
//! - repeated command-line values, each optionally comma-separated: "a.com,b.com"
//! - a list file of whitespace-separated targets

use std::path::Path;

use sdto_common::{SdtoError, SdtoResult, Target};
use tracing::debug;

pub struct TargetLoader;

impl TargetLoader {
    pub fn new() -> Self {
        Self
    }

    /// Targets from command-line values, split on commas, blanks dropped.
    pub fn from_values<I, S>(values: I) -> Vec<Target>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        values
            .into_iter()
            .flat_map(|value| {
                value
                    .as_ref()
                    .split(',')
                    .map(str::trim)
                    .filter(|t| !t.is_empty())
                    .map(Target::from)
                    .collect::<Vec<_>>()
            })
            .collect()
    }

    /// Targets from the contents of a list file.
    pub fn parse_list(text: &str) -> Vec<Target> {
        text.split_whitespace().map(Target::from).collect()
    }

    /// Read a list file.
    pub async fn read_list(path: &Path) -> SdtoResult<Vec<Target>> {
        let text = tokio::fs::read_to_string(path).await?;
        let targets = Self::parse_list(&text);
        debug!(path = %path.display(), count = targets.len(), "Loaded target list");
        Ok(targets)
    }

    /// Resolve the scan's target list. A list file takes precedence over
    /// command-line values; ending up with no targets is an error.
    pub async fn load<S: AsRef<str>>(
        list: Option<&Path>,
        values: &[S],
    ) -> SdtoResult<Vec<Target>> {
        let targets = match list {
            Some(path) => Self::read_list(path).await?,
            None => Self::from_values(values),
        };

        if targets.is_empty() {
            return Err(SdtoError::Config(
                "Either --target or --targets-list must be specified".into(),
            ));
        }
        Ok(targets)
    }
}

impl Default for TargetLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn raw(targets: &[Target]) -> Vec<&str> {
        targets.iter().map(Target::as_str).collect()
    }

    #[test]
    fn test_values_split_on_commas() {
        let targets = TargetLoader::from_values(["a.example.com, b.example.com", "c.example.com"]);
        assert_eq!(
            raw(&targets),
            vec!["a.example.com", "b.example.com", "c.example.com"]
        );
    }

    #[test]
    fn test_values_keep_duplicates_and_case() {
        let targets =
            TargetLoader::from_values(["Dup.example.com", "dup.example.com", "Dup.example.com"]);
        assert_eq!(targets.len(), 3);
        assert_eq!(targets[0].as_str(), "Dup.example.com");
    }

    #[test]
    fn test_blank_values_dropped() {
        assert!(TargetLoader::from_values(["", " , ,", "  "]).is_empty());
    }

    #[test]
    fn test_parse_list_any_whitespace() {
        let targets = TargetLoader::parse_list("a.com\nb.com\r\n\tc.com  d.com\n\n");
        assert_eq!(raw(&targets), vec!["a.com", "b.com", "c.com", "d.com"]);
    }

    #[tokio::test]
    async fn test_list_file_takes_precedence() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "from-file.example.com\nsecond.example.com").unwrap();

        let targets = TargetLoader::load(Some(file.path()), &["ignored.example.com"])
            .await
            .unwrap();
        assert_eq!(
            raw(&targets),
            vec!["from-file.example.com", "second.example.com"]
        );
    }

    #[tokio::test]
    async fn test_missing_sources_rejected() {
        let none: [&str; 0] = [];
        let r = TargetLoader::load(None, &none).await;
        assert!(matches!(r, Err(SdtoError::Config(_))));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let path = Path::new("/nonexistent/sdto/targets.txt");
        let r = TargetLoader::load(Some(path), &["a.com"]).await;
        assert!(matches!(r, Err(SdtoError::Io(_))));
    }
}
