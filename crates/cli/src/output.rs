//! Output formatting for scan results

use anyhow::{Context, Result};
use clap::ValueEnum;
use std::path::Path;

use sdto_common::{Finding, VERSION};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[value(alias = "text")]
    Txt,
    Json,
}

/// Render findings in the requested format.
pub fn render(findings: &[Finding], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Txt => Ok(render_text(findings)),
        OutputFormat::Json => {
            serde_json::to_string_pretty(findings).context("Failed to serialize findings")
        }
    }
}

/// One line per finding.
fn render_text(findings: &[Finding]) -> String {
    findings
        .iter()
        .map(|f| format!("Potential takeover: [{}] -> {}", f.target, f.fingerprint))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Print to stdout, or write to `output` when given.
pub fn write_results(
    findings: &[Finding],
    format: OutputFormat,
    output: Option<&Path>,
) -> Result<()> {
    let rendered = render(findings, format)?;
    match output {
        Some(path) => std::fs::write(path, rendered)
            .with_context(|| format!("Failed to write results to {}", path.display()))?,
        None => {
            if !rendered.is_empty() {
                println!("{}", rendered);
            }
        }
    }
    Ok(())
}

pub fn print_banner() {
    eprintln!();
    eprintln!("   _______  __________ ");
    eprintln!("  / __/ _ \\/_  __/ __ \\");
    eprintln!(" _\\ \\/ // / / / / /_/ /");
    eprintln!("/___/____/ /_/  \\____/\t\t{}", VERSION);
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn findings() -> Vec<Finding> {
        vec![
            Finding::new("a.example.com".into(), "Github"),
            Finding::new("b.example.com".into(), "AWS/S3"),
        ]
    }

    #[test]
    fn test_render_text() {
        let text = render(&findings(), OutputFormat::Txt).unwrap();
        assert_eq!(
            text,
            "Potential takeover: [a.example.com] -> Github\nPotential takeover: [b.example.com] -> AWS/S3"
        );
        assert_eq!(render(&[], OutputFormat::Txt).unwrap(), "");
    }

    #[test]
    fn test_render_json() {
        let json = render(&findings(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(
            value,
            serde_json::json!([
                {"target": "a.example.com", "match": "Github"},
                {"target": "b.example.com", "match": "AWS/S3"}
            ])
        );
        assert_eq!(render(&[], OutputFormat::Json).unwrap(), "[]");
    }

    #[test]
    fn test_write_results_to_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("results.json");
        write_results(&findings(), OutputFormat::Json, Some(&path)).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("\"match\": \"Github\""));
    }
}
