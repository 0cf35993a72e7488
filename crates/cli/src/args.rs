use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::output::OutputFormat;

/// Longest per-request timeout accepted, in seconds.
const MAX_TIMEOUT_SECS: f64 = 120.0;

#[derive(Parser)]
#[command(name = "sdto")]
#[command(version)]
#[command(about = "sdto - subdomain takeover scanner", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe targets for dangling third-party services
    Scan(ScanArgs),

    /// List the fingerprints a scan would use
    Fingerprints {
        /// Fingerprints file path (JSON); built-in set when omitted
        #[arg(short, long)]
        fingerprints: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct ScanArgs {
    /// Domain(s) to scan. Repeatable; also accepts a.com,b.com
    #[arg(short = 't', long = "target")]
    pub targets: Vec<String>,

    /// Domains list in a file (whitespace separated); overrides --target
    #[arg(short = 'l', long)]
    pub targets_list: Option<PathBuf>,

    /// HTTP header, "Name: Value". Repeatable
    #[arg(short = 'H', long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// Max number of concurrent requests
    #[arg(short, long, default_value_t = 5, value_parser = clap::value_parser!(u16).range(1..=100))]
    pub concurrency: u16,

    /// HTTP request timeout in seconds (0 < T <= 120)
    #[arg(short = 'T', long, value_parser = parse_timeout)]
    pub timeout: Option<Duration>,

    /// Proxy to use, e.g. http://127.0.0.1:8080
    #[arg(short, long)]
    pub proxy: Option<String>,

    /// Write results to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'F', long, value_enum, ignore_case = true, default_value_t = OutputFormat::Txt)]
    pub output_format: OutputFormat,

    /// Fingerprints file path (JSON); built-in set when omitted
    #[arg(short, long)]
    pub fingerprints: Option<PathBuf>,

    /// Use http:// instead of https:// for targets given without a scheme
    #[arg(long)]
    pub no_tls: bool,
}

/// "Name: Value" -> (lowercased name, trimmed value)
fn parse_header(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected \"Name: Value\", got {raw:?}"))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("empty header name in {raw:?}"));
    }
    Ok((name.to_ascii_lowercase(), value.trim().to_string()))
}

fn parse_timeout(raw: &str) -> Result<Duration, String> {
    let secs: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("invalid timeout {raw:?}"))?;
    if !(secs > 0.0 && secs <= MAX_TIMEOUT_SECS) {
        return Err(format!("timeout must be in (0, {MAX_TIMEOUT_SECS}] seconds"));
    }
    Ok(Duration::from_secs_f64(secs))
}
