// runner.rs
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use sdto_common::{Fingerprint, ScanOptions, Target};
use sdto_fingerprint::{default_fingerprints, load_from_str, FingerprintEngine};
use sdto_orchestrator::scan;
use sdto_targets::TargetLoader;

use crate::args::ScanArgs;
use crate::output::{print_banner, write_results};

pub async fn run_scan(args: ScanArgs) -> Result<()> {
    // Everything that can be fatal is loaded before the first request.
    let fingerprints = load_fingerprints(args.fingerprints.as_deref()).await?;
    let targets = TargetLoader::load(args.targets_list.as_deref(), &args.targets)
        .await
        .context("Failed to load targets")?;

    let options = build_options(&args, targets, fingerprints);
    options.validate().context("Invalid scan options")?;

    info!("Targets: {}", options.targets.len());
    info!("Fingerprints: {}", options.fingerprints.len());
    info!("Concurrency: {}", options.concurrency);
    if let Some(timeout) = options.timeout {
        info!("Timeout: {:.3}s", timeout.as_secs_f64());
    }
    if let Some(proxy) = &options.proxy {
        info!("Proxy: {}", proxy);
    }

    print_banner();
    let result = scan(&options).await.context("Scan failed")?;
    info!("Scan {} found {} potential takeover(s)", result.id, result.len());

    write_results(&result.findings, args.output_format, args.output.as_deref())
}

/// Print the names of the fingerprints a scan would use.
pub async fn list_fingerprints(path: Option<&Path>) -> Result<()> {
    let engine = FingerprintEngine::new(load_fingerprints(path).await?);
    info!(count = engine.len(), "Loaded fingerprints");
    print!("{}", fingerprint_listing(&engine));
    Ok(())
}

/// One fingerprint name per line, in match order.
fn fingerprint_listing(engine: &FingerprintEngine) -> String {
    engine.names().fold(String::new(), |mut out, name| {
        out.push_str(name);
        out.push('\n');
        out
    })
}

/// Built-in set unless a definitions file is given.
pub async fn load_fingerprints(path: Option<&Path>) -> Result<Arc<[Fingerprint]>> {
    match path {
        Some(path) => {
            let json = tokio::fs::read_to_string(path)
                .await
                .with_context(|| format!("Failed to read fingerprints from {}", path.display()))?;
            let fingerprints = load_from_str(&json)
                .with_context(|| format!("Failed to load fingerprints from {}", path.display()))?;
            Ok(fingerprints.into())
        }
        None => default_fingerprints().context("Built-in fingerprints failed to load"),
    }
}

fn build_options(
    args: &ScanArgs,
    targets: Vec<Target>,
    fingerprints: Arc<[Fingerprint]>,
) -> ScanOptions {
    let options = args
        .headers
        .iter()
        .fold(ScanOptions::new(targets, fingerprints), |opts, (name, value)| {
            opts.with_header(name, value.clone())
        });

    options
        .with_default_headers()
        .with_concurrency(usize::from(args.concurrency))
        .with_timeout(args.timeout)
        .with_proxy(args.proxy.clone())
        .with_tls(!args.no_tls)
}
