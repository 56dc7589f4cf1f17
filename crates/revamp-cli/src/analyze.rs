//! `analyze` command handler.
//!
//! Profiles are analyzed one after another through a single analyzer so the
//! cache and fetch budget apply across the whole run. A failed profile is
//! logged and skipped; the command fails only when every profile failed.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use revamp_core::{AnalysisResult, AppConfig};
use revamp_scraper::{Analyzer, ClientOptions, ProfileClient, RandomPacer};

#[derive(Debug, Default)]
pub(crate) struct OutputOptions {
    pub(crate) output: Option<PathBuf>,
    pub(crate) compact: bool,
}

pub(crate) async fn run_analyze(
    config: &AppConfig,
    usernames: &[String],
    options: &OutputOptions,
) -> anyhow::Result<()> {
    let pacer = RandomPacer::new(
        Duration::from_millis(config.delay_min_ms),
        Duration::from_millis(config.delay_max_ms),
        config.rng_seed,
    );
    let (delay_min, delay_max) = pacer.bounds();
    tracing::debug!(
        delay_min_ms = u64::try_from(delay_min.as_millis()).unwrap_or(u64::MAX),
        delay_max_ms = u64::try_from(delay_max.as_millis()).unwrap_or(u64::MAX),
        seeded = config.rng_seed.is_some(),
        "request pacing configured"
    );
    let client = ProfileClient::new(ClientOptions::from_app_config(config), Arc::new(pacer))?;
    let analyzer = Analyzer::from_app_config(client, config);

    let mut results: Vec<AnalysisResult> = Vec::with_capacity(usernames.len());
    let mut failures = 0_usize;
    for username in usernames {
        match analyzer.analyze(username).await {
            Ok(result) => results.push(result),
            Err(e) => {
                failures += 1;
                tracing::error!(
                    username = %username,
                    stage = ?e.stage(),
                    error = %e,
                    "profile analysis failed"
                );
            }
        }
    }

    if results.is_empty() {
        anyhow::bail!("all {failures} profile analyses failed");
    }

    let rendered = render(&results, options.compact)?;
    match &options.output {
        Some(path) => {
            std::fs::write(path, rendered + "\n")?;
            tracing::info!(
                path = %path.display(),
                profiles = results.len(),
                failures,
                "analysis written"
            );
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

/// A single result renders as an object, several as an array.
pub(crate) fn render(results: &[AnalysisResult], compact: bool) -> anyhow::Result<String> {
    let value = match results {
        [single] => serde_json::to_value(single)?,
        many => serde_json::to_value(many)?,
    };
    let rendered = if compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };
    Ok(rendered)
}
