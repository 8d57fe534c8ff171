use anyhow::{Context, Result};
use reqwest::Client;

use crate::config::KeepaliveConfig;
use crate::prober::{self, ProbeOutcome};
use crate::report::RunSummary;

/// Probe every configured project concurrently and wait for all of them.
///
/// One task per project, joined in input order; a slow project is bounded
/// by its own timeout, never by the others.
pub async fn run(config: &KeepaliveConfig) -> Result<RunSummary> {
    let client = Client::builder()
        .user_agent(format!("keepalive_probe/{}", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")?;

    let mut handles = Vec::with_capacity(config.projects.len());
    for project in config.projects.iter().cloned() {
        let client = client.clone();
        let timeout_ms = config.default_timeout_ms;
        handles.push(tokio::spawn(async move {
            prober::http::probe_http(&client, &project, timeout_ms).await
        }));
    }

    let mut outcomes: Vec<ProbeOutcome> = Vec::with_capacity(handles.len());
    for handle in handles {
        outcomes.push(handle.await.context("Probe task failed")?);
    }

    Ok(RunSummary::from_outcomes(outcomes))
}
