//! Liveness probe client for container health checks
//!
//! Backs the `pulssi healthcheck` subcommand: one GET against the local
//! instance's liveness endpoint, with the process exit status derived from
//! the result. No retries; the orchestrator owns the retry policy.

use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;

/// Hard cap on the probe round-trip
const PROBE_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum HealthCheckError {
    #[error("liveness request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("liveness endpoint returned {status}")]
    Unhealthy { status: StatusCode },
}

/// Probe the liveness endpoint of the instance listening on `port`
///
/// Makes exactly one attempt; a connection error or any non-200 status is
/// reported as an error.
pub async fn check(port: u16) -> Result<(), HealthCheckError> {
    let url = format!("http://127.0.0.1:{}/health/liveness", port);

    let response = reqwest::Client::new()
        .get(&url)
        .timeout(PROBE_TIMEOUT)
        .send()
        .await?;

    if response.status() != StatusCode::OK {
        return Err(HealthCheckError::Unhealthy {
            status: response.status(),
        });
    }

    Ok(())
}
