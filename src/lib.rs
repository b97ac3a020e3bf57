//! Pulssi - a minimal HTTP probe service
//!
//! Serves the endpoints an orchestrator points its probes at:
//! - `GET /` - greeting
//! - `GET /health/liveness` - 200 `UP` / 503 `DOWN` depending on the liveness flag
//! - `GET /health/readiness` - always 200 `READY`
//! - `GET /env` - echo of the `APP_ENV` variable
//! - `POST /health/liveness/toggle` - flip the liveness flag
//! - `POST /shutdown` - acknowledge, then begin graceful termination
//!
//! The binary also ships a `healthcheck` subcommand that probes a running
//! instance's liveness endpoint, for use as a container health check.

pub mod healthcheck;
pub mod server;

#[cfg(test)]
#[path = "healthcheck_test.rs"]
mod healthcheck_tests;
