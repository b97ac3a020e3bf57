//! HTTP server for the probe endpoints
//!
//! - `/` - greeting
//! - `/health/liveness` - liveness probe (200 `UP` / 503 `DOWN`)
//! - `/health/readiness` - readiness probe (always 200 `READY`)
//! - `/env` - environment echo
//! - `/health/liveness/toggle` - flip the liveness flag
//! - `/shutdown` - acknowledge, then trigger graceful termination
//!
//! Also provides the shared shutdown conduit fed by SIGTERM/SIGINT and the
//! shutdown route.

mod api;
mod config;
mod health;
pub mod shutdown;

pub use api::{
    bind, build_router, run_server, AppState, EnvBody, MessageBody, StatusBody, ToggleBody,
};
pub use config::{ServerConfig, ENV_VAR};
pub use health::LivenessState;
pub use shutdown::{trigger_on_signal, Shutdown};

#[cfg(test)]
#[path = "api_test.rs"]
mod api_tests;

#[cfg(test)]
#[path = "config_test.rs"]
mod config_tests;

#[cfg(test)]
#[path = "health_test.rs"]
mod health_tests;

#[cfg(test)]
#[path = "shutdown_test.rs"]
mod shutdown_tests;
