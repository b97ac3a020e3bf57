//! Liveness and readiness probes
//!
//! - `/health/liveness` - 200 `UP` while the flag is up, 503 `DOWN` after it
//!   has been toggled off
//! - `/health/readiness` - always 200 `READY`
//! - `/health/liveness/toggle` - flip the flag, return the new value

use crate::server::api::{AppState, StatusBody, ToggleBody};
use axum::{extract::State, http::StatusCode, Json};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Process-wide liveness flag
///
/// Starts up (alive). Only the toggle endpoint mutates it; the flag is never
/// touched outside these accessors.
#[derive(Debug, Clone)]
pub struct LivenessState {
    alive: Arc<AtomicBool>,
}

impl LivenessState {
    /// Create a new liveness flag (initially up)
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Check the flag
    pub fn is_alive(&self) -> bool {
        self.alive.load(Ordering::SeqCst)
    }

    /// Flip the flag, returning the new value
    pub fn toggle(&self) -> bool {
        // fetch_xor returns the previous value
        !self.alive.fetch_xor(true, Ordering::SeqCst)
    }
}

impl Default for LivenessState {
    fn default() -> Self {
        Self::new()
    }
}

/// Liveness probe handler
///
/// Status code tracks the flag: 200 when up, 503 when down, so an
/// orchestrator restarts the process once the flag is toggled off.
pub(crate) async fn liveness(State(state): State<AppState>) -> (StatusCode, Json<StatusBody>) {
    if state.liveness.is_alive() {
        (StatusCode::OK, Json(StatusBody::new("UP")))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(StatusBody::new("DOWN")))
    }
}

/// Readiness probe handler
///
/// Always 200 - the service has no dependencies to wait on, so being able
/// to answer at all means it is ready for traffic.
pub(crate) async fn readiness() -> (StatusCode, Json<StatusBody>) {
    (StatusCode::OK, Json(StatusBody::new("READY")))
}

/// Liveness toggle handler
///
/// Flips the flag and reports the new value. Toggling twice restores the
/// original state.
pub(crate) async fn toggle_liveness(State(state): State<AppState>) -> Json<ToggleBody> {
    let alive = state.liveness.toggle();
    Json(ToggleBody { alive })
}
