//! HTTP API for the probe service
//!
//! Assembles the router, owns the shared state handed to handlers, and runs
//! the listener until the shutdown conduit fires.

use crate::server::config::ENV_VAR;
use crate::server::health::{self, LivenessState};
use crate::server::shutdown::Shutdown;
use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared state injected into handlers
#[derive(Clone)]
pub struct AppState {
    /// Liveness flag read by the probe and flipped by the toggle
    pub(crate) liveness: LivenessState,
    /// Termination conduit the `/shutdown` route triggers
    pub(crate) shutdown: Shutdown,
    /// Delay between the shutdown acknowledgement and the actual trigger
    pub(crate) shutdown_delay: Duration,
}

impl AppState {
    /// Create new server state
    pub fn new(liveness: LivenessState, shutdown: Shutdown, shutdown_delay: Duration) -> Self {
        Self {
            liveness,
            shutdown,
            shutdown_delay,
        }
    }
}

/// Probe status body (`UP`, `DOWN`, `READY`)
#[derive(Debug, Serialize, Deserialize)]
pub struct StatusBody {
    pub status: String,
}

impl StatusBody {
    pub(crate) fn new(status: &str) -> Self {
        Self {
            status: status.to_string(),
        }
    }
}

/// Greeting and shutdown acknowledgement body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageBody {
    pub message: String,
}

/// Environment echo body
#[derive(Debug, Serialize, Deserialize)]
pub struct EnvBody {
    pub environment: String,
}

/// Toggle response carrying the new liveness flag value
#[derive(Debug, Serialize, Deserialize)]
pub struct ToggleBody {
    pub alive: bool,
}

/// Root greeting handler
async fn root() -> Json<MessageBody> {
    Json(MessageBody {
        message: "Hello from Pulssi!".to_string(),
    })
}

/// Environment echo handler
///
/// Reads `APP_ENV` on every request so the echo reflects the current value;
/// unset echoes as the empty string.
async fn env_echo() -> Json<EnvBody> {
    Json(EnvBody {
        environment: std::env::var(ENV_VAR).unwrap_or_default(),
    })
}

/// Self-shutdown handler
///
/// Acknowledges immediately; the delayed trigger makes sure the 200 reaches
/// the client before the listener closes.
async fn trigger_shutdown(State(state): State<AppState>) -> Json<MessageBody> {
    info!("Shutdown requested via HTTP");
    state.shutdown.trigger_after(state.shutdown_delay);

    Json(MessageBody {
        message: "shutting down".to_string(),
    })
}

/// Build the router for all probe endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health/liveness", get(health::liveness))
        .route("/health/readiness", get(health::readiness))
        .route("/health/liveness/toggle", post(health::toggle_liveness))
        .route("/env", get(env_echo))
        .route("/shutdown", post(trigger_shutdown))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the listener on the given port
///
/// Kept separate from serving so startup failures (port in use) surface
/// immediately instead of inside a background task.
pub async fn bind(port: u16) -> Result<TcpListener, std::io::Error> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = TcpListener::bind(addr).await?;
    // Log after successful bind - the listener is actually accepting
    info!(addr = %listener.local_addr()?, "Probe API listening");
    Ok(listener)
}

/// Run the API server until the shutdown conduit fires, then drain
///
/// Returns once in-flight requests have completed after shutdown was
/// triggered; the caller bounds the drain with a timeout.
pub async fn run_server(
    listener: TcpListener,
    state: AppState,
    shutdown: Shutdown,
) -> Result<(), std::io::Error> {
    let app = build_router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.wait().await })
        .await
}
