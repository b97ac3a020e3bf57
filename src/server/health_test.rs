//! Tests for the liveness and readiness probes

use super::*;
use std::time::Duration;

/// Start the full API server on an ephemeral port
///
/// Returns the port, the liveness handle shared with the server, and the
/// server task for cleanup.
async fn spawn_server() -> (
    u16,
    LivenessState,
    tokio::task::JoinHandle<Result<(), std::io::Error>>,
) {
    let liveness = LivenessState::new();
    let shutdown = Shutdown::new();
    let state = AppState::new(liveness.clone(), shutdown.clone(), Duration::from_millis(50));

    let listener = bind(0).await.expect("Failed to bind test listener");
    let port = listener.local_addr().expect("No local addr").port();
    let handle = tokio::spawn(run_server(listener, state, shutdown));

    (port, liveness, handle)
}

/// Test that the liveness probe starts up
#[tokio::test]
async fn test_liveness_starts_up() {
    let (port, _liveness, handle) = spawn_server().await;
    let client = reqwest::Client::new();

    let response = client
        .get(format!("http://127.0.0.1:{}/health/liveness", port))
        .timeout(Duration::from_secs(5))
        .send()
        .await
        .expect("Failed to connect to probe API");

    assert_eq!(response.status(), 200, "Liveness probe should start at 200");
    // Assert the exact wire shape, not just the typed view
    let body: serde_json::Value = response.json().await.expect("Invalid liveness body");
    assert_eq!(body, serde_json::json!({ "status": "UP" }));

    handle.abort();
}

/// Test that the liveness probe's status code tracks the flag across toggles
#[tokio::test]
async fn test_liveness_tracks_toggle() {
    let (port, _liveness, handle) = spawn_server().await;
    let client = reqwest::Client::new();
    let toggle_url = format!("http://127.0.0.1:{}/health/liveness/toggle", port);
    let probe_url = format!("http://127.0.0.1:{}/health/liveness", port);

    // First toggle: down
    let response = client
        .post(&toggle_url)
        .send()
        .await
        .expect("Failed to toggle liveness");
    assert_eq!(response.status(), 200);
    let body: ToggleBody = response.json().await.expect("Invalid toggle body");
    assert!(!body.alive, "First toggle should report down");

    let response = client
        .get(&probe_url)
        .send()
        .await
        .expect("Failed to probe liveness");
    assert_eq!(response.status(), 503, "Probe should be 503 while down");
    let body: StatusBody = response.json().await.expect("Invalid liveness body");
    assert_eq!(body.status, "DOWN");

    // Second toggle: back up
    let response = client
        .post(&toggle_url)
        .send()
        .await
        .expect("Failed to toggle liveness");
    let body: ToggleBody = response.json().await.expect("Invalid toggle body");
    assert!(body.alive, "Second toggle should restore up");

    let response = client
        .get(&probe_url)
        .send()
        .await
        .expect("Failed to probe liveness");
    assert_eq!(response.status(), 200, "Probe should be 200 again");

    handle.abort();
}

/// Test that the readiness probe answers 200 regardless of the liveness flag
#[tokio::test]
async fn test_readiness_always_200() {
    let (port, liveness, handle) = spawn_server().await;
    let client = reqwest::Client::new();
    let url = format!("http://127.0.0.1:{}/health/readiness", port);

    let response = client
        .get(&url)
        .send()
        .await
        .expect("Failed to probe readiness");
    assert_eq!(response.status(), 200);
    let body: StatusBody = response.json().await.expect("Invalid readiness body");
    assert_eq!(body.status, "READY");

    // Readiness is independent of the liveness flag
    liveness.toggle();
    let response = client
        .get(&url)
        .send()
        .await
        .expect("Failed to probe readiness");
    assert_eq!(
        response.status(),
        200,
        "Readiness should stay 200 while liveness is down"
    );

    handle.abort();
}

/// Test LivenessState flag behavior
#[test]
fn test_liveness_state_toggle_roundtrip() {
    let state = LivenessState::new();

    // Starts up
    assert!(state.is_alive());

    // Toggle reports the new value
    assert!(!state.toggle());
    assert!(!state.is_alive());

    // Double toggle restores the original value
    assert!(state.toggle());
    assert!(state.is_alive());

    // Clones share the flag
    let cloned = state.clone();
    cloned.toggle();
    assert!(!state.is_alive());
}
