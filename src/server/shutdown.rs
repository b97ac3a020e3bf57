//! Graceful termination conduit
//!
//! Two producers share one cancellation token: the task translating OS
//! signals and the `POST /shutdown` route's delayed trigger. The listener
//! consumes it as its graceful-shutdown future, and `main` consumes it again
//! to start the bounded drain.

use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// Shared termination conduit
///
/// Cheap to clone; every clone observes the same trigger. The token latches
/// on the first trigger, so both producers firing is harmless.
#[derive(Clone, Default)]
pub struct Shutdown {
    token: CancellationToken,
}

impl Shutdown {
    /// Create an untriggered conduit
    pub fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Begin termination now
    pub fn trigger(&self) {
        if !self.token.is_cancelled() {
            info!("Shutdown triggered");
        }
        self.token.cancel();
    }

    /// Begin termination after `delay`, from a background task
    ///
    /// The shutdown route uses this so its acknowledgement reaches the
    /// client before the listener stops accepting.
    pub fn trigger_after(&self, delay: Duration) {
        let conduit = self.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            conduit.trigger();
        });
    }

    /// Wait until termination has been triggered
    pub async fn wait(&self) {
        self.token.cancelled().await;
    }

    /// Check for a trigger without waiting
    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Feed OS termination signals into the conduit
///
/// Registers SIGTERM and SIGINT handlers, then triggers the conduit when
/// either arrives. Meant to be spawned at startup; handler registration
/// failures are returned, not swallowed.
#[cfg(unix)]
pub async fn trigger_on_signal(shutdown: Shutdown) -> Result<(), std::io::Error> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    let name = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };
    info!(signal = name, "Termination signal received");
    shutdown.trigger();
    Ok(())
}

/// Feed Ctrl+C into the conduit (non-unix platforms)
#[cfg(not(unix))]
pub async fn trigger_on_signal(shutdown: Shutdown) -> Result<(), std::io::Error> {
    tokio::signal::ctrl_c().await?;
    info!(signal = "CTRL_C", "Termination signal received");
    shutdown.trigger();
    Ok(())
}
