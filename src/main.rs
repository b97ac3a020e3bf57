use clap::{Parser, Subcommand};
use pulssi::healthcheck;
use pulssi::server::{
    bind, run_server, trigger_on_signal, AppState, LivenessState, ServerConfig, Shutdown,
};
use std::time::Duration;
use tracing::{error, info};

/// Delay between the shutdown acknowledgement and the actual trigger
const SHUTDOWN_DELAY: Duration = Duration::from_millis(500);

/// How long in-flight requests get to drain before shutdown turns fatal
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Parser)]
#[command(name = "pulssi")]
#[command(about = "Minimal HTTP probe service", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Probe the liveness endpoint of a running instance
    Healthcheck,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present; real environment wins
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::from_env();

    if let Some(Commands::Healthcheck) = cli.command {
        return match healthcheck::check(config.port).await {
            Ok(()) => {
                info!(port = config.port, "Instance is live");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, port = config.port, "Health check failed");
                Err(e.into())
            }
        };
    }

    info!("Starting Pulssi probe service");

    // One termination conduit shared by both trigger sources
    let shutdown = Shutdown::new();

    // OS signals feed the same conduit as the shutdown route
    let signal_shutdown = shutdown.clone();
    tokio::spawn(async move {
        if let Err(e) = trigger_on_signal(signal_shutdown).await {
            error!(error = %e, "Failed to listen for termination signals");
        }
    });

    let state = AppState::new(LivenessState::new(), shutdown.clone(), SHUTDOWN_DELAY);

    // Bind before spawning so a port conflict fails startup immediately
    let listener = match bind(config.port).await {
        Ok(l) => l,
        Err(e) => {
            error!(error = %e, port = config.port, "Failed to bind probe API");
            return Err(e.into());
        }
    };

    let mut server = tokio::spawn(run_server(listener, state, shutdown.clone()));

    tokio::select! {
        res = &mut server => {
            // Server ended on its own, without a shutdown request
            return match res {
                Ok(Ok(())) => {
                    info!("Probe API stopped");
                    Ok(())
                }
                Ok(Err(e)) => {
                    error!(error = %e, "Probe API failed");
                    Err(e.into())
                }
                Err(e) => {
                    error!(error = %e, "Probe API task panicked");
                    Err(e.into())
                }
            };
        }
        _ = shutdown.wait() => {}
    }

    // Bounded drain: in-flight requests get SHUTDOWN_TIMEOUT to finish
    match tokio::time::timeout(SHUTDOWN_TIMEOUT, &mut server).await {
        Ok(Ok(Ok(()))) => {
            info!("Pulssi shut down gracefully");
            Ok(())
        }
        Ok(Ok(Err(e))) => {
            error!(error = %e, "Probe API failed during shutdown");
            Err(e.into())
        }
        Ok(Err(e)) => {
            error!(error = %e, "Probe API task panicked during shutdown");
            Err(e.into())
        }
        Err(_) => {
            error!(
                timeout_secs = SHUTDOWN_TIMEOUT.as_secs(),
                "In-flight requests did not drain in time"
            );
            server.abort();
            anyhow::bail!("graceful shutdown timed out")
        }
    }
}
