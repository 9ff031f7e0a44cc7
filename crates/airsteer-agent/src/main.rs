//! Airsteer agent binary
//!
//! Steers this machine's Wi-Fi association toward its assigned access point.

use airsteer_agent::{AgentConfig, MachineIdentity, NmcliNetwork, SteeringController};
use std::process::ExitCode;
use tokio::sync::watch;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEBUG_FILTER: &str =
    "info,airsteer=debug,airsteer_agent=debug,airsteer_assign=debug,airsteer_geometry=debug";

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AgentConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("airsteer: {e}");
            return ExitCode::FAILURE;
        }
    };

    // Initialize tracing
    let default_filter = if config.debug { DEBUG_FILTER } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Airsteer agent");

    let identity = MachineIdentity::from_config(&config);
    let network = match NmcliNetwork::connect(config.connection.as_deref()).await {
        Ok(network) => network,
        Err(e) => {
            tracing::error!("Cannot manage Wi-Fi: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        shutdown_signal().await;
        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
        // keep the channel open until the controller has seen the signal
        std::future::pending::<()>().await;
    });

    // Cycle errors are logged by the controller as they happen.
    match SteeringController::new(config, identity, network)
        .run(shutdown_rx)
        .await
    {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}

/// Resolve on Ctrl-C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Cannot listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Cannot listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
