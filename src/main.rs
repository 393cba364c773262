use clap::{Parser, Subcommand};
use heartbeatd::config::HeartbeatConfig;
use heartbeatd::error::AppResult;
use heartbeatd::readiness::AtomicReadiness;
use heartbeatd::server::HttpService;
use heartbeatd::state::AppState;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

/// heartbeatd - A standalone heartbeat endpoint for load-balancer health checks
#[derive(Parser, Debug)]
#[command(name = "heartbeatd")]
#[command(version = "1.0.0")]
#[command(about = "A standalone heartbeat endpoint for load-balancer health checks", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the heartbeat server
    Serve {
        /// Home directory containing the configuration files
        #[arg(long, default_value = ".")]
        home: PathBuf,

        /// Bind address (overrides the configuration file)
        #[arg(long)]
        bind_address: Option<String>,

        /// Port to bind to (overrides the configuration file)
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print the effective configuration and exit
    ShowConfig {
        /// Home directory containing the configuration files
        #[arg(long, default_value = ".")]
        home: PathBuf,
    },
}

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(Level::INFO.to_string())),
        )
        .init();

    match cli.command {
        Commands::Serve {
            home,
            bind_address,
            port,
        } => {
            // Override config with CLI args if provided
            let mut config = HeartbeatConfig::load(&home);
            if let Some(bind_address) = bind_address {
                config.bind_address = bind_address;
            }
            if let Some(port) = port {
                config.port = port;
            }

            serve(config).await
        }
        Commands::ShowConfig { home } => {
            let config = HeartbeatConfig::load(&home);
            println!("{config}");
            Ok(())
        }
    }
}

/// Run the heartbeat service until a shutdown signal arrives.
///
/// The standalone service is its own monitored application: it becomes ready
/// once the listener is up and flips back to not ready as soon as shutdown
/// begins, so load balancers drain it before the socket closes.
async fn serve(config: HeartbeatConfig) -> AppResult<()> {
    let readiness = Arc::new(AtomicReadiness::default());
    let state = Arc::new(AppState::new(readiness.clone()));
    let mut service = HttpService::new(config, state);

    service.start().await?;
    readiness.set_ready(true);

    shutdown_signal().await;

    readiness.set_ready(false);
    service.stop().await;
    info!("Shutdown complete");
    Ok(())
}

/// Create a future that resolves when a shutdown signal is received.
///
/// On Unix-like systems, this listens for both Ctrl+C (SIGINT) and SIGTERM.
/// On other platforms, it only listens for Ctrl+C.
///
/// # Panics
///
/// Panics if signal handler installation fails. This is intentional because
/// signal handler failures are unrecoverable system-level errors that indicate
/// the OS cannot deliver shutdown signals, making graceful shutdown impossible.
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    #[cfg(not(unix))]
    ctrl_c.await;
}
