//! Profiles Daemon - profile storage, caching and permission checks
//!
//! The daemon provides:
//! - REST API for profile CRUD and permission validation
//! - A cache in front of the profile store
//! - A background job that periodically rewrites profile parameters

use clap::Parser;
use profiles_daemon::error::{DaemonError, DaemonResult};
use profiles_daemon::{DaemonConfig, Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Profiles Daemon CLI
#[derive(Parser)]
#[command(name = "profilesd")]
#[command(about = "Profiles Daemon - profile storage and permission validation", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "PROFILES_CONFIG")]
    config: Option<String>,

    /// Listen address (overrides the configuration file)
    #[arg(short, long, env = "PROFILES_LISTEN_ADDR")]
    listen: Option<String>,

    /// Log level
    #[arg(long, env = "PROFILES_LOG_LEVEL")]
    log_level: Option<String>,

    /// Enable JSON logging
    #[arg(long, env = "PROFILES_LOG_JSON")]
    json: bool,

    /// Seconds between updater passes
    #[arg(long, env = "PROFILES_UPDATE_INTERVAL")]
    update_interval: Option<u64>,

    /// Disable the background updater
    #[arg(long)]
    no_updater: bool,
}

#[tokio::main]
async fn main() -> DaemonResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let mut config = DaemonConfig::load(cli.config.as_deref())
        .map_err(|e| DaemonError::Config(e.to_string()))?;

    // Override with CLI args
    if let Some(listen) = &cli.listen {
        config.server.listen_addr = listen
            .parse()
            .map_err(|e| DaemonError::Config(format!("Invalid listen address: {}", e)))?;
    }
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if cli.json {
        config.logging.json = true;
    }
    if let Some(interval) = cli.update_interval {
        config.updater.interval_secs = interval;
    }
    if cli.no_updater {
        config.updater.enabled = false;
    }

    // Initialize tracing
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| config.logging.level.clone().into());

    if config.logging.json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        listen = %config.server.listen_addr,
        updater = config.updater.enabled,
        interval_secs = config.updater.interval_secs,
        "starting profiles daemon"
    );

    // Create and run server
    let server = Server::new(config)?;
    server.run().await
}
