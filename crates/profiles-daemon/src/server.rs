//! Server setup and lifecycle management

use crate::api::create_router;
use crate::api::rest::state::AppState;
use crate::cache::{InMemoryProfileCache, ProfileCache};
use crate::config::DaemonConfig;
use crate::error::{DaemonError, DaemonResult};
use crate::service::{ProfileCacheService, ProfileService};
use crate::storage::{InMemoryProfileStore, ProfileStore};
use crate::updater::ProfileUpdater;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::watch;

/// Profiles daemon server
pub struct Server {
    config: DaemonConfig,
    store: Arc<dyn ProfileStore>,
    cache: Arc<dyn ProfileCache>,
    updater: Arc<ProfileUpdater>,
}

impl Server {
    /// Create a new server with the given configuration
    pub fn new(config: DaemonConfig) -> DaemonResult<Self> {
        if config.updater.enabled && config.updater.interval_secs == 0 {
            return Err(DaemonError::Config(
                "updater.interval_secs must be greater than zero".to_string(),
            ));
        }

        let store: Arc<dyn ProfileStore> = Arc::new(InMemoryProfileStore::new());
        let cache: Arc<dyn ProfileCache> = Arc::new(InMemoryProfileCache::new(
            Duration::from_secs(config.cache.ttl_secs),
        ));

        let updater = Arc::new(ProfileUpdater::new(
            config.updater.clone(),
            store.clone(),
            Some(cache.clone()),
        ));

        Ok(Self {
            config,
            store,
            cache,
            updater,
        })
    }

    /// Run the server
    pub async fn run(self) -> DaemonResult<()> {
        let addr = self.config.server.listen_addr;

        // Create app state
        let profiles = ProfileService::new(self.store.clone());
        let cached =
            ProfileCacheService::new(self.cache.clone(), self.store.clone(), profiles.clone());
        let state = AppState::new(self.store.clone(), profiles, cached);

        // Create router
        let app = create_router(state, self.config.server.enable_cors);

        // Create listener
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("profiles daemon listening on {}", addr);

        // Start updater in background
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let updater_task = if self.config.updater.enabled {
            Some(tokio::spawn(self.updater.clone().run(shutdown_rx)))
        } else {
            tracing::info!("background updater disabled");
            None
        };

        // Run server with graceful shutdown
        let served = axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| DaemonError::Server(e.to_string()));

        tracing::info!("profiles daemon shutting down");

        // Stop updater
        let _ = shutdown_tx.send(true);
        if let Some(task) = updater_task {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "updater task ended abnormally");
            }
        }

        served
    }
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install terminate handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received terminate signal, initiating graceful shutdown");
        }
    }
}
