//! ServerBuilder for fluent API to build HTTP servers

use super::router::build_router;
use crate::config::{AppConfig, QueryConfig};
use crate::core::service::{SaleStore, SeedSource};
use crate::storage::{self, HttpSeedSource};
use crate::transactions::TransactionService;
use anyhow::{Result, anyhow};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the transactions HTTP server
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_store(InMemorySaleStore::new())
///     .with_seed_source(HttpSeedSource::new(DEFAULT_SEED_URL))
///     .build()?;
/// ```
pub struct ServerBuilder {
    store: Option<Arc<dyn SaleStore>>,
    seed_source: Option<Arc<dyn SeedSource>>,
    query_config: QueryConfig,
}

impl ServerBuilder {
    /// Create a new ServerBuilder
    pub fn new() -> Self {
        Self {
            store: None,
            seed_source: None,
            query_config: QueryConfig::default(),
        }
    }

    /// Wire a builder from configuration: connects the configured store and
    /// points the seed source at the configured feed
    pub async fn from_config(config: &AppConfig) -> Result<Self> {
        let store = storage::connect(&config.storage).await?;
        tracing::info!(backend = store.backend(), "record store ready");

        Ok(Self::new()
            .with_shared_store(store)
            .with_seed_source(HttpSeedSource::new(config.seed.url.clone()))
            .with_query_config(config.query.clone()))
    }

    /// Set the record store (required)
    pub fn with_store(self, store: impl SaleStore + 'static) -> Self {
        self.with_shared_store(Arc::new(store))
    }

    /// Set an already shared record store
    pub fn with_shared_store(mut self, store: Arc<dyn SaleStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Set the seed source (required)
    pub fn with_seed_source(mut self, source: impl SeedSource + 'static) -> Self {
        self.seed_source = Some(Arc::new(source));
        self
    }

    /// Override listing defaults and bounds
    pub fn with_query_config(mut self, query_config: QueryConfig) -> Self {
        self.query_config = query_config;
        self
    }

    /// Build the service without any HTTP wiring
    pub fn build_service(mut self) -> Result<TransactionService> {
        let store = self
            .store
            .take()
            .ok_or_else(|| anyhow!("SaleStore is required. Call .with_store()"))?;
        let seed_source = self
            .seed_source
            .take()
            .ok_or_else(|| anyhow!("SeedSource is required. Call .with_seed_source()"))?;

        Ok(TransactionService::new(store, seed_source, self.query_config))
    }

    /// Build the final router
    pub fn build(self) -> Result<Router> {
        Ok(build_router(self.build_service()?))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
