//! Transactions API server
//!
//! Loads `transactions.yaml` (or the file named by `TRANSACTIONS_CONFIG`),
//! applies environment overrides and serves the API until Ctrl+C or SIGTERM.

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use transactions::config::AppConfig;
use transactions::server::ServerBuilder;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,transactions=debug,tower_http=debug")),
        )
        .init();

    let config = AppConfig::load()?;
    tracing::info!(
        backend = ?config.storage.backend,
        seed_url = %config.seed.url,
        "configuration loaded"
    );

    let addr = config.server.addr();
    ServerBuilder::from_config(&config)
        .await?
        .serve(&addr)
        .await
}
