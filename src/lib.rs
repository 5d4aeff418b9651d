//! # Transactions API
//!
//! A small analytics backend over product sale records.
//!
//! ## Features
//!
//! - **Re-seeding**: Replace the store contents from a remote JSON feed
//! - **Listing**: Case-insensitive title/description search, exact price match, pagination
//! - **Month reports**: Sale totals, a ten-band price histogram and category counts
//! - **Year-agnostic months**: "March" matches every March in the data set
//! - **Pluggable storage**: In-memory by default, MongoDB behind `mongodb_backend`
//! - **Configuration-Based**: YAML file with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use transactions::prelude::*;
//!
//! let app = ServerBuilder::new()
//!     .with_store(InMemorySaleStore::new())
//!     .with_seed_source(HttpSeedSource::new(DEFAULT_SEED_URL))
//!     .build()?;
//!
//! let listener = tokio::net::TcpListener::bind("127.0.0.1:3000").await?;
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;
pub mod transactions;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Types ===
    pub use crate::core::{
        ApiError, ApiQuery, ApiResult, CategoryDistribution, CombinedReport, Month, MonthQuery,
        NewSaleRecord, Pagination, PriceRangeHistogram, RecordFilter, SaleRecord, SaleStatistics,
        TransactionPage, TransactionQuery,
        error::{ConfigError, InitializationError, SeedError, StorageError, ValidationError},
        report::PriceRange,
        service::{SaleStore, SeedSource},
    };

    // === Configuration ===
    pub use crate::config::{
        AppConfig, DEFAULT_SEED_URL, QueryConfig, SeedConfig, ServerConfig, StorageBackend,
        StorageConfig,
    };

    // === Storage ===
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoSaleStore;
    pub use crate::storage::{HttpSeedSource, InMemorySaleStore, StaticSeedSource};

    // === Service & Server ===
    pub use crate::server::{ServerBuilder, build_router};
    pub use crate::transactions::{InitializeOutcome, TransactionService};

    // === External re-exports ===
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use std::sync::Arc;
}
