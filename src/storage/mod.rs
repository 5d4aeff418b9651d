//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "mongodb_backend")]
pub mod mongodb;
pub mod seed;

pub use in_memory::InMemorySaleStore;
#[cfg(feature = "mongodb_backend")]
pub use self::mongodb::MongoSaleStore;
pub use seed::{HttpSeedSource, StaticSeedSource};

use crate::config::{StorageBackend, StorageConfig};
use crate::core::SaleStore;
use crate::core::error::StorageError;
use std::sync::Arc;

/// Build the record store selected by configuration
///
/// Fails with [`StorageError::Unavailable`] when the configured backend was
/// not compiled in.
pub async fn connect(config: &StorageConfig) -> Result<Arc<dyn SaleStore>, StorageError> {
    match config.backend {
        StorageBackend::InMemory => Ok(Arc::new(InMemorySaleStore::new())),
        #[cfg(feature = "mongodb_backend")]
        StorageBackend::Mongodb => {
            let store =
                MongoSaleStore::connect(&config.uri, &config.database, &config.collection).await?;
            Ok(Arc::new(store))
        }
        #[cfg(not(feature = "mongodb_backend"))]
        StorageBackend::Mongodb => Err(StorageError::Unavailable {
            backend: "mongodb (rebuild with --features mongodb_backend)".to_string(),
        }),
    }
}
