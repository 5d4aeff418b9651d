//! Service traits for the record store and the seed source
//!
//! Both collaborators are injected as trait objects so the HTTP layer and the
//! analytics never depend on a concrete backend.

use crate::core::error::{SeedError, StorageError};
use crate::core::query::{Pagination, RecordFilter};
use crate::core::record::{NewSaleRecord, SaleRecord};
use async_trait::async_trait;

/// Document store holding sale records
///
/// Implementations decide how ids are assigned and how a [`RecordFilter`] is
/// translated into their own query language.
#[async_trait]
pub trait SaleStore: Send + Sync {
    /// Short backend name used in logs and errors
    fn backend(&self) -> &'static str;

    /// Insert records, returning how many were stored
    async fn insert_many(&self, records: Vec<NewSaleRecord>) -> Result<usize, StorageError>;

    /// Remove every record, returning how many were removed
    async fn delete_all(&self) -> Result<u64, StorageError>;

    /// Find records matching `filter`
    ///
    /// With `page` set, at most `page.limit` records are returned after
    /// skipping `page.skip()` matches. Without it every match is returned.
    async fn find(
        &self,
        filter: &RecordFilter,
        page: Option<Pagination>,
    ) -> Result<Vec<SaleRecord>, StorageError>;

    /// Total number of stored records
    async fn count(&self) -> Result<u64, StorageError>;

    /// Replace the whole collection with `records`
    ///
    /// The default runs `delete_all` then `insert_many` as two steps: if the
    /// insert fails the store is left empty, and readers may observe the gap.
    /// Backends that can do better override this.
    async fn replace_all(&self, records: Vec<NewSaleRecord>) -> Result<usize, StorageError> {
        let removed = self.delete_all().await?;
        tracing::debug!(backend = self.backend(), removed, "cleared sale records");
        self.insert_many(records).await
    }
}

/// Remote source of seed records
#[async_trait]
pub trait SeedSource: Send + Sync {
    /// Fetch the full seed payload
    async fn fetch(&self) -> Result<Vec<NewSaleRecord>, SeedError>;
}
