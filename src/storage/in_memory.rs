//! In-memory implementation of SaleStore for testing and development

use crate::core::error::StorageError;
use crate::core::query::{Pagination, RecordFilter};
use crate::core::record::{NewSaleRecord, SaleRecord};
use crate::core::service::SaleStore;
use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

const BACKEND: &str = "in-memory";

/// In-memory sale record store
///
/// Records are kept in insertion order, which is also the order `find`
/// returns them in. Uses RwLock for thread-safe access; the lock is never
/// held across an await point.
#[derive(Clone, Default)]
pub struct InMemorySaleStore {
    records: Arc<RwLock<Vec<SaleRecord>>>,
}

impl InMemorySaleStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn assign_ids(records: Vec<NewSaleRecord>) -> Vec<SaleRecord> {
        records
            .into_iter()
            .map(|record| record.into_record(Uuid::new_v4().to_string()))
            .collect()
    }
}

fn poisoned(e: impl std::fmt::Display) -> StorageError {
    StorageError::Unavailable {
        backend: format!("{BACKEND} (lock poisoned: {e})"),
    }
}

#[async_trait]
impl SaleStore for InMemorySaleStore {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    async fn insert_many(&self, records: Vec<NewSaleRecord>) -> Result<usize, StorageError> {
        let new_records = Self::assign_ids(records);
        let inserted = new_records.len();

        let mut records = self.records.write().map_err(poisoned)?;
        records.extend(new_records);

        Ok(inserted)
    }

    async fn delete_all(&self) -> Result<u64, StorageError> {
        let mut records = self.records.write().map_err(poisoned)?;
        let removed = records.len() as u64;
        records.clear();

        Ok(removed)
    }

    async fn find(
        &self,
        filter: &RecordFilter,
        page: Option<Pagination>,
    ) -> Result<Vec<SaleRecord>, StorageError> {
        let records = self.records.read().map_err(poisoned)?;
        let matches = records.iter().filter(|record| filter.matches(record));

        let found = match page {
            Some(page) => {
                let skip = usize::try_from(page.skip()).unwrap_or(usize::MAX);
                let limit = usize::try_from(page.limit).unwrap_or(usize::MAX);
                matches.skip(skip).take(limit).cloned().collect()
            }
            None => matches.cloned().collect(),
        };

        Ok(found)
    }

    async fn count(&self) -> Result<u64, StorageError> {
        let records = self.records.read().map_err(poisoned)?;
        Ok(records.len() as u64)
    }

    /// Swap the whole collection under a single write lock, so readers see
    /// either the old records or the new ones and never an empty store.
    async fn replace_all(&self, records: Vec<NewSaleRecord>) -> Result<usize, StorageError> {
        let new_records = Self::assign_ids(records);
        let inserted = new_records.len();

        let mut records = self.records.write().map_err(poisoned)?;
        *records = new_records;

        Ok(inserted)
    }
}
