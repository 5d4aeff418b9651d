//! Transaction operations: re-seeding, listing and month reports
//!
//! `TransactionService` is the single entry point the HTTP layer talks to.
//! It holds injected handles to the record store and the seed source and
//! keeps no other state between calls.

use crate::config::QueryConfig;
use crate::core::error::{InitializationError, StorageError};
use crate::core::month::Month;
use crate::core::query::{RecordFilter, TransactionPage, TransactionQuery};
use crate::core::record::SaleRecord;
use crate::core::report::{CategoryDistribution, CombinedReport, PriceRangeHistogram, SaleStatistics};
use crate::core::service::{SaleStore, SeedSource};
use crate::core::ApiResult;
use std::sync::Arc;

/// Outcome of a successful re-seed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitializeOutcome {
    pub inserted: usize,
}

/// Month-scoped queries over the shared record store
#[derive(Clone)]
pub struct TransactionService {
    store: Arc<dyn SaleStore>,
    seed_source: Arc<dyn SeedSource>,
    query_config: QueryConfig,
}

impl TransactionService {
    pub fn new(
        store: Arc<dyn SaleStore>,
        seed_source: Arc<dyn SeedSource>,
        query_config: QueryConfig,
    ) -> Self {
        Self {
            store,
            seed_source,
            query_config,
        }
    }

    /// The injected record store
    pub fn store(&self) -> &Arc<dyn SaleStore> {
        &self.store
    }

    /// Replace the store contents with a fresh copy of the seed feed
    ///
    /// Fetches first, so an unreachable feed leaves the existing records
    /// untouched. Once the fetch succeeds the store's `replace_all` decides
    /// how atomic the swap is.
    pub async fn initialize(&self) -> Result<InitializeOutcome, InitializationError> {
        let records = self.seed_source.fetch().await?;
        let fetched = records.len();

        let inserted = self.store.replace_all(records).await?;

        tracing::info!(
            backend = self.store.backend(),
            fetched,
            inserted,
            "database initialized"
        );
        Ok(InitializeOutcome { inserted })
    }

    /// One page of records matching the query's filters
    pub async fn list_transactions(&self, query: &TransactionQuery) -> ApiResult<TransactionPage> {
        let (filter, page) = query.resolve(&self.query_config)?;
        tracing::debug!(?filter, page = page.page, limit = page.limit, "listing transactions");

        let products = self.store.find(&filter, Some(page)).await?;
        Ok(TransactionPage::new(products))
    }

    /// Total sale amount and sold/unsold counts for `month`
    pub async fn statistics(&self, month: Month) -> Result<SaleStatistics, StorageError> {
        let records = self.month_records(month).await?;
        Ok(SaleStatistics::from_records(&records))
    }

    /// Ten-band price histogram for `month`
    pub async fn price_ranges(&self, month: Month) -> Result<PriceRangeHistogram, StorageError> {
        let records = self.month_records(month).await?;
        Ok(PriceRangeHistogram::from_records(&records))
    }

    /// Record counts per category for `month`
    pub async fn category_distribution(
        &self,
        month: Month,
    ) -> Result<CategoryDistribution, StorageError> {
        let records = self.month_records(month).await?;
        Ok(CategoryDistribution::from_records(&records))
    }

    /// All three reports for `month` from a single store read
    pub async fn combined(&self, month: Month) -> Result<CombinedReport, StorageError> {
        let records = self.month_records(month).await?;
        Ok(CombinedReport::from_records(&records))
    }

    async fn month_records(&self, month: Month) -> Result<Vec<SaleRecord>, StorageError> {
        let records = self.store.find(&RecordFilter::for_month(month), None).await?;
        tracing::debug!(%month, matched = records.len(), "loaded month records");
        Ok(records)
    }
}
