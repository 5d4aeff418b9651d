//! Core module containing the domain types, traits and reports

pub mod error;
pub mod month;
pub mod query;
pub mod record;
pub mod report;
pub mod service;

pub use error::{ApiError, ApiResult};
pub use month::Month;
pub use query::{ApiQuery, MonthQuery, Pagination, RecordFilter, TransactionPage, TransactionQuery};
pub use record::{NewSaleRecord, SaleRecord};
pub use report::{CategoryDistribution, CombinedReport, PriceRangeHistogram, SaleStatistics};
pub use service::{SaleStore, SeedSource};
