//! Query parameters, record filters and pagination

use crate::config::QueryConfig;
use crate::core::error::{ApiError, ValidationError};
use crate::core::month::Month;
use crate::core::record::SaleRecord;
use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Largest skip any backend accepts (MongoDB encodes it as an i64)
const MAX_SKIP: u64 = i64::MAX as u64;

/// Query string extractor whose rejection is a typed [`ApiError`]
///
/// Strings `serde_urlencoded` cannot decode (duplicate keys, for one) become
/// [`ValidationError::MalformedQuery`] instead of axum's plain-text 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ValidationError::MalformedQuery {
                message: rejection.body_text(),
            })?;
        Ok(ApiQuery(value))
    }
}

/// Raw query parameters for the transaction listing
///
/// Everything is kept as text so that bad numbers and month names turn into
/// typed [`ValidationError`]s instead of extractor rejections.
///
/// # Example
/// ```text
/// GET /api/transactions?month=March&title=blue&page=2&limit=5
/// GET /api/transactions?price=329.85
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransactionQuery {
    /// Case-insensitive substring of the title
    pub title: Option<String>,

    /// Case-insensitive substring of the description
    pub description: Option<String>,

    /// Exact price
    pub price: Option<String>,

    /// Month name, defaults to the configured month ("March")
    pub month: Option<String>,

    /// Page number (starts at 1)
    pub page: Option<String>,

    /// Number of items per page
    pub limit: Option<String>,
}

impl TransactionQuery {
    /// Validate and split into a store filter and a page window
    pub fn resolve(&self, defaults: &QueryConfig) -> Result<(RecordFilter, Pagination), ValidationError> {
        let month = match non_empty(&self.month) {
            Some(raw) => Month::parse(raw)?,
            None => defaults.default_month,
        };

        let price = non_empty(&self.price)
            .map(|raw| parse_number::<f64>("price", raw))
            .transpose()?;

        let filter = RecordFilter {
            title: non_empty(&self.title).map(str::to_string),
            description: non_empty(&self.description).map(str::to_string),
            price,
            ..RecordFilter::for_month(month)
        };

        let page = non_empty(&self.page)
            .map(|raw| parse_number::<i64>("page", raw))
            .transpose()?;
        let limit = non_empty(&self.limit)
            .map(|raw| parse_number::<i64>("limit", raw))
            .transpose()?;

        Ok((filter, Pagination::clamped(page, limit, defaults)))
    }
}

/// Query parameters for the month-scoped reports
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct MonthQuery {
    pub month: Option<String>,
}

impl MonthQuery {
    /// Resolve the required `month` parameter
    pub fn month(&self) -> Result<Month, ValidationError> {
        match non_empty(&self.month) {
            Some(raw) => Month::parse(raw),
            None => Err(ValidationError::MissingArgument {
                argument: "month".to_string(),
            }),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn parse_number<T: std::str::FromStr>(field: &str, raw: &str) -> Result<T, ValidationError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| ValidationError::InvalidNumber {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

/// Store-agnostic description of which records a query wants
///
/// Backends translate this into their native query language; the in-memory
/// store evaluates [`RecordFilter::matches`] directly.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordFilter {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    /// Always required; the year of sale is ignored
    pub month: Month,
}

impl RecordFilter {
    /// Filter matching every record sold in `month`, any year
    pub fn for_month(month: Month) -> Self {
        Self {
            title: None,
            description: None,
            price: None,
            month,
        }
    }

    /// Evaluate the filter against a record
    pub fn matches(&self, record: &SaleRecord) -> bool {
        record.month_of_sale() == self.month
            && self
                .title
                .as_deref()
                .is_none_or(|needle| contains_ignore_case(&record.title, needle))
            && self
                .description
                .as_deref()
                .is_none_or(|needle| contains_ignore_case(&record.description, needle))
            && self.price.is_none_or(|price| record.price == price)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// A page window over a filtered result set
///
/// Out-of-range input is clamped rather than rejected: `page < 1` becomes 1,
/// `limit < 1` becomes 1 and `limit` above the configured maximum becomes the
/// maximum. Pages so far out that the skip would overflow an i64 are pulled
/// back to the last page that does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Page number (starts at 1)
    pub page: u64,
    /// Number of items per page
    pub limit: u64,
}

impl Pagination {
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.max(1),
        }
    }

    /// Build from optional raw values, applying defaults and bounds
    pub fn clamped(page: Option<i64>, limit: Option<i64>, defaults: &QueryConfig) -> Self {
        let max_limit = defaults.max_limit.max(1);
        let limit = limit
            .map_or(defaults.default_limit, |l| l.max(1).unsigned_abs())
            .clamp(1, max_limit);
        let page = page
            .unwrap_or(1)
            .max(1)
            .unsigned_abs()
            .min(MAX_SKIP / limit + 1);
        Self { page, limit }
    }

    /// Number of matching records to skip
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit).min(MAX_SKIP)
    }
}

/// Response body of the transaction listing
///
/// `nbHits` is the size of the returned page, not the total match count.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionPage {
    pub nb_hits: usize,
    pub products: Vec<SaleRecord>,
}

impl TransactionPage {
    pub fn new(products: Vec<SaleRecord>) -> Self {
        Self {
            nb_hits: products.len(),
            products,
        }
    }
}
