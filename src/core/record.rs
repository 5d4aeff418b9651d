//! Sale record types

use crate::core::month::Month;
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

/// A product sale as stored and returned by the API
///
/// The store assigns `id` on insert; everything else comes verbatim from the
/// seed feed. Records are never modified after seeding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub sold: bool,
    pub date_of_sale: DateTime<Utc>,
}

/// A sale record as received from the seed feed, before the store assigns an id
///
/// Unknown fields (including any `id` the feed carries) are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSaleRecord {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub sold: bool,
    pub date_of_sale: DateTime<Utc>,
}

impl NewSaleRecord {
    /// Attach a store-assigned id
    pub fn into_record(self, id: String) -> SaleRecord {
        SaleRecord {
            id,
            title: self.title,
            description: self.description,
            price: self.price,
            category: self.category,
            image: self.image,
            sold: self.sold,
            date_of_sale: self.date_of_sale,
        }
    }
}

impl SaleRecord {
    /// Month of sale in UTC, year ignored
    pub fn month_of_sale(&self) -> Month {
        // chrono guarantees 1..=12
        Month::from_number(self.date_of_sale.month()).unwrap_or(Month::January)
    }
}
