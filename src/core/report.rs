//! Month reports computed from a set of matching sale records
//!
//! All three reports are pure folds over records that already passed the
//! month filter, so they can be tested without a store.

use crate::core::record::SaleRecord;
use indexmap::IndexMap;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// Sale totals for a month
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleStatistics {
    /// Sum of `price` across every matched record, sold or not
    pub total_sale: f64,
    pub total_sold_items: u64,
    pub total_unsold_items: u64,
}

impl SaleStatistics {
    pub fn from_records(records: &[SaleRecord]) -> Self {
        records.iter().fold(Self::default(), |mut stats, record| {
            stats.total_sale += record.price;
            if record.sold {
                stats.total_sold_items += 1;
            } else {
                stats.total_unsold_items += 1;
            }
            stats
        })
    }
}

/// One of the ten fixed price bands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceRange {
    UpTo100,
    UpTo200,
    UpTo300,
    UpTo400,
    UpTo500,
    UpTo600,
    UpTo700,
    UpTo800,
    UpTo900,
    Above900,
}

impl PriceRange {
    /// Every band, in ascending order
    pub const ALL: [PriceRange; 10] = [
        PriceRange::UpTo100,
        PriceRange::UpTo200,
        PriceRange::UpTo300,
        PriceRange::UpTo400,
        PriceRange::UpTo500,
        PriceRange::UpTo600,
        PriceRange::UpTo700,
        PriceRange::UpTo800,
        PriceRange::UpTo900,
        PriceRange::Above900,
    ];

    pub fn label(self) -> &'static str {
        match self {
            PriceRange::UpTo100 => "0-100",
            PriceRange::UpTo200 => "101-200",
            PriceRange::UpTo300 => "201-300",
            PriceRange::UpTo400 => "301-400",
            PriceRange::UpTo500 => "401-500",
            PriceRange::UpTo600 => "501-600",
            PriceRange::UpTo700 => "601-700",
            PriceRange::UpTo800 => "701-800",
            PriceRange::UpTo900 => "801-900",
            PriceRange::Above900 => "901-above",
        }
    }

    /// Inclusive upper bound, `None` for the open-ended top band
    pub fn upper_bound(self) -> Option<f64> {
        match self {
            PriceRange::Above900 => None,
            band => Some(100.0 * (band as u8 + 1) as f64),
        }
    }

    /// First band whose upper bound is at least `price`
    pub fn for_price(price: f64) -> Self {
        Self::ALL
            .into_iter()
            .find(|band| band.upper_bound().is_some_and(|bound| price <= bound))
            .unwrap_or(PriceRange::Above900)
    }
}

/// Record counts per price band; all ten bands are always present
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceRangeHistogram {
    counts: [u64; 10],
}

impl PriceRangeHistogram {
    pub fn from_records(records: &[SaleRecord]) -> Self {
        let mut histogram = Self::default();
        for record in records {
            histogram.counts[PriceRange::for_price(record.price) as usize] += 1;
        }
        histogram
    }

    pub fn count(&self, band: PriceRange) -> u64 {
        self.counts[band as usize]
    }

    /// Bands with their counts, ascending
    pub fn iter(&self) -> impl Iterator<Item = (PriceRange, u64)> + '_ {
        PriceRange::ALL.into_iter().map(|band| (band, self.count(band)))
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

impl Serialize for PriceRangeHistogram {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(PriceRange::ALL.len()))?;
        for (band, count) in self.iter() {
            map.serialize_entry(band.label(), &count)?;
        }
        map.end()
    }
}

/// Record counts per category, in first-seen order
///
/// Only categories that occur in the data appear.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CategoryDistribution(IndexMap<String, u64>);

impl CategoryDistribution {
    pub fn from_records(records: &[SaleRecord]) -> Self {
        let mut counts = IndexMap::new();
        for record in records {
            *counts.entry(record.category.clone()).or_insert(0) += 1;
        }
        Self(counts)
    }

    pub fn get(&self, category: &str) -> Option<u64> {
        self.0.get(category).copied()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// All three month reports in one payload
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedReport {
    pub statistics: SaleStatistics,
    pub price_range: PriceRangeHistogram,
    pub category_distribution: CategoryDistribution,
}

impl CombinedReport {
    pub fn from_records(records: &[SaleRecord]) -> Self {
        Self {
            statistics: SaleStatistics::from_records(records),
            price_range: PriceRangeHistogram::from_records(records),
            category_distribution: CategoryDistribution::from_records(records),
        }
    }
}
