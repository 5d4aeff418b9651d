//! Calendar month resolution
//!
//! Every query in this crate is scoped to a month of the year, ignoring the
//! year itself. Month names arrive as free text in query strings and are
//! resolved here against a fixed English table.

use crate::core::error::ValidationError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// A calendar month, independent of year
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Month {
    January = 1,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::January,
        Month::February,
        Month::March,
        Month::April,
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
        Month::November,
        Month::December,
    ];

    /// 1-based month-of-year index (January = 1)
    pub fn number(self) -> u32 {
        self as u32
    }

    /// Month for a 1-based index
    pub fn from_number(number: u32) -> Option<Self> {
        let idx = usize::try_from(number).ok()?.checked_sub(1)?;
        Self::ALL.get(idx).copied()
    }

    /// Full English name
    pub fn name(self) -> &'static str {
        NAMES[self as usize - 1]
    }

    /// Resolve a month name, case-insensitively.
    ///
    /// Accepts full names ("March"), three-letter abbreviations ("mar") and
    /// "Sept". Surrounding whitespace is ignored.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let needle = input.trim().to_ascii_lowercase();

        let found = Self::ALL.iter().copied().find(|month| {
            let name = month.name().to_ascii_lowercase();
            needle == name || (needle.len() == 3 && name.starts_with(&needle))
        });

        match found {
            Some(month) => Ok(month),
            None if needle == "sept" => Ok(Month::September),
            None => Err(ValidationError::InvalidMonth {
                value: input.to_string(),
            }),
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Month::parse(s)
    }
}

impl Serialize for Month {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Month {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Month::parse(&raw).map_err(serde::de::Error::custom)
    }
}
