use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::money::cents_to_decimal;
use crate::error::ChartError;

/// Closed set of earnings categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Subscriptions,
    Tips,
    Posts,
    Messages,
    Referrals,
    Streams,
}

impl Category {
    /// Canonical order used for storage and for default draw order.
    pub const ALL: [Self; 6] = [
        Self::Subscriptions,
        Self::Tips,
        Self::Posts,
        Self::Messages,
        Self::Referrals,
        Self::Streams,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Subscriptions => "subscriptions",
            Self::Tips => "tips",
            Self::Posts => "posts",
            Self::Messages => "messages",
            Self::Referrals => "referrals",
            Self::Streams => "streams",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Subscriptions => "Subscriptions",
            Self::Tips => "Tips",
            Self::Posts => "Posts",
            Self::Messages => "Messages",
            Self::Referrals => "Referrals",
            Self::Streams => "Streams",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ChartError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| ChartError::InvalidData(format!("unknown category `{value}`")))
    }
}

/// Per-category amounts of one period, kept in canonical category order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryAmounts(IndexMap<Category, Decimal>);

impl Default for CategoryAmounts {
    fn default() -> Self {
        Self(
            Category::ALL
                .into_iter()
                .map(|category| (category, Decimal::ZERO))
                .collect(),
        )
    }
}

impl CategoryAmounts {
    /// Builds amounts from whole cents given in `Category::ALL` order.
    #[must_use]
    pub fn from_cents(cents: [i64; 6]) -> Self {
        Self(
            Category::ALL
                .into_iter()
                .zip(cents)
                .map(|(category, value)| (category, cents_to_decimal(value)))
                .collect(),
        )
    }

    #[must_use]
    pub fn get(&self, category: Category) -> Decimal {
        self.0.get(&category).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn set(&mut self, category: Category, amount: Decimal) {
        self.0.insert(category, amount);
    }

    #[must_use]
    pub fn total(&self) -> Decimal {
        self.0.values().copied().sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, Decimal)> + '_ {
        self.0.iter().map(|(category, amount)| (*category, *amount))
    }

    /// Every category is present exactly once.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.0.len() == Category::ALL.len()
            && Category::ALL.iter().all(|category| self.0.contains_key(category))
    }
}
