use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{CategoryAmounts, GrowthPattern, YearMonth};
use crate::error::{ChartError, ChartResult};

/// Identifies the span of time a [`PeriodRecord`] covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PeriodId {
    Month { year: i32, month: u32 },
    Day { date: NaiveDate },
}

impl PeriodId {
    #[must_use]
    pub fn month(month: YearMonth) -> Self {
        Self::Month {
            year: month.year,
            month: month.month,
        }
    }

    #[must_use]
    pub fn day(date: NaiveDate) -> Self {
        Self::Day { date }
    }
}

/// One generated period with its category split.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodRecord {
    pub period: PeriodId,
    pub net_amount: Decimal,
    pub categories: CategoryAmounts,
}

impl PeriodRecord {
    #[must_use]
    pub fn from_cents(period: PeriodId, net_cents: i64, split_cents: [i64; 6]) -> Self {
        Self {
            period,
            net_amount: crate::core::cents_to_decimal(net_cents),
            categories: CategoryAmounts::from_cents(split_cents),
        }
    }

    /// Category amounts add up to the net amount within one cent.
    #[must_use]
    pub fn split_matches_net(&self) -> bool {
        (self.categories.total() - self.net_amount).abs() <= Decimal::new(1, 2)
    }
}

/// Aggregate amounts of a whole dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetTotals {
    pub gross: Decimal,
    pub net: Decimal,
}

/// A complete generated timeline.
///
/// `months` and `days` are ordered oldest first; the last month is the most
/// recent period. A dataset is never mutated after generation, it is only
/// replaced as a whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub months: Vec<PeriodRecord>,
    pub days: Vec<PeriodRecord>,
    pub totals: DatasetTotals,
    pub pattern: GrowthPattern,
    pub seed: u64,
    /// Multiplier applied to the minimum when the most recent month had to be
    /// moved into the buffer band, if it was.
    #[serde(default)]
    pub buffer_ratio: Option<f64>,
}

impl Dataset {
    #[must_use]
    pub fn most_recent_month(&self) -> Option<&PeriodRecord> {
        self.months.last()
    }

    /// Net amount of the most recent month, zero for an empty dataset.
    #[must_use]
    pub fn most_recent_net(&self) -> Decimal {
        self.most_recent_month()
            .map_or(Decimal::ZERO, |record| record.net_amount)
    }

    #[must_use]
    pub fn oldest_month(&self) -> Option<YearMonth> {
        self.months.first().and_then(|record| match record.period {
            PeriodId::Month { year, month } => YearMonth::new(year, month).ok(),
            PeriodId::Day { .. } => None,
        })
    }

    pub fn months_newest_first(&self) -> impl Iterator<Item = &PeriodRecord> {
        self.months.iter().rev()
    }

    /// Checks the structural invariants a stored snapshot must satisfy.
    pub fn validate(&self) -> ChartResult<()> {
        for record in self.months.iter().chain(self.days.iter()) {
            if !record.categories.is_complete() {
                return Err(ChartError::InvalidData(format!(
                    "period {:?} is missing categories",
                    record.period
                )));
            }
            if record.net_amount.is_sign_negative() && !record.net_amount.is_zero() {
                return Err(ChartError::InvalidData(format!(
                    "period {:?} has a negative net amount",
                    record.period
                )));
            }
            if !record.split_matches_net() {
                return Err(ChartError::InvalidData(format!(
                    "period {:?} categories do not add up to its net amount",
                    record.period
                )));
            }
        }
        if self
            .months
            .iter()
            .any(|record| !matches!(record.period, PeriodId::Month { .. }))
        {
            return Err(ChartError::InvalidData(
                "monthly records must carry month ids".to_owned(),
            ));
        }
        if self
            .days
            .iter()
            .any(|record| !matches!(record.period, PeriodId::Day { .. }))
        {
            return Err(ChartError::InvalidData(
                "daily records must carry day ids".to_owned(),
            ));
        }
        Ok(())
    }
}
