use chrono::{Datelike, Days, NaiveDate};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{Category, Dataset, PeriodId, PeriodRecord, YearMonth, day_label, decimal_to_f64};
use crate::error::ChartResult;

/// Time window a chart widget displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartView {
    /// Trailing window of daily points ending today.
    Last30Days,
    /// Every day of the current month on the axis, values up to today.
    CurrentMonth,
    /// One point per month over the whole tenure.
    AllTime,
}

/// Per-category cumulative values aligned to a label axis.
///
/// `slot_count` is the number of positions on the x axis; each line holds at
/// most `slot_count` values starting at slot zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    pub view: ChartView,
    pub labels: Vec<String>,
    pub slot_count: usize,
    pub lines: IndexMap<Category, Vec<f64>>,
}

impl ChartSeries {
    /// Derives the series shown by `view` from `dataset`.
    ///
    /// Only `categories` are included, in the given order. An empty dataset
    /// produces a series without slots.
    pub fn from_dataset(
        dataset: &Dataset,
        view: ChartView,
        today: NaiveDate,
        window_days: u32,
        categories: &[Category],
    ) -> ChartResult<Self> {
        let (labels, records): (Vec<String>, Vec<&PeriodRecord>) = match view {
            ChartView::AllTime => {
                let labels = dataset
                    .months
                    .iter()
                    .map(|record| match record.period {
                        PeriodId::Month { year, month } => YearMonth { year, month }.short_label(),
                        PeriodId::Day { date } => day_label(date),
                    })
                    .collect();
                (labels, dataset.months.iter().collect())
            }
            ChartView::Last30Days => {
                let first = today
                    .checked_sub_days(Days::new(u64::from(window_days.saturating_sub(1))))
                    .unwrap_or(today);
                let records: Vec<&PeriodRecord> = dataset
                    .days
                    .iter()
                    .filter(|record| match record.period {
                        PeriodId::Day { date } => date >= first && date <= today,
                        PeriodId::Month { .. } => false,
                    })
                    .collect();
                let labels = records
                    .iter()
                    .filter_map(|record| match record.period {
                        PeriodId::Day { date } => Some(day_label(date)),
                        PeriodId::Month { .. } => None,
                    })
                    .collect();
                (labels, records)
            }
            ChartView::CurrentMonth => {
                let month = YearMonth::from_date(today);
                let first = month.first_day()?;
                let labels = (0..month.days_in_month()?)
                    .filter_map(|offset| first.checked_add_days(Days::new(u64::from(offset))))
                    .map(day_label)
                    .collect();
                let records = dataset
                    .days
                    .iter()
                    .filter(|record| match record.period {
                        PeriodId::Day { date } => {
                            YearMonth::from_date(date) == month && date.day() <= today.day()
                        }
                        PeriodId::Month { .. } => false,
                    })
                    .collect();
                (labels, records)
            }
        };

        let mut lines = IndexMap::with_capacity(categories.len());
        if !records.is_empty() {
            for category in categories {
                let mut running = 0.0;
                let mut values = Vec::with_capacity(records.len());
                for record in &records {
                    running += decimal_to_f64(record.categories.get(*category), "category amount")?;
                    values.push(running);
                }
                lines.insert(*category, values);
            }
        }

        Ok(Self {
            view,
            slot_count: if records.is_empty() { 0 } else { labels.len() },
            labels,
            lines,
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slot_count == 0 || self.lines.values().all(Vec::is_empty)
    }

    /// Largest value across every line, zero when empty.
    #[must_use]
    pub fn max_value(&self) -> f64 {
        self.lines
            .values()
            .flatten()
            .copied()
            .filter(|value| value.is_finite())
            .fold(0.0, f64::max)
    }

    #[must_use]
    pub fn value_at(&self, category: Category, index: usize) -> Option<f64> {
        self.lines.get(&category)?.get(index).copied()
    }

    /// Number of slots that carry data.
    #[must_use]
    pub fn filled_len(&self) -> usize {
        self.lines.values().map(Vec::len).max().unwrap_or(0)
    }
}
