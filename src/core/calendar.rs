use std::fmt;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> ChartResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(ChartError::InvalidData(format!(
                "month must be in 1..=12, got {month}"
            )));
        }
        Ok(Self { year, month })
    }

    #[must_use]
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First day of the month.
    pub fn first_day(self) -> ChartResult<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).ok_or_else(|| {
            ChartError::InvalidData(format!("month {self} is outside the supported range"))
        })
    }

    pub fn days_in_month(self) -> ChartResult<u32> {
        let first = self.first_day()?;
        let next = first.checked_add_months(Months::new(1)).ok_or_else(|| {
            ChartError::InvalidData(format!("month after {self} is outside the supported range"))
        })?;
        Ok(u32::try_from(next.signed_duration_since(first).num_days()).unwrap_or(31))
    }

    /// Month `count` months before this one.
    #[must_use]
    pub fn minus_months(self, count: u32) -> Self {
        let absolute = self.absolute_index() - i64::from(count);
        Self::from_absolute_index(absolute)
    }

    #[must_use]
    pub fn plus_months(self, count: u32) -> Self {
        let absolute = self.absolute_index() + i64::from(count);
        Self::from_absolute_index(absolute)
    }

    /// Number of months from `self` to `later`, inclusive of both ends.
    ///
    /// Returns zero when `later` precedes `self`.
    #[must_use]
    pub fn months_through(self, later: Self) -> u32 {
        let span = later.absolute_index() - self.absolute_index() + 1;
        u32::try_from(span.max(0)).unwrap_or(u32::MAX)
    }

    fn absolute_index(self) -> i64 {
        i64::from(self.year) * 12 + i64::from(self.month) - 1
    }

    fn from_absolute_index(index: i64) -> Self {
        let year = index.div_euclid(12);
        let month = index.rem_euclid(12) + 1;
        Self {
            year: i32::try_from(year).unwrap_or(i32::MAX),
            month: u32::try_from(month).unwrap_or(1),
        }
    }

    /// Short axis label such as `Mar 2024`.
    #[must_use]
    pub fn short_label(self) -> String {
        match self.first_day() {
            Ok(date) => date.format("%b %Y").to_string(),
            Err(_) => self.to_string(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Short axis label for a day such as `Mar 7`.
#[must_use]
pub fn day_label(date: NaiveDate) -> String {
    date.format("%b %-d").to_string()
}

#[cfg(test)]
mod tests {
    use super::{YearMonth, day_label};
    use chrono::NaiveDate;

    #[test]
    fn month_arithmetic_crosses_years() {
        let march = YearMonth::new(2024, 3).expect("month");
        assert_eq!(march.minus_months(3), YearMonth::new(2023, 12).expect("month"));
        assert_eq!(march.plus_months(10), YearMonth::new(2025, 1).expect("month"));
        assert_eq!(march.minus_months(23).months_through(march), 24);
        assert_eq!(march.months_through(march.minus_months(1)), 0);
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(YearMonth::new(2024, 2).expect("month").days_in_month().expect("days"), 29);
        assert_eq!(YearMonth::new(2023, 2).expect("month").days_in_month().expect("days"), 28);
        assert_eq!(YearMonth::new(2023, 12).expect("month").days_in_month().expect("days"), 31);
    }

    #[test]
    fn labels_are_short() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).expect("date");
        assert_eq!(day_label(date), "Mar 7");
        assert_eq!(YearMonth::from_date(date).short_label(), "Mar 2024");
    }
}
