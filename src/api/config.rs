use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{
    GeneratorTuning, MAX_DAILY_WINDOW_DAYS, MAX_MONTH_COUNT, YearMonth, decimal_to_cents,
};
use crate::error::{ChartError, ChartResult};

/// Host-supplied generation constraints.
///
/// This type is serializable so hosts can hand over their persisted settings
/// as JSON without inventing an ad-hoc format.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EarningsConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Number of monthly periods, ignored when `oldest_month` is set.
    #[serde(default = "default_month_count")]
    pub month_count: u32,
    /// Explicit first month of the tenure.
    #[serde(default)]
    pub oldest_month: Option<YearMonth>,
    #[serde(default = "default_daily_window_days")]
    pub daily_window_days: u32,
    /// Calendar day treated as "today".
    pub today: NaiveDate,
    #[serde(default)]
    pub min_balance: Decimal,
    #[serde(default)]
    pub min_pending: Decimal,
    /// Lifetime gross amount before the platform margin is applied.
    pub lifetime_gross: Decimal,
    #[serde(default = "default_net_margin")]
    pub net_margin: f64,
    /// Seeds the dashboard's random source; `None` draws from entropy.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub tuning: GeneratorTuning,
}

impl EarningsConfig {
    /// Creates a config with default period counts and no minimum.
    #[must_use]
    pub fn new(today: NaiveDate, lifetime_gross: Decimal) -> Self {
        Self {
            enabled: default_enabled(),
            month_count: default_month_count(),
            oldest_month: None,
            daily_window_days: default_daily_window_days(),
            today,
            min_balance: Decimal::ZERO,
            min_pending: Decimal::ZERO,
            lifetime_gross,
            net_margin: default_net_margin(),
            seed: None,
            tuning: GeneratorTuning::default(),
        }
    }

    #[must_use]
    pub fn with_month_count(mut self, month_count: u32) -> Self {
        self.month_count = month_count;
        self
    }

    #[must_use]
    pub fn with_oldest_month(mut self, oldest_month: YearMonth) -> Self {
        self.oldest_month = Some(oldest_month);
        self
    }

    /// Sets the balances the most recent month must exceed together.
    #[must_use]
    pub fn with_minimums(mut self, min_balance: Decimal, min_pending: Decimal) -> Self {
        self.min_balance = min_balance;
        self.min_pending = min_pending;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    #[must_use]
    pub fn with_tuning(mut self, tuning: GeneratorTuning) -> Self {
        self.tuning = tuning;
        self
    }

    /// Amount the most recent month's net must reach.
    #[must_use]
    pub fn minimum_required(&self) -> Decimal {
        self.min_balance + self.min_pending
    }

    /// First month of the tenure, from the explicit anchor or the month count.
    #[must_use]
    pub fn resolved_oldest_month(&self) -> YearMonth {
        self.oldest_month.unwrap_or_else(|| {
            YearMonth::from_date(self.today).minus_months(self.month_count.saturating_sub(1))
        })
    }

    pub fn validate(&self) -> ChartResult<()> {
        if self.month_count == 0 && self.oldest_month.is_none() {
            return Err(ChartError::InvalidConfig(
                "month_count must be >= 1".to_owned(),
            ));
        }
        if self.month_count > MAX_MONTH_COUNT {
            return Err(ChartError::InvalidConfig(format!(
                "month_count must be <= {MAX_MONTH_COUNT}"
            )));
        }
        if let Some(oldest) = self.oldest_month {
            YearMonth::new(oldest.year, oldest.month)?;
            let current = YearMonth::from_date(self.today);
            if oldest > current {
                return Err(ChartError::InvalidConfig(format!(
                    "oldest month {oldest} is after today ({})",
                    self.today
                )));
            }
            if oldest.months_through(current) > MAX_MONTH_COUNT {
                return Err(ChartError::InvalidConfig(format!(
                    "oldest month {oldest} is more than {MAX_MONTH_COUNT} months back"
                )));
            }
        }
        if !(1..=MAX_DAILY_WINDOW_DAYS).contains(&self.daily_window_days) {
            return Err(ChartError::InvalidConfig(format!(
                "daily_window_days must be in 1..={MAX_DAILY_WINDOW_DAYS}"
            )));
        }
        if !self.net_margin.is_finite() || !(0.0..=1.0).contains(&self.net_margin) {
            return Err(ChartError::InvalidConfig(
                "net_margin must be finite and in [0, 1]".to_owned(),
            ));
        }
        decimal_to_cents(self.min_balance, "min_balance")?;
        decimal_to_cents(self.min_pending, "min_pending")?;
        decimal_to_cents(self.lifetime_gross, "lifetime_gross")?;
        self.tuning.validate()
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> ChartResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn default_enabled() -> bool {
    true
}

fn default_month_count() -> u32 {
    24
}

fn default_daily_window_days() -> u32 {
    30
}

fn default_net_margin() -> f64 {
    0.8
}
