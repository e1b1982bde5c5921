use chrono::{Datelike, Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::core::growth::timeline_position;
use crate::core::{
    CategorySplitter, Dataset, DatasetTotals, GrowthPattern, PeriodId, PeriodRecord,
    SplitProfile, YearMonth, allocate_cents, cents_to_decimal,
};
use crate::error::{ChartError, ChartResult};

/// Empirically tuned constants of the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorTuning {
    /// Lower bound of the multiplier applied to the minimum when the most
    /// recent period has to be moved.
    pub buffer_ratio_min: f64,
    /// Exclusive upper bound of that multiplier.
    pub buffer_ratio_max: f64,
    /// Most recent periods above `minimum * ceiling_ratio` are pulled back
    /// into the buffer band. `None` only ever raises the period.
    pub ceiling_ratio: Option<f64>,
    /// Multiplicative noise amplitude for the earliest part of the timeline.
    pub early_noise: f64,
    /// Multiplicative noise amplitude for the rest of the timeline.
    pub late_noise: f64,
    /// Fraction of the timeline that uses `early_noise`.
    pub early_fraction: f64,
    /// Inclusive range of how many oldest periods get dampened.
    pub dampened_periods_min: usize,
    pub dampened_periods_max: usize,
    /// Weight multiplier applied to the very oldest period.
    pub dampening_floor: f64,
    pub split_profile: SplitProfile,
}

impl Default for GeneratorTuning {
    fn default() -> Self {
        Self {
            buffer_ratio_min: 1.1,
            buffer_ratio_max: 1.5,
            ceiling_ratio: Some(1.5),
            early_noise: 0.25,
            late_noise: 0.08,
            early_fraction: 0.33,
            dampened_periods_min: 4,
            dampened_periods_max: 8,
            dampening_floor: 0.1,
            split_profile: SplitProfile::default(),
        }
    }
}

impl GeneratorTuning {
    pub fn validate(&self) -> ChartResult<()> {
        if !self.buffer_ratio_min.is_finite()
            || !self.buffer_ratio_max.is_finite()
            || self.buffer_ratio_min < 1.0
            || self.buffer_ratio_max < self.buffer_ratio_min
        {
            return Err(ChartError::InvalidConfig(
                "buffer ratio range must satisfy 1 <= min <= max".to_owned(),
            ));
        }
        if let Some(ceiling) = self.ceiling_ratio {
            if !ceiling.is_finite() || ceiling < self.buffer_ratio_max {
                return Err(ChartError::InvalidConfig(
                    "ceiling ratio must be finite and >= buffer_ratio_max".to_owned(),
                ));
            }
        }
        for (name, value) in [
            ("early_noise", self.early_noise),
            ("late_noise", self.late_noise),
        ] {
            if !value.is_finite() || !(0.0..1.0).contains(&value) {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} must be finite and in [0, 1)"
                )));
            }
        }
        if !self.early_fraction.is_finite() || !(0.0..=1.0).contains(&self.early_fraction) {
            return Err(ChartError::InvalidConfig(
                "early_fraction must be in [0, 1]".to_owned(),
            ));
        }
        if self.dampened_periods_min > self.dampened_periods_max {
            return Err(ChartError::InvalidConfig(
                "dampened period range is empty".to_owned(),
            ));
        }
        if !self.dampening_floor.is_finite() || !(0.0..=1.0).contains(&self.dampening_floor) {
            return Err(ChartError::InvalidConfig(
                "dampening_floor must be in [0, 1]".to_owned(),
            ));
        }
        self.split_profile.validate()
    }
}

/// Inputs of one timeline generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationRequest {
    pub total_net_cents: i64,
    pub period_count: usize,
    /// Minimum net the most recent period must exceed. Zero disables the check.
    pub minimum_cents: i64,
}

/// Output of [`SeriesGenerator::generate`], oldest period first.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedSeries {
    pub pattern: GrowthPattern,
    pub net_cents: Vec<i64>,
    pub split_cents: Vec<[i64; 6]>,
    pub buffer_ratio: Option<f64>,
}

/// Longest tenure a dataset may span.
pub const MAX_MONTH_COUNT: u32 = 1200;

/// Longest trailing window of daily records.
pub const MAX_DAILY_WINDOW_DAYS: u32 = 366;

/// Inputs of a whole [`Dataset`]: the monthly tenure plus daily detail for
/// every month touched by the trailing window, and at least the previous and
/// current month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetPlan {
    pub total_gross_cents: i64,
    pub net_margin: f64,
    pub oldest_month: YearMonth,
    pub today: NaiveDate,
    pub minimum_cents: i64,
    /// Trailing days that must have daily records, today included.
    pub daily_window_days: u32,
}

impl DatasetPlan {
    #[must_use]
    pub fn total_net_cents(&self) -> i64 {
        (self.total_gross_cents as f64 * self.net_margin).round() as i64
    }

    #[must_use]
    pub fn month_count(&self) -> u32 {
        self.oldest_month
            .months_through(YearMonth::from_date(self.today))
    }

    /// First month that gets daily records, never before the tenure starts.
    pub fn first_daily_month(&self) -> ChartResult<YearMonth> {
        let window_start = self
            .today
            .checked_sub_days(Days::new(u64::from(self.daily_window_days.saturating_sub(1))))
            .ok_or_else(|| {
                ChartError::InvalidConfig(format!(
                    "daily window of {} days before {} is out of range",
                    self.daily_window_days, self.today
                ))
            })?;
        let previous = YearMonth::from_date(self.today).minus_months(1);
        Ok(YearMonth::from_date(window_start)
            .min(previous)
            .max(self.oldest_month))
    }
}

/// Produces synthetic timelines that follow a randomly chosen growth pattern.
#[derive(Debug, Clone)]
pub struct SeriesGenerator {
    tuning: GeneratorTuning,
    splitter: CategorySplitter,
}

impl SeriesGenerator {
    pub fn new(tuning: GeneratorTuning) -> ChartResult<Self> {
        tuning.validate()?;
        let splitter = CategorySplitter::new(tuning.split_profile.clone())?;
        Ok(Self { tuning, splitter })
    }

    #[must_use]
    pub fn tuning(&self) -> &GeneratorTuning {
        &self.tuning
    }

    #[must_use]
    pub fn splitter(&self) -> &CategorySplitter {
        &self.splitter
    }

    /// Generates `request.period_count` periods whose nets sum to the requested
    /// total, with the most recent period kept inside the buffer band above the
    /// minimum.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        request: &GenerationRequest,
        rng: &mut R,
    ) -> GeneratedSeries {
        let count = request.period_count;
        let pattern = GrowthPattern::choose(count, rng);
        if count == 0 {
            return GeneratedSeries {
                pattern,
                net_cents: Vec::new(),
                split_cents: Vec::new(),
                buffer_ratio: None,
            };
        }

        let weights = self.period_weights(pattern, count, rng);
        let mut net_cents = allocate_cents(request.total_net_cents, &weights);
        let buffer_ratio = self.enforce_recent_minimum(
            &mut net_cents,
            request.total_net_cents,
            request.minimum_cents,
            rng,
        );
        let split_cents = net_cents
            .iter()
            .map(|net| self.splitter.split(*net, rng))
            .collect();

        trace!(
            count,
            pattern = ?pattern.kind(),
            buffered = buffer_ratio.is_some(),
            "generated period series"
        );

        GeneratedSeries {
            pattern,
            net_cents,
            split_cents,
            buffer_ratio,
        }
    }

    fn period_weights<R: Rng + ?Sized>(
        &self,
        pattern: GrowthPattern,
        count: usize,
        rng: &mut R,
    ) -> Vec<f64> {
        let dampened = if count > 2 {
            let drawn = rng.gen_range(
                self.tuning.dampened_periods_min..=self.tuning.dampened_periods_max,
            );
            drawn.min((count - 1) / 2)
        } else {
            0
        };

        (0..count)
            .map(|index| {
                let t = timeline_position(index, count);
                let amplitude = if t < self.tuning.early_fraction {
                    self.tuning.early_noise
                } else {
                    self.tuning.late_noise
                };
                let noise = if amplitude > 0.0 {
                    1.0 + rng.gen_range(-amplitude..=amplitude)
                } else {
                    1.0
                };
                let mut weight = pattern.weight(t) * noise;
                if index < dampened {
                    let ramp = (index + 1) as f64 / (dampened + 1) as f64;
                    let floor = self.tuning.dampening_floor;
                    weight *= floor + (1.0 - floor) * ramp * ramp;
                }
                weight
            })
            .collect()
    }

    /// Moves the most recent period into `[minimum * buffer_min, minimum * ceiling]`
    /// and rescales older periods so the total is preserved.
    fn enforce_recent_minimum<R: Rng + ?Sized>(
        &self,
        net_cents: &mut [i64],
        total_cents: i64,
        minimum_cents: i64,
        rng: &mut R,
    ) -> Option<f64> {
        if minimum_cents <= 0 {
            return None;
        }
        let (last, older) = net_cents.split_last_mut()?;
        let minimum = minimum_cents as f64;
        let floor_cents = (minimum * self.tuning.buffer_ratio_min).ceil() as i64;
        let ceiling_cents = self
            .tuning
            .ceiling_ratio
            .map(|ratio| ((minimum * ratio).floor() as i64).max(floor_cents));

        let below = *last < floor_cents;
        let above = ceiling_cents.is_some_and(|ceiling| *last > ceiling);
        if !below && !above {
            return None;
        }

        let ratio = if self.tuning.buffer_ratio_max > self.tuning.buffer_ratio_min {
            rng.gen_range(self.tuning.buffer_ratio_min..self.tuning.buffer_ratio_max)
        } else {
            self.tuning.buffer_ratio_min
        };
        let mut target = ((minimum * ratio).ceil() as i64).max(floor_cents);
        if let Some(ceiling) = ceiling_cents {
            target = target.min(ceiling);
        }
        *last = target;

        if !older.is_empty() {
            let remaining = (total_cents - target).max(0);
            let shape: Vec<f64> = older.iter().map(|cents| *cents as f64).collect();
            for (slot, cents) in older.iter_mut().zip(allocate_cents(remaining, &shape)) {
                *slot = cents;
            }
        }
        if target > total_cents {
            debug!(
                target,
                total_cents, "minimum exceeds requested total; most recent period takes precedence"
            );
        }
        Some(ratio)
    }

    /// Builds a full dataset deterministically from `plan` and `seed`.
    pub fn generate_dataset(&self, plan: &DatasetPlan, seed: u64) -> ChartResult<Dataset> {
        if !plan.net_margin.is_finite() || !(0.0..=1.0).contains(&plan.net_margin) {
            return Err(ChartError::InvalidConfig(
                "net margin must be in [0, 1]".to_owned(),
            ));
        }
        let current = YearMonth::from_date(plan.today);
        let month_count = plan.month_count();
        if month_count == 0 {
            return Err(ChartError::InvalidConfig(format!(
                "oldest month {} is after the current month {current}",
                plan.oldest_month
            )));
        }
        if month_count > MAX_MONTH_COUNT {
            return Err(ChartError::InvalidConfig(format!(
                "tenure of {month_count} months exceeds {MAX_MONTH_COUNT}"
            )));
        }
        if plan.daily_window_days > MAX_DAILY_WINDOW_DAYS {
            return Err(ChartError::InvalidConfig(format!(
                "daily window of {} days exceeds {MAX_DAILY_WINDOW_DAYS}",
                plan.daily_window_days
            )));
        }
        let first_daily = plan.first_daily_month()?;

        let mut rng = StdRng::seed_from_u64(seed);
        let total_net_cents = plan.total_net_cents();
        let monthly = self.generate(
            &GenerationRequest {
                total_net_cents,
                period_count: month_count as usize,
                minimum_cents: plan.minimum_cents,
            },
            &mut rng,
        );

        let months: Vec<PeriodRecord> = monthly
            .net_cents
            .iter()
            .zip(&monthly.split_cents)
            .enumerate()
            .map(|(offset, (net, split))| {
                let month = plan.oldest_month.plus_months(offset as u32);
                PeriodRecord::from_cents(PeriodId::month(month), *net, *split)
            })
            .collect();

        let mut days = Vec::new();
        let mut month = first_daily;
        while month <= current {
            let index = plan.oldest_month.months_through(month).saturating_sub(1) as usize;
            let month_net = monthly.net_cents.get(index).copied().unwrap_or(0);
            let day_count = if month == current {
                plan.today.day()
            } else {
                month.days_in_month()?
            };
            days.extend(self.daily_records(month, day_count, month_net, &mut rng)?);
            month = month.plus_months(1);
        }

        let net_sum: i64 = monthly.net_cents.iter().sum();
        let gross_cents = if plan.net_margin > 0.0 && net_sum != total_net_cents {
            (net_sum as f64 / plan.net_margin).round() as i64
        } else {
            plan.total_gross_cents
        };

        debug!(
            months = months.len(),
            days = days.len(),
            pattern = ?monthly.pattern.kind(),
            seed,
            "generated dataset"
        );

        Ok(Dataset {
            months,
            days,
            totals: DatasetTotals {
                gross: cents_to_decimal(gross_cents),
                net: cents_to_decimal(net_sum),
            },
            pattern: monthly.pattern,
            seed,
            buffer_ratio: monthly.buffer_ratio,
        })
    }

    fn daily_records<R: Rng + ?Sized>(
        &self,
        month: YearMonth,
        day_count: u32,
        month_net_cents: i64,
        rng: &mut R,
    ) -> ChartResult<Vec<PeriodRecord>> {
        let first = month.first_day()?;
        let series = self.generate(
            &GenerationRequest {
                total_net_cents: month_net_cents,
                period_count: day_count as usize,
                minimum_cents: 0,
            },
            rng,
        );
        series
            .net_cents
            .iter()
            .zip(&series.split_cents)
            .enumerate()
            .map(|(offset, (net, split))| {
                let date = first
                    .checked_add_days(Days::new(offset as u64))
                    .ok_or_else(|| {
                        ChartError::InvalidData(format!("day {offset} of {month} is out of range"))
                    })?;
                Ok(PeriodRecord::from_cents(PeriodId::day(date), *net, *split))
            })
            .collect()
    }
}
