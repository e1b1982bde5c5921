use rand::Rng;
use serde::{Deserialize, Serialize};

/// Weight every pattern starts from so the first period is never exactly zero.
const BASE_WEIGHT: f64 = 0.15;

/// Growth narrative followed by one generated timeline.
///
/// Each variant is a pure function from normalized position `t` in `[0, 1]`
/// (oldest to most recent) to an unnormalized weight. Parameters are drawn
/// once per generation and stored with the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "pattern", rename_all = "snake_case")]
pub enum GrowthPattern {
    /// Monotonic power-curve growth.
    Consistent { exponent: f64 },
    /// Rise to a peak, then a mild decline.
    PeakMiddle { peak_at: f64, decline: f64 },
    /// Slow power-curve growth, then a late acceleration after `knee_at`.
    RapidLate {
        exponent: f64,
        knee_at: f64,
        acceleration: f64,
    },
    /// Growth up to `plateau_at`, then flat.
    Plateau { plateau_at: f64, exponent: f64 },
}

/// Discriminant of [`GrowthPattern`], useful for logging and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthPatternKind {
    Consistent,
    PeakMiddle,
    RapidLate,
    Plateau,
}

impl GrowthPattern {
    /// Picks one pattern uniformly; timelines shorter than two periods are
    /// always `Consistent`.
    pub fn choose<R: Rng + ?Sized>(period_count: usize, rng: &mut R) -> Self {
        if period_count < 2 {
            return Self::consistent(rng);
        }
        match rng.gen_range(0..4) {
            0 => Self::consistent(rng),
            1 => Self::PeakMiddle {
                peak_at: rng.gen_range(0.65..0.75),
                decline: rng.gen_range(0.10..0.25),
            },
            2 => Self::RapidLate {
                exponent: rng.gen_range(1.1..1.6),
                knee_at: rng.gen_range(0.65..0.80),
                acceleration: rng.gen_range(1.5..3.0),
            },
            _ => Self::Plateau {
                plateau_at: rng.gen_range(0.70..0.90),
                exponent: rng.gen_range(1.2..1.8),
            },
        }
    }

    fn consistent<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::Consistent {
            exponent: rng.gen_range(1.2..2.0),
        }
    }

    #[must_use]
    pub fn kind(self) -> GrowthPatternKind {
        match self {
            Self::Consistent { .. } => GrowthPatternKind::Consistent,
            Self::PeakMiddle { .. } => GrowthPatternKind::PeakMiddle,
            Self::RapidLate { .. } => GrowthPatternKind::RapidLate,
            Self::Plateau { .. } => GrowthPatternKind::Plateau,
        }
    }

    /// Unnormalized weight at position `t` (clamped to `[0, 1]`).
    #[must_use]
    pub fn weight(self, t: f64) -> f64 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 1.0 };
        match self {
            Self::Consistent { exponent } => BASE_WEIGHT + t.powf(exponent),
            Self::PeakMiddle { peak_at, decline } => {
                let peak = BASE_WEIGHT + 1.0;
                if t <= peak_at {
                    BASE_WEIGHT + (t / peak_at).powf(1.5)
                } else {
                    let past_peak = (t - peak_at) / (1.0 - peak_at);
                    peak * (1.0 - decline * past_peak)
                }
            }
            Self::RapidLate {
                exponent,
                knee_at,
                acceleration,
            } => {
                let slow_span = 0.5;
                if t <= knee_at {
                    BASE_WEIGHT + slow_span * (t / knee_at).powf(exponent)
                } else {
                    let late = (t - knee_at) / (1.0 - knee_at);
                    BASE_WEIGHT + slow_span + acceleration * late * late
                }
            }
            Self::Plateau {
                plateau_at,
                exponent,
            } => BASE_WEIGHT + (t / plateau_at).min(1.0).powf(exponent),
        }
    }
}

/// Normalized position of period `index` in a timeline of `count` periods.
#[must_use]
pub fn timeline_position(index: usize, count: usize) -> f64 {
    if count < 2 {
        1.0
    } else {
        index as f64 / (count - 1) as f64
    }
}
