//! Easing curves applied to linear animation progress.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Easing {
    Linear,
    EaseOutCubic,
    /// Reveal curve used by the charts.
    #[default]
    EaseOutQuart,
    EaseInOutQuart,
}

impl Easing {
    /// Applies the curve to `t`, which is clamped to `[0, 1]` first.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 1.0 };
        match self {
            Self::Linear => t,
            Self::EaseOutCubic => 1.0 - (1.0 - t).powi(3),
            Self::EaseOutQuart => 1.0 - (1.0 - t).powi(4),
            Self::EaseInOutQuart => {
                if t < 0.5 {
                    8.0 * t * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Easing;

    #[test]
    fn endpoints_are_exact() {
        for easing in [
            Easing::Linear,
            Easing::EaseOutCubic,
            Easing::EaseOutQuart,
            Easing::EaseInOutQuart,
        ] {
            assert_eq!(easing.apply(0.0), 0.0);
            assert_eq!(easing.apply(1.0), 1.0);
        }
    }

    #[test]
    fn ease_out_quart_front_loads_progress() {
        assert!(Easing::EaseOutQuart.apply(0.25) > 0.6);
        assert_eq!(Easing::EaseOutQuart.apply(2.0), 1.0);
    }
}
