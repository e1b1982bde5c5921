//! Frame-driven reveal animation.
//!
//! Every drawing surface owns at most one [`AnimationScheduler`]. Chart points
//! are interpolated from the chart bottom to their final position using the
//! eased progress it reports.

pub mod easing;
pub mod scheduler;

pub use easing::Easing;
pub use scheduler::{AnimationFrame, AnimationPhase, AnimationScheduler, DEFAULT_DURATION_MS};

use crate::core::DataPoint;

/// Interpolates every point between `baseline_y` and its final y.
#[must_use]
pub fn interpolate_reveal(points: &[DataPoint], baseline_y: f64, eased: f64) -> Vec<DataPoint> {
    let eased = if eased.is_finite() {
        eased.clamp(0.0, 1.0)
    } else {
        1.0
    };
    points
        .iter()
        .map(|point| DataPoint::new(point.x, baseline_y + (point.y - baseline_y) * eased))
        .collect()
}
