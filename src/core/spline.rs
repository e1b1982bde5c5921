use serde::{Deserialize, Serialize};

use crate::core::DataPoint;
use crate::error::{ChartError, ChartResult};

/// Default Catmull-Rom tension used by the charts.
pub const DEFAULT_TENSION: f64 = 0.35;

/// One cubic Bezier segment in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubicSegment {
    pub from: DataPoint,
    pub control1: DataPoint,
    pub control2: DataPoint,
    pub to: DataPoint,
}

impl CubicSegment {
    /// Evaluates the segment at `t` in `[0, 1]`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> DataPoint {
        let t = t.clamp(0.0, 1.0);
        let mt = 1.0 - t;
        let a = mt * mt * mt;
        let b = 3.0 * mt * mt * t;
        let c = 3.0 * mt * t * t;
        let d = t * t * t;
        DataPoint::new(
            a * self.from.x + b * self.control1.x + c * self.control2.x + d * self.to.x,
            a * self.from.y + b * self.control1.y + c * self.control2.y + d * self.to.y,
        )
    }
}

/// Builds smooth curves through ordered points.
///
/// Control points follow the Catmull-Rom construction: the tangent at a point
/// is the vector between its two neighbours scaled by the tension. End points
/// reuse themselves as the missing neighbour.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SplineRasterizer {
    tension: f64,
}

impl Default for SplineRasterizer {
    fn default() -> Self {
        Self {
            tension: DEFAULT_TENSION,
        }
    }
}

impl SplineRasterizer {
    pub fn new(tension: f64) -> ChartResult<Self> {
        if !tension.is_finite() || !(0.0..=1.0).contains(&tension) {
            return Err(ChartError::InvalidData(
                "spline tension must be finite and in [0, 1]".to_owned(),
            ));
        }
        Ok(Self { tension })
    }

    #[must_use]
    pub fn tension(self) -> f64 {
        self.tension
    }

    /// Returns one cubic segment per pair of consecutive points.
    ///
    /// Fewer than two points produce no segments.
    #[must_use]
    pub fn segments(self, points: &[DataPoint]) -> Vec<CubicSegment> {
        if points.len() < 2 {
            return Vec::new();
        }

        let last = points.len() - 1;
        let mut segments = Vec::with_capacity(last);
        for i in 0..last {
            let previous = points[i.saturating_sub(1)];
            let current = points[i];
            let next = points[i + 1];
            let after_next = points[(i + 2).min(last)];

            let mut control1 = DataPoint::new(
                current.x + (next.x - previous.x) * self.tension / 2.0,
                current.y + (next.y - previous.y) * self.tension / 2.0,
            );
            let mut control2 = DataPoint::new(
                next.x - (after_next.x - current.x) * self.tension / 2.0,
                next.y - (after_next.y - current.y) * self.tension / 2.0,
            );

            // Keep control points inside the segment's x span so curves over
            // monotonically indexed points never loop back.
            let (min_x, max_x) = if current.x <= next.x {
                (current.x, next.x)
            } else {
                (next.x, current.x)
            };
            control1.x = control1.x.clamp(min_x, max_x);
            control2.x = control2.x.clamp(min_x, max_x);

            segments.push(CubicSegment {
                from: current,
                control1,
                control2,
                to: next,
            });
        }
        segments
    }

    /// Approximates the curve with straight segments, `steps` per cubic.
    #[must_use]
    pub fn flatten(self, points: &[DataPoint], steps: usize) -> Vec<DataPoint> {
        match points.len() {
            0 => return Vec::new(),
            1 => return points.to_vec(),
            _ => {}
        }
        let steps = steps.max(1);
        let segments = self.segments(points);
        let mut out = Vec::with_capacity(segments.len() * steps + 1);
        out.push(points[0]);
        for segment in &segments {
            for step in 1..=steps {
                out.push(segment.point_at(step as f64 / steps as f64));
            }
        }
        out
    }
}
