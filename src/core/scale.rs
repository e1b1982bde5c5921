use serde::{Deserialize, Serialize};

use crate::core::types::{DataPoint, PlotArea};
use crate::error::{ChartError, ChartResult};

/// Headroom applied above the largest visible value.
pub const DEFAULT_HEADROOM: f64 = 1.15;

/// Maps `(slot index, value)` pairs into plot-area pixels.
///
/// Slot zero sits on the left edge and slot `slot_count - 1` on the right
/// edge; value zero sits on the bottom edge and `axis_max` on the top edge.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoordinateMapper {
    area: PlotArea,
    slot_count: usize,
    axis_max: f64,
}

impl CoordinateMapper {
    /// Builds a mapper whose axis maximum is `observed_max * headroom`.
    ///
    /// An all-zero series still gets a unit axis so nothing divides by zero.
    pub fn new(
        area: PlotArea,
        slot_count: usize,
        observed_max: f64,
        headroom: f64,
    ) -> ChartResult<Self> {
        if !area.width.is_finite() || !area.height.is_finite() || area.width <= 0.0 || area.height <= 0.0 {
            return Err(ChartError::InvalidData(
                "plot area must be finite and non-empty".to_owned(),
            ));
        }
        if !headroom.is_finite() || headroom < 1.0 {
            return Err(ChartError::InvalidData(
                "headroom must be finite and >= 1".to_owned(),
            ));
        }
        if !observed_max.is_finite() || observed_max < 0.0 {
            return Err(ChartError::InvalidData(
                "observed maximum must be finite and >= 0".to_owned(),
            ));
        }

        let axis_max = if observed_max > 0.0 {
            observed_max * headroom
        } else {
            1.0
        };
        Ok(Self {
            area,
            slot_count,
            axis_max,
        })
    }

    #[must_use]
    pub fn area(self) -> PlotArea {
        self.area
    }

    #[must_use]
    pub fn axis_max(self) -> f64 {
        self.axis_max
    }

    #[must_use]
    pub fn slot_count(self) -> usize {
        self.slot_count
    }

    /// Horizontal distance between neighbouring slots.
    #[must_use]
    pub fn slot_step(self) -> f64 {
        if self.slot_count < 2 {
            self.area.width
        } else {
            self.area.width / (self.slot_count - 1) as f64
        }
    }

    #[must_use]
    pub fn index_to_x(self, index: usize) -> f64 {
        if self.slot_count < 2 {
            // A lone point sits on the right edge, where "now" is drawn.
            return self.area.right();
        }
        self.area.left + index as f64 * self.slot_step()
    }

    #[must_use]
    pub fn value_to_y(self, value: f64) -> f64 {
        let normalized = (value / self.axis_max).clamp(0.0, 1.0);
        self.area.bottom() - normalized * self.area.height
    }

    /// Y of the chart bottom, where reveal animations start.
    #[must_use]
    pub fn baseline_y(self) -> f64 {
        self.area.bottom()
    }

    #[must_use]
    pub fn map(self, index: usize, value: f64) -> DataPoint {
        DataPoint::new(self.index_to_x(index), self.value_to_y(value))
    }

    /// Maps a whole value line; point `i` lands on slot `i`.
    #[must_use]
    pub fn map_line(self, values: &[f64]) -> Vec<DataPoint> {
        values
            .iter()
            .enumerate()
            .map(|(index, value)| self.map(index, *value))
            .collect()
    }

    /// Nearest slot for pixel `x`, clamped into `[0, slot_count)`.
    #[must_use]
    pub fn x_to_nearest_index(self, x: f64) -> Option<usize> {
        if self.slot_count == 0 || !x.is_finite() {
            return None;
        }
        if self.slot_count == 1 {
            return Some(0);
        }
        let raw = ((x - self.area.left) / self.slot_step()).round();
        let max_index = (self.slot_count - 1) as f64;
        Some(raw.clamp(0.0, max_index) as usize)
    }
}
