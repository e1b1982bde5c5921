use serde::{Deserialize, Serialize};

use crate::core::{Category, DataPoint, Viewport};
use crate::error::{ChartError, ChartResult};

/// Size and spacing of the host-rendered tooltip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TooltipConfig {
    pub width_px: f64,
    pub height_px: f64,
    /// Horizontal gap between the hit point and the tooltip.
    pub offset_px: f64,
}

impl Default for TooltipConfig {
    fn default() -> Self {
        Self {
            width_px: 168.0,
            height_px: 96.0,
            offset_px: 14.0,
        }
    }
}

impl TooltipConfig {
    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("width_px", self.width_px),
            ("height_px", self.height_px),
            ("offset_px", self.offset_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "tooltip `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Value object the host renders as the tooltip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TooltipState {
    pub visible: bool,
    pub anchor_index: usize,
    /// Axis label of the anchor slot.
    pub label: String,
    /// Top-left corner in surface pixels.
    pub x: f64,
    pub y: f64,
    /// `true` when the tooltip was flipped to the left of the hit point.
    pub flipped: bool,
    pub values: Vec<(Category, f64)>,
}

impl TooltipState {
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            visible: false,
            anchor_index: 0,
            label: String::new(),
            x: 0.0,
            y: 0.0,
            flipped: false,
            values: Vec::new(),
        }
    }

    #[must_use]
    pub fn value(&self, category: Category) -> Option<f64> {
        self.values
            .iter()
            .find(|(candidate, _)| *candidate == category)
            .map(|(_, value)| *value)
    }
}

impl Default for TooltipState {
    fn default() -> Self {
        Self::hidden()
    }
}

/// Places the tooltip right of `hit_x`, flipping left when it would overflow
/// the surface, vertically centered on `anchor_y` and kept inside the surface.
///
/// Returns the top-left corner and whether it flipped.
#[must_use]
pub fn place_tooltip(
    hit_x: f64,
    anchor_y: f64,
    surface: Viewport,
    config: TooltipConfig,
) -> (DataPoint, bool) {
    let surface_width = f64::from(surface.width);
    let surface_height = f64::from(surface.height);

    let right_x = hit_x + config.offset_px;
    let (x, flipped) = if right_x + config.width_px > surface_width {
        ((hit_x - config.offset_px - config.width_px).max(0.0), true)
    } else {
        (right_x, false)
    };

    let max_y = (surface_height - config.height_px).max(0.0);
    let y = (anchor_y - config.height_px / 2.0).clamp(0.0, max_y);
    (DataPoint::new(x, y), flipped)
}
