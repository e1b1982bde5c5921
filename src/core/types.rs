use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Pixel dimensions of one drawing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        self.width > 0 && self.height > 0
    }

    pub(crate) fn ensure_valid(self) -> ChartResult<Self> {
        if !self.is_valid() {
            return Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(self)
    }
}

/// A point in pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance_to(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    #[must_use]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        Self {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }
}

/// Padding between the surface edge and the plot area, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartInsets {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Default for ChartInsets {
    fn default() -> Self {
        Self {
            left: 12.0,
            top: 12.0,
            right: 12.0,
            bottom: 28.0,
        }
    }
}

impl ChartInsets {
    pub(crate) fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("left", self.left),
            ("top", self.top),
            ("right", self.right),
            ("bottom", self.bottom),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "inset `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

/// Rectangle that series are drawn into after insets are applied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PlotArea {
    /// Resolves the plot rectangle of `viewport` after `insets`.
    ///
    /// Fails when the insets leave no drawable area.
    pub fn from_viewport(viewport: Viewport, insets: ChartInsets) -> ChartResult<Self> {
        let viewport = viewport.ensure_valid()?;
        let insets = insets.validate()?;
        let width = f64::from(viewport.width) - insets.left - insets.right;
        let height = f64::from(viewport.height) - insets.top - insets.bottom;
        if width <= 0.0 || height <= 0.0 {
            return Err(ChartError::InvalidData(format!(
                "insets leave no plot area inside {}x{} viewport",
                viewport.width, viewport.height
            )));
        }
        Ok(Self {
            left: insets.left,
            top: insets.top,
            width,
            height,
        })
    }

    #[must_use]
    pub fn right(self) -> f64 {
        self.left + self.width
    }

    #[must_use]
    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    #[must_use]
    pub fn contains(self, point: DataPoint) -> bool {
        point.x >= self.left
            && point.x <= self.right()
            && point.y >= self.top
            && point.y <= self.bottom()
    }
}
