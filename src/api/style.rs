use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::animation::{DEFAULT_DURATION_MS, Easing};
use crate::core::{
    Category, ChartInsets, DEFAULT_HEADROOM, DEFAULT_TENSION, LabelLayoutConfig,
};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{DEFAULT_HIT_THRESHOLD_PX, TooltipConfig};
use crate::render::Color;

/// Visual and interaction tuning shared by every chart widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    pub insets: ChartInsets,
    /// Multiplier above the largest value so lines never touch the top edge.
    pub headroom: f64,
    pub spline_tension: f64,
    pub animation_duration_ms: f64,
    pub easing: Easing,
    pub hit_threshold_px: f64,
    pub tooltip: TooltipConfig,
    pub labels: LabelLayoutConfig,
    pub label_font_size_px: f64,
    /// Gap between the plot bottom and the label baseline.
    pub label_padding_px: f64,
    pub label_color: Color,
    pub axis_color: Color,
    pub stroke_width: f64,
    pub active_stroke_width: f64,
    /// Alpha of non-highlighted lines while a category is active.
    pub inactive_alpha: f64,
    pub category_colors: IndexMap<Category, Color>,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            insets: ChartInsets::default(),
            headroom: DEFAULT_HEADROOM,
            spline_tension: DEFAULT_TENSION,
            animation_duration_ms: DEFAULT_DURATION_MS,
            easing: Easing::EaseOutQuart,
            hit_threshold_px: DEFAULT_HIT_THRESHOLD_PX,
            tooltip: TooltipConfig::default(),
            labels: LabelLayoutConfig::default(),
            label_font_size_px: 11.0,
            label_padding_px: 8.0,
            label_color: Color::rgb(0.54, 0.59, 0.64),
            axis_color: Color::rgba(0.54, 0.59, 0.64, 0.35),
            stroke_width: 1.5,
            active_stroke_width: 2.5,
            inactive_alpha: 0.4,
            category_colors: default_category_colors(),
        }
    }
}

impl ChartStyle {
    #[must_use]
    pub fn color_for(&self, category: Category) -> Color {
        self.category_colors
            .get(&category)
            .copied()
            .unwrap_or(Color::rgb(0.5, 0.5, 0.5))
    }

    pub fn validate(&self) -> ChartResult<()> {
        self.insets.validate()?;
        self.tooltip.validate()?;
        self.labels.validate()?;
        if !self.headroom.is_finite() || self.headroom < 1.0 {
            return Err(ChartError::InvalidConfig(
                "headroom must be finite and >= 1".to_owned(),
            ));
        }
        if !self.spline_tension.is_finite() || !(0.0..=1.0).contains(&self.spline_tension) {
            return Err(ChartError::InvalidConfig(
                "spline tension must be in [0, 1]".to_owned(),
            ));
        }
        if !self.animation_duration_ms.is_finite() || self.animation_duration_ms < 0.0 {
            return Err(ChartError::InvalidConfig(
                "animation duration must be finite and >= 0".to_owned(),
            ));
        }
        for (name, value) in [
            ("hit_threshold_px", self.hit_threshold_px),
            ("label_font_size_px", self.label_font_size_px),
            ("stroke_width", self.stroke_width),
            ("active_stroke_width", self.active_stroke_width),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "`{name}` must be finite and > 0"
                )));
            }
        }
        if !self.label_padding_px.is_finite() || self.label_padding_px < 0.0 {
            return Err(ChartError::InvalidConfig(
                "label padding must be finite and >= 0".to_owned(),
            ));
        }
        if !self.inactive_alpha.is_finite() || !(0.0..=1.0).contains(&self.inactive_alpha) {
            return Err(ChartError::InvalidConfig(
                "inactive alpha must be in [0, 1]".to_owned(),
            ));
        }
        self.label_color.validate()?;
        self.axis_color.validate()?;
        for color in self.category_colors.values() {
            color.validate()?;
        }
        Ok(())
    }
}

fn default_category_colors() -> IndexMap<Category, Color> {
    IndexMap::from([
        (Category::Subscriptions, Color::rgb(0.0, 0.69, 0.94)),
        (Category::Tips, Color::rgb(0.98, 0.62, 0.16)),
        (Category::Posts, Color::rgb(0.55, 0.36, 0.96)),
        (Category::Messages, Color::rgb(0.13, 0.77, 0.37)),
        (Category::Referrals, Color::rgb(0.94, 0.27, 0.27)),
        (Category::Streams, Color::rgb(0.93, 0.28, 0.6)),
    ])
}
