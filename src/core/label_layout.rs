use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::{ChartError, ChartResult};

/// Spacing rules for x-axis labels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelLayoutConfig {
    /// Minimum horizontal gap between neighbouring labels.
    pub min_gap_px: f64,
    /// Smallest allowed left edge of the first label.
    pub min_left_inset_px: f64,
    /// Shift applied to each label's centered position.
    pub offset_px: f64,
}

impl Default for LabelLayoutConfig {
    fn default() -> Self {
        Self {
            min_gap_px: 8.0,
            min_left_inset_px: 4.0,
            offset_px: 0.0,
        }
    }
}

impl LabelLayoutConfig {
    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("min_gap_px", self.min_gap_px),
            ("min_left_inset_px", self.min_left_inset_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "label layout `{name}` must be finite and >= 0"
                )));
            }
        }
        if !self.offset_px.is_finite() {
            return Err(ChartError::InvalidConfig(
                "label layout offset must be finite".to_owned(),
            ));
        }
        Ok(self)
    }
}

/// Label to place: its slot, the x of that slot and its rendered width.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelRequest {
    pub index: usize,
    pub data_x: f64,
    pub text: String,
    pub width: f64,
}

/// Final label position; `left` is the left edge of the text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelPlacement {
    pub index: usize,
    pub text: String,
    pub left: f64,
    pub width: f64,
}

impl LabelPlacement {
    #[must_use]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }
}

/// Slots that get a label: first, quartiles and last, deduplicated.
#[must_use]
pub fn label_target_indices(slot_count: usize) -> SmallVec<[usize; 5]> {
    let mut indices: SmallVec<[usize; 5]> = SmallVec::new();
    if slot_count == 0 {
        return indices;
    }
    let last = slot_count - 1;
    for quarter in 0..=4 {
        let index = ((last as f64) * f64::from(quarter) / 4.0).round() as usize;
        if indices.last() != Some(&index) {
            indices.push(index);
        }
    }
    indices
}

/// Deterministic, backend-independent text width estimate.
#[must_use]
pub fn estimate_label_text_width_px(text: &str, font_size_px: f64) -> f64 {
    let units = text.chars().fold(0.0, |acc, ch| {
        acc + match ch {
            '0'..='9' => 0.62,
            '.' | ',' => 0.34,
            '-' | '+' | '%' => 0.42,
            ' ' => 0.33,
            'A'..='Z' => 0.68,
            _ => 0.56,
        }
    });
    (units * font_size_px).max(font_size_px)
}

/// Places labels right-to-left.
///
/// The last label is pinned so its right edge touches `right_edge`. Walking
/// backward, each label wants to be centered on its slot (plus the offset) but
/// is clamped so its right edge stays `min_gap_px` before the next label. The
/// first label never starts left of `min_left_inset_px`; if that pushes it
/// into its neighbour, following labels are pushed right to restore the gap.
/// The result is ordered by x with every gap at least `min_gap_px`.
#[must_use]
pub fn layout_labels(
    requests: &[LabelRequest],
    right_edge: f64,
    config: LabelLayoutConfig,
) -> Vec<LabelPlacement> {
    let mut placements: Vec<LabelPlacement> = requests
        .iter()
        .map(|request| LabelPlacement {
            index: request.index,
            text: request.text.clone(),
            left: 0.0,
            width: if request.width.is_finite() {
                request.width.max(0.0)
            } else {
                0.0
            },
        })
        .collect();
    let Some(last) = placements.len().checked_sub(1) else {
        return placements;
    };

    placements[last].left = right_edge - placements[last].width;
    for i in (0..last).rev() {
        let desired = requests[i].data_x - placements[i].width / 2.0 + config.offset_px;
        let limit = placements[i + 1].left - config.min_gap_px - placements[i].width;
        placements[i].left = if desired.is_finite() {
            desired.min(limit)
        } else {
            limit
        };
    }

    if placements[0].left < config.min_left_inset_px {
        placements[0].left = config.min_left_inset_px;
    }
    for i in 1..placements.len() {
        let floor = placements[i - 1].right() + config.min_gap_px;
        if placements[i].left < floor {
            placements[i].left = floor;
        }
    }
    placements
}
