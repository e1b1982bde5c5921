//! Pointer interaction: hit testing, tooltips and the shared highlight state.

pub mod tooltip;

pub use hit_test::{
    DEFAULT_HIT_THRESHOLD_PX, SeriesHit, distance_to_polyline, distance_to_segment, hit_test,
};
pub use tooltip::{TooltipConfig, TooltipState, place_tooltip};

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::{Category, DataPoint};

/// Process-wide highlighted category shared by every widget.
///
/// Clones share the same value. Reads and writes swap the whole value, so a
/// widget never sees a partially updated selection.
#[derive(Debug, Clone, Default)]
pub struct ActiveCategoryState {
    inner: Rc<Cell<Option<Category>>>,
}

impl ActiveCategoryState {
    #[must_use]
    pub fn new(initial: Option<Category>) -> Self {
        Self {
            inner: Rc::new(Cell::new(initial)),
        }
    }

    #[must_use]
    pub fn get(&self) -> Option<Category> {
        self.inner.get()
    }

    /// Stores `category` and returns the previous value.
    pub(crate) fn replace(&self, category: Option<Category>) -> Option<Category> {
        self.inner.replace(category)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerMode {
    Outside,
    Hovering,
}

/// Per-widget pointer state.
#[derive(Debug, Clone, PartialEq)]
pub struct InteractionState {
    mode: PointerMode,
    cursor: DataPoint,
    hit: Option<SeriesHit>,
    tooltip: TooltipState,
}

impl Default for InteractionState {
    fn default() -> Self {
        Self {
            mode: PointerMode::Outside,
            cursor: DataPoint::new(0.0, 0.0),
            hit: None,
            tooltip: TooltipState::hidden(),
        }
    }
}

impl InteractionState {
    #[must_use]
    pub fn mode(&self) -> PointerMode {
        self.mode
    }

    #[must_use]
    pub fn cursor(&self) -> DataPoint {
        self.cursor
    }

    #[must_use]
    pub fn hit(&self) -> Option<SeriesHit> {
        self.hit
    }

    #[must_use]
    pub fn tooltip(&self) -> &TooltipState {
        &self.tooltip
    }

    pub fn on_pointer_move(&mut self, x: f64, y: f64) {
        self.mode = PointerMode::Hovering;
        self.cursor = DataPoint::new(x, y);
    }

    pub fn on_pointer_leave(&mut self) {
        self.mode = PointerMode::Outside;
        self.clear_hit();
    }

    pub fn set_hit(&mut self, hit: SeriesHit, tooltip: TooltipState) {
        self.hit = Some(hit);
        self.tooltip = tooltip;
    }

    pub fn clear_hit(&mut self) {
        self.hit = None;
        self.tooltip = TooltipState::hidden();
    }
}
