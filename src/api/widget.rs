use std::fmt;

use serde::{Deserialize, Serialize};

use crate::animation::{AnimationPhase, AnimationScheduler};
use crate::core::ChartView;
use crate::interaction::InteractionState;
use crate::render::SurfaceId;

use super::render_frame_builder::WidgetGeometry;

/// Group of widgets showing the same dataset; category selection is
/// propagated within one family.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WidgetFamily(String);

impl WidgetFamily {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for WidgetFamily {
    fn default() -> Self {
        Self::new("earnings")
    }
}

impl fmt::Display for WidgetFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WidgetFamily {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// One mounted chart bound to a host surface.
#[derive(Debug)]
pub struct ChartWidget {
    id: SurfaceId,
    view: ChartView,
    family: WidgetFamily,
    pub(super) animation: AnimationScheduler,
    pub(super) interaction: InteractionState,
    pub(super) geometry: Option<WidgetGeometry>,
    /// Eased reveal progress of the last drawn frame.
    pub(super) drawn_progress: f64,
}

impl ChartWidget {
    #[must_use]
    pub(super) fn new(
        id: SurfaceId,
        view: ChartView,
        family: WidgetFamily,
        animation: AnimationScheduler,
    ) -> Self {
        Self {
            id,
            view,
            family,
            animation,
            interaction: InteractionState::default(),
            geometry: None,
            drawn_progress: 1.0,
        }
    }

    #[must_use]
    pub fn id(&self) -> &SurfaceId {
        &self.id
    }

    #[must_use]
    pub fn view(&self) -> ChartView {
        self.view
    }

    #[must_use]
    pub fn family(&self) -> &WidgetFamily {
        &self.family
    }

    #[must_use]
    pub fn animation_phase(&self) -> AnimationPhase {
        self.animation.phase()
    }

    #[must_use]
    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    #[must_use]
    pub fn geometry(&self) -> Option<&WidgetGeometry> {
        self.geometry.as_ref()
    }

    #[must_use]
    pub fn drawn_progress(&self) -> f64 {
        self.drawn_progress
    }

    /// Stops animating and forgets pointer state.
    pub(super) fn detach(&mut self) {
        self.animation.cancel();
        self.interaction.on_pointer_leave();
    }
}
