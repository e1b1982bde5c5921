use serde::{Deserialize, Serialize};

use crate::core::Category;
use crate::render::SurfaceId;

use super::RegenerationReason;

/// Read-only dashboard snapshot passed to observer hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardContext {
    /// Revision of the current dataset, `None` before the first load.
    pub revision: Option<u64>,
    pub active_category: Option<Category>,
    pub widget_count: usize,
}

/// Event stream exposed to observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum DashboardEvent {
    DatasetReused {
        revision: u64,
    },
    DatasetLoadedFromCache {
        revision: u64,
    },
    DatasetRegenerated {
        revision: u64,
        reason: RegenerationReason,
    },
    ActiveCategoryChanged {
        previous: Option<Category>,
        current: Category,
    },
    AnimationStarted {
        surface: SurfaceId,
    },
    AnimationFinished {
        surface: SurfaceId,
    },
    Rendered {
        surface: SurfaceId,
        animated: bool,
    },
}

/// Hook interface for hosts that mirror dashboard state elsewhere.
///
/// Observers see events after the dashboard state is updated and cannot
/// mutate it.
pub trait DashboardObserver {
    fn id(&self) -> &str;
    fn on_event(&mut self, event: &DashboardEvent, context: DashboardContext);
}
