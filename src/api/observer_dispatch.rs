use crate::render::SurfaceProvider;

use super::{DashboardContext, DashboardEvent, EarningsDashboard, KeyValueStore};

impl<P: SurfaceProvider, S: KeyValueStore> EarningsDashboard<P, S> {
    pub(super) fn observer_context(&self) -> DashboardContext {
        DashboardContext {
            revision: self.maintainer.current().map(|handle| handle.revision),
            active_category: self.active_category.get(),
            widget_count: self.widgets.len(),
        }
    }

    pub(super) fn emit_event(&mut self, event: DashboardEvent) {
        if self.observers.is_empty() {
            return;
        }
        let context = self.observer_context();
        for observer in &mut self.observers {
            observer.on_event(&event, context);
        }
    }
}
