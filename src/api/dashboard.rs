use indexmap::IndexMap;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rust_decimal::Decimal;
use tracing::{debug, trace, warn};

use crate::animation::{AnimationPhase, AnimationScheduler};
use crate::core::{Category, ChartView, SeriesGenerator};
use crate::error::{ChartError, ChartResult};
use crate::interaction::{ActiveCategoryState, TooltipState};
use crate::render::{SurfaceId, SurfaceProvider};

use super::render_frame_builder::{GeometryRequest, WidgetGeometry, build_render_frame};
use super::{
    ChartStyle, ChartWidget, DashboardEvent, DashboardObserver, DatasetHandle, EarningsConfig,
    InvariantMaintainer, KeyValueStore, MaintainOutcome, WidgetFamily,
};

/// Synchronous core behind a set of linked earnings charts.
///
/// The host feeds it data-ready signals, frame callbacks and pointer events;
/// it keeps the dataset valid, drives one reveal animation per surface and
/// draws into host-owned surfaces.
pub struct EarningsDashboard<P: SurfaceProvider, S: KeyValueStore> {
    pub(super) config: EarningsConfig,
    pub(super) style: ChartStyle,
    pub(super) generator: SeriesGenerator,
    pub(super) maintainer: InvariantMaintainer<S>,
    pub(super) surfaces: P,
    pub(super) widgets: IndexMap<SurfaceId, ChartWidget>,
    pub(super) active_category: ActiveCategoryState,
    pub(super) observers: Vec<Box<dyn DashboardObserver>>,
    rng: StdRng,
}

impl<P: SurfaceProvider, S: KeyValueStore> EarningsDashboard<P, S> {
    /// Creates a dashboard without generating anything; the first
    /// [`Self::on_data_ready`] loads or generates the dataset.
    pub fn new(
        config: EarningsConfig,
        style: ChartStyle,
        surfaces: P,
        store: S,
    ) -> ChartResult<Self> {
        config.validate()?;
        style.validate()?;
        let generator = SeriesGenerator::new(config.tuning.clone())?;
        let rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Ok(Self {
            config,
            style,
            generator,
            maintainer: InvariantMaintainer::new(store),
            surfaces,
            widgets: IndexMap::new(),
            active_category: ActiveCategoryState::default(),
            observers: Vec::new(),
            rng,
        })
    }

    /// Shares `state` with other dashboards so they highlight together.
    #[must_use]
    pub fn with_active_category_state(mut self, state: ActiveCategoryState) -> Self {
        self.active_category = state;
        self
    }

    #[must_use]
    pub fn config(&self) -> &EarningsConfig {
        &self.config
    }

    #[must_use]
    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    #[must_use]
    pub fn dataset(&self) -> Option<&DatasetHandle> {
        self.maintainer.current()
    }

    #[must_use]
    pub fn maintainer(&self) -> &InvariantMaintainer<S> {
        &self.maintainer
    }

    #[must_use]
    pub fn store(&self) -> &S {
        self.maintainer.cache().store()
    }

    #[must_use]
    pub fn surfaces(&self) -> &P {
        &self.surfaces
    }

    pub fn surfaces_mut(&mut self) -> &mut P {
        &mut self.surfaces
    }

    #[must_use]
    pub fn active_category(&self) -> Option<Category> {
        self.active_category.get()
    }

    #[must_use]
    pub fn active_category_state(&self) -> ActiveCategoryState {
        self.active_category.clone()
    }

    #[must_use]
    pub fn widget(&self, id: &SurfaceId) -> Option<&ChartWidget> {
        self.widgets.get(id)
    }

    #[must_use]
    pub fn widget_count(&self) -> usize {
        self.widgets.len()
    }

    #[must_use]
    pub fn tooltip(&self, id: &SurfaceId) -> Option<&TooltipState> {
        self.widgets.get(id).map(|widget| widget.interaction.tooltip())
    }

    #[must_use]
    pub fn animation_phase(&self, id: &SurfaceId) -> Option<AnimationPhase> {
        self.widgets.get(id).map(ChartWidget::animation_phase)
    }

    /// Revalidates the dataset against `config`.
    ///
    /// Returns `None` for a disabled configuration, which leaves whatever is
    /// drawn untouched. A replaced dataset restarts every widget's reveal.
    pub fn on_data_ready(
        &mut self,
        config: EarningsConfig,
        now_ms: f64,
    ) -> ChartResult<Option<MaintainOutcome>> {
        if !config.enabled {
            debug!("earnings core disabled; keeping current drawing");
            return Ok(None);
        }
        config.validate()?;
        if config.tuning != self.config.tuning {
            self.generator = SeriesGenerator::new(config.tuning.clone())?;
        }
        self.config = config;

        let outcome = self
            .maintainer
            .ensure(&self.generator, &self.config, &mut self.rng)?;
        self.after_maintain(outcome, now_ms);
        Ok(Some(outcome))
    }

    /// Regenerates from a manually supplied gross amount.
    pub fn override_gross(
        &mut self,
        gross: Decimal,
        preserve_anchor: bool,
        now_ms: f64,
    ) -> ChartResult<MaintainOutcome> {
        let outcome = self.maintainer.override_gross(
            &self.generator,
            &self.config,
            gross,
            preserve_anchor,
            &mut self.rng,
        )?;
        self.after_maintain(outcome, now_ms);
        Ok(outcome)
    }

    /// Forgets a manual override; the next data-ready signal follows the
    /// configuration again.
    pub fn clear_gross_override(&mut self) {
        self.maintainer.clear_override();
    }

    /// Discards the current timeline and draws a fresh one.
    pub fn regenerate(&mut self, now_ms: f64) -> ChartResult<MaintainOutcome> {
        let outcome = self
            .maintainer
            .regenerate(&self.generator, &self.config, &mut self.rng)?;
        self.after_maintain(outcome, now_ms);
        Ok(outcome)
    }

    /// Binds a chart to surface `id` and starts its reveal when data exists.
    ///
    /// Mounting an id twice replaces the previous widget.
    pub fn mount_widget(
        &mut self,
        id: impl Into<SurfaceId>,
        view: ChartView,
        family: WidgetFamily,
        now_ms: f64,
    ) -> ChartResult<()> {
        let id = id.into();
        let animation = AnimationScheduler::new(self.style.animation_duration_ms, self.style.easing)?;
        if let Some(mut previous) = self
            .widgets
            .insert(id.clone(), ChartWidget::new(id.clone(), view, family, animation))
        {
            previous.detach();
            debug!(surface = %id, "replaced mounted widget");
        }
        if self.maintainer.current().is_some() {
            self.request_draw(&id, now_ms);
        }
        Ok(())
    }

    /// Stops the widget's animation and drops its pointer state.
    pub fn unmount_widget(&mut self, id: &SurfaceId) -> bool {
        match self.widgets.shift_remove(id) {
            Some(mut widget) => {
                widget.detach();
                true
            }
            None => false,
        }
    }

    /// Restarts the reveal animation of one widget.
    ///
    /// A draw request while an animation runs supersedes it.
    pub fn request_draw(&mut self, id: &SurfaceId, now_ms: f64) {
        let Some(widget) = self.widgets.get_mut(id) else {
            trace!(surface = %id, "draw request for unmounted widget");
            return;
        };
        widget.animation.start(now_ms);
        debug!(surface = %id, now_ms, "reveal animation started");
        self.emit_event(DashboardEvent::AnimationStarted {
            surface: id.clone(),
        });
        self.render_widget(id, 0.0, true);
    }

    /// Advances every running animation; returns `true` while any widget
    /// still needs frames.
    pub fn on_frame(&mut self, now_ms: f64) -> bool {
        let mut needs_next_frame = false;
        let ids: Vec<SurfaceId> = self.widgets.keys().cloned().collect();
        for id in ids {
            let Some(frame) = self
                .widgets
                .get_mut(&id)
                .and_then(|widget| widget.animation.tick(now_ms))
            else {
                continue;
            };
            self.render_widget(&id, frame.eased, true);
            if frame.needs_next_frame {
                needs_next_frame = true;
            } else {
                debug!(surface = %id, now_ms, "reveal animation finished");
                self.emit_event(DashboardEvent::AnimationFinished { surface: id });
            }
        }
        needs_next_frame
    }

    fn after_maintain(&mut self, outcome: MaintainOutcome, now_ms: f64) {
        let Some(revision) = self.maintainer.current().map(|handle| handle.revision) else {
            return;
        };
        let event = match outcome {
            MaintainOutcome::Reused => DashboardEvent::DatasetReused { revision },
            MaintainOutcome::LoadedFromCache => {
                DashboardEvent::DatasetLoadedFromCache { revision }
            }
            MaintainOutcome::Regenerated { reason } => {
                DashboardEvent::DatasetRegenerated { revision, reason }
            }
        };
        self.emit_event(event);
        if !outcome.replaced_dataset() {
            return;
        }
        let ids: Vec<SurfaceId> = self.widgets.keys().cloned().collect();
        for id in ids {
            if let Some(widget) = self.widgets.get_mut(&id) {
                widget.interaction.clear_hit();
            }
            self.request_draw(&id, now_ms);
        }
    }

    /// Rebuilds geometry when stale and draws one frame at `eased` progress.
    ///
    /// A missing surface, missing data or an empty series draws nothing.
    pub(super) fn render_widget(&mut self, id: &SurfaceId, eased: f64, animated: bool) {
        if !self.ensure_geometry(id) {
            return;
        }
        let active = self.active_category.get();
        let Some(geometry) = self
            .widgets
            .get(id)
            .and_then(|widget| widget.geometry.as_ref())
        else {
            return;
        };
        if geometry.is_empty() {
            trace!(surface = %id, "no series data to draw");
            return;
        }
        let frame = match build_render_frame(geometry, &self.style, active, eased) {
            Ok(frame) => frame,
            Err(err) => {
                warn!(surface = %id, error = %err, "failed to build chart frame");
                return;
            }
        };
        let Some(renderer) = self.surfaces.renderer_mut(id) else {
            trace!(surface = %id, "surface unavailable");
            return;
        };
        if let Err(err) = renderer.render(&frame) {
            warn!(surface = %id, error = %err, "renderer rejected chart frame");
            return;
        }
        if let Some(widget) = self.widgets.get_mut(id) {
            widget.drawn_progress = eased;
        }
        self.emit_event(DashboardEvent::Rendered {
            surface: id.clone(),
            animated,
        });
    }

    /// Makes sure the widget's geometry matches the current dataset and
    /// surface size; returns `false` when nothing can be drawn.
    fn ensure_geometry(&mut self, id: &SurfaceId) -> bool {
        let Some(viewport) = self.surfaces.surface_size(id) else {
            trace!(surface = %id, "surface unavailable");
            return false;
        };
        let Some(handle) = self.maintainer.current() else {
            return false;
        };
        let Some(widget) = self.widgets.get_mut(id) else {
            return false;
        };
        if widget
            .geometry
            .as_ref()
            .is_some_and(|geometry| geometry.matches(handle.revision, viewport))
        {
            return true;
        }

        let categories = self.generator.splitter().profile().visible_categories();
        let request = GeometryRequest {
            dataset: &handle.dataset,
            revision: handle.revision,
            viewport,
            view: widget.view(),
            today: self.config.today,
            window_days: self.config.daily_window_days,
            categories: &categories,
        };
        match WidgetGeometry::build(request, &self.style) {
            Ok(geometry) => {
                widget.geometry = Some(geometry);
                true
            }
            Err(err) => {
                warn!(surface = %id, error = %err, "failed to lay out chart");
                widget.geometry = None;
                false
            }
        }
    }

    pub(super) fn require_widget(&self, id: &SurfaceId) -> ChartResult<&ChartWidget> {
        self.widgets
            .get(id)
            .ok_or_else(|| ChartError::InvalidData(format!("no widget mounted on `{id}`")))
    }
}
