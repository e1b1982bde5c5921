use tracing::{debug, trace};

use crate::animation::interpolate_reveal;
use crate::core::{Category, DataPoint};
use crate::error::ChartResult;
use crate::interaction::{SeriesHit, TooltipState, hit_test, place_tooltip};
use crate::render::{SurfaceId, SurfaceProvider};

use super::render_frame_builder::WidgetGeometry;
use super::{ChartStyle, DashboardEvent, EarningsDashboard, KeyValueStore};

impl<P: SurfaceProvider, S: KeyValueStore> EarningsDashboard<P, S> {
    /// Hit-tests the pointer against the widget's lines as last drawn.
    ///
    /// Returns the tooltip to show, or `None` when the pointer is not on a
    /// line (the widget's tooltip is hidden then).
    pub fn pointer_move(&mut self, id: &SurfaceId, x: f64, y: f64) -> Option<TooltipState> {
        let anchor = self.generator.splitter().profile().anchor;
        let style = &self.style;
        let Some(widget) = self.widgets.get_mut(id) else {
            trace!(surface = %id, "pointer move on unmounted widget");
            return None;
        };
        widget.interaction.on_pointer_move(x, y);

        let Some(geometry) = widget.geometry.as_ref() else {
            widget.interaction.clear_hit();
            return None;
        };
        let baseline_y = geometry.mapper().baseline_y();
        let drawn: Vec<(Category, Vec<DataPoint>)> = geometry
            .lines()
            .iter()
            .map(|(category, points)| {
                (
                    *category,
                    interpolate_reveal(points, baseline_y, widget.drawn_progress),
                )
            })
            .collect();
        let hit = hit_test(
            &drawn,
            geometry.mapper(),
            DataPoint::new(x, y),
            style.hit_threshold_px,
        );
        match hit {
            Some(hit) => {
                let tooltip = tooltip_for_hit(geometry, &drawn, hit, anchor, style);
                widget.interaction.set_hit(hit, tooltip.clone());
                Some(tooltip)
            }
            None => {
                widget.interaction.clear_hit();
                None
            }
        }
    }

    pub fn pointer_leave(&mut self, id: &SurfaceId) {
        if let Some(widget) = self.widgets.get_mut(id) {
            widget.interaction.on_pointer_leave();
        }
    }

    /// Highlights `category` on every widget of the same family as `id`.
    ///
    /// Affected widgets are redrawn immediately at their reveal progress at
    /// `now_ms`; running animations keep their schedule. Returns `false` when
    /// `category` was already active.
    pub fn select_category(
        &mut self,
        id: &SurfaceId,
        category: Category,
        now_ms: f64,
    ) -> ChartResult<bool> {
        let family = self.require_widget(id)?.family().clone();
        let previous = self.active_category.replace(Some(category));
        if previous == Some(category) {
            return Ok(false);
        }
        debug!(surface = %id, ?previous, current = %category, "active category changed");
        self.emit_event(DashboardEvent::ActiveCategoryChanged {
            previous,
            current: category,
        });

        let targets: Vec<(SurfaceId, f64)> = self
            .widgets
            .values()
            .filter(|widget| *widget.family() == family)
            .map(|widget| {
                (
                    widget.id().clone(),
                    widget.animation.eased_progress_at(now_ms),
                )
            })
            .collect();
        for (target, eased) in targets {
            self.render_widget(&target, eased, false);
        }
        Ok(true)
    }
}

fn tooltip_for_hit(
    geometry: &WidgetGeometry,
    drawn: &[(Category, Vec<DataPoint>)],
    hit: SeriesHit,
    anchor: Category,
    style: &ChartStyle,
) -> TooltipState {
    let series = geometry.series();
    let mapper = geometry.mapper();
    let point_y = |category: Category| {
        drawn
            .iter()
            .find(|(candidate, _)| *candidate == category)
            .and_then(|(_, points)| points.get(hit.index))
            .map(|point| point.y)
    };
    let anchor_y = point_y(anchor)
        .or_else(|| point_y(hit.category))
        .unwrap_or_else(|| mapper.baseline_y());
    let (position, flipped) = place_tooltip(
        mapper.index_to_x(hit.index),
        anchor_y,
        geometry.viewport(),
        style.tooltip,
    );

    TooltipState {
        visible: true,
        anchor_index: hit.index,
        label: series.labels.get(hit.index).cloned().unwrap_or_default(),
        x: position.x,
        y: position.y,
        flipped,
        values: Category::ALL
            .iter()
            .map(|category| (*category, series.value_at(*category, hit.index).unwrap_or(0.0)))
            .collect(),
    }
}
