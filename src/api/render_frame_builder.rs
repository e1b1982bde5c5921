use chrono::NaiveDate;

use crate::animation::interpolate_reveal;
use crate::core::{
    Category, ChartSeries, ChartView, CoordinateMapper, DataPoint, Dataset, LabelPlacement,
    LabelRequest, PlotArea, SplineRasterizer, Viewport, estimate_label_text_width_px,
    label_target_indices, layout_labels,
};
use crate::error::ChartResult;
use crate::render::{LinePrimitive, PathPrimitive, RenderFrame, TextHAlign, TextPrimitive};

use super::ChartStyle;

/// Pixel geometry of one widget for one dataset revision and surface size.
///
/// Line points are the final (fully revealed) positions; label placements
/// are computed once here and reused by every frame, animated or not.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetGeometry {
    revision: u64,
    viewport: Viewport,
    series: ChartSeries,
    mapper: CoordinateMapper,
    lines: Vec<(Category, Vec<DataPoint>)>,
    labels: Vec<LabelPlacement>,
}

/// Inputs that shape one widget's geometry besides the style.
#[derive(Debug, Clone, Copy)]
pub struct GeometryRequest<'a> {
    pub dataset: &'a Dataset,
    pub revision: u64,
    pub viewport: Viewport,
    pub view: ChartView,
    pub today: NaiveDate,
    pub window_days: u32,
    pub categories: &'a [Category],
}

impl WidgetGeometry {
    pub fn build(request: GeometryRequest<'_>, style: &ChartStyle) -> ChartResult<Self> {
        let viewport = request.viewport.ensure_valid()?;
        let series = ChartSeries::from_dataset(
            request.dataset,
            request.view,
            request.today,
            request.window_days,
            request.categories,
        )?;
        let area = PlotArea::from_viewport(viewport, style.insets)?;
        let mapper = CoordinateMapper::new(area, series.slot_count, series.max_value(), style.headroom)?;

        let lines = series
            .lines
            .iter()
            .map(|(category, values)| (*category, mapper.map_line(values)))
            .collect();
        let labels = if series.is_empty() {
            Vec::new()
        } else {
            layout_axis_labels(&series, mapper, style)
        };

        Ok(Self {
            revision: request.revision,
            viewport,
            series,
            mapper,
            lines,
            labels,
        })
    }

    /// `true` when this geometry was built for `revision` on `viewport`.
    #[must_use]
    pub fn matches(&self, revision: u64, viewport: Viewport) -> bool {
        self.revision == revision && self.viewport == viewport
    }

    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    #[must_use]
    pub fn series(&self) -> &ChartSeries {
        &self.series
    }

    #[must_use]
    pub fn mapper(&self) -> CoordinateMapper {
        self.mapper
    }

    #[must_use]
    pub fn lines(&self) -> &[(Category, Vec<DataPoint>)] {
        &self.lines
    }

    #[must_use]
    pub fn line(&self, category: Category) -> Option<&[DataPoint]> {
        self.lines
            .iter()
            .find(|(candidate, _)| *candidate == category)
            .map(|(_, points)| points.as_slice())
    }

    #[must_use]
    pub fn labels(&self) -> &[LabelPlacement] {
        &self.labels
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

fn layout_axis_labels(
    series: &ChartSeries,
    mapper: CoordinateMapper,
    style: &ChartStyle,
) -> Vec<LabelPlacement> {
    let requests: Vec<LabelRequest> = label_target_indices(series.slot_count)
        .into_iter()
        .filter_map(|index| {
            let text = series.labels.get(index)?;
            Some(LabelRequest {
                index,
                data_x: mapper.index_to_x(index),
                text: text.clone(),
                width: estimate_label_text_width_px(text, style.label_font_size_px),
            })
        })
        .collect();
    layout_labels(&requests, mapper.area().right(), style.labels)
}

/// Categories in paint order: the active one, when drawn, comes last.
#[must_use]
pub fn draw_order(lines: &[(Category, Vec<DataPoint>)], active: Option<Category>) -> Vec<Category> {
    let mut order: Vec<Category> = lines.iter().map(|(category, _)| *category).collect();
    if let Some(active) = active {
        if let Some(position) = order.iter().position(|category| *category == active) {
            let category = order.remove(position);
            order.push(category);
        }
    }
    order
}

/// Materializes one frame of `geometry`.
///
/// `eased` is the reveal progress: `0` draws every point on the baseline,
/// `1` draws final positions.
pub fn build_render_frame(
    geometry: &WidgetGeometry,
    style: &ChartStyle,
    active: Option<Category>,
    eased: f64,
) -> ChartResult<RenderFrame> {
    let mut frame = RenderFrame::new(geometry.viewport);
    if geometry.is_empty() {
        return Ok(frame);
    }

    let mapper = geometry.mapper;
    let area = mapper.area();
    let baseline_y = mapper.baseline_y();
    frame = frame.with_line(LinePrimitive::new(
        area.left,
        baseline_y,
        area.right(),
        baseline_y,
        1.0,
        style.axis_color,
    ));

    let rasterizer = SplineRasterizer::new(style.spline_tension)?;
    let highlighted = active.filter(|category| geometry.line(*category).is_some());
    for category in draw_order(&geometry.lines, highlighted) {
        let Some(points) = geometry.line(category) else {
            continue;
        };
        let revealed = interpolate_reveal(points, baseline_y, eased);
        let Some(start) = revealed.first().copied() else {
            continue;
        };
        let base_color = style.color_for(category);
        let (stroke_width, color) = match highlighted {
            Some(active) if active == category => (style.active_stroke_width, base_color),
            Some(_) => (
                style.stroke_width,
                base_color.with_alpha(base_color.alpha * style.inactive_alpha),
            ),
            None => (style.stroke_width, base_color),
        };
        frame = frame.with_path(PathPrimitive {
            tag: category.as_str().to_owned(),
            start,
            segments: rasterizer.segments(&revealed),
            stroke_width,
            color,
        });
    }

    let label_y = area.bottom() + style.label_padding_px + style.label_font_size_px;
    for placement in &geometry.labels {
        frame = frame.with_text(TextPrimitive::new(
            placement.text.clone(),
            placement.left,
            label_y,
            style.label_font_size_px,
            style.label_color,
            TextHAlign::Left,
        ));
    }

    frame.validate()?;
    Ok(frame)
}
