pub mod calendar;
pub mod category;
pub mod generator;
pub mod growth;
pub mod label_layout;
pub mod money;
pub mod period;
pub mod scale;
pub mod series;
pub mod spline;
pub mod splitter;
pub mod types;

pub use calendar::{YearMonth, day_label};
pub use category::{Category, CategoryAmounts};
pub use generator::{
    DatasetPlan, GeneratedSeries, GenerationRequest, GeneratorTuning, MAX_DAILY_WINDOW_DAYS,
    MAX_MONTH_COUNT, SeriesGenerator,
};
pub use growth::{GrowthPattern, GrowthPatternKind};
pub use label_layout::{
    LabelLayoutConfig, LabelPlacement, LabelRequest, estimate_label_text_width_px,
    label_target_indices, layout_labels,
};
pub use money::{allocate_cents, cents_to_decimal, decimal_to_cents, decimal_to_f64};
pub use period::{Dataset, DatasetTotals, PeriodId, PeriodRecord};
pub use scale::{CoordinateMapper, DEFAULT_HEADROOM};
pub use series::{ChartSeries, ChartView};
pub use spline::{CubicSegment, DEFAULT_TENSION, SplineRasterizer};
pub use splitter::{CategorySplitter, ShareRule, SplitProfile};
pub use types::{ChartInsets, DataPoint, PlotArea, Viewport};
