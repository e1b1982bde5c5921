//! Host-facing surface: configuration, dataset maintenance and the
//! [`EarningsDashboard`] that ties generation, animation and interaction to
//! host-owned drawing surfaces.

mod cache;
mod config;
mod dashboard;
mod events;
mod interaction_controller;
mod maintainer;
mod observer_dispatch;
mod observer_registry;
mod render_frame_builder;
mod store;
mod style;
mod widget;

pub use cache::{
    CachedDatasetContractV1, DATASET_CACHE_SCHEMA_V1, DEFAULT_DATASET_STORAGE_KEY,
    GenerationCache, GenerationKey,
};
pub use config::EarningsConfig;
pub use dashboard::EarningsDashboard;
pub use events::{DashboardContext, DashboardEvent, DashboardObserver};
pub use maintainer::{
    DEFAULT_OVERRIDE_STORAGE_KEY, DatasetHandle, GrossOverride, InvariantMaintainer,
    MaintainOutcome, RegenerationReason,
};
pub use render_frame_builder::{GeometryRequest, WidgetGeometry, build_render_frame, draw_order};
pub use store::{KeyValueStore, MemoryStore};
pub use style::ChartStyle;
pub use widget::{ChartWidget, WidgetFamily};
