//! earnings-chart: synthetic earnings series generation plus a small,
//! animated and interactive line-chart engine.
//!
//! Generation lives in [`core`], frame-driven reveal in [`animation`],
//! pointer handling in [`interaction`] and backend-agnostic drawing in
//! [`render`]. [`api::EarningsDashboard`] wires them to host surfaces.

pub mod animation;
pub mod api;
pub mod core;
pub mod error;
pub mod interaction;
pub mod render;
pub mod telemetry;

pub use api::{ChartStyle, EarningsConfig, EarningsDashboard};
pub use error::{ChartError, ChartResult};
