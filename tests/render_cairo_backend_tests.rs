#![cfg(feature = "cairo-backend")]

use cairo::{Context, Format, ImageSurface};
use chrono::NaiveDate;
use earnings_chart::ChartError;
use earnings_chart::api::{
    ChartStyle, EarningsConfig, EarningsDashboard, MemoryStore, WidgetFamily,
};
use earnings_chart::core::{ChartView, Viewport};
use earnings_chart::render::{
    CairoContextRenderer, CairoRenderer, RenderFrame, SurfaceId, SurfaceTable,
};
use rust_decimal::Decimal;

fn config() -> EarningsConfig {
    EarningsConfig::new(
        NaiveDate::from_ymd_opt(2026, 4, 10).expect("date"),
        Decimal::new(1_200_000, 2),
    )
    .with_seed(3)
}

#[test]
fn cairo_renderer_rejects_invalid_surface_size() {
    let err = CairoRenderer::new(0, 480).expect_err("invalid width must fail");
    assert!(matches!(err, ChartError::InvalidData(_)));
}

#[test]
fn cairo_renderer_draws_dashboard_frames() {
    let renderer = CairoRenderer::new(800, 320).expect("renderer");
    let surfaces =
        SurfaceTable::new().with_surface("monthly", Viewport::new(800, 320), renderer);
    let mut dashboard =
        EarningsDashboard::new(config(), ChartStyle::default(), surfaces, MemoryStore::new())
            .expect("dashboard");
    dashboard
        .mount_widget("monthly", ChartView::AllTime, WidgetFamily::default(), 0.0)
        .expect("mount");
    dashboard.on_data_ready(config(), 0.0).expect("data ready");
    while dashboard.on_frame(1_000.0) {}

    let stats = dashboard
        .surfaces()
        .renderer(&SurfaceId::from("monthly"))
        .map(CairoRenderer::last_stats)
        .expect("renderer");
    assert_eq!(stats.lines_drawn, 1);
    assert_eq!(stats.paths_drawn, 3);
    assert_eq!(stats.texts_drawn, 5);
}

#[test]
fn cairo_renderer_can_draw_on_external_context() {
    let mut renderer = CairoRenderer::new(200, 100).expect("renderer");
    let surface = ImageSurface::create(Format::ARgb32, 200, 100).expect("surface");
    let context = Context::new(&surface).expect("context");
    let frame = RenderFrame::new(Viewport::new(200, 100));
    renderer
        .render_on_cairo_context(&context, &frame)
        .expect("render on context");
    assert_eq!(renderer.last_stats().paths_drawn, 0);
}
