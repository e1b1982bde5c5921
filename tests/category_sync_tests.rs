use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use chrono::NaiveDate;
use earnings_chart::animation::AnimationPhase;
use earnings_chart::api::{
    ChartStyle, DashboardContext, DashboardEvent, DashboardObserver, EarningsConfig,
    EarningsDashboard, MemoryStore, WidgetFamily,
};
use earnings_chart::core::{Category, ChartView, Viewport};
use earnings_chart::interaction::ActiveCategoryState;
use earnings_chart::render::{RecordingRenderer, RenderFrame, SurfaceId, SurfaceTable};
use rust_decimal::Decimal;

type Dashboard = EarningsDashboard<SurfaceTable<RecordingRenderer>, MemoryStore>;

fn config() -> EarningsConfig {
    EarningsConfig::new(
        NaiveDate::from_ymd_opt(2026, 4, 10).expect("date"),
        Decimal::new(2_400_000, 2),
    )
    .with_month_count(18)
    .with_minimums(Decimal::new(50_000, 2), Decimal::ZERO)
    .with_seed(5)
}

fn dashboard() -> Dashboard {
    let surfaces = SurfaceTable::new()
        .with_surface("daily", Viewport::new(600, 300), RecordingRenderer::default())
        .with_surface("monthly", Viewport::new(600, 300), RecordingRenderer::default())
        .with_surface("sidebar", Viewport::new(320, 160), RecordingRenderer::default());
    let mut dashboard =
        EarningsDashboard::new(config(), ChartStyle::default(), surfaces, MemoryStore::new())
            .expect("dashboard");
    dashboard
        .mount_widget("daily", ChartView::Last30Days, WidgetFamily::default(), 0.0)
        .expect("mount daily");
    dashboard
        .mount_widget("monthly", ChartView::AllTime, WidgetFamily::default(), 0.0)
        .expect("mount monthly");
    dashboard
        .mount_widget("sidebar", ChartView::AllTime, WidgetFamily::new("sidebar"), 0.0)
        .expect("mount sidebar");
    dashboard.on_data_ready(config(), 0.0).expect("data ready");
    dashboard
}

fn last_frame(dashboard: &Dashboard, id: &str) -> RenderFrame {
    dashboard
        .surfaces()
        .renderer(&SurfaceId::from(id))
        .and_then(RecordingRenderer::last_frame)
        .cloned()
        .expect("frame")
}

fn frame_count(dashboard: &Dashboard, id: &str) -> usize {
    dashboard
        .surfaces()
        .renderer(&SurfaceId::from(id))
        .map_or(0, RecordingRenderer::frame_count)
}

fn assert_highlighted(frame: &RenderFrame, active: Category, style: &ChartStyle) {
    let last = frame.paths.last().expect("paths");
    assert_eq!(last.tag, active.as_str());
    assert_relative_eq!(last.stroke_width, style.active_stroke_width);
    assert_relative_eq!(last.color.alpha, style.color_for(active).alpha);
    for path in &frame.paths[..frame.paths.len() - 1] {
        let category = Category::ALL
            .into_iter()
            .find(|category| category.as_str() == path.tag)
            .expect("known category");
        assert_relative_eq!(path.stroke_width, style.stroke_width);
        assert_relative_eq!(
            path.color.alpha,
            style.color_for(category).alpha * style.inactive_alpha
        );
    }
}

#[test]
fn selection_redraws_family_with_active_line_on_top() {
    let mut dashboard = dashboard();
    while dashboard.on_frame(1_000.0) {}
    let style = dashboard.style().clone();
    let daily = SurfaceId::from("daily");
    let sidebar_frames = frame_count(&dashboard, "sidebar");

    assert!(dashboard.select_category(&daily, Category::Tips, 2_000.0).expect("select"));
    assert_eq!(dashboard.active_category(), Some(Category::Tips));
    assert_highlighted(&last_frame(&dashboard, "monthly"), Category::Tips, &style);

    assert!(dashboard.select_category(&daily, Category::Messages, 2_000.0).expect("select"));
    let daily_frame = last_frame(&dashboard, "daily");
    let monthly_frame = last_frame(&dashboard, "monthly");
    assert_eq!(daily_frame.path_order(), vec!["tips", "posts", "messages"]);
    assert_eq!(monthly_frame.path_order(), vec!["tips", "posts", "messages"]);
    assert_highlighted(&daily_frame, Category::Messages, &style);
    assert_highlighted(&monthly_frame, Category::Messages, &style);

    assert_eq!(frame_count(&dashboard, "sidebar"), sidebar_frames);
}

fn path_end_y(frame: &RenderFrame, category: Category) -> f64 {
    frame
        .paths
        .iter()
        .find(|path| path.tag == category.as_str())
        .map(|path| path.end().y)
        .expect("path")
}

#[test]
fn selection_mid_reveal_keeps_current_progress() {
    let mut dashboard = dashboard();
    assert!(dashboard.on_frame(300.0));
    let monthly = SurfaceId::from("monthly");
    let before = dashboard.animation_phase(&monthly);
    assert_eq!(before, Some(AnimationPhase::Running { start_ms: 0.0 }));
    let ticked = last_frame(&dashboard, "monthly");

    dashboard
        .select_category(&monthly, Category::Posts, 300.0)
        .expect("select");
    assert_eq!(dashboard.animation_phase(&monthly), before);
    assert_eq!(
        dashboard.animation_phase(&SurfaceId::from("daily")),
        before
    );

    let selected = last_frame(&dashboard, "monthly");
    assert_eq!(selected.path_order(), vec!["tips", "messages", "posts"]);
    for category in [Category::Tips, Category::Posts, Category::Messages] {
        assert_relative_eq!(
            path_end_y(&selected, category),
            path_end_y(&ticked, category),
            epsilon = 1e-9
        );
    }

    // The next tick keeps rising from where the selection left off.
    assert!(dashboard.on_frame(316.0));
    let next = last_frame(&dashboard, "monthly");
    let geometry = dashboard
        .widget(&monthly)
        .and_then(|widget| widget.geometry())
        .expect("geometry");
    let final_y = geometry
        .line(Category::Messages)
        .and_then(|points| points.last())
        .map(|point| point.y)
        .expect("points");
    let selected_y = path_end_y(&selected, Category::Messages);
    let next_y = path_end_y(&next, Category::Messages);
    assert!(next_y <= selected_y);
    assert!(next_y >= final_y);
}

#[test]
fn selection_after_reveal_draws_final_positions() {
    let mut dashboard = dashboard();
    while dashboard.on_frame(1_000.0) {}
    let monthly = SurfaceId::from("monthly");
    dashboard
        .select_category(&monthly, Category::Posts, 1_500.0)
        .expect("select");

    let frame = last_frame(&dashboard, "monthly");
    let final_end = dashboard
        .widget(&monthly)
        .and_then(|widget| widget.geometry())
        .and_then(|geometry| geometry.line(Category::Posts))
        .and_then(|points| points.last().copied())
        .expect("points");
    assert_relative_eq!(
        path_end_y(&frame, Category::Posts),
        final_end.y,
        epsilon = 1e-9
    );
}

#[test]
fn reselecting_same_category_is_a_no_op() {
    let mut dashboard = dashboard();
    let daily = SurfaceId::from("daily");
    assert!(dashboard.select_category(&daily, Category::Posts, 2_000.0).expect("select"));
    let frames = frame_count(&dashboard, "daily");
    assert!(!dashboard.select_category(&daily, Category::Posts, 2_000.0).expect("select"));
    assert_eq!(frame_count(&dashboard, "daily"), frames);
}

#[test]
fn selecting_on_unmounted_widget_fails() {
    let mut dashboard = dashboard();
    assert!(
        dashboard
            .select_category(&SurfaceId::from("missing"), Category::Tips, 2_000.0)
            .is_err()
    );
    assert_eq!(dashboard.active_category(), None);
}

#[test]
fn hidden_category_selection_draws_plain_lines() {
    let mut dashboard = dashboard();
    let daily = SurfaceId::from("daily");
    let style = dashboard.style().clone();
    dashboard
        .select_category(&daily, Category::Referrals, 2_000.0)
        .expect("select");
    let frame = last_frame(&dashboard, "daily");
    assert_eq!(frame.path_order(), vec!["tips", "posts", "messages"]);
    for path in &frame.paths {
        assert_relative_eq!(path.stroke_width, style.stroke_width);
    }
}

#[test]
fn shared_state_links_dashboards() {
    let state = ActiveCategoryState::default();
    let mut first = dashboard().with_active_category_state(state.clone());
    let second = dashboard().with_active_category_state(state.clone());

    first
        .select_category(&SurfaceId::from("daily"), Category::Messages, 2_000.0)
        .expect("select");
    assert_eq!(state.get(), Some(Category::Messages));
    assert_eq!(second.active_category(), Some(Category::Messages));
}

#[derive(Default)]
struct Changes {
    seen: Rc<RefCell<Vec<(Option<Category>, Category)>>>,
}

impl DashboardObserver for Changes {
    fn id(&self) -> &str {
        "changes"
    }

    fn on_event(&mut self, event: &DashboardEvent, context: DashboardContext) {
        if let DashboardEvent::ActiveCategoryChanged { previous, current } = event {
            assert_eq!(context.active_category, Some(*current));
            self.seen.borrow_mut().push((*previous, *current));
        }
    }
}

#[test]
fn category_change_is_reported_with_updated_context() {
    let mut dashboard = dashboard();
    let seen = Rc::new(RefCell::new(Vec::new()));
    dashboard
        .register_observer(Box::new(Changes {
            seen: Rc::clone(&seen),
        }))
        .expect("register");
    let daily = SurfaceId::from("daily");
    dashboard.select_category(&daily, Category::Tips, 2_000.0).expect("select");
    dashboard.select_category(&daily, Category::Tips, 2_000.0).expect("select");
    dashboard.select_category(&daily, Category::Posts, 2_000.0).expect("select");
    assert_eq!(
        *seen.borrow(),
        vec![
            (None, Category::Tips),
            (Some(Category::Tips), Category::Posts)
        ]
    );
}
