use approx::assert_abs_diff_eq;
use earnings_chart::core::{Category, Viewport};
use earnings_chart::interaction::{TooltipConfig, TooltipState, place_tooltip};

#[test]
fn tooltip_sits_right_of_hit_and_centers_on_anchor() {
    let (position, flipped) =
        place_tooltip(100.0, 150.0, Viewport::new(600, 300), TooltipConfig::default());
    assert!(!flipped);
    assert_abs_diff_eq!(position.x, 114.0);
    assert_abs_diff_eq!(position.y, 102.0);
}

#[test]
fn tooltip_flips_left_on_overflow() {
    let (position, flipped) =
        place_tooltip(500.0, 150.0, Viewport::new(600, 300), TooltipConfig::default());
    assert!(flipped);
    assert_abs_diff_eq!(position.x, 318.0);
}

#[test]
fn tooltip_stays_inside_surface_vertically() {
    let config = TooltipConfig::default();
    let surface = Viewport::new(600, 300);
    let (top, _) = place_tooltip(100.0, 10.0, surface, config);
    assert_abs_diff_eq!(top.y, 0.0);
    let (bottom, _) = place_tooltip(100.0, 290.0, surface, config);
    assert_abs_diff_eq!(bottom.y, 204.0);
}

#[test]
fn tooltip_on_tiny_surface_clamps_to_origin() {
    let (position, flipped) =
        place_tooltip(60.0, 25.0, Viewport::new(100, 50), TooltipConfig::default());
    assert!(flipped);
    assert_abs_diff_eq!(position.x, 0.0);
    assert_abs_diff_eq!(position.y, 0.0);
}

#[test]
fn hidden_tooltip_has_no_values() {
    let hidden = TooltipState::hidden();
    assert!(!hidden.visible);
    assert!(hidden.values.is_empty());
    assert_eq!(hidden.value(Category::Tips), None);
    assert_eq!(TooltipState::default(), hidden);
}

#[test]
fn tooltip_config_rejects_negative_size() {
    let config = TooltipConfig {
        width_px: -1.0,
        ..TooltipConfig::default()
    };
    assert!(config.validate().is_err());
}
