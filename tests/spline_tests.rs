use approx::assert_abs_diff_eq;
use earnings_chart::core::{DEFAULT_TENSION, DataPoint, SplineRasterizer};

fn zigzag() -> Vec<DataPoint> {
    vec![
        DataPoint::new(0.0, 100.0),
        DataPoint::new(10.0, 20.0),
        DataPoint::new(20.0, 90.0),
        DataPoint::new(30.0, 10.0),
        DataPoint::new(40.0, 60.0),
    ]
}

#[test]
fn default_tension_is_used() {
    assert_abs_diff_eq!(SplineRasterizer::default().tension(), DEFAULT_TENSION);
    assert!(SplineRasterizer::new(1.5).is_err());
    assert!(SplineRasterizer::new(f64::NAN).is_err());
}

#[test]
fn one_segment_per_pair_passing_through_points() {
    let points = zigzag();
    let segments = SplineRasterizer::default().segments(&points);
    assert_eq!(segments.len(), points.len() - 1);
    for (segment, pair) in segments.iter().zip(points.windows(2)) {
        assert_eq!(segment.from, pair[0]);
        assert_eq!(segment.to, pair[1]);
        assert_eq!(segment.point_at(0.0), pair[0]);
        assert_abs_diff_eq!(segment.point_at(1.0).x, pair[1].x, epsilon = 1e-9);
        assert_abs_diff_eq!(segment.point_at(1.0).y, pair[1].y, epsilon = 1e-9);
    }
}

#[test]
fn control_points_follow_neighbour_tangent() {
    let points = zigzag();
    let tension = 0.35;
    let segments = SplineRasterizer::new(tension).expect("tension").segments(&points);
    let second = segments[1];
    assert_abs_diff_eq!(
        second.control1.y,
        points[1].y + (points[2].y - points[0].y) * tension / 2.0,
        epsilon = 1e-9
    );
    assert_abs_diff_eq!(
        second.control2.y,
        points[2].y - (points[3].y - points[1].y) * tension / 2.0,
        epsilon = 1e-9
    );
}

#[test]
fn flattened_curve_moves_forward_in_x() {
    let flat = SplineRasterizer::default().flatten(&zigzag(), 16);
    assert_eq!(flat.len(), 4 * 16 + 1);
    assert!(flat.windows(2).all(|pair| pair[1].x >= pair[0].x - 1e-9));
}

#[test]
fn zero_tension_draws_straight_segments() {
    let points = zigzag();
    let flat = SplineRasterizer::new(0.0).expect("tension").flatten(&points, 4);
    // Midpoint of the first segment lies on the straight line between its ends.
    let mid = flat[2];
    assert_abs_diff_eq!(mid.x, 5.0, epsilon = 1e-9);
    assert_abs_diff_eq!(mid.y, 60.0, epsilon = 1e-9);
}

#[test]
fn short_inputs_produce_no_segments() {
    let rasterizer = SplineRasterizer::default();
    assert!(rasterizer.segments(&[]).is_empty());
    assert!(rasterizer.segments(&[DataPoint::new(1.0, 1.0)]).is_empty());
    assert_eq!(rasterizer.flatten(&[DataPoint::new(1.0, 1.0)], 8).len(), 1);
    assert!(rasterizer.flatten(&[], 8).is_empty());
}
