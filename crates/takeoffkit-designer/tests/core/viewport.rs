use proptest::prelude::*;
use takeoffkit_designer::{Point, ViewportController, ZoomSettings};

#[test]
fn test_viewport_creation() {
    let vp = ViewportController::new(1200.0, 800.0);
    assert_eq!(vp.zoom(), 1.0);
    assert_eq!(vp.pan_x(), 0.0);
    assert_eq!(vp.pan_y(), 0.0);
}

#[test]
fn test_pixel_and_scene_share_orientation() {
    let vp = ViewportController::new(1200.0, 800.0);
    let (_, py0) = vp.world_to_pixel(0.0, 0.0);
    let (_, py100) = vp.world_to_pixel(0.0, 100.0);
    assert!(py100 > py0);
}

#[test]
fn test_pan_then_zoom_to_point() {
    let mut vp = ViewportController::new(1000.0, 1000.0);
    vp.pan_by(100.0, 50.0);
    let target = Point::new(200.0, 200.0);
    let before = vp.world_point_to_pixel(&target);
    vp.zoom_to_point(&target, 4.0);
    let after = vp.world_point_to_pixel(&target);
    assert!((before.0 - after.0).abs() < 1e-9);
    assert!((before.1 - after.1).abs() < 1e-9);
    assert_eq!(vp.zoom(), 4.0);
}

#[test]
fn test_custom_limits() {
    let settings = ZoomSettings {
        zoom_min: 0.5,
        zoom_max: 2.0,
        ..ZoomSettings::default()
    };
    let mut vp = ViewportController::with_settings(800.0, 600.0, settings);
    for _ in 0..10 {
        vp.zoom_in();
    }
    assert_eq!(vp.zoom(), 2.0);
    for _ in 0..20 {
        vp.zoom_out();
    }
    assert_eq!(vp.zoom(), 0.5);
}

#[test]
fn test_visible_bounds_follow_zoom() {
    let mut vp = ViewportController::new(400.0, 200.0);
    vp.set_zoom(2.0);
    assert_eq!(vp.visible_world_bounds(), (0.0, 0.0, 200.0, 100.0));
}

#[test]
fn test_extreme_wheel_delta_lands_on_limits() {
    let mut vp = ViewportController::default();
    // 0.999^1e6 underflows to zero, 0.999^-1e6 overflows to infinity
    assert_eq!(vp.wheel_zoom(1.0e6, 600.0, 400.0), 0.1);
    assert!(vp.pan_x().is_finite() && vp.pan_y().is_finite());
    assert_eq!(vp.wheel_zoom(-1.0e6, 600.0, 400.0), 20.0);

    // anchor pixel still maps to the same scene point
    let before = vp.pixel_to_world(300.0, 200.0);
    vp.wheel_zoom(1.0e6, 300.0, 200.0);
    let after = vp.pixel_to_world(300.0, 200.0);
    assert!((before.x - after.x).abs() < 1e-9 && (before.y - after.y).abs() < 1e-9);
}

#[test]
fn test_nan_zoom_request_is_ignored() {
    let mut vp = ViewportController::default();
    vp.zoom_at_pixel(600.0, 400.0, f64::NAN);
    assert_eq!(vp.zoom(), 1.0);
}

proptest! {
    #[test]
    fn prop_wheel_zoom_stays_in_range(
        deltas in prop::collection::vec(-1.0e6f64..1.0e6, 1..30),
        x in 0.0f64..1200.0,
        y in 0.0f64..800.0,
    ) {
        let mut vp = ViewportController::default();
        let limits = *vp.settings();
        for delta in deltas {
            let zoom = vp.wheel_zoom(delta, x, y);
            prop_assert!(zoom >= limits.zoom_min && zoom <= limits.zoom_max);
        }
    }
}
