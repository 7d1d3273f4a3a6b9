use proptest::prelude::*;
use takeoffkit_designer::geometry::{self, Quantity};
use takeoffkit_designer::{DesignCircle, DesignFreehand, DesignPolygon, Point, Shape};

fn pts(raw: &[(f64, f64)]) -> Vec<Point> {
    raw.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

#[test]
fn test_collinear_polygon_is_zero() {
    let (polygon, _) = DesignPolygon::from_scene_points(&pts(&[(0.0, 0.0), (5.0, 5.0), (10.0, 10.0)]));
    assert_eq!(
        geometry::quantity(&Shape::Polygon(polygon), 1.0, 1.0),
        Quantity::Area(0.0)
    );
}

#[test]
fn test_freehand_triangle_closes_implicitly() {
    let (path, origin) =
        DesignFreehand::from_scene_points(&pts(&[(0.0, 0.0), (100.0, 0.0), (0.0, 100.0)]));
    assert_eq!(origin, Point::new(0.0, 0.0));
    assert!(!path.is_closed());
    assert_eq!(
        geometry::quantity(&Shape::Freehand(path), 1.0, 1.0),
        Quantity::Area(5000.0)
    );
}

#[test]
fn test_freehand_explicit_close_matches_implicit() {
    let open = pts(&[(0.0, 0.0), (100.0, 0.0), (100.0, 50.0)]);
    let mut closed = open.clone();
    closed.push(Point::new(0.0, 0.0));
    assert_eq!(
        geometry::freehand_area(&open, 1.0, 1.0),
        geometry::freehand_area(&closed, 1.0, 1.0)
    );
}

#[test]
fn test_line_uses_transformed_endpoints() {
    // (0,0)-(30,40) under sx=2, sy=1 becomes (0,0)-(60,40)
    let len = geometry::line_length(Point::new(0.0, 0.0), Point::new(30.0, 40.0), 2.0, 1.0);
    assert!((len - (60.0f64.hypot(40.0))).abs() < 1e-9);
}

#[test]
fn test_flipped_scale_is_not_negative() {
    let area = geometry::quantity(&Shape::Circle(DesignCircle::new(10.0)), -1.0, 1.0);
    assert!(area.value() > 0.0);
}

proptest! {
    #[test]
    fn prop_rectangle_uniform_scale(w in 0.0f64..5000.0, h in 0.0f64..5000.0, s in 0.01f64..10.0) {
        let area = geometry::rectangle_area(w, h, s, s);
        let expected = w * h * s * s;
        prop_assert!((area - expected).abs() <= expected.abs() * 1e-12 + 1e-9);
    }

    #[test]
    fn prop_shoelace_direction_invariant(raw in prop::collection::vec((-1000.0f64..1000.0, -1000.0f64..1000.0), 3..12)) {
        let forward = pts(&raw);
        let mut backward = forward.clone();
        backward.reverse();
        let a = geometry::shoelace_area(&forward);
        let b = geometry::shoelace_area(&backward);
        prop_assert!(a >= 0.0);
        prop_assert!((a - b).abs() <= a.abs() * 1e-9 + 1e-6);
    }

    #[test]
    fn prop_circle_area_increases(r in 0.0f64..1000.0, dr in 0.001f64..100.0) {
        prop_assert!(geometry::circle_area(r + dr, 1.0, 1.0) > geometry::circle_area(r, 1.0, 1.0));
    }
}
