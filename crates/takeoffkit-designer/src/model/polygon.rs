use lyon::path::Path;
use serde::{Deserialize, Serialize};

use super::{normalize_points, points_bounds, polyline_path, ring_contains, DesignerShape, Point};

/// Irregular closed polygon built from clicked vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignPolygon {
    pub points: Vec<Point>,
}

impl DesignPolygon {
    /// Polygon through scene vertices; returns the local polygon and its origin.
    pub fn from_scene_points(points: &[Point]) -> (Self, Point) {
        let (local, origin) = normalize_points(points);
        (Self { points: local }, origin)
    }
}

impl DesignerShape for DesignPolygon {
    fn render(&self) -> Path {
        polyline_path(&self.points, true)
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        points_bounds(&self.points)
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        ring_contains(&self.points, p, tolerance)
    }
}
