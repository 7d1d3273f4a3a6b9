use lyon::path::Path;
use serde::{Deserialize, Serialize};

use super::{normalize_points, points_bounds, polyline_path, ring_contains, DesignerShape, Point};

/// Pointer-traced path. Drawn open, measured as if closed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignFreehand {
    pub points: Vec<Point>,
}

impl DesignFreehand {
    /// Path through sampled scene points; returns the local path and its origin.
    pub fn from_scene_points(points: &[Point]) -> (Self, Point) {
        let (local, origin) = normalize_points(points);
        (Self { points: local }, origin)
    }

    /// Whether the last sample already coincides with the first.
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) if self.points.len() > 1 => first.approx_eq(last, 1e-9),
            _ => false,
        }
    }
}

impl DesignerShape for DesignFreehand {
    fn render(&self) -> Path {
        polyline_path(&self.points, false)
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        points_bounds(&self.points)
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        ring_contains(&self.points, p, tolerance)
    }
}
