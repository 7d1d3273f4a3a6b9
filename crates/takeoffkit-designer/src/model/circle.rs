use lyon::path::Path;
use serde::{Deserialize, Serialize};

use super::{DesignerShape, Point};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignCircle {
    pub radius: f64,
}

impl DesignCircle {
    pub fn new(radius: f64) -> Self {
        Self {
            radius: radius.abs(),
        }
    }

    /// Circle centred on `center`; returns the shape and its top-left origin.
    pub fn centered(center: Point, radius: f64) -> (Self, Point) {
        let circle = Self::new(radius);
        let origin = Point::new(center.x - circle.radius, center.y - circle.radius);
        (circle, origin)
    }

    /// Centre in local coordinates.
    pub fn center(&self) -> Point {
        Point::new(self.radius, self.radius)
    }
}

impl DesignerShape for DesignCircle {
    fn render(&self) -> Path {
        let mut builder = Path::builder();
        builder.add_circle(
            self.center().to_lyon(),
            self.radius as f32,
            lyon::path::Winding::Positive,
        );
        builder.build()
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        (0.0, 0.0, self.radius * 2.0, self.radius * 2.0)
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        p.distance_to(&self.center()) <= self.radius + tolerance
    }
}
