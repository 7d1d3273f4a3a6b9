use lyon::path::Path;
use serde::{Deserialize, Serialize};

use super::{distance_to_segment, normalize_points, DesignerShape, Point};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignLine {
    pub start: Point,
    pub end: Point,
}

impl DesignLine {
    /// Line between two scene points; returns the local line and its origin.
    pub fn between(start: Point, end: Point) -> (Self, Point) {
        let (local, origin) = normalize_points(&[start, end]);
        (
            Self {
                start: local[0],
                end: local[1],
            },
            origin,
        )
    }

    pub fn length(&self) -> f64 {
        self.start.distance_to(&self.end)
    }
}

impl DesignerShape for DesignLine {
    fn render(&self) -> Path {
        let mut builder = Path::builder();
        builder.begin(self.start.to_lyon());
        builder.line_to(self.end.to_lyon());
        builder.end(false);
        builder.build()
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        (
            self.start.x.min(self.end.x),
            self.start.y.min(self.end.y),
            self.start.x.max(self.end.x),
            self.start.y.max(self.end.y),
        )
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        distance_to_segment(p, self.start, self.end) <= tolerance
    }
}
