use lyon::math::{point, Box2D};
use lyon::path::Path;
use serde::{Deserialize, Serialize};

use super::{DesignerShape, Point};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignRectangle {
    pub width: f64,
    pub height: f64,
}

impl DesignRectangle {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: width.abs(),
            height: height.abs(),
        }
    }

    /// Box spanned by two opposite corners, dragged in any direction.
    ///
    /// Returns the rectangle and the scene position of its top-left corner.
    pub fn from_corners(a: Point, b: Point) -> (Self, Point) {
        let origin = Point::new(a.x.min(b.x), a.y.min(b.y));
        (Self::new(b.x - a.x, b.y - a.y), origin)
    }
}

impl DesignerShape for DesignRectangle {
    fn render(&self) -> Path {
        let mut builder = Path::builder();
        builder.add_rectangle(
            &Box2D::new(
                point(0.0, 0.0),
                point(self.width as f32, self.height as f32),
            ),
            lyon::path::Winding::Positive,
        );
        builder.build()
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        (0.0, 0.0, self.width, self.height)
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        p.x >= -tolerance
            && p.x <= self.width + tolerance
            && p.y >= -tolerance
            && p.y <= self.height + tolerance
    }
}
