use lyon::math::{vector, Transform};
use lyon::path::Path;
use serde::{Deserialize, Serialize};

mod circle;
mod freehand;
mod line;
mod polygon;
mod rectangle;

pub use circle::DesignCircle;
pub use freehand::DesignFreehand;
pub use line::DesignLine;
pub use polygon::DesignPolygon;
pub use rectangle::DesignRectangle;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// True when both coordinates match within `eps`.
    pub fn approx_eq(&self, other: &Point, eps: f64) -> bool {
        (self.x - other.x).abs() <= eps && (self.y - other.y).abs() <= eps
    }

    pub(crate) fn to_lyon(self) -> lyon::math::Point {
        lyon::math::point(self.x as f32, self.y as f32)
    }
}

/// Smallest box (min_x, min_y, max_x, max_y) around the points.
pub fn points_bounds(points: &[Point]) -> (f64, f64, f64, f64) {
    if points.is_empty() {
        return (0.0, 0.0, 0.0, 0.0);
    }
    points.iter().fold(
        (
            f64::INFINITY,
            f64::INFINITY,
            f64::NEG_INFINITY,
            f64::NEG_INFINITY,
        ),
        |(x1, y1, x2, y2), p| (x1.min(p.x), y1.min(p.y), x2.max(p.x), y2.max(p.y)),
    )
}

/// Distance from `p` to the segment `a`-`b`.
pub(crate) fn distance_to_segment(p: Point, a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return p.distance_to(&a);
    }
    let t = (((p.x - a.x) * dx + (p.y - a.y) * dy) / len_sq).clamp(0.0, 1.0);
    p.distance_to(&Point::new(a.x + t * dx, a.y + t * dy))
}

/// Shape geometry expressed in local, pre-transform coordinates.
///
/// Local geometry is normalized so its bounding box starts at (0, 0); the
/// owning [`ShapeTransform`] places and scales it on the surface.
pub trait DesignerShape {
    /// Outline path in local coordinates.
    fn render(&self) -> Path;
    /// Local bounding box as (min_x, min_y, max_x, max_y).
    fn bounds(&self) -> (f64, f64, f64, f64);
    /// Hit test in local coordinates.
    fn contains_point(&self, p: Point, tolerance: f64) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeType {
    Rectangle,
    Circle,
    Polygon,
    Line,
    Freehand,
}

impl ShapeType {
    /// Whether this shape type is priced by length instead of area.
    pub fn is_linear(&self) -> bool {
        matches!(self, ShapeType::Line)
    }
}

impl std::fmt::Display for ShapeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ShapeType::Rectangle => "rectangle",
            ShapeType::Circle => "circle",
            ShapeType::Polygon => "polygon",
            ShapeType::Line => "line",
            ShapeType::Freehand => "freehand",
        };
        write!(f, "{}", name)
    }
}

/// Placement of a shape's local geometry on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeTransform {
    /// Scene position of the local origin.
    pub position: Point,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl ShapeTransform {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Point::new(x, y),
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }

    /// Maps a local point into scene coordinates.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.position.x + p.x * self.scale_x,
            self.position.y + p.y * self.scale_y,
        )
    }

    /// Maps a scene point back into local coordinates.
    ///
    /// Returns `None` when a scale factor is zero.
    pub fn invert(&self, p: Point) -> Option<Point> {
        if self.scale_x == 0.0 || self.scale_y == 0.0 {
            return None;
        }
        Some(Point::new(
            (p.x - self.position.x) / self.scale_x,
            (p.y - self.position.y) / self.scale_y,
        ))
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.position.x += dx;
        self.position.y += dy;
    }

    pub fn to_lyon(&self) -> Transform {
        Transform::scale(self.scale_x as f32, self.scale_y as f32).then_translate(vector(
            self.position.x as f32,
            self.position.y as f32,
        ))
    }
}

impl Default for ShapeTransform {
    fn default() -> Self {
        Self::at(0.0, 0.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rectangle(DesignRectangle),
    Circle(DesignCircle),
    Line(DesignLine),
    Polygon(DesignPolygon),
    Freehand(DesignFreehand),
}

impl Shape {
    pub fn shape_type(&self) -> ShapeType {
        match self {
            Shape::Rectangle(_) => ShapeType::Rectangle,
            Shape::Circle(_) => ShapeType::Circle,
            Shape::Line(_) => ShapeType::Line,
            Shape::Polygon(_) => ShapeType::Polygon,
            Shape::Freehand(_) => ShapeType::Freehand,
        }
    }

    /// Local vertex list for vertex-based shapes.
    pub fn vertices(&self) -> Option<&[Point]> {
        match self {
            Shape::Polygon(s) => Some(&s.points),
            Shape::Freehand(s) => Some(&s.points),
            _ => None,
        }
    }
}

impl DesignerShape for Shape {
    fn render(&self) -> Path {
        match self {
            Shape::Rectangle(s) => s.render(),
            Shape::Circle(s) => s.render(),
            Shape::Line(s) => s.render(),
            Shape::Polygon(s) => s.render(),
            Shape::Freehand(s) => s.render(),
        }
    }

    fn bounds(&self) -> (f64, f64, f64, f64) {
        match self {
            Shape::Rectangle(s) => s.bounds(),
            Shape::Circle(s) => s.bounds(),
            Shape::Line(s) => s.bounds(),
            Shape::Polygon(s) => s.bounds(),
            Shape::Freehand(s) => s.bounds(),
        }
    }

    fn contains_point(&self, p: Point, tolerance: f64) -> bool {
        match self {
            Shape::Rectangle(s) => s.contains_point(p, tolerance),
            Shape::Circle(s) => s.contains_point(p, tolerance),
            Shape::Line(s) => s.contains_point(p, tolerance),
            Shape::Polygon(s) => s.contains_point(p, tolerance),
            Shape::Freehand(s) => s.contains_point(p, tolerance),
        }
    }
}

/// Build a closed or open polyline path through `points`.
pub(crate) fn polyline_path(points: &[Point], closed: bool) -> Path {
    let mut builder = Path::builder();
    if let Some((first, rest)) = points.split_first() {
        builder.begin(first.to_lyon());
        for p in rest {
            builder.line_to(p.to_lyon());
        }
        builder.end(closed);
    }
    builder.build()
}

/// Even-odd fill test plus edge tolerance for a closed vertex ring.
pub(crate) fn ring_contains(points: &[Point], p: Point, tolerance: f64) -> bool {
    if points.len() >= 3 {
        let path = polyline_path(points, true);
        if lyon::algorithms::hit_test::hit_test_path(
            &p.to_lyon(),
            path.iter(),
            lyon::path::FillRule::EvenOdd,
            0.01,
        ) {
            return true;
        }
    }
    let n = points.len();
    (0..n).any(|i| distance_to_segment(p, points[i], points[(i + 1) % n]) <= tolerance)
}

/// Shift points so their bounding box starts at the origin.
///
/// Returns the shifted points and the offset that was removed.
pub(crate) fn normalize_points(points: &[Point]) -> (Vec<Point>, Point) {
    let (min_x, min_y, _, _) = points_bounds(points);
    let local = points
        .iter()
        .map(|p| Point::new(p.x - min_x, p.y - min_y))
        .collect();
    (local, Point::new(min_x, min_y))
}
