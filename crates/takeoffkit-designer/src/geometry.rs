//! Geometric quantities for takeoff.
//!
//! Every function here is pure and total: negative scale factors (flips)
//! are folded in with `abs`, and degenerate input (zero size, collinear
//! vertices, fewer than three points) yields a zero quantity, never an error.

use serde::{Deserialize, Serialize};

use crate::model::{Point, Shape};

/// Measured size of a shape in surface pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Quantity {
    /// Square pixels.
    Area(f64),
    /// Pixels.
    Length(f64),
}

impl Quantity {
    pub fn value(&self) -> f64 {
        match self {
            Quantity::Area(v) | Quantity::Length(v) => *v,
        }
    }

    pub fn is_linear(&self) -> bool {
        matches!(self, Quantity::Length(_))
    }
}

/// Quantity of a shape under the scale factors applied to it.
pub fn quantity(shape: &Shape, scale_x: f64, scale_y: f64) -> Quantity {
    let q = match shape {
        Shape::Rectangle(r) => Quantity::Area(rectangle_area(r.width, r.height, scale_x, scale_y)),
        Shape::Circle(c) => Quantity::Area(circle_area(c.radius, scale_x, scale_y)),
        Shape::Line(l) => Quantity::Length(line_length(l.start, l.end, scale_x, scale_y)),
        Shape::Polygon(p) => Quantity::Area(polygon_area(&p.points, scale_x, scale_y)),
        Shape::Freehand(f) => Quantity::Area(freehand_area(&f.points, scale_x, scale_y)),
    };
    sanitize(q)
}

fn sanitize(q: Quantity) -> Quantity {
    let clean = |v: f64| if v.is_finite() && v > 0.0 { v } else { 0.0 };
    match q {
        Quantity::Area(v) => Quantity::Area(clean(v)),
        Quantity::Length(v) => Quantity::Length(clean(v)),
    }
}

pub fn rectangle_area(width: f64, height: f64, scale_x: f64, scale_y: f64) -> f64 {
    (width * height * scale_x * scale_y).abs()
}

pub fn circle_area(radius: f64, scale_x: f64, scale_y: f64) -> f64 {
    (std::f64::consts::PI * radius * radius * scale_x * scale_y).abs()
}

/// Distance between the endpoints after scaling.
pub fn line_length(start: Point, end: Point, scale_x: f64, scale_y: f64) -> f64 {
    let dx = (end.x - start.x) * scale_x;
    let dy = (end.y - start.y) * scale_y;
    (dx * dx + dy * dy).sqrt()
}

/// Shoelace area of a vertex ring; the closing edge is implied.
pub fn shoelace_area(points: &[Point]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }

    let mut area = 0.0;
    for i in 0..n {
        let j = (i + 1) % n;
        area += points[i].x * points[j].y;
        area -= points[j].x * points[i].y;
    }

    (area / 2.0).abs()
}

pub fn polygon_area(points: &[Point], scale_x: f64, scale_y: f64) -> f64 {
    shoelace_area(points) * (scale_x * scale_y).abs()
}

/// Area enclosed by a traced path, closing it from last sample to first.
pub fn freehand_area(points: &[Point], scale_x: f64, scale_y: f64) -> f64 {
    let ring = match (points.first(), points.last()) {
        (Some(first), Some(last)) if points.len() > 1 && first.approx_eq(last, 1e-9) => {
            &points[..points.len() - 1]
        }
        _ => points,
    };
    polygon_area(ring, scale_x, scale_y)
}
