//! Visual shape storage.
//!
//! The rendering side of the Room bookkeeping: visual shapes keyed by the
//! same id as their Room, plus the draw order used for hit testing.
//! Nothing in here refers back to domain records.

use std::collections::HashMap;

use lyon::path::Path;
use serde::{Deserialize, Serialize};

use crate::geometry::{self, Quantity};
use crate::model::{DesignerShape, Point, Shape, ShapeTransform, ShapeType};

/// A shape plus its placement, not yet stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeDraft {
    pub shape: Shape,
    pub transform: ShapeTransform,
}

impl ShapeDraft {
    pub fn new(shape: Shape, origin: Point) -> Self {
        Self {
            shape,
            transform: ShapeTransform::at(origin.x, origin.y),
        }
    }

    pub fn shape_type(&self) -> ShapeType {
        self.shape.shape_type()
    }

    /// Measured quantity under the draft's scale.
    pub fn quantity(&self) -> Quantity {
        geometry::quantity(&self.shape, self.transform.scale_x, self.transform.scale_y)
    }

    /// Outline in scene coordinates.
    pub fn render(&self) -> Path {
        self.shape.render().transformed(&self.transform.to_lyon())
    }

    /// Scene bounding box as (min_x, min_y, max_x, max_y).
    pub fn scene_bounds(&self) -> (f64, f64, f64, f64) {
        let (x1, y1, x2, y2) = self.shape.bounds();
        let a = self.transform.apply(Point::new(x1, y1));
        let b = self.transform.apply(Point::new(x2, y2));
        (a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }
}

/// A stored, selectable shape on the drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualShape {
    pub id: u64,
    pub draft: ShapeDraft,
    /// Fill and stroke color as `#rrggbb`.
    pub color: String,
    pub selectable: bool,
    pub selected: bool,
}

impl VisualShape {
    pub fn new(id: u64, draft: ShapeDraft, color: impl Into<String>) -> Self {
        Self {
            id,
            draft,
            color: color.into(),
            selectable: true,
            selected: false,
        }
    }

    pub fn shape(&self) -> &Shape {
        &self.draft.shape
    }

    pub fn transform(&self) -> &ShapeTransform {
        &self.draft.transform
    }

    pub fn quantity(&self) -> Quantity {
        self.draft.quantity()
    }

    pub fn scene_bounds(&self) -> (f64, f64, f64, f64) {
        self.draft.scene_bounds()
    }

    pub fn render(&self) -> Path {
        self.draft.render()
    }

    /// Hit test against a scene point.
    pub fn contains_point(&self, point: &Point, tolerance: f64) -> bool {
        let t = &self.draft.transform;
        let Some(local) = t.invert(*point) else {
            return false;
        };
        let scale = t.scale_x.abs().min(t.scale_y.abs());
        self.draft.shape.contains_point(local, tolerance / scale)
    }
}

/// Id-keyed storage of visual shapes with a stable draw order.
#[derive(Debug, Clone, Default)]
pub struct ShapeStore {
    shapes: HashMap<u64, VisualShape>,
    draw_order: Vec<u64>,
}

impl ShapeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, shape: VisualShape) {
        let id = shape.id;
        if self.shapes.insert(id, shape).is_none() {
            self.draw_order.push(id);
        }
    }

    pub fn remove(&mut self, id: u64) -> Option<VisualShape> {
        let removed = self.shapes.remove(&id);
        if removed.is_some() {
            self.draw_order.retain(|&other| other != id);
        }
        removed
    }

    pub fn get(&self, id: u64) -> Option<&VisualShape> {
        self.shapes.get(&id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut VisualShape> {
        self.shapes.get_mut(&id)
    }

    pub fn contains(&self, id: u64) -> bool {
        self.shapes.contains_key(&id)
    }

    /// Shapes bottom to top.
    pub fn iter(&self) -> impl Iterator<Item = &VisualShape> {
        self.draw_order.iter().filter_map(|id| self.shapes.get(id))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut VisualShape> {
        self.shapes.values_mut()
    }

    /// Topmost selectable shape under a scene point.
    pub fn topmost_at(&self, point: &Point, tolerance: f64) -> Option<u64> {
        self.draw_order
            .iter()
            .rev()
            .filter_map(|id| self.shapes.get(id))
            .find(|s| s.selectable && s.contains_point(point, tolerance))
            .map(|s| s.id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn clear(&mut self) {
        self.shapes.clear();
        self.draw_order.clear();
    }
}
