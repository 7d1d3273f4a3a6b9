//! The Room record: a drawn, cost-bearing floor-plan element.

use serde::{Deserialize, Serialize};
use takeoffkit_core::Material;

use crate::geometry::Quantity;
use crate::model::{Point, ShapeType};
use crate::shape_store::VisualShape;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: u64,
    pub name: String,
    pub shape_type: ShapeType,
    pub material: Material,
    /// Rounded cost in whole currency units.
    pub cost: u64,
    /// Measured size in surface pixels.
    pub quantity: Quantity,
    /// Measured size in real units (m or m²).
    pub real_quantity: f64,
    /// Scene bounding box.
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Local, pre-transform vertices for polygon and freehand rooms.
    pub vertices: Option<Vec<Point>>,
    /// Id of the visual shape this room owns.
    pub shape_id: u64,
}

impl Room {
    pub(crate) fn from_shape(name: String, material: Material, shape: &VisualShape) -> Self {
        let mut room = Self {
            id: shape.id,
            name,
            shape_type: shape.shape().shape_type(),
            material,
            cost: 0,
            quantity: shape.quantity(),
            real_quantity: 0.0,
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            vertices: None,
            shape_id: shape.id,
        };
        room.sync_geometry(shape);
        room
    }

    /// Copy placement and measurements from the owned shape.
    pub(crate) fn sync_geometry(&mut self, shape: &VisualShape) {
        let (x1, y1, x2, y2) = shape.scene_bounds();
        self.x = x1;
        self.y = y1;
        self.width = x2 - x1;
        self.height = y2 - y1;
        self.quantity = shape.quantity();
        self.vertices = shape.shape().vertices().map(<[Point]>::to_vec);
    }

    pub fn is_linear(&self) -> bool {
        self.quantity.is_linear()
    }
}
