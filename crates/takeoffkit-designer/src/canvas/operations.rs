//! Pointer, wheel, zoom and rendering operations for TakeoffCanvas.

use std::collections::BTreeMap;

use takeoffkit_core::Material;

use super::types::{MaterialSummary, TakeoffSummary};
use super::TakeoffCanvas;
use crate::drawing::{DrawingAction, PointerEvent, Preview};
use crate::model::polyline_path;
use crate::surface::{Frame, FrameShape};

impl TakeoffCanvas {
    /// Handles a pointer press in screen space.
    pub fn pointer_down(&mut self, event: PointerEvent) {
        if self.disposed {
            return;
        }
        let world = self.viewport.pixel_to_world(event.x, event.y);
        let was_idle = self.drawing.is_idle();
        let tolerance = self.options.hit_tolerance / self.viewport.zoom();
        let shapes = self.registry.shapes();
        let action = self
            .drawing
            .pointer_down(&event, world, |p| shapes.topmost_at(&p, tolerance));

        // pressing empty space to start a shape drops the old selection
        if was_idle && self.drawing.is_drawing() {
            self.selection.deselect_all(self.registry.shapes_mut());
        }
        self.apply(action);
    }

    /// Handles pointer motion in screen space.
    pub fn pointer_move(&mut self, event: PointerEvent) {
        if self.disposed {
            return;
        }
        let world = self.viewport.pixel_to_world(event.x, event.y);
        let action = self.drawing.pointer_move(&event, world);
        self.apply(action);
    }

    /// Handles a pointer release in screen space.
    pub fn pointer_up(&mut self, event: PointerEvent) {
        if self.disposed {
            return;
        }
        let world = self.viewport.pixel_to_world(event.x, event.y);
        let action = self.drawing.pointer_up(&event, world);
        self.apply(action);
    }

    /// Handles a double-click: closes an open polygon.
    pub fn double_click(&mut self, event: PointerEvent) {
        self.pointer_down(event.double());
    }

    fn apply(&mut self, action: DrawingAction) {
        match action {
            DrawingAction::None | DrawingAction::Preview | DrawingAction::PolygonDiscarded { .. } => {}
            DrawingAction::VertexAdded(count) => {
                tracing::debug!("Polygon vertex {} placed", count);
            }
            DrawingAction::Commit(draft) => {
                self.registry.add(draft, None, self.selected_material);
            }
            DrawingAction::Selected(shape_id) => {
                self.selection
                    .select_id(self.registry.shapes_mut(), shape_id);
            }
            DrawingAction::Move { shape_id, dx, dy } => {
                let room_id = self.registry.find_by_shape(shape_id).map(|room| room.id);
                if let Some(id) = room_id {
                    if let Err(e) = self.registry.translate(id, dx, dy) {
                        tracing::warn!("Move of shape {} failed: {}", shape_id, e);
                    }
                }
            }
            DrawingAction::Pan { dx, dy } => self.viewport.pan_by(dx, dy),
        }
    }

    fn zoom_blocked(&self, what: &str) -> bool {
        if self.disposed {
            return true;
        }
        if self.drawing.zoom_locked() {
            tracing::warn!(
                "Ignoring {} during {}",
                what,
                self.drawing.state().name()
            );
            return true;
        }
        false
    }

    /// Wheel zoom anchored at the pointer. Returns the zoom level after the event.
    pub fn wheel(&mut self, delta_y: f64, x: f64, y: f64) -> f64 {
        if self.zoom_blocked("wheel zoom") {
            return self.viewport.zoom();
        }
        self.viewport.wheel_zoom(delta_y, x, y)
    }

    pub fn zoom_in(&mut self) {
        if !self.zoom_blocked("zoom in") {
            self.viewport.zoom_in();
        }
    }

    pub fn zoom_out(&mut self) {
        if !self.zoom_blocked("zoom out") {
            self.viewport.zoom_out();
        }
    }

    /// Reset to zoom 1 with no pan.
    pub fn zoom_to_fit(&mut self) {
        if !self.zoom_blocked("zoom to fit") {
            self.viewport.reset();
        }
    }

    /// Frame every room with padding; resets the view when there are none.
    pub fn fit_to_content(&mut self) {
        if self.zoom_blocked("fit to content") {
            return;
        }
        let bounds = self.registry.iter().fold(None, |acc, room| {
            let (x1, y1, x2, y2) = (room.x, room.y, room.x + room.width, room.y + room.height);
            Some(match acc {
                None => (x1, y1, x2, y2),
                Some((a, b, c, d)) => (f64::min(a, x1), f64::min(b, y1), f64::max(c, x2), f64::max(d, y2)),
            })
        });
        match bounds {
            Some((x1, y1, x2, y2)) if x2 > x1 && y2 > y1 => self.viewport.fit_to_view(x1, y1, x2, y2),
            _ => self.viewport.reset(),
        }
    }

    /// Rubber-band geometry of the shape being drawn.
    pub fn preview(&self) -> Option<Preview> {
        self.drawing.preview()
    }

    /// Totals per material, in rate-card order.
    pub fn takeoff_summary(&self) -> TakeoffSummary {
        let rates = self.registry.cost_engine().rates();
        let mut by_material: BTreeMap<Material, MaterialSummary> = BTreeMap::new();

        for room in self.registry.iter() {
            let entry = by_material
                .entry(room.material)
                .or_insert_with(|| MaterialSummary {
                    material: room.material,
                    name: rates.get(room.material).name.clone(),
                    rooms: 0,
                    area: 0.0,
                    length: 0.0,
                    cost: 0,
                });
            entry.rooms += 1;
            entry.cost += room.cost;
            if room.is_linear() {
                entry.length += room.real_quantity;
            } else {
                entry.area += room.real_quantity;
            }
        }

        let materials: Vec<MaterialSummary> = Material::ALL
            .iter()
            .filter_map(|m| by_material.remove(m))
            .collect();
        TakeoffSummary {
            room_count: self.registry.len(),
            total_cost: materials.iter().map(|m| m.cost).sum(),
            materials,
        }
    }

    /// Build the current frame and present it on the attached surface.
    pub fn render(&mut self) -> Frame {
        let preview = self.drawing.preview().map(|preview| match preview {
            Preview::Shape(draft) => draft.render(),
            Preview::Polyline {
                mut vertices,
                cursor,
            } => {
                vertices.push(cursor);
                polyline_path(&vertices, false)
            }
        });

        let frame = Frame {
            zoom: self.viewport.zoom(),
            pan: (self.viewport.pan_x(), self.viewport.pan_y()),
            background_opacity: self.background.layer().map(|layer| layer.opacity),
            grid: self.grid.lines(&self.viewport),
            shapes: self
                .registry
                .shapes()
                .iter()
                .map(|shape| FrameShape {
                    id: shape.id,
                    path: shape.render(),
                    color: shape.color.clone(),
                    selected: shape.selected,
                })
                .collect(),
            preview,
        };

        if let Some(surface) = self.surface.as_mut() {
            if surface.is_attached() {
                surface.present(&frame);
            }
        }
        frame
    }
}
