//! Pointer-driven drawing state machine.
//!
//! Turns pointer events into shape commits. The machine only knows scene
//! coordinates, pixel positions (for panning) and which tool is active; it
//! never touches the registry itself. Every handler returns a
//! [`DrawingAction`] that the owning controller applies, which keeps the
//! event order explicit: a commit is always produced by the `pointer_up`
//! that follows the last `pointer_move` of its gesture.

use serde::{Deserialize, Serialize};

use crate::model::{
    DesignCircle, DesignFreehand, DesignLine, DesignPolygon, DesignRectangle, Point, Shape,
    ShapeType,
};
use crate::shape_store::ShapeDraft;

/// Minimum number of vertices for a polygon commit.
pub const MIN_POLYGON_VERTICES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    #[default]
    Primary,
    Secondary,
    Middle,
}

/// Keyboard modifiers held during a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Modifiers {
    pub alt: bool,
    pub shift: bool,
    pub ctrl: bool,
}

/// A pointer event in screen space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub button: PointerButton,
    #[serde(default)]
    pub modifiers: Modifiers,
    /// 2 for the second press of a double-click.
    #[serde(default = "default_click_count")]
    pub click_count: u32,
}

fn default_click_count() -> u32 {
    1
}

impl PointerEvent {
    /// Plain primary-button event at a pixel position.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            button: PointerButton::Primary,
            modifiers: Modifiers::default(),
            click_count: 1,
        }
    }

    pub fn with_button(mut self, button: PointerButton) -> Self {
        self.button = button;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.modifiers.alt = true;
        self
    }

    pub fn double(mut self) -> Self {
        self.click_count = 2;
        self
    }

    pub fn pixel(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Alt or any non-primary button starts a pan.
    pub fn is_pan_trigger(&self) -> bool {
        self.modifiers.alt || self.button != PointerButton::Primary
    }
}

/// Current state of the machine.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingState {
    Idle,
    RectDrawing { anchor: Point, current: Point },
    CircleDrawing { anchor: Point, current: Point },
    LineDrawing { anchor: Point, current: Point },
    PolygonAccumulating { vertices: Vec<Point>, cursor: Point },
    FreehandTracing { points: Vec<Point> },
    /// Dragging an existing shape.
    Moving { shape_id: u64, last: Point },
    /// Pan gesture; a suspended polygon session resumes on release.
    Panning {
        last_pixel: Point,
        suspended: Option<Vec<Point>>,
    },
}

impl DrawingState {
    pub fn name(&self) -> &'static str {
        match self {
            DrawingState::Idle => "Idle",
            DrawingState::RectDrawing { .. } => "RectDrawing",
            DrawingState::CircleDrawing { .. } => "CircleDrawing",
            DrawingState::LineDrawing { .. } => "LineDrawing",
            DrawingState::PolygonAccumulating { .. } => "PolygonAccumulating",
            DrawingState::FreehandTracing { .. } => "FreehandTracing",
            DrawingState::Moving { .. } => "Moving",
            DrawingState::Panning { .. } => "Panning",
        }
    }
}

/// What the controller must do after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawingAction {
    None,
    /// The live preview changed.
    Preview,
    /// A gesture finished; store this shape as a Room.
    Commit(ShapeDraft),
    VertexAdded(usize),
    /// Polygon closed with too few vertices; nothing to store.
    PolygonDiscarded { vertices: usize },
    /// An existing shape was hit and is now being dragged.
    Selected(u64),
    Move { shape_id: u64, dx: f64, dy: f64 },
    /// Pixel delta to apply to the viewport pan.
    Pan { dx: f64, dy: f64 },
}

/// Rubber-band geometry for the renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    Shape(ShapeDraft),
    /// Open polygon: placed vertices plus the segment to the pointer.
    Polyline { vertices: Vec<Point>, cursor: Point },
}

#[derive(Debug, Clone)]
pub struct DrawingStateMachine {
    tool: ShapeType,
    state: DrawingState,
}

impl DrawingStateMachine {
    pub fn new(tool: ShapeType) -> Self {
        Self {
            tool,
            state: DrawingState::Idle,
        }
    }

    pub fn tool(&self) -> ShapeType {
        self.tool
    }

    /// Switch tool. Any unfinished session is dropped without a commit.
    pub fn set_tool(&mut self, tool: ShapeType) {
        if self.tool != tool && !self.is_idle() {
            tracing::debug!(
                "Tool changed {} -> {}, dropping {} session",
                self.tool,
                tool,
                self.state.name()
            );
            self.state = DrawingState::Idle;
        }
        self.tool = tool;
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, DrawingState::Idle)
    }

    pub fn is_panning(&self) -> bool {
        matches!(self.state, DrawingState::Panning { .. })
    }

    /// A shape is under construction (polygon sessions suspended by a pan count).
    pub fn is_drawing(&self) -> bool {
        match &self.state {
            DrawingState::RectDrawing { .. }
            | DrawingState::CircleDrawing { .. }
            | DrawingState::LineDrawing { .. }
            | DrawingState::PolygonAccumulating { .. }
            | DrawingState::FreehandTracing { .. } => true,
            DrawingState::Panning { suspended, .. } => suspended.is_some(),
            DrawingState::Idle | DrawingState::Moving { .. } => false,
        }
    }

    /// Zoom must stay fixed while anything other than a plain pan is in progress.
    pub fn zoom_locked(&self) -> bool {
        match &self.state {
            DrawingState::Idle => false,
            DrawingState::Panning { suspended, .. } => suspended.is_some(),
            _ => true,
        }
    }

    /// Vertices placed so far in a polygon session.
    pub fn polygon_vertices(&self) -> &[Point] {
        match &self.state {
            DrawingState::PolygonAccumulating { vertices, .. } => vertices,
            DrawingState::Panning {
                suspended: Some(vertices),
                ..
            } => vertices,
            _ => &[],
        }
    }

    /// Handle a pointer press.
    ///
    /// # Arguments
    /// * `event` - The raw event, used for buttons, modifiers and pan pixels
    /// * `world` - The event position in scene coordinates
    /// * `hit_test` - Returns the topmost selectable shape under a scene point
    pub fn pointer_down<F>(&mut self, event: &PointerEvent, world: Point, hit_test: F) -> DrawingAction
    where
        F: FnOnce(Point) -> Option<u64>,
    {
        if event.is_pan_trigger() {
            return self.begin_pan(event);
        }

        match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::Idle => self.begin(world, event.click_count, hit_test),
            DrawingState::PolygonAccumulating { vertices, .. } => {
                self.polygon_press(vertices, world, event.click_count)
            }
            other => {
                // a press while another gesture holds the pointer is ignored
                self.state = other;
                DrawingAction::None
            }
        }
    }

    fn begin<F>(&mut self, world: Point, click_count: u32, hit_test: F) -> DrawingAction
    where
        F: FnOnce(Point) -> Option<u64>,
    {
        if self.tool != ShapeType::Freehand {
            if let Some(shape_id) = hit_test(world) {
                tracing::debug!("Pointer down on shape {}, starting move", shape_id);
                self.state = DrawingState::Moving {
                    shape_id,
                    last: world,
                };
                return DrawingAction::Selected(shape_id);
            }
        }

        self.state = match self.tool {
            ShapeType::Rectangle => DrawingState::RectDrawing {
                anchor: world,
                current: world,
            },
            ShapeType::Circle => DrawingState::CircleDrawing {
                anchor: world,
                current: world,
            },
            ShapeType::Line => DrawingState::LineDrawing {
                anchor: world,
                current: world,
            },
            ShapeType::Freehand => DrawingState::FreehandTracing {
                points: vec![world],
            },
            ShapeType::Polygon => {
                if click_count > 1 {
                    // a stray double-click with no session open
                    return DrawingAction::None;
                }
                DrawingState::PolygonAccumulating {
                    vertices: vec![world],
                    cursor: world,
                }
            }
        };
        tracing::debug!("{} started at ({:.1}, {:.1})", self.state.name(), world.x, world.y);

        if self.tool == ShapeType::Polygon {
            DrawingAction::VertexAdded(1)
        } else {
            DrawingAction::Preview
        }
    }

    fn polygon_press(&mut self, mut vertices: Vec<Point>, world: Point, click_count: u32) -> DrawingAction {
        if click_count > 1 {
            return Self::close_polygon(vertices);
        }
        let duplicate = vertices
            .last()
            .is_some_and(|last| last.approx_eq(&world, 1e-9));
        if !duplicate {
            vertices.push(world);
        }
        let count = vertices.len();
        self.state = DrawingState::PolygonAccumulating {
            vertices,
            cursor: world,
        };
        if duplicate {
            DrawingAction::None
        } else {
            DrawingAction::VertexAdded(count)
        }
    }

    /// Close the open polygon session, if any, as a double-click would.
    pub fn finish_polygon(&mut self) -> DrawingAction {
        match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::PolygonAccumulating { vertices, .. } => Self::close_polygon(vertices),
            other => {
                self.state = other;
                DrawingAction::None
            }
        }
    }

    fn close_polygon(vertices: Vec<Point>) -> DrawingAction {
        if vertices.len() < MIN_POLYGON_VERTICES {
            tracing::warn!(
                "Polygon closed with {} vertices, need {}; discarding",
                vertices.len(),
                MIN_POLYGON_VERTICES
            );
            return DrawingAction::PolygonDiscarded {
                vertices: vertices.len(),
            };
        }
        let (polygon, origin) = DesignPolygon::from_scene_points(&vertices);
        DrawingAction::Commit(ShapeDraft::new(Shape::Polygon(polygon), origin))
    }

    fn begin_pan(&mut self, event: &PointerEvent) -> DrawingAction {
        let suspended = match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::Idle => None,
            DrawingState::PolygonAccumulating { vertices, .. } => {
                tracing::debug!("Suspending polygon session ({} vertices) for pan", vertices.len());
                Some(vertices)
            }
            other => {
                self.state = other;
                return DrawingAction::None;
            }
        };
        self.state = DrawingState::Panning {
            last_pixel: event.pixel(),
            suspended,
        };
        DrawingAction::None
    }

    /// Handle pointer motion.
    pub fn pointer_move(&mut self, event: &PointerEvent, world: Point) -> DrawingAction {
        match &mut self.state {
            DrawingState::Idle => DrawingAction::None,
            DrawingState::RectDrawing { current, .. }
            | DrawingState::CircleDrawing { current, .. }
            | DrawingState::LineDrawing { current, .. } => {
                *current = world;
                DrawingAction::Preview
            }
            DrawingState::PolygonAccumulating { cursor, .. } => {
                *cursor = world;
                DrawingAction::Preview
            }
            DrawingState::FreehandTracing { points } => {
                points.push(world);
                DrawingAction::Preview
            }
            DrawingState::Moving { shape_id, last } => {
                let (dx, dy) = (world.x - last.x, world.y - last.y);
                *last = world;
                DrawingAction::Move {
                    shape_id: *shape_id,
                    dx,
                    dy,
                }
            }
            DrawingState::Panning { last_pixel, .. } => {
                let pixel = event.pixel();
                let (dx, dy) = (pixel.x - last_pixel.x, pixel.y - last_pixel.y);
                *last_pixel = pixel;
                DrawingAction::Pan { dx, dy }
            }
        }
    }

    /// Handle a pointer release. Drag gestures always commit here, even at zero size.
    pub fn pointer_up(&mut self, event: &PointerEvent, world: Point) -> DrawingAction {
        match std::mem::replace(&mut self.state, DrawingState::Idle) {
            DrawingState::Idle => DrawingAction::None,
            DrawingState::RectDrawing { anchor, .. } => {
                let (rect, origin) = DesignRectangle::from_corners(anchor, world);
                DrawingAction::Commit(ShapeDraft::new(Shape::Rectangle(rect), origin))
            }
            DrawingState::CircleDrawing { anchor, .. } => {
                let (circle, origin) = DesignCircle::centered(anchor, anchor.distance_to(&world));
                DrawingAction::Commit(ShapeDraft::new(Shape::Circle(circle), origin))
            }
            DrawingState::LineDrawing { anchor, .. } => {
                let (line, origin) = DesignLine::between(anchor, world);
                DrawingAction::Commit(ShapeDraft::new(Shape::Line(line), origin))
            }
            DrawingState::FreehandTracing { mut points } => {
                if points.last().is_none_or(|last| !last.approx_eq(&world, 1e-9)) {
                    points.push(world);
                }
                let (path, origin) = DesignFreehand::from_scene_points(&points);
                DrawingAction::Commit(ShapeDraft::new(Shape::Freehand(path), origin))
            }
            DrawingState::PolygonAccumulating { vertices, cursor } => {
                self.state = DrawingState::PolygonAccumulating { vertices, cursor };
                DrawingAction::None
            }
            DrawingState::Moving { shape_id, last } => {
                let (dx, dy) = (world.x - last.x, world.y - last.y);
                if dx == 0.0 && dy == 0.0 {
                    DrawingAction::None
                } else {
                    DrawingAction::Move { shape_id, dx, dy }
                }
            }
            DrawingState::Panning {
                last_pixel,
                suspended,
            } => {
                let pixel = event.pixel();
                if let Some(vertices) = suspended {
                    tracing::debug!("Resuming polygon session ({} vertices)", vertices.len());
                    self.state = DrawingState::PolygonAccumulating {
                        vertices,
                        cursor: world,
                    };
                }
                let (dx, dy) = (pixel.x - last_pixel.x, pixel.y - last_pixel.y);
                if dx == 0.0 && dy == 0.0 {
                    DrawingAction::None
                } else {
                    DrawingAction::Pan { dx, dy }
                }
            }
        }
    }

    /// Rubber-band geometry for the shape under construction.
    pub fn preview(&self) -> Option<Preview> {
        let draft = match &self.state {
            DrawingState::RectDrawing { anchor, current } => {
                let (rect, origin) = DesignRectangle::from_corners(*anchor, *current);
                ShapeDraft::new(Shape::Rectangle(rect), origin)
            }
            DrawingState::CircleDrawing { anchor, current } => {
                let (circle, origin) = DesignCircle::centered(*anchor, anchor.distance_to(current));
                ShapeDraft::new(Shape::Circle(circle), origin)
            }
            DrawingState::LineDrawing { anchor, current } => {
                let (line, origin) = DesignLine::between(*anchor, *current);
                ShapeDraft::new(Shape::Line(line), origin)
            }
            DrawingState::FreehandTracing { points } => {
                let (path, origin) = DesignFreehand::from_scene_points(points);
                ShapeDraft::new(Shape::Freehand(path), origin)
            }
            DrawingState::PolygonAccumulating { vertices, cursor } => {
                return Some(Preview::Polyline {
                    vertices: vertices.clone(),
                    cursor: *cursor,
                });
            }
            _ => return None,
        };
        Some(Preview::Shape(draft))
    }

    /// Drop any session without committing.
    pub fn reset(&mut self) {
        self.state = DrawingState::Idle;
    }
}

impl Default for DrawingStateMachine {
    fn default() -> Self {
        Self::new(ShapeType::Rectangle)
    }
}
