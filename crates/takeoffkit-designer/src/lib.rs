//! # TakeoffKit Designer
//!
//! Interactive 2D floor-plan drawing surface with live quantity takeoff.
//! Every shape drawn on the surface is bound to a Room record whose area
//! or length is measured and priced against a material rate card as the
//! shape is created, moved, resized or reassigned.
//!
//! ## Core Components
//!
//! - **Model**: Rectangle, circle, line, polygon and freehand shapes in
//!   local coordinates with a position/scale transform
//! - **Geometry**: Area and length per shape type, shoelace for polygons
//! - **Cost**: Quantity to money through the material rate table
//! - **Registry**: Rooms and their visual shapes under one id
//! - **Drawing**: Pointer state machine producing shape commits
//! - **Viewport**: Zoom and pan with clamped zoom
//! - **Overlay**: Calibration background image or placeholder
//! - **Grid**: Passive grid lines for the visible area
//!
//! ## Architecture
//!
//! ```text
//! TakeoffCanvas (owning controller)
//!   ├── DrawingStateMachine (pointer events -> commits)
//!   ├── RoomRegistry
//!   │     ├── Rooms (domain records)
//!   │     └── ShapeStore (visual shapes, same ids)
//!   ├── SelectionManager
//!   ├── ViewportController
//!   ├── BackgroundOverlayManager
//!   ├── GridRenderer
//!   └── RenderSurface (attached with bounded retry)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use takeoffkit_core::Material;
//! use takeoffkit_designer::{CanvasOptions, PointerEvent, TakeoffCanvas};
//!
//! let mut canvas = TakeoffCanvas::new(CanvasOptions::default());
//! canvas.set_selected_material(Material::Timber);
//!
//! // drag out a 100 x 100 px rectangle: one square unit of timber
//! canvas.pointer_down(PointerEvent::at(0.0, 0.0));
//! canvas.pointer_move(PointerEvent::at(100.0, 100.0));
//! canvas.pointer_up(PointerEvent::at(100.0, 100.0));
//!
//! assert_eq!(canvas.get_total_cost(), 120);
//! ```

pub mod canvas;
pub mod cost;
pub mod drawing;
pub mod geometry;
pub mod grid;
pub mod model;
pub mod overlay;
pub mod registry;
pub mod room;
pub mod selection_manager;
pub mod shape_store;
pub mod surface;
pub mod viewport;

pub use canvas::{CanvasOptions, MaterialSummary, TakeoffCanvas, TakeoffSummary};
pub use cost::CostEngine;
pub use drawing::{
    DrawingAction, DrawingState, DrawingStateMachine, Modifiers, PointerButton, PointerEvent,
    Preview,
};
pub use geometry::Quantity;
pub use grid::{GridLine, GridRenderer};
pub use model::{
    DesignCircle, DesignFreehand, DesignLine, DesignPolygon, DesignRectangle, DesignerShape, Point,
    Shape, ShapeTransform, ShapeType,
};
pub use overlay::{
    AssetConverter, BackgroundAsset, BackgroundLayer, BackgroundOverlayManager, LayerContent,
};
pub use registry::RoomRegistry;
pub use room::Room;
pub use selection_manager::SelectionManager;
pub use shape_store::{ShapeDraft, ShapeStore, VisualShape};
pub use surface::{Frame, FrameShape, OffscreenSurface, RenderSurface, RetryPolicy};
pub use viewport::{ViewportController, ZoomSettings};
