use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use takeoffkit_core::{Material, SurfaceError};
use takeoffkit_designer::{
    CanvasOptions, Frame, OffscreenSurface, PointerEvent, RenderSurface, RetryPolicy, Room,
    ShapeType, TakeoffCanvas,
};

/// Surface that never becomes available, counting attach attempts.
struct DeadSurface {
    attempts: Rc<Cell<u32>>,
    released: Rc<Cell<bool>>,
}

impl RenderSurface for DeadSurface {
    fn attach(&mut self, _width: f64, _height: f64) -> Result<(), SurfaceError> {
        self.attempts.set(self.attempts.get() + 1);
        Err(SurfaceError::Unavailable {
            reason: "host window not mapped".into(),
        })
    }

    fn is_attached(&self) -> bool {
        false
    }

    fn present(&mut self, _frame: &Frame) {}

    fn release(&mut self) {
        self.released.set(true);
    }
}

/// Offscreen surface that reports presents and release to the test.
struct ObservedSurface {
    inner: OffscreenSurface,
    presented: Rc<Cell<u64>>,
    released: Rc<Cell<bool>>,
}

impl RenderSurface for ObservedSurface {
    fn attach(&mut self, width: f64, height: f64) -> Result<(), SurfaceError> {
        self.inner.attach(width, height)
    }

    fn is_attached(&self) -> bool {
        self.inner.is_attached()
    }

    fn present(&mut self, frame: &Frame) {
        self.inner.present(frame);
        self.presented.set(self.inner.frames_presented());
    }

    fn release(&mut self) {
        self.inner.release();
        self.released.set(true);
    }
}

fn fast_options(max_attempts: u32) -> CanvasOptions {
    CanvasOptions {
        retry: RetryPolicy {
            delay: Duration::from_millis(1),
            max_attempts,
        },
        ..CanvasOptions::default()
    }
}

#[tokio::test]
async fn test_initialize_gives_up_after_budget() {
    let attempts = Rc::new(Cell::new(0));
    let released = Rc::new(Cell::new(false));
    let surface = DeadSurface {
        attempts: attempts.clone(),
        released: released.clone(),
    };

    let err = TakeoffCanvas::initialize(fast_options(4), Box::new(surface))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        SurfaceError::InitializationFailed {
            attempts: 4,
            reason: "Drawing surface unavailable: host window not mapped".into(),
        }
    );
    assert_eq!(attempts.get(), 4);
    assert!(released.get());
}

#[tokio::test]
async fn test_render_presents_and_dispose_releases() {
    let presented = Rc::new(Cell::new(0));
    let released = Rc::new(Cell::new(false));
    let surface = ObservedSurface {
        inner: OffscreenSurface::new(),
        presented: presented.clone(),
        released: released.clone(),
    };

    let mut canvas = TakeoffCanvas::initialize(fast_options(3), Box::new(surface))
        .await
        .unwrap();
    canvas.add_room(None).unwrap();
    let frame = canvas.render();
    assert_eq!(frame.shapes.len(), 1);
    assert_eq!(presented.get(), 1);

    drop(canvas);
    assert!(released.get());
}

#[test]
fn test_clear_canvas_notifies_once_and_recreates_grid() {
    let mut canvas = TakeoffCanvas::new(CanvasOptions::default());
    canvas.add_room(None).unwrap();
    canvas.add_room(None).unwrap();
    canvas.toggle_grid();
    assert!(!canvas.grid().is_shown());

    let snapshots: Rc<RefCell<Vec<Vec<Room>>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = snapshots.clone();
    canvas.on_rooms_change(move |rooms| sink.borrow_mut().push(rooms.to_vec()));

    canvas.clear_canvas().unwrap();
    assert_eq!(snapshots.borrow().len(), 1);
    assert!(snapshots.borrow()[0].is_empty());
    assert_eq!(canvas.get_total_cost(), 0);
    assert!(canvas.grid().is_shown());
}

#[test]
fn test_update_material_and_name() {
    let mut canvas = TakeoffCanvas::new(CanvasOptions::default());
    canvas.set_selected_material(Material::Drywall);
    let room = canvas.add_room(Some("Bedroom")).unwrap();
    // 200 x 150 px = 3 units at 45
    assert_eq!(room.cost, 135);

    let glass = canvas.update_room_material(room.id, Material::Glass).unwrap();
    assert_eq!(glass.cost, 900);
    assert_eq!(glass.quantity, room.quantity);

    let renamed = canvas.update_room_name(room.id, "Sunroom").unwrap();
    assert_eq!(renamed.name, "Sunroom");
    assert_eq!(canvas.get_total_cost(), 900);
}

#[test]
fn test_scale_room_reprices() {
    let mut canvas = TakeoffCanvas::new(CanvasOptions::default());
    canvas.set_selected_material(Material::Timber);
    let room = canvas.add_room(None).unwrap();
    let scaled = canvas.scale_room(room.id, 0.5, 2.0).unwrap();
    assert_eq!(scaled.cost, room.cost);
    assert_eq!((scaled.width, scaled.height), (100.0, 300.0));
}

#[test]
fn test_delete_selected_room_clears_selection() {
    let mut canvas = TakeoffCanvas::new(CanvasOptions::default());
    let room = canvas.add_room(None).unwrap();
    canvas.select_room(room.id).unwrap();
    canvas.delete_room(room.id).unwrap();
    assert!(canvas.get_selected_room().is_none());
    assert!(canvas.delete_room(room.id).unwrap_err().is_not_found());
}

#[test]
fn test_off_rooms_change_stops_delivery() {
    let mut canvas = TakeoffCanvas::new(CanvasOptions::default());
    let count = Rc::new(Cell::new(0));
    let counter = count.clone();
    let sub = canvas.on_rooms_change(move |_| counter.set(counter.get() + 1));
    canvas.add_room(None).unwrap();
    assert!(canvas.off_rooms_change(sub));
    canvas.add_room(None).unwrap();
    assert_eq!(count.get(), 1);
}

#[test]
fn test_dispose_is_idempotent_and_blocks_mutation() {
    let mut canvas = TakeoffCanvas::new(CanvasOptions::default());
    canvas.add_room(None).unwrap();
    canvas.dispose();
    canvas.dispose();
    assert!(canvas.is_disposed());
    assert!(canvas.rooms().is_empty());
    assert!(canvas.add_room(None).unwrap_err().is_surface_error());

    canvas.set_current_shape(ShapeType::Rectangle);
    canvas.pointer_down(PointerEvent::at(0.0, 0.0));
    canvas.pointer_up(PointerEvent::at(10.0, 10.0));
    assert!(canvas.rooms().is_empty());
}

#[test]
fn test_zoom_controls() {
    let mut canvas = TakeoffCanvas::new(CanvasOptions::default());
    canvas.zoom_in();
    canvas.zoom_in();
    assert!(canvas.viewport().zoom() > 1.4);
    canvas.zoom_to_fit();
    assert_eq!(canvas.viewport().zoom(), 1.0);
    assert_eq!(canvas.viewport().pan_x(), 0.0);
}

#[test]
fn test_fit_to_content_frames_rooms() {
    let mut canvas = TakeoffCanvas::new(CanvasOptions::default());
    canvas.fit_to_content();
    assert_eq!(canvas.viewport().zoom(), 1.0);

    canvas.add_room(None).unwrap();
    canvas.fit_to_content();
    // 200 x 150 room on 1200 x 800 with 5% padding: min(1080/200, 720/150) = 4.8
    assert!((canvas.viewport().zoom() - 4.8).abs() < 1e-9);
    let (cx, cy) = canvas.viewport().world_to_pixel(200.0, 175.0);
    assert!((cx - 600.0).abs() < 1e-9 && (cy - 400.0).abs() < 1e-9);
}

#[test]
fn test_summary_serializes_with_material_keys() {
    let mut canvas = TakeoffCanvas::new(CanvasOptions::default());
    canvas.set_selected_material(Material::Brick);
    canvas.add_room(Some("Garage")).unwrap();

    let json = serde_json::to_value(canvas.takeoff_summary()).unwrap();
    assert_eq!(json["materials"][0]["material"], "brick");
    assert_eq!(json["room_count"], 1);
    assert_eq!(json["total_cost"], json["materials"][0]["cost"]);
}
