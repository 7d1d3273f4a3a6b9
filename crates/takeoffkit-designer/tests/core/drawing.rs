use std::cell::Cell;
use std::rc::Rc;

use takeoffkit_core::Material;
use takeoffkit_designer::{
    CanvasOptions, DrawingState, PointerButton, PointerEvent, Preview, Quantity, ShapeType,
    TakeoffCanvas,
};

fn canvas_with(tool: ShapeType, material: Material) -> TakeoffCanvas {
    let mut canvas = TakeoffCanvas::new(CanvasOptions::default());
    canvas.set_current_shape(tool);
    canvas.set_selected_material(material);
    canvas
}

fn click(canvas: &mut TakeoffCanvas, x: f64, y: f64) {
    canvas.pointer_down(PointerEvent::at(x, y));
    canvas.pointer_up(PointerEvent::at(x, y));
}

#[test]
fn test_timber_square_costs_one_unit() {
    let mut canvas = canvas_with(ShapeType::Rectangle, Material::Timber);
    canvas.pointer_down(PointerEvent::at(0.0, 0.0));
    canvas.pointer_move(PointerEvent::at(100.0, 100.0));
    canvas.pointer_up(PointerEvent::at(100.0, 100.0));

    let rooms = canvas.rooms();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].quantity, Quantity::Area(10_000.0));
    assert_eq!(rooms[0].real_quantity, 1.0);
    assert_eq!(rooms[0].cost, 120);
    assert_eq!((rooms[0].width, rooms[0].height), (100.0, 100.0));
}

#[test]
fn test_freehand_triangle_half_unit() {
    let mut canvas = canvas_with(ShapeType::Freehand, Material::Tile);
    canvas.pointer_down(PointerEvent::at(0.0, 0.0));
    canvas.pointer_move(PointerEvent::at(100.0, 0.0));
    canvas.pointer_move(PointerEvent::at(0.0, 100.0));
    canvas.pointer_up(PointerEvent::at(0.0, 100.0));

    let room = &canvas.rooms()[0];
    assert_eq!(room.shape_type, ShapeType::Freehand);
    assert_eq!(room.quantity, Quantity::Area(5000.0));
    // round(0.5 * 60)
    assert_eq!(room.cost, 30);
    assert_eq!(room.vertices.as_ref().map(Vec::len), Some(3));
}

#[test]
fn test_two_vertex_polygon_creates_nothing() {
    let mut canvas = canvas_with(ShapeType::Polygon, Material::Brick);
    let notified = Rc::new(Cell::new(0));
    let counter = notified.clone();
    canvas.on_rooms_change(move |_| counter.set(counter.get() + 1));

    click(&mut canvas, 10.0, 10.0);
    click(&mut canvas, 90.0, 10.0);
    canvas.double_click(PointerEvent::at(90.0, 10.0));

    assert!(canvas.rooms().is_empty());
    assert_eq!(notified.get(), 0);
    assert_eq!(*canvas.drawing_state(), DrawingState::Idle);
}

#[test]
fn test_polygon_commit_with_double_click() {
    let mut canvas = canvas_with(ShapeType::Polygon, Material::Concrete);
    click(&mut canvas, 0.0, 0.0);
    click(&mut canvas, 200.0, 0.0);
    click(&mut canvas, 200.0, 100.0);
    click(&mut canvas, 0.0, 100.0);
    canvas.double_click(PointerEvent::at(0.0, 100.0));

    let room = &canvas.rooms()[0];
    assert_eq!(room.shape_type, ShapeType::Polygon);
    assert_eq!(room.vertices.as_ref().map(Vec::len), Some(4));
    // 20 000 px² = 2 units of concrete at 150
    assert_eq!(room.cost, 300);
}

#[test]
fn test_polygon_preview_trails_pointer() {
    let mut canvas = canvas_with(ShapeType::Polygon, Material::Concrete);
    click(&mut canvas, 0.0, 0.0);
    canvas.pointer_move(PointerEvent::at(40.0, 30.0));
    match canvas.preview() {
        Some(Preview::Polyline { vertices, cursor }) => {
            assert_eq!(vertices.len(), 1);
            assert_eq!((cursor.x, cursor.y), (40.0, 30.0));
        }
        other => panic!("unexpected preview {:?}", other),
    }
}

#[test]
fn test_pan_mid_polygon_keeps_scene_vertices() {
    let mut canvas = canvas_with(ShapeType::Polygon, Material::Concrete);
    click(&mut canvas, 0.0, 0.0);
    click(&mut canvas, 100.0, 0.0);

    let pan = PointerEvent::at(300.0, 300.0).with_button(PointerButton::Secondary);
    canvas.pointer_down(pan);
    canvas.pointer_move(PointerEvent::at(350.0, 300.0));
    canvas.pointer_up(PointerEvent::at(350.0, 300.0));
    assert_eq!(canvas.viewport().pan_x(), 50.0);

    // scene (100, 100) is now at pixel (150, 100)
    click(&mut canvas, 150.0, 100.0);
    canvas.double_click(PointerEvent::at(150.0, 100.0));

    let room = &canvas.rooms()[0];
    assert_eq!((room.x, room.y, room.width, room.height), (0.0, 0.0, 100.0, 100.0));
    assert_eq!(room.quantity, Quantity::Area(5000.0));
}

#[test]
fn test_zero_size_rectangle_commits_at_zero_cost() {
    let mut canvas = canvas_with(ShapeType::Rectangle, Material::Steel);
    click(&mut canvas, 500.0, 500.0);
    let rooms = canvas.rooms();
    assert_eq!(rooms.len(), 1);
    assert_eq!(rooms[0].cost, 0);
}

#[test]
fn test_drag_existing_shape_moves_room() {
    let mut canvas = canvas_with(ShapeType::Rectangle, Material::Timber);
    let room = canvas.add_room(Some("Office")).unwrap();

    canvas.pointer_down(PointerEvent::at(150.0, 150.0));
    assert_eq!(canvas.get_selected_room().map(|r| r.id), Some(room.id));
    canvas.pointer_move(PointerEvent::at(170.0, 160.0));
    canvas.pointer_up(PointerEvent::at(180.0, 170.0));

    let moved = canvas.room(room.id).unwrap();
    assert_eq!((moved.x, moved.y), (room.x + 30.0, room.y + 20.0));
    assert_eq!(moved.cost, room.cost);
    assert_eq!(canvas.rooms().len(), 1);
}

#[test]
fn test_drawing_on_empty_space_clears_selection() {
    let mut canvas = canvas_with(ShapeType::Rectangle, Material::Timber);
    let room = canvas.add_room(None).unwrap();
    canvas.select_room(room.id).unwrap();
    assert!(canvas.get_selected_room().is_some());

    canvas.pointer_down(PointerEvent::at(600.0, 600.0));
    canvas.pointer_up(PointerEvent::at(650.0, 650.0));
    assert!(canvas.get_selected_room().is_none());
    assert_eq!(canvas.rooms().len(), 2);
}

#[test]
fn test_line_priced_by_length() {
    let mut canvas = canvas_with(ShapeType::Line, Material::Steel);
    canvas.pointer_down(PointerEvent::at(0.0, 0.0));
    canvas.pointer_up(PointerEvent::at(0.0, 200.0));
    let room = &canvas.rooms()[0];
    assert!(room.is_linear());
    // 2 m at 250 per m
    assert_eq!(room.cost, 500);
}
