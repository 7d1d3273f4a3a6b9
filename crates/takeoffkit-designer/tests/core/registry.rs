use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use takeoffkit_core::{Material, RoomError};
use takeoffkit_designer::{DesignRectangle, Point, RoomRegistry, Shape, ShapeDraft};

fn rect(x: f64, y: f64, w: f64, h: f64) -> ShapeDraft {
    ShapeDraft::new(Shape::Rectangle(DesignRectangle::new(w, h)), Point::new(x, y))
}

#[test]
fn test_delete_reduces_total_by_room_cost() {
    let mut registry = RoomRegistry::default();
    registry.add(rect(0.0, 0.0, 100.0, 100.0), None, Material::Concrete);
    let glass = registry.add(rect(200.0, 0.0, 50.0, 100.0), None, Material::Glass);
    registry.add(rect(0.0, 200.0, 10.0, 10.0), None, Material::Brick);

    let before = registry.total_cost();
    let removed = registry.remove(glass.id).unwrap();
    assert_eq!(removed.cost, 150);
    assert_eq!(registry.len(), 2);
    assert_eq!(registry.total_cost(), before - removed.cost);
}

#[test]
fn test_listeners_receive_full_snapshot() {
    let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
    let mut registry = RoomRegistry::default();
    let sink = seen.clone();
    let sub = registry.subscribe(move |rooms| sink.borrow_mut().push(rooms.len()));

    let a = registry.add(rect(0.0, 0.0, 10.0, 10.0), None, Material::Tile);
    registry.add(rect(0.0, 0.0, 10.0, 10.0), None, Material::Tile);
    registry.remove(a.id).unwrap();
    registry.clear();
    assert_eq!(*seen.borrow(), vec![1, 2, 1, 0]);

    assert!(registry.unsubscribe(sub));
    registry.add(rect(0.0, 0.0, 10.0, 10.0), None, Material::Tile);
    assert_eq!(seen.borrow().len(), 4);
}

#[test]
fn test_find_by_active_selection() {
    let mut registry = RoomRegistry::default();
    let room = registry.add(rect(0.0, 0.0, 10.0, 10.0), Some("Kitchen".into()), Material::Tile);
    assert_eq!(
        registry.find_by_active_selection(Some(room.shape_id)).map(|r| r.name.as_str()),
        Some("Kitchen")
    );
    assert!(registry.find_by_active_selection(None).is_none());
    assert!(registry.find_by_active_selection(Some(999)).is_none());
}

#[test]
fn test_blank_name_gets_default() {
    let mut registry = RoomRegistry::default();
    let room = registry.add(rect(0.0, 0.0, 1.0, 1.0), Some("   ".into()), Material::Tile);
    assert_eq!(room.name, format!("Room {}", room.id));
}

#[test]
fn test_unknown_id_errors() {
    let mut registry = RoomRegistry::default();
    assert_eq!(
        registry.update_material(42, Material::Steel).unwrap_err(),
        RoomError::NotFound { id: 42 }
    );
}

#[derive(Debug, Clone)]
enum Op {
    Add(f64, f64, usize),
    Remove(usize),
    Recolor(usize, usize),
    Scale(usize, f64),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (1.0f64..500.0, 1.0f64..500.0, 0usize..7).prop_map(|(w, h, m)| Op::Add(w, h, m)),
        (0usize..16).prop_map(Op::Remove),
        (0usize..16, 0usize..7).prop_map(|(i, m)| Op::Recolor(i, m)),
        (0usize..16, 0.1f64..3.0).prop_map(|(i, s)| Op::Scale(i, s)),
    ]
}

proptest! {
    #[test]
    fn prop_total_is_sum_of_room_costs(ops in prop::collection::vec(op(), 1..40)) {
        let mut registry = RoomRegistry::default();
        for op in ops {
            let ids: Vec<u64> = registry.iter().map(|r| r.id).collect();
            let pick = |i: usize| (!ids.is_empty()).then(|| ids[i % ids.len()]);
            match op {
                Op::Add(w, h, m) => {
                    registry.add(rect(0.0, 0.0, w, h), None, Material::ALL[m]);
                }
                Op::Remove(i) => {
                    if let Some(id) = pick(i) {
                        registry.remove(id).unwrap();
                    }
                }
                Op::Recolor(i, m) => {
                    if let Some(id) = pick(i) {
                        registry.update_material(id, Material::ALL[m]).unwrap();
                    }
                }
                Op::Scale(i, s) => {
                    if let Some(id) = pick(i) {
                        registry.set_scale(id, s, s).unwrap();
                    }
                }
            }
            let sum: u64 = registry.iter().map(|r| r.cost).sum();
            prop_assert_eq!(registry.total_cost(), sum);
            prop_assert_eq!(registry.shapes().len(), registry.len());
        }
    }
}
