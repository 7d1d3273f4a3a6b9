//! Authoritative store of committed Rooms.
//!
//! `RoomRegistry` keeps the two halves of every element under one id: the
//! [`Room`] domain record and the [`VisualShape`] it owns. Inserting or
//! removing through the registry always touches both, so a shape without a
//! Room (or the reverse) cannot exist.
//!
//! Every mutating call emits exactly one snapshot of all Rooms to the
//! registered listeners. Selection flag changes are not Room mutations and
//! stay silent.

use std::collections::BTreeMap;

use takeoffkit_core::{Material, Notifier, RoomError, SubscriptionId};

use crate::cost::CostEngine;
use crate::room::Room;
use crate::shape_store::{ShapeDraft, ShapeStore, VisualShape};

#[derive(Debug)]
pub struct RoomRegistry {
    rooms: BTreeMap<u64, Room>,
    shapes: ShapeStore,
    cost_engine: CostEngine,
    listeners: Notifier<[Room]>,
    next_id: u64,
}

impl RoomRegistry {
    pub fn new(cost_engine: CostEngine) -> Self {
        Self {
            rooms: BTreeMap::new(),
            shapes: ShapeStore::new(),
            cost_engine,
            listeners: Notifier::new(),
            next_id: 1,
        }
    }

    pub fn cost_engine(&self) -> &CostEngine {
        &self.cost_engine
    }

    /// Register a listener for room snapshots.
    pub fn subscribe<F>(&mut self, listener: F) -> SubscriptionId
    where
        F: Fn(&[Room]) + 'static,
    {
        self.listeners.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Commit a drawn shape as a new Room.
    pub fn add(&mut self, draft: ShapeDraft, name: Option<String>, material: Material) -> Room {
        let id = self.next_id;
        self.next_id += 1;

        let color = self.cost_engine.rates().get(material).color.clone();
        let shape = VisualShape::new(id, draft, color);
        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| format!("Room {}", id));

        let mut room = Room::from_shape(name, material, &shape);
        self.price(&mut room);

        tracing::info!(
            "Room {} '{}' added: {} {} cost {}",
            id,
            room.name,
            room.material,
            room.shape_type,
            room.cost
        );

        self.shapes.insert(shape);
        self.rooms.insert(id, room.clone());
        self.emit();
        room
    }

    /// Delete a Room and dispose its visual shape.
    pub fn remove(&mut self, id: u64) -> Result<Room, RoomError> {
        let room = self.rooms.remove(&id).ok_or(RoomError::NotFound { id })?;
        self.shapes.remove(room.shape_id);
        tracing::info!("Room {} '{}' removed (cost {})", id, room.name, room.cost);
        self.emit();
        Ok(room)
    }

    /// Reassign material: recolors the shape and reprices, geometry untouched.
    pub fn update_material(&mut self, id: u64, material: Material) -> Result<&Room, RoomError> {
        let color = self.cost_engine.rates().get(material).color.clone();
        let room = self.rooms.get_mut(&id).ok_or(RoomError::NotFound { id })?;
        room.material = material;
        Self::price_with(&self.cost_engine, room);
        if let Some(shape) = self.shapes.get_mut(room.shape_id) {
            shape.color = color;
        }
        tracing::debug!("Room {} material -> {} (cost {})", id, material, room.cost);
        self.emit();
        self.get(id).ok_or(RoomError::NotFound { id })
    }

    pub fn update_name(&mut self, id: u64, name: impl Into<String>) -> Result<&Room, RoomError> {
        let room = self.rooms.get_mut(&id).ok_or(RoomError::NotFound { id })?;
        room.name = name.into();
        self.emit();
        self.get(id).ok_or(RoomError::NotFound { id })
    }

    /// Move a Room's shape by a scene-space delta.
    pub fn translate(&mut self, id: u64, dx: f64, dy: f64) -> Result<&Room, RoomError> {
        self.modify_geometry(id, |shape| shape.draft.transform.translate(dx, dy))
    }

    /// Set absolute scale factors on a Room's shape.
    pub fn set_scale(&mut self, id: u64, scale_x: f64, scale_y: f64) -> Result<&Room, RoomError> {
        if !scale_x.is_finite() || !scale_y.is_finite() {
            tracing::warn!("Ignoring non-finite scale for room {}", id);
            return self.get(id).ok_or(RoomError::NotFound { id });
        }
        self.modify_geometry(id, |shape| {
            shape.draft.transform.scale_x = scale_x;
            shape.draft.transform.scale_y = scale_y;
        })
    }

    fn modify_geometry<F>(&mut self, id: u64, edit: F) -> Result<&Room, RoomError>
    where
        F: FnOnce(&mut VisualShape),
    {
        let room = self.rooms.get_mut(&id).ok_or(RoomError::NotFound { id })?;
        let shape = self
            .shapes
            .get_mut(room.shape_id)
            .ok_or(RoomError::NotFound { id })?;
        edit(shape);
        room.sync_geometry(shape);
        Self::price_with(&self.cost_engine, room);
        tracing::debug!("Room {} geometry changed (cost {})", id, room.cost);
        self.emit();
        self.get(id).ok_or(RoomError::NotFound { id })
    }

    fn price(&self, room: &mut Room) {
        Self::price_with(&self.cost_engine, room);
    }

    fn price_with(engine: &CostEngine, room: &mut Room) {
        room.real_quantity = engine.real_units(room.quantity);
        room.cost = engine.cost(room.quantity, room.material);
    }

    pub fn get(&self, id: u64) -> Option<&Room> {
        self.rooms.get(&id)
    }

    /// All Rooms in creation order.
    pub fn list_all(&self) -> Vec<Room> {
        self.rooms.values().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }

    pub fn total_cost(&self) -> u64 {
        CostEngine::total(self.rooms.values().map(|r| r.cost))
    }

    /// Room owning the given visual shape.
    pub fn find_by_shape(&self, shape_id: u64) -> Option<&Room> {
        self.rooms.values().find(|r| r.shape_id == shape_id)
    }

    /// Room behind the currently selected visual shape, if any.
    pub fn find_by_active_selection(&self, selected_shape: Option<u64>) -> Option<&Room> {
        selected_shape.and_then(|id| self.find_by_shape(id))
    }

    pub fn shapes(&self) -> &ShapeStore {
        &self.shapes
    }

    pub(crate) fn shapes_mut(&mut self) -> &mut ShapeStore {
        &mut self.shapes
    }

    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Remove every Room and shape, then notify once.
    pub fn clear(&mut self) {
        let removed = self.rooms.len();
        self.rooms.clear();
        self.shapes.clear();
        tracing::info!("Registry cleared ({} rooms)", removed);
        self.emit();
    }

    /// Teardown: drop all Rooms, shapes and listeners without notifying.
    pub(crate) fn dispose(&mut self) {
        self.rooms.clear();
        self.shapes.clear();
        self.listeners.clear();
    }

    fn emit(&self) {
        let snapshot = self.list_all();
        self.listeners.emit(&snapshot);
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new(CostEngine::default())
    }
}
