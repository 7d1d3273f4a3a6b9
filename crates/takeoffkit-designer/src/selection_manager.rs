use crate::shape_store::ShapeStore;

/// Manages shape selection state on the drawing surface.
///
/// `SelectionManager` is responsible for:
/// - Tracking which visual shape is the active selection
/// - Selecting by id once the drawing layer has hit-tested a press
/// - Keeping the `selected` flag on shapes in sync with the active id
///
/// # Selection Model
///
/// The surface has a single active selection. Selecting a shape clears the
/// flag on every other shape; clicking empty space clears the selection.
/// The active id is a visual shape id; the owning Room is found through
/// `RoomRegistry::find_by_active_selection`.
#[derive(Debug, Clone, Default)]
pub struct SelectionManager {
    /// The ID of the selected shape, if any
    selected_id: Option<u64>,
}

impl SelectionManager {
    /// Creates a new `SelectionManager` with no selection.
    ///
    /// # Examples
    ///
    /// ```
    /// use takeoffkit_designer::selection_manager::SelectionManager;
    ///
    /// let manager = SelectionManager::new();
    /// assert_eq!(manager.selected_id(), None);
    /// ```
    pub fn new() -> Self {
        Self { selected_id: None }
    }

    /// Returns the ID of the selected shape.
    pub fn selected_id(&self) -> Option<u64> {
        self.selected_id
    }

    /// Deselects all shapes and clears the active selection.
    pub fn deselect_all(&mut self, store: &mut ShapeStore) {
        for obj in store.iter_mut() {
            obj.selected = false;
        }
        self.selected_id = None;
    }

    /// Selects a shape by ID, replacing the current selection.
    ///
    /// Unknown or non-selectable ids leave the selection empty.
    pub fn select_id(&mut self, store: &mut ShapeStore, id: u64) {
        self.deselect_all(store);
        if let Some(obj) = store.get_mut(id) {
            if obj.selectable {
                obj.selected = true;
                self.selected_id = Some(id);
            }
        }
    }

    /// Drops the active id if its shape no longer exists.
    pub fn prune(&mut self, store: &ShapeStore) {
        if let Some(id) = self.selected_id {
            if !store.contains(id) {
                self.selected_id = None;
            }
        }
    }
}
