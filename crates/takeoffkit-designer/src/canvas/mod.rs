//! The owning controller of a drawing surface.
//!
//! `TakeoffCanvas` holds every piece of surface state: the room registry,
//! selection, drawing state machine, viewport, grid and background layer,
//! plus the attached render surface. Nothing lives in module-level state;
//! dropping the canvas disposes it.

mod operations;
mod types;

pub use types::{CanvasOptions, MaterialSummary, TakeoffSummary};

use takeoffkit_core::constants::{
    TEMPLATE_ROOM_HEIGHT, TEMPLATE_ROOM_WIDTH, TEMPLATE_ROOM_X, TEMPLATE_ROOM_Y,
};
use takeoffkit_core::{
    AssetError, Error, Material, MaterialRateTable, Result, RoomError, SubscriptionId,
    SurfaceError,
};

use crate::cost::CostEngine;
use crate::drawing::{DrawingState, DrawingStateMachine};
use crate::grid::GridRenderer;
use crate::model::{DesignRectangle, Point, Shape, ShapeType};
use crate::overlay::{AssetConverter, BackgroundAsset, BackgroundOverlayManager};
use crate::registry::RoomRegistry;
use crate::room::Room;
use crate::selection_manager::SelectionManager;
use crate::shape_store::ShapeDraft;
use crate::surface::{attach_with_retry, RenderSurface};
use crate::viewport::ViewportController;

pub struct TakeoffCanvas {
    registry: RoomRegistry,
    selection: SelectionManager,
    drawing: DrawingStateMachine,
    viewport: ViewportController,
    background: BackgroundOverlayManager,
    grid: GridRenderer,
    converter: Option<Box<dyn AssetConverter>>,
    surface: Option<Box<dyn RenderSurface>>,
    selected_material: Material,
    options: CanvasOptions,
    disposed: bool,
}

impl TakeoffCanvas {
    /// Creates a canvas with no surface attached.
    pub fn new(options: CanvasOptions) -> Self {
        let rates = MaterialRateTable::with_overrides(&options.material_rates);
        let cost_engine =
            CostEngine::with_unit_scales(rates, options.linear_unit_scale, options.area_unit_scale);
        Self {
            registry: RoomRegistry::new(cost_engine),
            selection: SelectionManager::new(),
            drawing: DrawingStateMachine::default(),
            viewport: ViewportController::with_settings(options.width, options.height, options.zoom),
            background: BackgroundOverlayManager::new(
                options.width,
                options.height,
                options.background_opacity,
            ),
            grid: GridRenderer::new(options.grid_spacing, options.show_grid),
            converter: None,
            surface: None,
            selected_material: Material::default(),
            options,
            disposed: false,
        }
    }

    /// Creates a canvas and attaches it to `surface`.
    ///
    /// Attachment is retried on the fixed delay from `options.retry`; once
    /// the attempt budget is spent the surface is released and
    /// `InitializationFailed` is returned.
    pub async fn initialize(
        options: CanvasOptions,
        mut surface: Box<dyn RenderSurface>,
    ) -> std::result::Result<Self, SurfaceError> {
        let attempts =
            match attach_with_retry(surface.as_mut(), options.width, options.height, options.retry)
                .await
            {
                Ok(attempts) => attempts,
                Err(e) => {
                    tracing::error!("Drawing surface initialization failed: {}", e);
                    surface.release();
                    return Err(e);
                }
            };
        tracing::info!(
            "Takeoff canvas ready ({}x{}, {} attempt(s))",
            options.width,
            options.height,
            attempts
        );
        let mut canvas = Self::new(options);
        canvas.surface = Some(surface);
        Ok(canvas)
    }

    pub fn options(&self) -> &CanvasOptions {
        &self.options
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn ensure_live(&self) -> Result<()> {
        if self.disposed {
            return Err(SurfaceError::Disposed.into());
        }
        Ok(())
    }

    pub fn set_asset_converter(&mut self, converter: Box<dyn AssetConverter>) {
        self.converter = Some(converter);
    }

    /// Material applied to newly committed rooms.
    pub fn set_selected_material(&mut self, material: Material) {
        tracing::debug!("Selected material: {}", material);
        self.selected_material = material;
    }

    pub fn selected_material(&self) -> Material {
        self.selected_material
    }

    /// Active drawing tool. Switching drops an unfinished shape.
    pub fn set_current_shape(&mut self, shape_type: ShapeType) {
        self.drawing.set_tool(shape_type);
    }

    pub fn current_shape(&self) -> ShapeType {
        self.drawing.tool()
    }

    pub fn drawing_state(&self) -> &DrawingState {
        self.drawing.state()
    }

    /// Insert a fixed-size template rectangle as a new room.
    pub fn add_room(&mut self, name: Option<&str>) -> Result<Room> {
        self.ensure_live()?;
        let draft = ShapeDraft::new(
            Shape::Rectangle(DesignRectangle::new(TEMPLATE_ROOM_WIDTH, TEMPLATE_ROOM_HEIGHT)),
            Point::new(TEMPLATE_ROOM_X, TEMPLATE_ROOM_Y),
        );
        Ok(self
            .registry
            .add(draft, name.map(str::to_string), self.selected_material))
    }

    /// Delete a room and its shape.
    pub fn delete_room(&mut self, id: u64) -> Result<Room> {
        self.ensure_live()?;
        let room = self.registry.remove(id)?;
        self.selection.prune(self.registry.shapes());
        Ok(room)
    }

    pub fn update_room_material(&mut self, id: u64, material: Material) -> Result<Room> {
        self.ensure_live()?;
        Ok(self.registry.update_material(id, material)?.clone())
    }

    pub fn update_room_name(&mut self, id: u64, name: &str) -> Result<Room> {
        self.ensure_live()?;
        Ok(self.registry.update_name(id, name)?.clone())
    }

    /// Move a room by a scene-space delta.
    pub fn move_room(&mut self, id: u64, dx: f64, dy: f64) -> Result<Room> {
        self.ensure_live()?;
        Ok(self.registry.translate(id, dx, dy)?.clone())
    }

    /// Set a room's absolute scale factors.
    pub fn scale_room(&mut self, id: u64, scale_x: f64, scale_y: f64) -> Result<Room> {
        self.ensure_live()?;
        Ok(self.registry.set_scale(id, scale_x, scale_y)?.clone())
    }

    pub fn select_room(&mut self, id: u64) -> Result<()> {
        self.ensure_live()?;
        let shape_id = self
            .registry
            .get(id)
            .map(|room| room.shape_id)
            .ok_or(RoomError::NotFound { id })?;
        self.selection.select_id(self.registry.shapes_mut(), shape_id);
        Ok(())
    }

    pub fn deselect_all(&mut self) {
        self.selection.deselect_all(self.registry.shapes_mut());
    }

    /// Room behind the current selection.
    pub fn get_selected_room(&self) -> Option<&Room> {
        self.registry
            .find_by_active_selection(self.selection.selected_id())
    }

    pub fn get_total_cost(&self) -> u64 {
        self.registry.total_cost()
    }

    pub fn room(&self, id: u64) -> Option<&Room> {
        self.registry.get(id)
    }

    pub fn rooms(&self) -> Vec<Room> {
        self.registry.list_all()
    }

    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    /// Subscribe to room snapshots; one call per registry mutation.
    pub fn on_rooms_change<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: Fn(&[Room]) + 'static,
    {
        self.registry.subscribe(callback)
    }

    pub fn off_rooms_change(&mut self, id: SubscriptionId) -> bool {
        self.registry.unsubscribe(id)
    }

    /// Remove every room and the background, then recreate the grid.
    pub fn clear_canvas(&mut self) -> Result<()> {
        self.ensure_live()?;
        self.drawing.reset();
        self.selection.deselect_all(self.registry.shapes_mut());
        self.registry.clear();
        self.background.remove();
        self.grid = GridRenderer::new(self.options.grid_spacing, self.options.show_grid);
        tracing::info!("Canvas cleared");
        Ok(())
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn grid(&self) -> &GridRenderer {
        &self.grid
    }

    /// Flip the grid preference. Returns whether the grid is now drawn.
    pub fn toggle_grid(&mut self) -> bool {
        self.grid.toggle();
        self.grid.is_shown()
    }

    pub fn background(&self) -> &BackgroundOverlayManager {
        &self.background
    }

    /// Load a calibration background, replacing the current one.
    ///
    /// Non-raster assets go through the configured converter. When that
    /// fails a placeholder layer is inserted and the error is still
    /// returned. The grid is hidden whenever a layer ends up present.
    pub async fn load_background_image(&mut self, asset: BackgroundAsset) -> Result<()> {
        self.ensure_live()?;
        let name = asset.name.clone();
        let result: std::result::Result<(), AssetError> = self
            .background
            .load(asset, self.converter.as_deref())
            .await
            .map(|_| ());
        self.grid.set_suppressed(self.background.has_layer());
        if let Err(e) = &result {
            tracing::warn!("Background '{}' failed to load: {}", name, e);
        }
        result.map_err(Error::from)
    }

    /// Remove the background and restore the grid preference.
    pub fn remove_background_image(&mut self) -> bool {
        let removed = self.background.remove().is_some();
        self.grid.set_suppressed(false);
        removed
    }

    /// Returns the applied opacity, or `None` without a background.
    pub fn set_background_opacity(&mut self, opacity: f64) -> Option<f64> {
        self.background.set_opacity(opacity)
    }

    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.viewport.set_canvas_size(width, height);
        self.background.set_canvas_size(width, height);
    }

    /// Tear down: remove all rooms, shapes, the background and the preview,
    /// then release the surface. Safe to call more than once.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        self.drawing.reset();
        self.selection = SelectionManager::new();
        self.registry.dispose();
        self.background.remove();
        self.converter = None;
        if let Some(mut surface) = self.surface.take() {
            surface.release();
        }
        self.disposed = true;
        tracing::info!("Takeoff canvas disposed");
    }
}

impl Default for TakeoffCanvas {
    fn default() -> Self {
        Self::new(CanvasOptions::default())
    }
}

impl Drop for TakeoffCanvas {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl std::fmt::Debug for TakeoffCanvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TakeoffCanvas")
            .field("rooms", &self.registry.len())
            .field("state", &self.drawing.state().name())
            .field("viewport", &self.viewport.to_string())
            .field("background", &self.background.has_layer())
            .field("disposed", &self.disposed)
            .finish()
    }
}

impl From<&TakeoffCanvas> for TakeoffSummary {
    fn from(canvas: &TakeoffCanvas) -> Self {
        canvas.takeoff_summary()
    }
}
