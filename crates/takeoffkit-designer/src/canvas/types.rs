//! Canvas type definitions: CanvasOptions, MaterialSummary, TakeoffSummary.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use takeoffkit_core::constants::{
    AREA_UNIT_SCALE, DEFAULT_BACKGROUND_OPACITY, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH,
    DEFAULT_GRID_SPACING, HIT_TOLERANCE, LINEAR_UNIT_SCALE,
};
use takeoffkit_core::Material;

use crate::surface::RetryPolicy;
use crate::viewport::ZoomSettings;

/// Construction parameters for a [`super::TakeoffCanvas`].
#[derive(Debug, Clone)]
pub struct CanvasOptions {
    pub width: f64,
    pub height: f64,
    pub grid_spacing: f64,
    pub show_grid: bool,
    pub zoom: ZoomSettings,
    pub linear_unit_scale: f64,
    pub area_unit_scale: f64,
    /// Cost-per-unit overrides on top of the standard rate card.
    pub material_rates: HashMap<Material, f64>,
    pub background_opacity: f64,
    pub retry: RetryPolicy,
    /// Hit-test tolerance in screen pixels.
    pub hit_tolerance: f64,
}

impl Default for CanvasOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            grid_spacing: DEFAULT_GRID_SPACING,
            show_grid: true,
            zoom: ZoomSettings::default(),
            linear_unit_scale: LINEAR_UNIT_SCALE,
            area_unit_scale: AREA_UNIT_SCALE,
            material_rates: HashMap::new(),
            background_opacity: DEFAULT_BACKGROUND_OPACITY,
            retry: RetryPolicy::default(),
            hit_tolerance: HIT_TOLERANCE,
        }
    }
}

/// Takeoff totals for one material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialSummary {
    pub material: Material,
    pub name: String,
    pub rooms: usize,
    /// Real-unit area (m² at the default scale).
    pub area: f64,
    /// Real-unit length (m at the default scale).
    pub length: f64,
    pub cost: u64,
}

/// Takeoff totals across the whole drawing.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TakeoffSummary {
    /// Materials in rate-card order; materials with no rooms are omitted.
    pub materials: Vec<MaterialSummary>,
    pub room_count: usize,
    pub total_cost: u64,
}
