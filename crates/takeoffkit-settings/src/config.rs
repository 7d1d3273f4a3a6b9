//! Configuration for TakeoffKit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML files; the default file lives in the platform config directory.
//!
//! Configuration is organized into logical sections:
//! - Canvas (surface size, grid)
//! - Viewport (zoom limits and steps)
//! - Takeoff (unit scales, currency, material rate overrides)
//! - Background (default overlay opacity)
//! - Surface (initialization retry budget)

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use takeoffkit_core::constants::{
    AREA_UNIT_SCALE, DEFAULT_BACKGROUND_OPACITY, DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH,
    DEFAULT_GRID_SPACING, INIT_MAX_ATTEMPTS, INIT_RETRY_DELAY_MS, LINEAR_UNIT_SCALE,
    WHEEL_ZOOM_BASE, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP,
};
use takeoffkit_core::Material;

use crate::error::{SettingsError, SettingsResult};

/// Drawing surface settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    /// Surface width in pixels
    pub width: f64,
    /// Surface height in pixels
    pub height: f64,
    /// Grid cell size in scene pixels
    pub grid_spacing: f64,
    /// Whether the grid starts visible
    pub show_grid: bool,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_CANVAS_WIDTH,
            height: DEFAULT_CANVAS_HEIGHT,
            grid_spacing: DEFAULT_GRID_SPACING,
            show_grid: true,
        }
    }
}

/// Zoom settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    pub zoom_min: f64,
    pub zoom_max: f64,
    /// Factor for one zoom-in/zoom-out step
    pub zoom_step: f64,
    /// Wheel zoom factor is `wheel_zoom_base ^ delta_y`
    pub wheel_zoom_base: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            zoom_step: ZOOM_STEP,
            wheel_zoom_base: WHEEL_ZOOM_BASE,
        }
    }
}

/// Quantity and pricing settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TakeoffSettings {
    /// Pixels per real unit of length
    pub linear_unit_scale: f64,
    /// Square pixels per real unit of area
    pub area_unit_scale: f64,
    /// Symbol printed in front of costs
    pub currency_symbol: String,
    /// Cost-per-unit overrides keyed by material name (e.g. "timber")
    pub material_rates: BTreeMap<String, f64>,
}

impl Default for TakeoffSettings {
    fn default() -> Self {
        Self {
            linear_unit_scale: LINEAR_UNIT_SCALE,
            area_unit_scale: AREA_UNIT_SCALE,
            currency_symbol: "$".to_string(),
            material_rates: BTreeMap::new(),
        }
    }
}

/// Background overlay settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundSettings {
    /// Opacity of a freshly loaded background (0.0 - 1.0)
    pub default_opacity: f64,
}

impl Default for BackgroundSettings {
    fn default() -> Self {
        Self {
            default_opacity: DEFAULT_BACKGROUND_OPACITY,
        }
    }
}

/// Surface initialization settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSettings {
    /// Delay between attach attempts in milliseconds
    pub init_retry_delay_ms: u64,
    /// Attempts before giving up
    pub init_max_attempts: u32,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            init_retry_delay_ms: INIT_RETRY_DELAY_MS,
            init_max_attempts: INIT_MAX_ATTEMPTS,
        }
    }
}

/// Complete application configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub canvas: CanvasSettings,
    pub viewport: ViewportSettings,
    pub takeoff: TakeoffSettings,
    pub background: BackgroundSettings,
    pub surface: SurfaceSettings,
}

#[derive(Clone, Copy)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(SettingsError::UnsupportedFormat(
            other.unwrap_or("<none>").to_string(),
        )),
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file: `<config dir>/takeoffkit/config.toml`
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("takeoffkit").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load `path` if it exists, otherwise defaults.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if path.exists() {
            Self::load_from_file(path)
        } else {
            tracing::debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;
        let format = format_of(path)?;

        let content = match format {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let positive = |key: &str, v: f64| {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(SettingsError::invalid(key, format!("must be > 0, got {}", v)))
            }
        };

        // Canvas
        positive("canvas.width", self.canvas.width)?;
        positive("canvas.height", self.canvas.height)?;
        positive("canvas.grid_spacing", self.canvas.grid_spacing)?;

        // Viewport
        positive("viewport.zoom_min", self.viewport.zoom_min)?;
        positive("viewport.zoom_max", self.viewport.zoom_max)?;
        if self.viewport.zoom_min >= self.viewport.zoom_max {
            return Err(SettingsError::invalid(
                "viewport.zoom_min",
                "must be < viewport.zoom_max",
            ));
        }
        if !(self.viewport.zoom_step.is_finite() && self.viewport.zoom_step > 1.0) {
            return Err(SettingsError::invalid("viewport.zoom_step", "must be > 1"));
        }
        if !(self.viewport.wheel_zoom_base > 0.0 && self.viewport.wheel_zoom_base < 1.0) {
            return Err(SettingsError::invalid(
                "viewport.wheel_zoom_base",
                "must be in (0, 1)",
            ));
        }

        // Takeoff
        positive("takeoff.linear_unit_scale", self.takeoff.linear_unit_scale)?;
        positive("takeoff.area_unit_scale", self.takeoff.area_unit_scale)?;
        for (key, &rate) in &self.takeoff.material_rates {
            if Material::from_key(key).is_none() {
                return Err(SettingsError::invalid(
                    "takeoff.material_rates",
                    format!("unknown material '{}'", key),
                ));
            }
            if !rate.is_finite() || rate < 0.0 {
                return Err(SettingsError::invalid(
                    "takeoff.material_rates",
                    format!("rate for '{}' must be >= 0", key),
                ));
            }
        }

        // Background
        if !(0.0..=1.0).contains(&self.background.default_opacity) {
            return Err(SettingsError::invalid(
                "background.default_opacity",
                "must be within [0, 1]",
            ));
        }

        // Surface
        if self.surface.init_max_attempts == 0 {
            return Err(SettingsError::invalid(
                "surface.init_max_attempts",
                "must be > 0",
            ));
        }

        Ok(())
    }

    /// Material rate overrides keyed by material. Unknown names are skipped.
    pub fn rate_overrides(&self) -> HashMap<Material, f64> {
        self.takeoff
            .material_rates
            .iter()
            .filter_map(|(key, &rate)| Material::from_key(key).map(|m| (m, rate)))
            .collect()
    }
}
