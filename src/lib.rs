//! # TakeoffKit
//!
//! Floor-plan drawing and quantity takeoff for construction cost estimation:
//! - Rectangle, circle, line, polygon and freehand drawing tools
//! - Each drawn shape is a Room priced by area or length against a material rate card
//! - Zoom/pan viewport, calibration background image, grid
//! - Scripted session replay against a headless canvas
//!
//! ## Architecture
//!
//! TakeoffKit is organized as a workspace with multiple crates:
//!
//! 1. **takeoffkit-core** - Errors, constants, material rate table, change notifier
//! 2. **takeoffkit-designer** - Shape model, geometry, costing, drawing state machine, canvas
//! 3. **takeoffkit-settings** - JSON/TOML configuration
//! 4. **takeoffkit** - Logging setup, settings bridge and the replay binary

pub mod cli;
pub mod session;

use std::time::Duration;

pub use takeoffkit_core::{Error, Material, MaterialRateTable, Result};
pub use takeoffkit_designer::{
    BackgroundAsset, CanvasOptions, MaterialSummary, OffscreenSurface, PointerEvent, RetryPolicy,
    Room, ShapeType, TakeoffCanvas, TakeoffSummary, ZoomSettings,
};
pub use takeoffkit_settings::{Config, SettingsError};

pub use cli::Cli;
pub use session::{ReplayReport, Session, SessionStep};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Console output on stderr so stdout stays clean for reports
/// - RUST_LOG environment variable support, INFO by default
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(tracing::Level::INFO.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Build canvas options from a loaded configuration.
pub fn canvas_options(config: &Config) -> CanvasOptions {
    CanvasOptions {
        width: config.canvas.width,
        height: config.canvas.height,
        grid_spacing: config.canvas.grid_spacing,
        show_grid: config.canvas.show_grid,
        zoom: ZoomSettings {
            zoom_min: config.viewport.zoom_min,
            zoom_max: config.viewport.zoom_max,
            zoom_step: config.viewport.zoom_step,
            wheel_zoom_base: config.viewport.wheel_zoom_base,
        },
        linear_unit_scale: config.takeoff.linear_unit_scale,
        area_unit_scale: config.takeoff.area_unit_scale,
        material_rates: config.rate_overrides(),
        background_opacity: config.background.default_opacity,
        retry: RetryPolicy {
            delay: Duration::from_millis(config.surface.init_retry_delay_ms),
            max_attempts: config.surface.init_max_attempts,
        },
        ..CanvasOptions::default()
    }
}

/// Render a takeoff summary as a plain-text table.
pub fn format_summary(summary: &TakeoffSummary, currency: &str) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{:<10} {:>5} {:>12} {:>10} {:>12}\n",
        "Material", "Rooms", "Area (m²)", "Length (m)", "Cost"
    ));
    for m in &summary.materials {
        out.push_str(&format!(
            "{:<10} {:>5} {:>12.2} {:>10.2} {:>12}\n",
            m.name,
            m.rooms,
            m.area,
            m.length,
            format!("{}{}", currency, m.cost)
        ));
    }
    out.push_str(&format!(
        "{:<10} {:>5} {:>12} {:>10} {:>12}\n",
        "Total",
        summary.room_count,
        "",
        "",
        format!("{}{}", currency, summary.total_cost)
    ));
    out
}
