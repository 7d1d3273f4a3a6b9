//! Shared numeric defaults.

/// Default drawing surface width in pixels.
pub const DEFAULT_CANVAS_WIDTH: f64 = 1200.0;
/// Default drawing surface height in pixels.
pub const DEFAULT_CANVAS_HEIGHT: f64 = 800.0;

/// Pixels per real linear unit (lines are priced per unit of length).
pub const LINEAR_UNIT_SCALE: f64 = 100.0;
/// Square pixels per real area unit (LINEAR_UNIT_SCALE squared).
pub const AREA_UNIT_SCALE: f64 = 10_000.0;

/// Smallest allowed zoom factor.
pub const ZOOM_MIN: f64 = 0.1;
/// Largest allowed zoom factor.
pub const ZOOM_MAX: f64 = 20.0;
/// Multiplier applied by a single zoom-in / zoom-out step.
pub const ZOOM_STEP: f64 = 1.2;
/// Wheel zoom factor is `WHEEL_ZOOM_BASE ^ delta_y`.
pub const WHEEL_ZOOM_BASE: f64 = 0.999;
/// Fraction of the viewport reserved on each edge when framing content.
pub const VIEW_PADDING: f64 = 0.05;

/// Grid cell size in scene pixels.
pub const DEFAULT_GRID_SPACING: f64 = 20.0;

/// Opacity applied to a freshly loaded background image.
pub const DEFAULT_BACKGROUND_OPACITY: f64 = 0.5;

/// Delay between drawing surface initialization attempts.
pub const INIT_RETRY_DELAY_MS: u64 = 100;
/// Upper bound on drawing surface initialization attempts.
pub const INIT_MAX_ATTEMPTS: u32 = 20;

/// Hit-test tolerance for selecting shapes, in scene pixels.
pub const HIT_TOLERANCE: f64 = 3.0;

/// Position and size of the rectangle inserted by `add_room`.
pub const TEMPLATE_ROOM_X: f64 = 100.0;
pub const TEMPLATE_ROOM_Y: f64 = 100.0;
pub const TEMPLATE_ROOM_WIDTH: f64 = 200.0;
pub const TEMPLATE_ROOM_HEIGHT: f64 = 150.0;
