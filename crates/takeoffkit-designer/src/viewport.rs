//! Viewport and coordinate transformation for the drawing surface.
//!
//! Handles conversion between pixel coordinates (screen space) and scene
//! coordinates (design space). Both share the same orientation: (0,0) at
//! top-left, +Y down. Manages zoom and pan with the zoom factor always
//! clamped to the configured range.

use std::fmt;

use takeoffkit_core::constants::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, VIEW_PADDING, WHEEL_ZOOM_BASE, ZOOM_MAX, ZOOM_MIN,
    ZOOM_STEP,
};

use crate::model::Point;

/// Zoom limits and step sizes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomSettings {
    pub zoom_min: f64,
    pub zoom_max: f64,
    /// Factor applied by `zoom_in` / divided by `zoom_out`.
    pub zoom_step: f64,
    /// Wheel zoom factor is `wheel_zoom_base ^ delta_y`.
    pub wheel_zoom_base: f64,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            zoom_step: ZOOM_STEP,
            wheel_zoom_base: WHEEL_ZOOM_BASE,
        }
    }
}

/// Represents the viewport transformation state (zoom and pan).
#[derive(Debug, Clone)]
pub struct ViewportController {
    zoom: f64,
    pan_x: f64,
    pan_y: f64,
    canvas_width: f64,
    canvas_height: f64,
    settings: ZoomSettings,
}

impl ViewportController {
    /// Creates a viewport at 1:1 zoom with no pan.
    pub fn new(canvas_width: f64, canvas_height: f64) -> Self {
        Self::with_settings(canvas_width, canvas_height, ZoomSettings::default())
    }

    pub fn with_settings(canvas_width: f64, canvas_height: f64, settings: ZoomSettings) -> Self {
        Self {
            zoom: 1.0_f64.clamp(settings.zoom_min, settings.zoom_max),
            pan_x: 0.0,
            pan_y: 0.0,
            canvas_width,
            canvas_height,
            settings,
        }
    }

    pub fn settings(&self) -> &ZoomSettings {
        &self.settings
    }

    /// Gets the canvas width.
    pub fn canvas_width(&self) -> f64 {
        self.canvas_width
    }

    /// Gets the canvas height.
    pub fn canvas_height(&self) -> f64 {
        self.canvas_height
    }

    /// Sets the canvas dimensions (typically called when the host resizes).
    pub fn set_canvas_size(&mut self, width: f64, height: f64) {
        self.canvas_width = width;
        self.canvas_height = height;
    }

    /// Gets the current zoom level (1.0 = 100%).
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Sets the zoom level, clamped to `[zoom_min, zoom_max]`.
    ///
    /// Non-finite values are ignored.
    pub fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_finite() {
            self.zoom = self.clamp_zoom(zoom);
        }
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.settings.zoom_min, self.settings.zoom_max)
    }

    /// Zooms in by one step, keeping the canvas centre fixed.
    pub fn zoom_in(&mut self) {
        let (cx, cy) = self.center_pixel();
        self.zoom_at_pixel(cx, cy, self.zoom * self.settings.zoom_step);
    }

    /// Zooms out by one step, keeping the canvas centre fixed.
    pub fn zoom_out(&mut self) {
        let (cx, cy) = self.center_pixel();
        self.zoom_at_pixel(cx, cy, self.zoom / self.settings.zoom_step);
    }

    /// Applies a wheel delta anchored at the pointer.
    ///
    /// # Arguments
    /// * `delta_y` - Wheel delta; positive values zoom out
    /// * `pixel_x`, `pixel_y` - Pointer position in screen space
    ///
    /// # Returns
    /// The zoom level after the update.
    pub fn wheel_zoom(&mut self, delta_y: f64, pixel_x: f64, pixel_y: f64) -> f64 {
        if !delta_y.is_finite() {
            return self.zoom;
        }
        let factor = self.settings.wheel_zoom_base.powf(delta_y);
        self.zoom_at_pixel(pixel_x, pixel_y, self.zoom * factor);
        self.zoom
    }

    /// Zooms so the scene point under `(pixel_x, pixel_y)` stays under it.
    ///
    /// Out-of-range requests, including an overflowed or underflowed wheel
    /// factor, land on the zoom limits. NaN is ignored.
    pub fn zoom_at_pixel(&mut self, pixel_x: f64, pixel_y: f64, new_zoom: f64) {
        if new_zoom.is_nan() {
            return;
        }
        let anchor = self.pixel_to_world(pixel_x, pixel_y);
        self.zoom = self.clamp_zoom(new_zoom);
        self.pan_x = pixel_x - anchor.x * self.zoom;
        self.pan_y = pixel_y - anchor.y * self.zoom;
    }

    /// Zooms to a scene point, maintaining that point's screen position.
    pub fn zoom_to_point(&mut self, world_point: &Point, new_zoom: f64) {
        let (px, py) = self.world_point_to_pixel(world_point);
        self.zoom_at_pixel(px, py, new_zoom);
    }

    fn center_pixel(&self) -> (f64, f64) {
        (self.canvas_width / 2.0, self.canvas_height / 2.0)
    }

    /// Gets the pan offset (X coordinate).
    pub fn pan_x(&self) -> f64 {
        self.pan_x
    }

    /// Gets the pan offset (Y coordinate).
    pub fn pan_y(&self) -> f64 {
        self.pan_y
    }

    /// Sets the pan offset.
    pub fn set_pan(&mut self, x: f64, y: f64) {
        self.pan_x = x;
        self.pan_y = y;
    }

    /// Pans by a delta amount in pixels.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if dx.is_finite() && dy.is_finite() {
            self.pan_x += dx;
            self.pan_y += dy;
        }
    }

    /// Converts pixel coordinates to scene coordinates.
    ///
    /// Formula:
    /// ```text
    /// world_x = (pixel_x - pan_x) / zoom
    /// world_y = (pixel_y - pan_y) / zoom
    /// ```
    pub fn pixel_to_world(&self, pixel_x: f64, pixel_y: f64) -> Point {
        Point::new(
            (pixel_x - self.pan_x) / self.zoom,
            (pixel_y - self.pan_y) / self.zoom,
        )
    }

    /// Converts scene coordinates to pixel coordinates.
    pub fn world_to_pixel(&self, world_x: f64, world_y: f64) -> (f64, f64) {
        (
            world_x * self.zoom + self.pan_x,
            world_y * self.zoom + self.pan_y,
        )
    }

    /// Converts scene coordinates to pixel coordinates (using Point).
    pub fn world_point_to_pixel(&self, point: &Point) -> (f64, f64) {
        self.world_to_pixel(point.x, point.y)
    }

    /// Scene rectangle currently visible, as (min_x, min_y, max_x, max_y).
    pub fn visible_world_bounds(&self) -> (f64, f64, f64, f64) {
        let top_left = self.pixel_to_world(0.0, 0.0);
        let bottom_right = self.pixel_to_world(self.canvas_width, self.canvas_height);
        (top_left.x, top_left.y, bottom_right.x, bottom_right.y)
    }

    /// Fits the given bounding box into the viewport with padding.
    ///
    /// # Arguments
    /// * `min_x`, `min_y` - Top-left corner of bounding box (scene coordinates)
    /// * `max_x`, `max_y` - Bottom-right corner of bounding box (scene coordinates)
    /// * `padding` - Fraction of the viewport reserved on each side (0.0 - 0.5)
    ///
    /// Centers the content and calculates an appropriate zoom level. Empty
    /// or inverted boxes leave the viewport unchanged.
    pub fn fit_to_bounds(&mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64, padding: f64) {
        if min_x >= max_x || min_y >= max_y {
            return;
        }

        let width = max_x - min_x;
        let height = max_y - min_y;

        let padding_factor = 1.0 - (padding.clamp(0.0, 0.45) * 2.0);
        let zoom_x = (self.canvas_width * padding_factor) / width;
        let zoom_y = (self.canvas_height * padding_factor) / height;
        let new_zoom = self.clamp_zoom(zoom_x.min(zoom_y));

        let center_x = (min_x + max_x) / 2.0;
        let center_y = (min_y + max_y) / 2.0;
        self.zoom = new_zoom;
        self.center_on(center_x, center_y);
    }

    /// Fits the viewport to the given content box with the default padding.
    pub fn fit_to_view(&mut self, min_x: f64, min_y: f64, max_x: f64, max_y: f64) {
        self.fit_to_bounds(min_x, min_y, max_x, max_y, VIEW_PADDING);
    }

    /// Centers the viewport on a scene coordinate.
    pub fn center_on(&mut self, world_x: f64, world_y: f64) {
        self.pan_x = self.canvas_width / 2.0 - world_x * self.zoom;
        self.pan_y = self.canvas_height / 2.0 - world_y * self.zoom;
    }

    /// Resets viewport to 1:1 zoom with no pan.
    pub fn reset(&mut self) {
        self.zoom = self.clamp_zoom(1.0);
        self.pan_x = 0.0;
        self.pan_y = 0.0;
    }
}

impl fmt::Display for ViewportController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Zoom: {:.2}x | Pan: ({:.1}, {:.1})",
            self.zoom, self.pan_x, self.pan_y
        )
    }
}

impl Default for ViewportController {
    fn default() -> Self {
        Self::new(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}
