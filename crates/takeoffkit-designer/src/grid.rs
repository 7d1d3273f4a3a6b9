//! Background grid.
//!
//! Passive visual aid. The grid has a user preference (`visible`) and a
//! suppression flag set while a background layer is present; it is shown
//! only when visible and not suppressed.

use serde::{Deserialize, Serialize};
use takeoffkit_core::constants::DEFAULT_GRID_SPACING;

use crate::model::Point;
use crate::viewport::ViewportController;

const MAX_LINES_PER_AXIS: usize = 400;

/// One grid line in scene coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridLine {
    pub start: Point,
    pub end: Point,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridRenderer {
    spacing: f64,
    visible: bool,
    suppressed: bool,
}

impl GridRenderer {
    pub fn new(spacing: f64, visible: bool) -> Self {
        let spacing = if spacing.is_finite() && spacing > 0.0 {
            spacing
        } else {
            DEFAULT_GRID_SPACING
        };
        Self {
            spacing,
            visible,
            suppressed: false,
        }
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Flip the user preference. Returns the new preference.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }

    /// Hide (or restore) the grid for a background layer.
    pub fn set_suppressed(&mut self, suppressed: bool) {
        self.suppressed = suppressed;
    }

    /// Whether grid lines are currently drawn.
    pub fn is_shown(&self) -> bool {
        self.visible && !self.suppressed
    }

    /// Grid lines covering the visible part of the scene.
    ///
    /// Spacing grows by powers of ten when zoomed far out so the line count
    /// per axis stays bounded. Returns nothing while the grid is hidden.
    pub fn lines(&self, viewport: &ViewportController) -> Vec<GridLine> {
        if !self.is_shown() {
            return Vec::new();
        }

        let (left, top, right, bottom) = viewport.visible_world_bounds();
        let mut step = self.spacing;
        while (right - left) / step > MAX_LINES_PER_AXIS as f64
            || (bottom - top) / step > MAX_LINES_PER_AXIS as f64
        {
            step *= 10.0;
        }

        let mut lines = Vec::new();
        let mut x = (left / step).floor() * step;
        while x <= right {
            lines.push(GridLine {
                start: Point::new(x, top),
                end: Point::new(x, bottom),
            });
            x += step;
        }
        let mut y = (top / step).floor() * step;
        while y <= bottom {
            lines.push(GridLine {
                start: Point::new(left, y),
                end: Point::new(right, y),
            });
            y += step;
        }
        lines
    }
}

impl Default for GridRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SPACING, true)
    }
}
