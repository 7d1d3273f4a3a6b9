//! Rendering surface attachment.
//!
//! The controller draws through a [`RenderSurface`]. Attaching can fail while
//! the host is still laying out, so initialization retries on a fixed delay
//! with an explicit attempt budget.

use std::time::Duration;

use lyon::path::Path;
use takeoffkit_core::constants::{INIT_MAX_ATTEMPTS, INIT_RETRY_DELAY_MS};
use takeoffkit_core::SurfaceError;

use crate::grid::GridLine;

/// One shape as handed to the surface.
#[derive(Debug, Clone)]
pub struct FrameShape {
    pub id: u64,
    /// Outline in scene coordinates.
    pub path: Path,
    pub color: String,
    pub selected: bool,
}

/// Everything the surface needs to paint one frame, bottom to top.
#[derive(Debug, Clone, Default)]
pub struct Frame {
    pub zoom: f64,
    pub pan: (f64, f64),
    /// Opacity of the background layer, when one exists.
    pub background_opacity: Option<f64>,
    pub grid: Vec<GridLine>,
    pub shapes: Vec<FrameShape>,
    pub preview: Option<Path>,
}

/// A target the controller can draw on.
pub trait RenderSurface {
    /// Bind the surface at the given size.
    fn attach(&mut self, width: f64, height: f64) -> Result<(), SurfaceError>;

    fn is_attached(&self) -> bool;

    /// Paint a frame. Called only while attached.
    fn present(&mut self, frame: &Frame);

    /// Release all surface resources.
    fn release(&mut self);
}

/// Headless surface that keeps the last presented frame.
#[derive(Debug, Default)]
pub struct OffscreenSurface {
    size: Option<(f64, f64)>,
    frames: u64,
    last_frame: Option<Frame>,
}

impl OffscreenSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn size(&self) -> Option<(f64, f64)> {
        self.size
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }

    pub fn last_frame(&self) -> Option<&Frame> {
        self.last_frame.as_ref()
    }
}

impl RenderSurface for OffscreenSurface {
    fn attach(&mut self, width: f64, height: f64) -> Result<(), SurfaceError> {
        if !(width > 0.0 && height > 0.0) {
            return Err(SurfaceError::Unavailable {
                reason: format!("invalid surface size {}x{}", width, height),
            });
        }
        self.size = Some((width, height));
        Ok(())
    }

    fn is_attached(&self) -> bool {
        self.size.is_some()
    }

    fn present(&mut self, frame: &Frame) {
        self.frames += 1;
        self.last_frame = Some(frame.clone());
    }

    fn release(&mut self) {
        self.size = None;
        self.last_frame = None;
    }
}

/// Fixed-delay retry budget for surface attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub delay: Duration,
    pub max_attempts: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(INIT_RETRY_DELAY_MS),
            max_attempts: INIT_MAX_ATTEMPTS,
        }
    }
}

/// Attach `surface`, sleeping `policy.delay` between failed attempts.
///
/// # Returns
/// The number of attempts it took, or `InitializationFailed` carrying the
/// last failure once the budget is spent.
pub async fn attach_with_retry(
    surface: &mut dyn RenderSurface,
    width: f64,
    height: f64,
    policy: RetryPolicy,
) -> Result<u32, SurfaceError> {
    let max_attempts = policy.max_attempts.max(1);
    let mut last_reason = String::new();

    for attempt in 1..=max_attempts {
        match surface.attach(width, height) {
            Ok(()) => {
                tracing::debug!("Surface attached after {} attempt(s)", attempt);
                return Ok(attempt);
            }
            Err(e) => {
                last_reason = e.to_string();
                if attempt < max_attempts {
                    tracing::warn!(
                        "Surface attach attempt {}/{} failed: {}; retrying in {:?}",
                        attempt,
                        max_attempts,
                        e,
                        policy.delay
                    );
                    tokio::time::sleep(policy.delay).await;
                }
            }
        }
    }

    Err(SurfaceError::InitializationFailed {
        attempts: max_attempts,
        reason: last_reason,
    })
}
