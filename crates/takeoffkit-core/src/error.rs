//! Error handling for TakeoffKit
//!
//! Provides error types for every layer of the takeoff engine:
//! - Surface errors (drawing surface attach/teardown)
//! - Asset errors (background image decode and conversion)
//! - Room errors (registry lookups)
//!
//! All error types use `thiserror` for ergonomic error handling. Degenerate
//! geometry and short polygon commits are not errors; they are absorbed by
//! the drawing layer and never surface here.

use thiserror::Error;

/// Drawing surface error type
///
/// Raised while attaching the controller to its rendering surface.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// The surface is not ready yet (retryable)
    #[error("Drawing surface unavailable: {reason}")]
    Unavailable {
        /// Why the surface could not be attached.
        reason: String,
    },

    /// Initialization kept failing until the retry budget ran out
    #[error("Drawing surface failed to initialize after {attempts} attempts: {reason}")]
    InitializationFailed {
        /// Number of attempts made.
        attempts: u32,
        /// The last failure reason.
        reason: String,
    },

    /// The controller owning the surface was already disposed
    #[error("Drawing surface already disposed")]
    Disposed,
}

/// Background asset error type
///
/// Represents failures while turning an uploaded asset into a background layer.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssetError {
    /// The asset contained no bytes
    #[error("Asset '{asset}' is empty")]
    Empty {
        /// The asset name.
        asset: String,
    },

    /// The asset is neither a raster image nor a convertible drawing
    #[error("Unsupported asset format for '{asset}'")]
    UnsupportedFormat {
        /// The asset name.
        asset: String,
    },

    /// Raster decoding failed
    #[error("Failed to decode '{asset}': {reason}")]
    DecodeFailed {
        /// The asset name.
        asset: String,
        /// The decoder message.
        reason: String,
    },

    /// The external converter rejected the asset
    #[error("Conversion of '{asset}' failed: {reason}")]
    ConversionFailed {
        /// The asset name.
        asset: String,
        /// The converter message.
        reason: String,
    },

    /// A non-raster asset arrived but no converter is configured
    #[error("No converter available for '{asset}'")]
    ConverterUnavailable {
        /// The asset name.
        asset: String,
    },
}

/// Room registry error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoomError {
    /// No room with this id exists
    #[error("Room {id} not found")]
    NotFound {
        /// The requested room id.
        id: u64,
    },
}

/// Main error type for TakeoffKit
///
/// A unified error type that can represent any error from all layers.
/// This is the primary error type used in public APIs.
#[derive(Error, Debug)]
pub enum Error {
    /// Surface error
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    /// Asset error
    #[error(transparent)]
    Asset(#[from] AssetError),

    /// Room error
    #[error(transparent)]
    Room(#[from] RoomError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Check if this is a background asset error
    pub fn is_asset_error(&self) -> bool {
        matches!(self, Error::Asset(_))
    }

    /// Check if this is a surface error
    pub fn is_surface_error(&self) -> bool {
        matches!(self, Error::Surface(_))
    }

    /// Check if this error means a room id was unknown
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Room(RoomError::NotFound { .. }))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
