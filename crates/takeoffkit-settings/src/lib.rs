//! # TakeoffKit Settings
//!
//! Configuration loading, validation and persistence for TakeoffKit.
//! Files are JSON or TOML, picked by extension.

pub mod config;
pub mod error;

pub use config::{
    BackgroundSettings, CanvasSettings, Config, SurfaceSettings, TakeoffSettings,
    ViewportSettings,
};
pub use error::{SettingsError, SettingsResult};
