//! # TakeoffKit Core
//!
//! Core types and utilities for TakeoffKit.
//! Provides the error taxonomy, shared constants, the material rate
//! table and the change notification channel used by the designer.

pub mod constants;
pub mod data;
pub mod error;
pub mod notify;

pub use data::{Material, MaterialRate, MaterialRateTable};

pub use error::{AssetError, Error, Result, RoomError, SurfaceError};

pub use notify::{Notifier, SubscriptionId};
