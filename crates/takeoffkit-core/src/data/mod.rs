//! Data models shared across the takeoff engine.

pub mod materials;

pub use materials::{Material, MaterialRate, MaterialRateTable};
