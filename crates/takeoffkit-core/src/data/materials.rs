//! Material rate table
//!
//! This module provides:
//! - The closed set of finish/structure materials a Room can be assigned
//! - Display name, swatch color and cost per real unit for each material
//! - An immutable lookup table, optionally built with rate overrides

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Materials a drawn element can be priced in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Material {
    /// Cast-in-place concrete slab
    Concrete,
    /// Timber flooring or framing
    Timber,
    /// Structural steel
    Steel,
    /// Brick masonry
    Brick,
    /// Glazing
    Glass,
    /// Ceramic tile finish
    Tile,
    /// Gypsum board partitions
    Drywall,
}

impl Material {
    /// Every material, in display order.
    pub const ALL: [Material; 7] = [
        Material::Concrete,
        Material::Timber,
        Material::Steel,
        Material::Brick,
        Material::Glass,
        Material::Tile,
        Material::Drywall,
    ];

    /// The stable lowercase key used in configuration files.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Concrete => "concrete",
            Self::Timber => "timber",
            Self::Steel => "steel",
            Self::Brick => "brick",
            Self::Glass => "glass",
            Self::Tile => "tile",
            Self::Drywall => "drywall",
        }
    }

    /// Parse a configuration key back into a material.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.key().eq_ignore_ascii_case(key.trim()))
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::Concrete
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Display and pricing data for one material
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRate {
    /// Human readable name
    pub name: String,
    /// Swatch color as `#rrggbb`
    pub color: String,
    /// Cost of one real unit (area or length)
    pub cost_per_unit: f64,
}

impl MaterialRate {
    fn new(name: &str, color: &str, cost_per_unit: f64) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
            cost_per_unit,
        }
    }
}

/// Immutable lookup from material to its rate.
///
/// Every [`Material`] always has an entry, so lookups are infallible.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialRateTable {
    rates: HashMap<Material, MaterialRate>,
}

impl MaterialRateTable {
    /// The built-in rate card.
    pub fn standard() -> Self {
        let rates = Material::ALL
            .iter()
            .map(|&m| (m, Self::standard_rate(m)))
            .collect();
        Self { rates }
    }

    fn standard_rate(material: Material) -> MaterialRate {
        match material {
            Material::Concrete => MaterialRate::new("Concrete", "#9e9e9e", 150.0),
            Material::Timber => MaterialRate::new("Timber", "#8d6e63", 120.0),
            Material::Steel => MaterialRate::new("Steel", "#607d8b", 250.0),
            Material::Brick => MaterialRate::new("Brick", "#c1440e", 90.0),
            Material::Glass => MaterialRate::new("Glass", "#81d4fa", 300.0),
            Material::Tile => MaterialRate::new("Tile", "#e0c097", 60.0),
            Material::Drywall => MaterialRate::new("Drywall", "#eceff1", 45.0),
        }
    }

    /// Standard table with the given cost-per-unit overrides applied.
    ///
    /// Negative or non-finite overrides are ignored.
    pub fn with_overrides(overrides: &HashMap<Material, f64>) -> Self {
        let mut table = Self::standard();
        for (material, &cost) in overrides {
            if !cost.is_finite() || cost < 0.0 {
                tracing::warn!("Ignoring invalid rate {} for {}", cost, material);
                continue;
            }
            if let Some(rate) = table.rates.get_mut(material) {
                rate.cost_per_unit = cost;
            }
        }
        table
    }

    /// Rate for a material.
    pub fn get(&self, material: Material) -> &MaterialRate {
        // Constructors populate every variant of Material::ALL.
        &self.rates[&material]
    }

    /// Cost per unit for a material.
    pub fn cost_per_unit(&self, material: Material) -> f64 {
        self.get(material).cost_per_unit
    }

    /// Iterate rates in display order.
    pub fn iter(&self) -> impl Iterator<Item = (Material, &MaterialRate)> {
        Material::ALL.iter().map(move |&m| (m, self.get(m)))
    }
}

impl Default for MaterialRateTable {
    fn default() -> Self {
        Self::standard()
    }
}
