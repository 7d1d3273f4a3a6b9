//! Conversion from measured quantities to money.

use takeoffkit_core::constants::{AREA_UNIT_SCALE, LINEAR_UNIT_SCALE};
use takeoffkit_core::{Material, MaterialRateTable};

use crate::geometry::Quantity;

/// Prices quantities against a material rate table.
#[derive(Debug, Clone)]
pub struct CostEngine {
    rates: MaterialRateTable,
    linear_unit_scale: f64,
    area_unit_scale: f64,
}

impl CostEngine {
    pub fn new(rates: MaterialRateTable) -> Self {
        Self::with_unit_scales(rates, LINEAR_UNIT_SCALE, AREA_UNIT_SCALE)
    }

    /// Engine with explicit pixels-per-unit for lengths and areas.
    ///
    /// Non-positive scales fall back to the defaults.
    pub fn with_unit_scales(rates: MaterialRateTable, linear: f64, area: f64) -> Self {
        let pick = |v: f64, default: f64| {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                tracing::warn!("Invalid unit scale {}, using {}", v, default);
                default
            }
        };
        Self {
            rates,
            linear_unit_scale: pick(linear, LINEAR_UNIT_SCALE),
            area_unit_scale: pick(area, AREA_UNIT_SCALE),
        }
    }

    pub fn rates(&self) -> &MaterialRateTable {
        &self.rates
    }

    pub fn linear_unit_scale(&self) -> f64 {
        self.linear_unit_scale
    }

    pub fn area_unit_scale(&self) -> f64 {
        self.area_unit_scale
    }

    /// Quantity expressed in real units (m or m² for the default scales).
    pub fn real_units(&self, quantity: Quantity) -> f64 {
        match quantity {
            Quantity::Area(v) => v / self.area_unit_scale,
            Quantity::Length(v) => v / self.linear_unit_scale,
        }
    }

    /// `round(quantity / unit_scale * cost_per_unit)`, never negative.
    pub fn cost(&self, quantity: Quantity, material: Material) -> u64 {
        let raw = self.real_units(quantity) * self.rates.cost_per_unit(material);
        if !raw.is_finite() || raw <= 0.0 {
            return 0;
        }
        raw.round() as u64
    }

    /// Sum of the given costs.
    pub fn total<I>(costs: I) -> u64
    where
        I: IntoIterator<Item = u64>,
    {
        costs.into_iter().sum()
    }
}

impl Default for CostEngine {
    fn default() -> Self {
        Self::new(MaterialRateTable::standard())
    }
}
