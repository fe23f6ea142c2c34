//! Landed cost with a caller-supplied tariff rate, projected to a
//! selling price at a target profit margin

use serde::{Deserialize, Serialize};

/// Inputs for the margin model. All costs are already per unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginInputs {
    pub product_cost: f64,
    pub shipping_cost: f64,
    pub insurance_cost: f64,
    pub handling_cost: f64,
    /// Percentage applied to `product_cost` only
    pub tariff_rate: f64,
    /// Target markup percentage over landed cost
    pub profit_margin: f64,
    pub total_units: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarginResults {
    pub tariff_amount: f64,
    pub total_cost_per_unit: f64,
    /// Same value as `total_cost_per_unit`
    pub landed_cost_per_unit: f64,
    pub recommended_selling_price: f64,
    pub total_investment: f64,
    pub total_revenue: f64,
    pub total_profit: f64,
    pub actual_profit_margin: f64,
}

impl MarginInputs {
    pub fn project(&self) -> MarginResults {
        let units = self.total_units as f64;

        let tariff_amount = self.product_cost * (self.tariff_rate / 100.0);
        let total_cost_per_unit = self.product_cost
            + self.shipping_cost
            + self.insurance_cost
            + self.handling_cost
            + tariff_amount;
        let landed_cost_per_unit = total_cost_per_unit;

        let recommended_selling_price = landed_cost_per_unit * (1.0 + self.profit_margin / 100.0);

        let total_investment = landed_cost_per_unit * units;
        let total_revenue = recommended_selling_price * units;
        let total_profit = total_revenue - total_investment;

        // Only guarded division in either model
        let actual_profit_margin = if total_investment > 0.0 {
            (total_profit / total_investment) * 100.0
        } else {
            0.0
        };

        MarginResults {
            tariff_amount,
            total_cost_per_unit,
            landed_cost_per_unit,
            recommended_selling_price,
            total_investment,
            total_revenue,
            total_profit,
            actual_profit_margin,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────
