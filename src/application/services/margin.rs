//! Landed cost by margin: caller-supplied tariff rate, selling price projection

use tracing::debug;

use crate::domain::{MarginInputs, MarginResults};

/// Use case: tariff supplied by the user for margin planning.
///
/// Holds no state and shares nothing with [`super::LandedCostByDutyValue`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LandedCostByMargin;

impl LandedCostByMargin {
    pub fn new() -> Self {
        Self
    }

    pub fn calculate(&self, inputs: &MarginInputs) -> MarginResults {
        let results = inputs.project();

        debug!(
            tariff_rate = inputs.tariff_rate,
            profit_margin = inputs.profit_margin,
            total_units = inputs.total_units,
            landed_cost_per_unit = results.landed_cost_per_unit,
            recommended_selling_price = results.recommended_selling_price,
            total_profit = results.total_profit,
            "Landed cost by margin calculated"
        );

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delegates_to_projection() {
        let inputs = MarginInputs {
            product_cost: 100.0,
            shipping_cost: 10.0,
            insurance_cost: 5.0,
            handling_cost: 5.0,
            tariff_rate: 20.0,
            profit_margin: 30.0,
            total_units: 10,
        };
        let r = LandedCostByMargin::new().calculate(&inputs);
        assert_eq!(r, inputs.project());
        assert!((r.recommended_selling_price - 182.0).abs() < 1e-9);
    }
}
