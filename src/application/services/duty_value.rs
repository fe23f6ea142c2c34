//! Landed cost by dutiable value: resolves the tariff, then aggregates

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::{DutyValueInputs, DutyValueResults, TariffInfo, TariffResolver};

/// Resolved tariff together with the calculation it produced.
#[derive(Debug, Clone, PartialEq)]
pub struct DutyValueCalculation {
    pub tariff: TariffInfo,
    pub results: DutyValueResults,
}

/// Use case: tariff computed from trade data on the customs dutiable value.
pub struct LandedCostByDutyValue {
    resolver: Arc<dyn TariffResolver>,
}

impl LandedCostByDutyValue {
    pub fn new(resolver: Arc<dyn TariffResolver>) -> Self {
        Self { resolver }
    }

    pub fn resolve_tariff(&self, origin: &str, destination: &str, category: &str) -> TariffInfo {
        self.resolver.resolve(origin, destination, category)
    }

    pub fn calculate(&self, inputs: &DutyValueInputs) -> DutyValueResults {
        self.calculate_detailed(inputs).results
    }

    /// Same as [`calculate`](Self::calculate) but also returns the tariff entry used.
    pub fn calculate_detailed(&self, inputs: &DutyValueInputs) -> DutyValueCalculation {
        let tariff = self.resolve_tariff(
            &inputs.origin_country,
            &inputs.destination_country,
            &inputs.product_category,
        );
        let results = inputs.landed_cost(&tariff);

        debug!(
            origin = inputs.origin_country.as_str(),
            destination = inputs.destination_country.as_str(),
            category = inputs.product_category.as_str(),
            quantity = inputs.quantity,
            tariff_rate = tariff.rate,
            landed_cost_per_unit = results.landed_cost_per_unit,
            total_landed_cost = results.total_landed_cost,
            "Landed cost by dutiable value calculated"
        );

        if !results.is_finite() {
            warn!(
                quantity = inputs.quantity,
                landed_cost_per_unit = results.landed_cost_per_unit,
                "Landed cost contains non-finite values"
            );
        }

        DutyValueCalculation { tariff, results }
    }
}

// ── Tests ──────────────────────────────────────────────────────
