//! Landed cost with the tariff levied on the customs dutiable value

use serde::{Deserialize, Serialize};

use crate::domain::tariff::TariffInfo;

/// Inputs for the dutiable-value model.
///
/// Shipping, insurance and additional fees are totals for the whole
/// shipment; `product_cost` is already per unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DutyValueInputs {
    pub product_cost: f64,
    pub shipping_cost: f64,
    pub insurance_cost: f64,
    pub additional_fees: f64,
    pub quantity: i64,
    /// Carried for display only.
    pub unit_weight: f64,
    pub origin_country: String,
    pub destination_country: String,
    pub product_category: String,
    /// Accepted but not used for rate resolution.
    pub hs_code: Option<String>,
}

/// One value per cost component of a unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostComponents {
    pub product: f64,
    pub shipping: f64,
    pub insurance: f64,
    pub tariff: f64,
    pub additional_fees: f64,
}

impl CostComponents {
    pub fn total(&self) -> f64 {
        self.product + self.shipping + self.insurance + self.tariff + self.additional_fees
    }

    /// Each component as a percentage of `whole`. No guard for zero.
    pub fn as_percentages_of(&self, whole: f64) -> CostComponents {
        CostComponents {
            product: self.product / whole * 100.0,
            shipping: self.shipping / whole * 100.0,
            insurance: self.insurance / whole * 100.0,
            tariff: self.tariff / whole * 100.0,
            additional_fees: self.additional_fees / whole * 100.0,
        }
    }

    fn is_finite(&self) -> bool {
        self.product.is_finite()
            && self.shipping.is_finite()
            && self.insurance.is_finite()
            && self.tariff.is_finite()
            && self.additional_fees.is_finite()
    }
}

/// Per-unit cost breakdown for the dutiable-value model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DutyValueResults {
    pub product_cost: f64,
    /// Per unit
    pub shipping_cost: f64,
    /// Per unit
    pub insurance_cost: f64,
    /// Per unit
    pub additional_fees: f64,

    pub dutiable_value: f64,
    pub tariff_rate: f64,
    pub tariff_amount: f64,

    pub landed_cost_per_unit: f64,
    pub total_landed_cost: f64,

    pub cost_breakdown: CostComponents,
    pub cost_percentages: CostComponents,
}

impl DutyValueResults {
    /// False when a zero quantity or a zero landed cost pushed any field
    /// to infinity or NaN.
    pub fn is_finite(&self) -> bool {
        self.product_cost.is_finite()
            && self.shipping_cost.is_finite()
            && self.insurance_cost.is_finite()
            && self.additional_fees.is_finite()
            && self.dutiable_value.is_finite()
            && self.tariff_rate.is_finite()
            && self.tariff_amount.is_finite()
            && self.landed_cost_per_unit.is_finite()
            && self.total_landed_cost.is_finite()
            && self.cost_breakdown.is_finite()
            && self.cost_percentages.is_finite()
    }
}

impl DutyValueInputs {
    /// Compute the landed cost using an already-resolved tariff.
    ///
    /// Never fails. Division by a zero quantity or a zero landed cost
    /// propagates as non-finite values.
    pub fn landed_cost(&self, tariff: &TariffInfo) -> DutyValueResults {
        let quantity = self.quantity as f64;
        let tariff_rate = tariff.rate;

        let shipping_per_unit = self.shipping_cost / quantity;
        let insurance_per_unit = self.insurance_cost / quantity;
        let additional_fees_per_unit = self.additional_fees / quantity;

        // Customs valuation: product + shipping + insurance
        let dutiable_value = self.product_cost + shipping_per_unit + insurance_per_unit;
        let tariff_amount = dutiable_value * (tariff_rate / 100.0);

        let landed_cost_per_unit = self.product_cost
            + shipping_per_unit
            + insurance_per_unit
            + tariff_amount
            + additional_fees_per_unit;
        let total_landed_cost = landed_cost_per_unit * quantity;

        let cost_breakdown = CostComponents {
            product: self.product_cost,
            shipping: shipping_per_unit,
            insurance: insurance_per_unit,
            tariff: tariff_amount,
            additional_fees: additional_fees_per_unit,
        };
        let cost_percentages = cost_breakdown.as_percentages_of(landed_cost_per_unit);

        DutyValueResults {
            product_cost: self.product_cost,
            shipping_cost: shipping_per_unit,
            insurance_cost: insurance_per_unit,
            additional_fees: additional_fees_per_unit,
            dutiable_value,
            tariff_rate,
            tariff_amount,
            landed_cost_per_unit,
            total_landed_cost,
            cost_breakdown,
            cost_percentages,
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn inputs(quantity: i64) -> DutyValueInputs {
        DutyValueInputs {
            product_cost: 100.0,
            shipping_cost: 50.0,
            insurance_cost: 10.0,
            additional_fees: 5.0,
            quantity,
            unit_weight: 0.4,
            origin_country: "China".into(),
            destination_country: "United States".into(),
            product_category: "Electronics".into(),
            hs_code: None,
        }
    }

    fn section_301() -> TariffInfo {
        TariffInfo::new(25.0, "Section 301 tariffs on Chinese electronics")
    }

    #[test]
    fn single_unit_reference_case() {
        let r = inputs(1).landed_cost(&section_301());
        assert_eq!(r.tariff_rate, 25.0);
        assert!(approx(r.dutiable_value, 160.0));
        assert!(approx(r.tariff_amount, 40.0));
        assert!(approx(r.landed_cost_per_unit, 205.0));
        assert!(approx(r.total_landed_cost, 205.0));
        assert!(r.is_finite());
    }

    #[test]
    fn quantity_one_keeps_raw_values() {
        let i = inputs(1);
        let r = i.landed_cost(&section_301());
        assert_eq!(r.product_cost, i.product_cost);
        assert_eq!(r.shipping_cost, i.shipping_cost);
        assert_eq!(r.insurance_cost, i.insurance_cost);
        assert_eq!(r.additional_fees, i.additional_fees);
    }

    #[test]
    fn shipment_totals_are_spread_per_unit() {
        let r = inputs(10).landed_cost(&section_301());
        assert!(approx(r.shipping_cost, 5.0));
        assert!(approx(r.insurance_cost, 1.0));
        assert!(approx(r.additional_fees, 0.5));
        // 100 + 5 + 1 = 106, tariff 26.5
        assert!(approx(r.dutiable_value, 106.0));
        assert!(approx(r.tariff_amount, 26.5));
        assert!(approx(r.landed_cost_per_unit, 133.0));
        assert!(approx(r.total_landed_cost, 1330.0));
    }

    #[test]
    fn additional_fees_are_not_dutiable() {
        let mut i = inputs(1);
        let base = i.landed_cost(&section_301());
        i.additional_fees = 1000.0;
        let with_fees = i.landed_cost(&section_301());
        assert_eq!(base.dutiable_value, with_fees.dutiable_value);
        assert_eq!(base.tariff_amount, with_fees.tariff_amount);
        assert!(approx(with_fees.landed_cost_per_unit, 1200.0));
    }

    #[test]
    fn breakdown_mirrors_per_unit_fields() {
        let r = inputs(4).landed_cost(&section_301());
        assert_eq!(r.cost_breakdown.product, r.product_cost);
        assert_eq!(r.cost_breakdown.shipping, r.shipping_cost);
        assert_eq!(r.cost_breakdown.insurance, r.insurance_cost);
        assert_eq!(r.cost_breakdown.tariff, r.tariff_amount);
        assert_eq!(r.cost_breakdown.additional_fees, r.additional_fees);
        assert!(approx(r.cost_breakdown.total(), r.landed_cost_per_unit));
    }

    #[test]
    fn percentages_sum_to_one_hundred() {
        let cases = [
            (inputs(1), 25.0),
            (inputs(7), 12.0),
            (
                DutyValueInputs {
                    product_cost: 3.33,
                    shipping_cost: 1234.5,
                    insurance_cost: 0.0,
                    additional_fees: 77.7,
                    quantity: 333,
                    ..inputs(1)
                },
                8.0,
            ),
            (
                DutyValueInputs {
                    product_cost: 0.0,
                    shipping_cost: 0.0,
                    insurance_cost: 0.0,
                    additional_fees: 9.0,
                    quantity: 3,
                    ..inputs(1)
                },
                0.0,
            ),
        ];

        for (i, rate) in cases {
            let r = i.landed_cost(&TariffInfo::new(rate, "x"));
            assert!(r.landed_cost_per_unit > 0.0);
            let sum = r.cost_percentages.total();
            assert!((sum - 100.0).abs() <= 0.01, "sum was {}", sum);
        }
    }

    #[test]
    fn reference_case_percentages() {
        let r = inputs(1).landed_cost(&section_301());
        assert!(approx(r.cost_percentages.product, 100.0 / 205.0 * 100.0));
        assert!(approx(r.cost_percentages.tariff, 40.0 / 205.0 * 100.0));
    }

    #[test]
    fn zero_quantity_propagates_non_finite() {
        let r = inputs(0).landed_cost(&section_301());
        assert!(r.shipping_cost.is_infinite());
        assert!(r.landed_cost_per_unit.is_infinite());
        // inf * 0
        assert!(r.total_landed_cost.is_nan());
        assert!(!r.is_finite());
    }

    #[test]
    fn zero_landed_cost_yields_nan_percentages() {
        let i = DutyValueInputs {
            product_cost: 0.0,
            shipping_cost: 0.0,
            insurance_cost: 0.0,
            additional_fees: 0.0,
            ..inputs(1)
        };
        let r = i.landed_cost(&section_301());
        assert_eq!(r.landed_cost_per_unit, 0.0);
        assert!(r.cost_percentages.product.is_nan());
        assert!(r.cost_percentages.tariff.is_nan());
        assert!(!r.is_finite());
    }

    #[test]
    fn negative_inputs_are_not_rejected() {
        let i = DutyValueInputs {
            product_cost: -100.0,
            ..inputs(1)
        };
        let r = i.landed_cost(&section_301());
        assert!(approx(r.dutiable_value, -40.0));
        assert!(approx(r.tariff_amount, -10.0));
        assert!(r.is_finite());
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let i = inputs(3);
        let a = i.landed_cost(&section_301());
        let b = i.landed_cost(&section_301());
        assert_eq!(a.landed_cost_per_unit.to_bits(), b.landed_cost_per_unit.to_bits());
        assert_eq!(a.total_landed_cost.to_bits(), b.total_landed_cost.to_bits());
        assert_eq!(
            a.cost_percentages.shipping.to_bits(),
            b.cost_percentages.shipping.to_bits()
        );
        assert_eq!(a, b);
    }
}
