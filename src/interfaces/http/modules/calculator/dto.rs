//! Calculator DTOs
//!
//! Non-finite numbers (from a zero quantity or zero landed cost) serialize
//! as `null`; `finite` tells clients when that happened.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::application::{CalculatorFormData, DutyValueCalculation};
use crate::domain::{CostComponents, DutyValueResults, MarginInputs, MarginResults};
use crate::interfaces::http::modules::tariffs::TariffResponse;

/// Calculator form as entered; amounts are strings parsed leniently.
///
/// Field names follow the calculator form (`productName`, `shippingCost`, ...).
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default, rename_all = "camelCase")]
pub struct DutyValueRequest {
    pub product_name: String,
    pub product_cost: String,
    pub hs_code: String,
    pub product_category: String,
    pub origin_country: String,
    pub destination_country: String,
    pub shipping_method: String,
    pub shipping_cost: String,
    pub insurance_cost: String,
    pub quantity: String,
    pub unit_weight: String,
    pub additional_fees: String,
}

/// Required fields are the calculator form's own presence check.
impl Validate for DutyValueRequest {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let missing = CalculatorFormData::from(self.clone()).missing_required_fields();
        if missing.is_empty() {
            return Ok(());
        }

        let mut errors = ValidationErrors::new();
        for field in missing {
            let mut error = ValidationError::new("required");
            error.message = Some("is required".into());
            errors.add(field, error);
        }
        Err(errors)
    }
}

impl From<DutyValueRequest> for CalculatorFormData {
    fn from(r: DutyValueRequest) -> Self {
        Self {
            product_name: r.product_name,
            product_cost: r.product_cost,
            hs_code: r.hs_code,
            product_category: r.product_category,
            origin_country: r.origin_country,
            destination_country: r.destination_country,
            shipping_method: r.shipping_method,
            shipping_cost: r.shipping_cost,
            insurance_cost: r.insurance_cost,
            quantity: r.quantity,
            unit_weight: r.unit_weight,
            additional_fees: r.additional_fees,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CostComponentsDto {
    pub product: f64,
    pub shipping: f64,
    pub insurance: f64,
    pub tariff: f64,
    pub additional_fees: f64,
}

impl From<CostComponents> for CostComponentsDto {
    fn from(c: CostComponents) -> Self {
        Self {
            product: c.product,
            shipping: c.shipping,
            insurance: c.insurance,
            tariff: c.tariff,
            additional_fees: c.additional_fees,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DutyValueResponse {
    pub product_name: String,
    pub quantity: i64,
    pub unit_weight: f64,
    pub tariff: TariffResponse,

    /// Per-unit values
    pub product_cost: f64,
    pub shipping_cost: f64,
    pub insurance_cost: f64,
    pub additional_fees: f64,

    pub dutiable_value: f64,
    pub tariff_rate: f64,
    pub tariff_amount: f64,
    pub landed_cost_per_unit: f64,
    pub total_landed_cost: f64,

    pub cost_breakdown: CostComponentsDto,
    pub cost_percentages: CostComponentsDto,
    pub finite: bool,
}

impl DutyValueResponse {
    pub fn new(
        product_name: String,
        quantity: i64,
        unit_weight: f64,
        calculation: DutyValueCalculation,
    ) -> Self {
        let DutyValueCalculation { tariff, results } = calculation;
        let finite = results.is_finite();
        let DutyValueResults {
            product_cost,
            shipping_cost,
            insurance_cost,
            additional_fees,
            dutiable_value,
            tariff_rate,
            tariff_amount,
            landed_cost_per_unit,
            total_landed_cost,
            cost_breakdown,
            cost_percentages,
        } = results;

        Self {
            product_name,
            quantity,
            unit_weight,
            tariff: tariff.into(),
            product_cost,
            shipping_cost,
            insurance_cost,
            additional_fees,
            dutiable_value,
            tariff_rate,
            tariff_amount,
            landed_cost_per_unit,
            total_landed_cost,
            cost_breakdown: cost_breakdown.into(),
            cost_percentages: cost_percentages.into(),
            finite,
        }
    }
}

/// Per-unit costs with a caller-supplied tariff rate and target margin
#[derive(Debug, Deserialize, ToSchema)]
pub struct MarginRequest {
    pub product_cost: f64,
    #[serde(default)]
    pub shipping_cost: f64,
    #[serde(default)]
    pub insurance_cost: f64,
    #[serde(default)]
    pub handling_cost: f64,
    /// Percentage applied to product cost
    pub tariff_rate: f64,
    /// Target markup percentage
    pub profit_margin: f64,
    pub total_units: i64,
}

impl From<MarginRequest> for MarginInputs {
    fn from(r: MarginRequest) -> Self {
        Self {
            product_cost: r.product_cost,
            shipping_cost: r.shipping_cost,
            insurance_cost: r.insurance_cost,
            handling_cost: r.handling_cost,
            tariff_rate: r.tariff_rate,
            profit_margin: r.profit_margin,
            total_units: r.total_units,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct MarginResponse {
    pub tariff_amount: f64,
    pub total_cost_per_unit: f64,
    pub landed_cost_per_unit: f64,
    pub recommended_selling_price: f64,
    pub total_investment: f64,
    pub total_revenue: f64,
    pub total_profit: f64,
    pub actual_profit_margin: f64,
}

impl From<MarginResults> for MarginResponse {
    fn from(r: MarginResults) -> Self {
        Self {
            tariff_amount: r.tariff_amount,
            total_cost_per_unit: r.total_cost_per_unit,
            landed_cost_per_unit: r.landed_cost_per_unit,
            recommended_selling_price: r.recommended_selling_price,
            total_investment: r.total_investment,
            total_revenue: r.total_revenue,
            total_profit: r.total_profit,
            actual_profit_margin: r.actual_profit_margin,
        }
    }
}
