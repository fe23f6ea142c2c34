//! Landed cost calculator handlers

use axum::{extract::State, Json};

use super::dto::{DutyValueRequest, DutyValueResponse, MarginRequest, MarginResponse};
use crate::application::CalculatorFormData;
use crate::domain::MarginInputs;
use crate::interfaces::http::common::{ApiResponse, ValidatedJson};
use crate::interfaces::http::modules::metrics::{record_calculation, CalculationModel};
use crate::interfaces::http::state::AppState;

#[utoipa::path(
    post,
    path = "/api/v1/landed-cost/duty-value",
    tag = "Landed Cost",
    request_body = DutyValueRequest,
    responses(
        (status = 200, description = "Landed cost with tariff on the dutiable value", body = ApiResponse<DutyValueResponse>),
        (status = 400, description = "Malformed JSON"),
        (status = 422, description = "Required form fields missing")
    )
)]
pub async fn calculate_by_duty_value(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<DutyValueRequest>,
) -> Json<ApiResponse<DutyValueResponse>> {
    let form = CalculatorFormData::from(req);
    let inputs = form.parse();
    let calculation = state.duty_value.calculate_detailed(&inputs);

    record_calculation(CalculationModel::DutyValue);

    Json(ApiResponse::success(DutyValueResponse::new(
        form.product_name,
        inputs.quantity,
        inputs.unit_weight,
        calculation,
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/landed-cost/margin",
    tag = "Landed Cost",
    request_body = MarginRequest,
    responses(
        (status = 200, description = "Selling price and profit projection", body = ApiResponse<MarginResponse>),
        (status = 400, description = "Malformed JSON"),
        (status = 422, description = "Missing or mistyped fields")
    )
)]
pub async fn calculate_by_margin(
    State(state): State<AppState>,
    Json(req): Json<MarginRequest>,
) -> Json<ApiResponse<MarginResponse>> {
    let inputs = MarginInputs::from(req);
    let results = state.margin.calculate(&inputs);

    record_calculation(CalculationModel::Margin);

    Json(ApiResponse::success(results.into()))
}
