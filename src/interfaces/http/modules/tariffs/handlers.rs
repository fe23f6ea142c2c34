//! Tariff REST API handlers

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;

use super::dto::{
    RateSheetStatusResponse, ResolveTariffParams, TariffEntryResponse, TariffResponse,
};
use crate::interfaces::http::common::ApiResponse;
use crate::interfaces::http::state::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/tariffs",
    tag = "Tariffs",
    responses(
        (status = 200, description = "Every entry of the rate table", body = ApiResponse<Vec<TariffEntryResponse>>)
    )
)]
pub async fn list_tariffs(
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<TariffEntryResponse>>> {
    let entries = state
        .rate_sheet
        .table
        .pairs()
        .flat_map(|(pair, rates)| {
            rates.iter().map(move |(category, info)| TariffEntryResponse {
                country_pair: pair.to_string(),
                category: category.clone(),
                tariff: info.clone().into(),
            })
        })
        .collect();

    Json(ApiResponse::success(entries))
}

#[utoipa::path(
    get,
    path = "/api/v1/tariffs/resolve",
    tag = "Tariffs",
    params(ResolveTariffParams),
    responses(
        (status = 200, description = "Applicable tariff (falls back to the standard rate)", body = ApiResponse<TariffResponse>),
        (status = 400, description = "Missing query parameter")
    )
)]
pub async fn resolve_tariff(
    State(state): State<AppState>,
    Query(params): Query<ResolveTariffParams>,
) -> Json<ApiResponse<TariffResponse>> {
    let tariff = state
        .duty_value
        .resolve_tariff(&params.origin, &params.destination, &params.category);

    Json(ApiResponse::success(tariff.into()))
}

#[utoipa::path(
    get,
    path = "/api/v1/tariffs/status",
    tag = "Tariffs",
    responses(
        (status = 200, description = "Rate sheet freshness", body = ApiResponse<RateSheetStatusResponse>)
    )
)]
pub async fn rate_sheet_status(
    State(state): State<AppState>,
) -> Json<ApiResponse<RateSheetStatusResponse>> {
    let now = Utc::now();
    let sheet = &state.rate_sheet;

    Json(ApiResponse::success(RateSheetStatusResponse {
        last_updated: sheet.last_updated,
        age_days: sheet.age_days(now),
        stale_after_days: state.stale_after_days,
        needs_update: sheet.needs_update(now, state.stale_after_days),
        entries: sheet.table.len(),
    }))
}
