//! Health check handler

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::interfaces::http::state::AppState;

/// Service health response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// "ok", or "stale" when the rate sheet is overdue for refresh
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub rate_sheet: RateSheetHealth,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RateSheetHealth {
    pub last_updated: DateTime<Utc>,
    pub entries: usize,
    pub needs_update: bool,
}

#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let needs_update = state
        .rate_sheet
        .needs_update(Utc::now(), state.stale_after_days);

    Json(HealthResponse {
        status: if needs_update { "stale" } else { "ok" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        rate_sheet: RateSheetHealth {
            last_updated: state.rate_sheet.last_updated,
            entries: state.rate_sheet.table.len(),
            needs_update,
        },
    })
}
