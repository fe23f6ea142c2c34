//! Prometheus metrics handler
//!
//! Exposes `GET /metrics` in Prometheus text format, rendered from the
//! global `metrics-exporter-prometheus` recorder.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub struct MetricsState {
    pub handle: PrometheusHandle,
}

/// Calculator model label for `landed_cost_calculations_total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculationModel {
    DutyValue,
    Margin,
}

impl CalculationModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DutyValue => "duty_value",
            Self::Margin => "margin",
        }
    }
}

/// Count one successful calculation. A no-op when no recorder is installed.
pub fn record_calculation(model: CalculationModel) {
    metrics::counter!("landed_cost_calculations_total", "model" => model.as_str()).increment(1);
}

/// `GET /metrics`: Prometheus scrape endpoint
pub async fn prometheus_metrics(State(state): State<MetricsState>) -> impl IntoResponse {
    let body = state.handle.render();
    (
        StatusCode::OK,
        [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
        body,
    )
}
