//! API Router with Swagger UI

use axum::{middleware, routing::get, routing::post, Router};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::common::ApiResponse;
use super::modules::calculator::{self, CostComponentsDto, DutyValueRequest, DutyValueResponse, MarginRequest, MarginResponse};
use super::modules::health::{self, HealthResponse, RateSheetHealth};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::tariffs::{self, RateSheetStatusResponse, TariffEntryResponse, TariffResponse};
use super::state::AppState;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        calculator::calculate_by_duty_value,
        calculator::calculate_by_margin,
        tariffs::list_tariffs,
        tariffs::resolve_tariff,
        tariffs::rate_sheet_status,
    ),
    components(
        schemas(
            ApiResponse<String>,
            HealthResponse,
            RateSheetHealth,
            DutyValueRequest,
            DutyValueResponse,
            CostComponentsDto,
            MarginRequest,
            MarginResponse,
            TariffResponse,
            TariffEntryResponse,
            RateSheetStatusResponse,
        )
    ),
    tags(
        (name = "Health", description = "Liveness and rate sheet freshness"),
        (name = "Landed Cost", description = "Landed cost calculators: dutiable-value tariff and margin planning"),
        (name = "Tariffs", description = "Tariff rate table and resolution"),
    ),
    info(
        title = "Landed Cost API",
        version = "0.1.0",
        description = "Import landed-cost estimation: tariff resolution and cost aggregation",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes.
///
/// `/metrics` is only mounted when a Prometheus handle is supplied.
pub fn create_api_router(state: AppState, prometheus_handle: Option<PrometheusHandle>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        .merge(swagger_routes)
        // Health
        .route("/health", get(health::health_check))
        // Calculators
        .route(
            "/api/v1/landed-cost/duty-value",
            post(calculator::calculate_by_duty_value),
        )
        .route(
            "/api/v1/landed-cost/margin",
            post(calculator::calculate_by_margin),
        )
        // Tariffs
        .route("/api/v1/tariffs", get(tariffs::list_tariffs))
        .route("/api/v1/tariffs/resolve", get(tariffs::resolve_tariff))
        .route("/api/v1/tariffs/status", get(tariffs::rate_sheet_status))
        .with_state(state);

    if let Some(handle) = prometheus_handle {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    router
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

// ── Tests ──────────────────────────────────────────────────────
