use axum::Router;

use gacha_application::AppState;

use crate::handlers::{import_handlers, ops_handlers, query_handlers};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/v1/import",
            axum::routing::post(import_handlers::start_import),
        )
        .route(
            "/v1/import/status",
            axum::routing::get(import_handlers::import_status),
        )
        .route(
            "/v1/history",
            axum::routing::get(query_handlers::list_history),
        )
        .route(
            "/v1/statistics",
            axum::routing::get(query_handlers::get_statistics),
        )
        .route(
            "/v1/statistics/categories",
            axum::routing::get(query_handlers::get_category_breakdown),
        )
        .route(
            "/v1/servers",
            axum::routing::get(query_handlers::list_servers),
        )
        .route(
            "/v1/ops/health/live",
            axum::routing::get(ops_handlers::health_live),
        )
        .route(
            "/v1/ops/metrics/prometheus",
            axum::routing::get(ops_handlers::metrics_prometheus),
        )
        .with_state(state)
}
