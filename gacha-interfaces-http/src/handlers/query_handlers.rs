use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;

use gacha_application::queries::server_queries::{self, ServerInfo};
use gacha_application::queries::{history_queries, statistics_queries};
use gacha_application::AppState;
use gacha_domain::{CategoryShare, HistoryEntry, HistoryQuery, PullStatistics};

use crate::error::HttpError;
use crate::middleware::authorize;

pub async fn get_statistics(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<PullStatistics>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    Ok(Json(statistics_queries::get_statistics(&state).await))
}

pub async fn get_category_breakdown(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<CategoryShare>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    Ok(Json(statistics_queries::category_breakdown(&state).await))
}

pub async fn list_history(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<HistoryEntry>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let entries = history_queries::list_history(&state, query).await?;
    Ok(Json(entries))
}

pub async fn list_servers(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<ServerInfo>>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    Ok(Json(server_queries::list_servers(&state)))
}
