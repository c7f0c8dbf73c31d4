use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use serde::Serialize;
use tracing::{error, info};

use gacha_application::commands::import_commands::{self, ImportTicket};
use gacha_application::queries::import_queries;
use gacha_application::AppState;
use gacha_domain::{ImportRequestPayload, ImportStatus};

use crate::error::HttpError;
use crate::middleware::authorize;

#[derive(Debug, Serialize)]
pub struct ImportAccepted {
    pub status: &'static str,
    pub server: &'static str,
}

pub async fn start_import(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ImportRequestPayload>,
) -> Result<(StatusCode, Json<ImportAccepted>), HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    let ticket = import_commands::begin_import(&state, payload)?;
    let server = ticket.credentials().server.code();
    info!("import accepted for server {}", server);
    spawn_import(state, ticket);
    Ok((
        StatusCode::ACCEPTED,
        Json(ImportAccepted {
            status: "started",
            server,
        }),
    ))
}

pub async fn import_status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<ImportStatus>, HttpError> {
    if !authorize(&state.config, &headers) {
        return Err(HttpError::Unauthorized);
    }
    Ok(Json(import_queries::current_import_status(&state)))
}

/// Progress is collected in the shared import status for polling.
fn spawn_import(state: AppState, ticket: ImportTicket) {
    tokio::spawn(async move {
        if let Err(err) = import_commands::execute_import_supervised(&state, ticket).await {
            error!("background import failed: {}", err);
        }
    });
}
