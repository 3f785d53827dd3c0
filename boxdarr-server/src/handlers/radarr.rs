use axum::{
    extract::{Path, State},
    response::Json,
};
use tracing::{error, info};

use crate::{infra::app_state::AppState, notify::RadarrPayload};

pub const OK: &str = "OK";
pub const NOK: &str = "NOK";

/// `POST /x/{service}`: announces Radarr events through the status
/// publisher. Answers `OK`, or `NOK` when publishing failed.
pub async fn webhook_handler(
    State(state): State<AppState>,
    Path(service): Path<String>,
    Json(payload): Json<RadarrPayload>,
) -> &'static str {
    let Some(message) = payload.status_message() else {
        info!(service = %service, event = ?payload.event_type, "event not announced");
        return OK;
    };

    match state.publisher().publish(&message).await {
        Ok(()) => {
            info!(service = %service, event = ?payload.event_type, "event announced");
            OK
        }
        Err(err) => {
            error!(service = %service, error = %err, "failed to announce event");
            NOK
        }
    }
}
