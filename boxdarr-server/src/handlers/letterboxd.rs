use axum::{
    extract::{Path, State},
    response::Json,
};
use boxdarr_core::OutputRecord;
use tracing::info;

use crate::infra::app_state::AppState;

/// `GET /letterboxd/{*path}`: one Radarr record per film on the page.
///
/// Always answers 200; per-film failures travel inside each record's
/// `errors` and an unreachable listing yields `[]`.
pub async fn watchlist_handler(
    State(state): State<AppState>,
    Path(path): Path<String>,
) -> Json<Vec<OutputRecord>> {
    let records = state.pipeline().run(&path).await;
    info!(path = %path, records = records.len(), "watchlist served");
    Json(records)
}
