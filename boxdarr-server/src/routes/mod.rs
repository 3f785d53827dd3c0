use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use boxdarr_config::CorsConfig;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::{
    handlers::{auth, letterboxd, radarr, system},
    infra::app_state::AppState,
};

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|s| HeaderValue::from_str(s).ok())
        .collect();
    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/authenticate", get(auth::authenticate_handler))
        .route("/callback", get(auth::callback_handler))
}

/// Every route the service exposes, with tracing and CORS applied.
pub fn create_app(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        .route("/ping", get(system::ping_handler))
        .route("/letterboxd/{*path}", get(letterboxd::watchlist_handler))
        .route("/x/{service}", post(radarr::webhook_handler))
        .nest("/api/auth/twitter", create_auth_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors))
        .with_state(state)
}
