//! X account login: `authenticate` starts the PKCE flow, `callback` finishes
//! it and stores the user tokens the publisher posts with.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Redirect,
};
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    infra::{
        app_state::AppState,
        errors::{AppError, AppResult},
        store::keys,
    },
    notify::oauth::{
        OAuthError, OAuthFlow, code_challenge, generate_code_verifier,
        generate_state,
    },
};

fn oauth_client(state: &AppState) -> AppResult<Arc<dyn OAuthFlow>> {
    state
        .oauth()
        .cloned()
        .ok_or_else(|| AppError::from(OAuthError::NotConfigured))
}

pub async fn authenticate_handler(
    State(state): State<AppState>,
) -> AppResult<Redirect> {
    let oauth = oauth_client(&state)?;
    let store = state.store();

    for key in keys::ALL {
        store.remove(key).await?;
    }

    let csrf_state = generate_state();
    let verifier = generate_code_verifier();
    let challenge = code_challenge(&verifier);

    store.set(keys::STATE, csrf_state.clone()).await?;
    store.set(keys::CODE_VERIFIER, verifier).await?;

    let url = oauth.authorize_url(&csrf_state, &challenge);
    info!("redirecting to X for authorization");
    Ok(Redirect::to(url.as_str()))
}

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub state: Option<String>,
    pub code: Option<String>,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn rejected(problems: &[&str]) -> AppError {
    let message = problems.join(", ");
    warn!(problems = %message, "rejected OAuth callback");
    AppError::bad_request(message)
}

pub async fn callback_handler(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> AppResult<StatusCode> {
    let store = state.store();
    let stored_state = present(store.get(keys::STATE).await?);
    let stored_verifier = present(store.get(keys::CODE_VERIFIER).await?);
    let query_state = present(query.state);
    let code = present(query.code);

    let mut problems = Vec::new();
    if query_state.is_none() {
        problems.push("No state parameter");
    }
    if code.is_none() {
        problems.push("No code parameter");
    }
    if stored_verifier.is_none() {
        problems.push("No code verifier found in session");
    }
    if stored_state.is_none() {
        problems.push("No state found in session");
    }
    if let (Some(received), Some(expected)) = (&query_state, &stored_state)
        && received != expected
    {
        problems.push("State mismatch");
    }

    let (Some(code), Some(verifier)) = (code, stored_verifier) else {
        return Err(rejected(&problems));
    };
    if !problems.is_empty() {
        return Err(rejected(&problems));
    }

    let oauth = oauth_client(&state)?;
    let tokens = oauth.exchange_code(&code, &verifier).await?;

    store.set(keys::ACCESS_TOKEN, tokens.access_token).await?;
    store
        .set(keys::REFRESH_TOKEN, tokens.refresh_token.unwrap_or_default())
        .await?;
    store.remove(keys::STATE).await?;
    store.remove(keys::CODE_VERIFIER).await?;

    info!("X account authorized");
    Ok(StatusCode::NO_CONTENT)
}
