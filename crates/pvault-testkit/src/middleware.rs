//! Bearer authentication.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::warn;

use crate::error::VaultError;
use crate::state::AppState;

/// Paths reachable without a token.
const PUBLIC_SUFFIX: &str = "/info/health";

/// Rejects requests whose bearer token is missing or wrong.
pub async fn require_bearer(
    State(state): State<Arc<AppState>>,
    req: Request,
    next: Next,
) -> Response {
    if req.uri().path().ends_with(PUBLIC_SUFFIX) {
        return next.run(req).await;
    }

    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "));

    match token {
        Some(token) if token == state.token => next.run(req).await,
        Some(_) => {
            warn!(path = %req.uri().path(), "Rejected request with wrong token");
            VaultError::Unauthorized("invalid bearer token".into()).into_response()
        }
        None => {
            warn!(path = %req.uri().path(), "Rejected request without token");
            VaultError::Unauthorized("missing bearer token".into()).into_response()
        }
    }
}
