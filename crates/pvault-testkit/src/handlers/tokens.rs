//! Token handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::error::VaultResult;
use crate::model::{
    DetokenizedOut, QueryToken, Rotated, TokenMetadataOut, TokenValue, TokenizeEntry, UpdateToken,
};
use crate::state::AppState;

use super::{has_option, list, optional_ttl, parse_body, require_reason, selector, Params};

pub async fn tokenize(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
    Query(params): Query<Params>,
    body: Bytes,
) -> VaultResult<Json<Vec<TokenValue>>> {
    require_reason(&params)?;
    let ttl = optional_ttl(&params)?;
    let entries: Vec<TokenizeEntry> = parse_body(&body)?;
    let tokens = state.store.write().tokenize(&collection, entries, ttl)?;
    debug!(collection = %collection, count = tokens.len(), "Tokens issued");
    Ok(Json(tokens))
}

pub async fn detokenize(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
    Query(params): Query<Params>,
) -> VaultResult<Json<Vec<DetokenizedOut>>> {
    require_reason(&params)?;
    let selector = selector(&params)?;
    let tokens = state.store.read().detokenize(
        &collection,
        &selector,
        has_option(&params, "include_metadata"),
        has_option(&params, "archived"),
    )?;
    Ok(Json(tokens))
}

pub async fn search_tokens(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
    Query(params): Query<Params>,
    body: Bytes,
) -> VaultResult<Json<Vec<TokenMetadataOut>>> {
    require_reason(&params)?;
    let query: QueryToken = parse_body(&body)?;
    Ok(Json(state.store.read().search_tokens(&collection, &query)?))
}

pub async fn update_tokens(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
    Query(params): Query<Params>,
    body: Bytes,
) -> VaultResult<StatusCode> {
    require_reason(&params)?;
    let selector = selector(&params)?;
    let ttl = optional_ttl(&params)?;
    let update: UpdateToken = if body.is_empty() {
        UpdateToken::default()
    } else {
        parse_body(&body)?
    };
    state
        .store
        .write()
        .update_tokens(&collection, &selector, update, ttl)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn delete_tokens(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
    Query(params): Query<Params>,
) -> VaultResult<StatusCode> {
    require_reason(&params)?;
    let selector = selector(&params)?;
    state.store.write().delete_tokens(&collection, &selector)?;
    Ok(StatusCode::OK)
}

pub async fn rotate_tokens(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
    Query(params): Query<Params>,
) -> VaultResult<Json<Rotated>> {
    require_reason(&params)?;
    let token_ids = list(&params, "token_ids");
    let rotated = state.store.write().rotate_tokens(&collection, &token_ids)?;
    debug!(collection = %collection, count = rotated.len(), "Tokens rotated");
    Ok(Json(rotated))
}
