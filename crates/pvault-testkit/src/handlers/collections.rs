//! Collection handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::error::VaultResult;
use crate::model::CollectionDef;
use crate::state::AppState;

use super::parse_body;

/// Lists every collection.
pub async fn list_collections(State(state): State<Arc<AppState>>) -> Json<Vec<CollectionDef>> {
    Json(state.store.read().list_collections())
}

/// Creates a collection from its schema.
pub async fn add_collection(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> VaultResult<Json<CollectionDef>> {
    let def: CollectionDef = parse_body(&body)?;
    let created = state.store.write().add_collection(def)?;
    debug!(collection = %created.name, "Collection created");
    Ok(Json(created))
}

/// Returns one collection's schema.
pub async fn get_collection(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> VaultResult<Json<CollectionDef>> {
    Ok(Json(state.store.read().get_collection(&name)?))
}

/// Drops a collection with its objects and tokens.
pub async fn delete_collection(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> VaultResult<StatusCode> {
    state.store.write().delete_collection(&name)?;
    debug!(collection = %name, "Collection deleted");
    Ok(StatusCode::OK)
}
