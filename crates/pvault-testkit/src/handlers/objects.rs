//! Object handlers.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};

use crate::error::VaultResult;
use crate::model::{BulkResult, Fields, ObjectQuery, ObjectsPage};
use crate::state::AppState;
use crate::store::ListObjects;

use super::{optional_usize, parse_body, parse_uuid, projection, require_reason, uuids, Params};

pub async fn add_object(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
    Query(params): Query<Params>,
    body: Bytes,
) -> VaultResult<Json<Value>> {
    require_reason(&params)?;
    let fields: Fields = parse_body(&body)?;
    let id = state.store.write().add_object(&collection, fields)?;
    Ok(Json(json!({ "id": id })))
}

pub async fn add_objects_bulk(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
    Query(params): Query<Params>,
    body: Bytes,
) -> VaultResult<Json<BulkResult>> {
    require_reason(&params)?;
    let objects: Vec<Fields> = parse_body(&body)?;
    Ok(Json(state.store.write().add_objects(&collection, objects)?))
}

pub async fn list_objects(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
    Query(params): Query<Params>,
) -> VaultResult<Json<ObjectsPage>> {
    require_reason(&params)?;
    let list = ListObjects {
        ids: uuids(&params, "ids")?,
        projection: projection(&params)?,
        page_size: optional_usize(&params, "page_size")?,
        cursor: params.get("cursor").cloned(),
    };
    Ok(Json(state.store.read().list_objects(&collection, &list)?))
}

pub async fn get_object(
    State(state): State<Arc<AppState>>,
    Path((collection, id)): Path<(String, String)>,
    Query(params): Query<Params>,
) -> VaultResult<Json<Fields>> {
    require_reason(&params)?;
    let id = parse_uuid(&id, "id")?;
    let projection = projection(&params)?;
    Ok(Json(state.store.read().get_object(&collection, &id, &projection)?))
}

pub async fn search_objects(
    State(state): State<Arc<AppState>>,
    Path(collection): Path<String>,
    Query(params): Query<Params>,
    body: Bytes,
) -> VaultResult<Json<ObjectsPage>> {
    require_reason(&params)?;
    let query: ObjectQuery = parse_body(&body)?;
    let projection = projection(&params)?;
    Ok(Json(
        state
            .store
            .read()
            .search_objects(&collection, &query, &projection)?,
    ))
}

pub async fn delete_object(
    State(state): State<Arc<AppState>>,
    Path((collection, id)): Path<(String, String)>,
    Query(params): Query<Params>,
) -> VaultResult<StatusCode> {
    require_reason(&params)?;
    let id = parse_uuid(&id, "id")?;
    state.store.write().delete_object(&collection, &id)?;
    Ok(StatusCode::OK)
}
