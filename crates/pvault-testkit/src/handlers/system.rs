//! Health handlers.

use axum::Json;
use serde_json::{json, Value};

/// Control-plane health.
pub async fn ctl_health() -> Json<Value> {
    Json(json!({ "status": "pass" }))
}

/// Data-plane health.
pub async fn data_health() -> Json<Value> {
    Json(json!({ "status": "pass" }))
}
