//! Fake vault routes.

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::handlers::{collections, objects, system, tokens};
use crate::middleware::require_bearer;
use crate::state::AppState;

/// Path prefix of every vault endpoint.
pub const API_PREFIX: &str = "/api/pvlt/1.0";

/// Creates the vault router.
pub fn create_router(state: Arc<AppState>) -> Router {
    let api = Router::new()
        .nest("/ctl", ctl_routes())
        .nest("/data", data_routes())
        .layer(middleware::from_fn_with_state(state.clone(), require_bearer));

    Router::new()
        .nest(API_PREFIX, api)
        .with_state(state)
}

/// Control-plane routes.
fn ctl_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/info/health", get(system::ctl_health))
        .route(
            "/collections",
            get(collections::list_collections).post(collections::add_collection),
        )
        .route(
            "/collections/:name",
            get(collections::get_collection).delete(collections::delete_collection),
        )
}

/// Data-plane routes.
fn data_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/info/health", get(system::data_health))
        .nest("/collections/:collection", collection_data_routes())
}

fn collection_data_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/objects",
            get(objects::list_objects).post(objects::add_object),
        )
        .route("/objects/bulk", post(objects::add_objects_bulk))
        .route("/objects/query", post(objects::search_objects))
        .route(
            "/objects/:id",
            get(objects::get_object).delete(objects::delete_object),
        )
        .route(
            "/tokens",
            get(tokens::detokenize)
                .post(tokens::tokenize)
                .patch(tokens::update_tokens)
                .delete(tokens::delete_tokens),
        )
        .route("/tokens/query", post(tokens::search_tokens))
        .route("/tokens/rotate", post(tokens::rotate_tokens))
}
