//! HTTP route configuration.

use axum::Router;
use axum::routing::{get, post};

use super::handlers;
use super::state::AppState;

/// Create the HTTP router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/status", get(handlers::status))
        .route("/sse", get(handlers::sse))
        .route("/messages/{id}", post(handlers::post_message))
        .with_state(state)
}
