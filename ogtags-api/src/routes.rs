//! API route configuration.

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Tag lookup, GET only. HEAD is routed explicitly since `get` would serve it.
        .route(
            "/get_tags",
            get(handlers::get_tags)
                .head(handlers::method_not_allowed)
                .fallback(handlers::method_not_allowed),
        )
        .with_state(state)
}
