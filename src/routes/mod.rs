//! HTTP route handlers for the API surface.
//!
//! Three endpoints: root status, a health check, and a static test page.
//! All of them return HTTP 200 even when dependencies are degraded;
//! degradation is communicated only through the boolean fields in the
//! response bodies, never through status codes.
//!
//! Request tracing is enabled via middleware that generates a unique request
//! ID for each incoming request, allowing correlation of all logs within a
//! request.

pub mod health;
pub mod root;
pub mod test;

use axum::{middleware, routing::get, Router};
use tower_http::cors::{Any, CorsLayer};

use crate::middleware::request_id_layer;
use crate::state::AppState;

/// Creates the Axum router with all routes and middleware layers.
pub fn create_router(state: AppState) -> Router {
    // Permissive CORS: the API is consumed by mobile and web clients from
    // arbitrary origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root::index))
        .route("/health", get(health::health))
        .route("/test", get(test::test_page))
        .with_state(state)
        .layer(cors)
        // Request ID middleware - creates root span with request_id for correlation
        .layer(middleware::from_fn(request_id_layer))
}
