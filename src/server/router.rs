//! Router for the search API

use crate::server::handlers::{AppState, health, nl_search};
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the search routes
///
/// - POST /api/nl-search - Run a natural-language search
/// - GET /health - Liveness probe
///
/// CORS is permissive: the endpoint is called from browser front-ends on
/// any origin.
pub fn build_search_routes(state: AppState) -> Router {
    Router::new()
        .route("/api/nl-search", post(nl_search))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
