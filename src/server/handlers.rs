//! HTTP handlers for the search endpoint

use axum::{Json, extract::State, response::IntoResponse};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

use crate::core::error::SearchError;
use crate::search::{SearchResponse, SearchService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub search: Arc<SearchService>,
}

/// Request body for `POST /api/nl-search`
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NlSearchRequest {
    pub query: Option<String>,
}

/// Run a natural-language search
pub async fn nl_search(
    State(state): State<AppState>,
    Json(payload): Json<NlSearchRequest>,
) -> Result<Json<SearchResponse>, SearchError> {
    let query = payload.query.unwrap_or_default();

    match state.search.search(&query).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            match &e {
                SearchError::EmptyQuery | SearchError::ExtractionFailure { .. } => {
                    tracing::warn!(code = e.error_code(), "Search rejected: {}", e);
                }
                _ => tracing::error!(code = e.error_code(), "Search failed: {}", e),
            }
            Err(e)
        }
    }
}

/// Liveness probe
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
