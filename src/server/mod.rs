//! Server module for the natural-language search HTTP API
//!
//! This module provides a `ServerBuilder` that wires a completion service
//! and an order store into:
//! - `POST /api/nl-search` for searches
//! - `GET /health` for liveness checks

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::ServerBuilder;
pub use handlers::{AppState, NlSearchRequest};
pub use router::build_search_routes;
