//! Typed error handling for natural-language order search
//!
//! # Error Categories
//!
//! - [`SearchError`]: everything that can abort a search request
//! - [`CompletionError`]: faults reported by a completion service client
//!
//! Validation never produces errors (invalid values become warnings), and
//! follow-up generation is best-effort, so neither appears here.
//!
//! # Example
//!
//! ```rust,ignore
//! match service.search("delivered orders in Paris").await {
//!     Ok(response) => println!("{} orders", response.results.len()),
//!     Err(SearchError::ExtractionFailure { raw }) => {
//!         tracing::warn!(%raw, "model produced no filter");
//!     }
//!     Err(e) => eprintln!("{}", e.user_message()),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Hint shown when the completion text could not be turned into a filter
pub const REPHRASE_HINT: &str = "Unable to understand your query. Please try rephrasing. \
     Example: 'Show me all delivered orders from January 2026'";

const EMPTY_QUERY_MESSAGE: &str = "Query cannot be empty. Please enter a search query.";

const AUTH_MESSAGE: &str = "Completion service credentials are not configured or were rejected. \
     Check the configured API key.";

const GENERIC_MESSAGE: &str = "An error occurred while processing your search. Please try again.";

/// Errors that abort a search request
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The query text was blank; no completion call was made
    #[error("query text is empty")]
    EmptyQuery,

    /// No extraction strategy produced a filter
    ///
    /// `raw` is the offending completion text, kept for logs only.
    #[error("could not extract a filter from completion text")]
    ExtractionFailure { raw: String },

    /// The completion service rejected or lacks credentials
    #[error("completion service authentication failed: {message}")]
    ServiceAuthFailure { message: String },

    /// Any other completion service or query execution fault
    #[error("service failure: {message}")]
    ServiceFailure { message: String },

    /// A filter reached the compiler without passing validation
    #[error("filter field '{field}' holds unvalidated value '{value}'")]
    InvalidFilter { field: String, value: String },
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl SearchError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SearchError::EmptyQuery => StatusCode::BAD_REQUEST,
            SearchError::ExtractionFailure { .. } => StatusCode::BAD_REQUEST,
            SearchError::ServiceAuthFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            SearchError::ServiceFailure { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            SearchError::InvalidFilter { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            SearchError::EmptyQuery => "EMPTY_QUERY",
            SearchError::ExtractionFailure { .. } => "EXTRACTION_FAILED",
            SearchError::ServiceAuthFailure { .. } => "SERVICE_AUTH_FAILED",
            SearchError::ServiceFailure { .. } => "SERVICE_FAILURE",
            SearchError::InvalidFilter { .. } => "INVALID_FILTER",
        }
    }

    /// Message safe to show to the end user
    ///
    /// Never includes raw completion text or internal fault details.
    pub fn user_message(&self) -> &'static str {
        match self {
            SearchError::EmptyQuery => EMPTY_QUERY_MESSAGE,
            SearchError::ExtractionFailure { .. } => REPHRASE_HINT,
            SearchError::ServiceAuthFailure { .. } => AUTH_MESSAGE,
            SearchError::ServiceFailure { .. } | SearchError::InvalidFilter { .. } => {
                GENERIC_MESSAGE
            }
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.user_message().to_string(),
        }
    }
}

impl IntoResponse for SearchError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Completion Errors
// =============================================================================

/// Faults raised by a [`CompletionService`](crate::core::CompletionService)
#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    /// Credentials missing or rejected (HTTP 401/403)
    #[error("authentication failed: {message}")]
    Auth { message: String },

    /// Connection, timeout or non-success status
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The reply did not carry completion text where expected
    #[error("malformed completion response: {message}")]
    MalformedResponse { message: String },
}

impl From<CompletionError> for SearchError {
    fn from(err: CompletionError) -> Self {
        match err {
            CompletionError::Auth { message } => SearchError::ServiceAuthFailure { message },
            other => SearchError::ServiceFailure {
                message: other.to_string(),
            },
        }
    }
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            CompletionError::MalformedResponse {
                message: err.to_string(),
            }
        } else {
            CompletionError::Transport {
                message: err.to_string(),
            }
        }
    }
}
