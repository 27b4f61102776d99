//! Query interpretation: prompt construction and completion extraction

pub mod extractor;
pub mod prompt;

pub use extractor::{Strategy, extract, extract_with};
pub use prompt::interpretation_instructions;

use crate::core::service::CompletionRequest;
use chrono::NaiveDate;

/// Completion request asking the model to turn `query` into a filter
pub fn interpretation_request(query: &str, today: NaiveDate) -> CompletionRequest {
    CompletionRequest::new(interpretation_instructions(today), query)
}
