//! Core module containing the vocabulary, records, errors and collaborator traits

pub mod error;
pub mod filter;
pub mod order;
pub mod service;
pub mod validation;
pub mod vocabulary;

pub use error::{CompletionError, ErrorResponse, SearchError};
pub use filter::{OrderFilter, ValidatedFilter};
pub use order::OrderRow;
pub use service::{CompletionRequest, CompletionService, OrderStore};
pub use validation::{ValidationOutcome, validate};
pub use vocabulary::{Axis, DateField};
