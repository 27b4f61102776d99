//! Service traits for the two external collaborators
//!
//! The search core never talks to a model or a database directly; it goes
//! through these traits so either side can be swapped (HTTP client vs.
//! scripted replies, MySQL vs. in-memory rows).

use crate::core::error::CompletionError;
use crate::core::order::OrderRow;
use crate::query::CompiledQuery;
use anyhow::Result;
use async_trait::async_trait;

/// One call to a text-completion service
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System instructions framing the task
    pub system_instructions: String,
    /// User turn
    pub user_text: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Upper bound on generated tokens
    pub max_tokens: u32,
}

impl CompletionRequest {
    pub fn new(system_instructions: impl Into<String>, user_text: impl Into<String>) -> Self {
        Self {
            system_instructions: system_instructions.into(),
            user_text: user_text.into(),
            temperature: 0.0,
            max_tokens: 1024,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Opaque text-completion collaborator
///
/// Timeout and retry policy belong to implementations; the search core
/// calls each method at most once per step.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Return the completion text for the request
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError>;
}

/// Tabular query executor over the orders join
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Execute a compiled query and return rows in query order
    async fn execute(&self, query: &CompiledQuery) -> Result<Vec<OrderRow>>;
}
