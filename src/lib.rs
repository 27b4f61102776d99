//! # Order NL Search
//!
//! Natural-language search over parcel orders. A free-text query is handed
//! to a text-completion service, the reply is turned into a structured
//! filter, the filter is checked against a closed vocabulary and compiled
//! into a parameterized query over the orders join.
//!
//! ## Features
//!
//! - **Layered Extraction**: whole text, brace span, then fenced block
//! - **Never-Failing Validation**: unknown enum values become warnings
//! - **Parameterized SQL**: user text only ever reaches bind parameters
//! - **Typed Predicates**: the same compiled query runs in MySQL or in memory
//! - **Best-Effort Follow-up**: code picks the behavior, the model phrases it
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use nlsearch::prelude::*;
//!
//! let app = ServerBuilder::new()
//!     .with_completion_service(HttpCompletionService::from_config(&config.completion)?)
//!     .with_order_store(InMemoryOrderStore::with_rows(rows))
//!     .build()?;
//!
//! let response = service.search("delivered orders at lockers in Paris").await?;
//! println!("{} orders, follow-up: {:?}", response.results.len(), response.follow_up);
//! ```

pub mod completion;
pub mod config;
pub mod core;
pub mod followup;
pub mod interpret;
pub mod query;
pub mod search;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Axis, CompletionError, CompletionRequest, CompletionService, DateField, ErrorResponse,
        OrderFilter, OrderRow, OrderStore, SearchError, ValidatedFilter, ValidationOutcome,
        validate,
    };

    // === Pipeline ===
    pub use crate::followup::{FollowUpBehavior, FollowUpDecision};
    pub use crate::interpret::extract;
    pub use crate::query::{CompiledQuery, compile};
    pub use crate::search::{SearchResponse, SearchService, SearchSettings};

    // === Collaborators ===
    pub use crate::completion::{HttpCompletionService, ScriptedCompletionService};
    pub use crate::storage::InMemoryOrderStore;
    #[cfg(feature = "mysql")]
    pub use crate::storage::{MysqlOrderStore, ensure_schema};

    // === Config ===
    pub use crate::config::AppConfig;

    // === Server ===
    pub use crate::server::ServerBuilder;

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
}
