//! Search orchestration
//!
//! One call to [`SearchService::search`] runs the whole pipeline:
//! interpretation completion, extraction, validation, compilation,
//! execution, then a best-effort follow-up completion. The service holds no
//! per-request state, so a single instance may serve concurrent requests.

use crate::config::AppConfig;
use crate::core::error::SearchError;
use crate::core::filter::ValidatedFilter;
use crate::core::order::OrderRow;
use crate::core::service::{CompletionService, OrderStore};
use crate::core::validation::validate;
use crate::followup::{classify, follow_up_message};
use crate::interpret::{extract, interpretation_request};
use crate::query::compile;
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;
use uuid::Uuid;

/// Per-call tuning for the two completion requests
#[derive(Debug, Clone, PartialEq)]
pub struct SearchSettings {
    pub interpret_temperature: f32,
    pub followup_temperature: f32,
    pub max_tokens: u32,
    /// Upper bound for the follow-up call
    pub followup_timeout: Duration,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            interpret_temperature: 0.0,
            followup_temperature: 0.3,
            max_tokens: 1024,
            followup_timeout: Duration::from_millis(15_000),
        }
    }
}

impl SearchSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            interpret_temperature: config.completion.interpret_temperature,
            followup_temperature: config.completion.followup_temperature,
            max_tokens: config.completion.max_tokens,
            followup_timeout: Duration::from_millis(config.search.followup_timeout_ms),
        }
    }
}

/// Successful search result
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    /// Filter actually applied
    pub filters: ValidatedFilter,
    pub results: Vec<OrderRow>,
    /// Notes about ignored values, in validation order
    pub warnings: Vec<String>,
    #[serde(rename = "followUp", skip_serializing_if = "Option::is_none")]
    pub follow_up: Option<String>,
}

/// Natural-language order search over a completion service and an order store
#[derive(Clone)]
pub struct SearchService {
    completion: Arc<dyn CompletionService>,
    store: Arc<dyn OrderStore>,
    settings: SearchSettings,
    today: Option<NaiveDate>,
}

impl SearchService {
    /// Create a service with default settings
    pub fn new(completion: Arc<dyn CompletionService>, store: Arc<dyn OrderStore>) -> Self {
        Self {
            completion,
            store,
            settings: SearchSettings::default(),
            today: None,
        }
    }

    pub fn with_settings(mut self, settings: SearchSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Pin the date given to the model for relative dates
    ///
    /// Defaults to the local calendar date at call time.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    fn today(&self) -> NaiveDate {
        self.today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }

    /// Run one search request
    pub async fn search(&self, query: &str) -> Result<SearchResponse, SearchError> {
        let request_id = Uuid::new_v4();
        let span = tracing::info_span!("nl_search", %request_id);
        self.run(query).instrument(span).await
    }

    async fn run(&self, query: &str) -> Result<SearchResponse, SearchError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(SearchError::EmptyQuery);
        }

        let request = interpretation_request(query, self.today())
            .with_temperature(self.settings.interpret_temperature)
            .with_max_tokens(self.settings.max_tokens);

        let raw = self.completion.complete(request).await.map_err(|e| {
            tracing::warn!(error = %e, "Interpretation call failed");
            SearchError::from(e)
        })?;
        tracing::debug!(%raw, "Interpretation completion received");

        let candidate = extract(&raw)?;
        let (filter, warnings, assumptions) = validate(&candidate, query).into_parts();

        let compiled = compile(&filter);
        tracing::debug!(
            where_clause = %compiled.where_clause,
            params = compiled.params.len(),
            "Compiled order query"
        );

        let results = self.store.execute(&compiled).await.map_err(|e| {
            tracing::warn!(error = %e, "Order query failed");
            SearchError::ServiceFailure {
                message: e.to_string(),
            }
        })?;
        tracing::info!(
            results = results.len(),
            warnings = warnings.len(),
            "Search executed"
        );

        let follow_up = self
            .follow_up(query, &filter, results.len(), &assumptions)
            .await;

        Ok(SearchResponse {
            filters: filter,
            results,
            warnings,
            follow_up,
        })
    }

    /// Best-effort follow-up; every failure degrades to `None`
    async fn follow_up(
        &self,
        query: &str,
        filter: &ValidatedFilter,
        result_count: usize,
        assumptions: &[String],
    ) -> Option<String> {
        let context = match classify(query, filter, result_count, assumptions) {
            Ok(context) => context,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to render follow-up context");
                return None;
            }
        };
        tracing::debug!(
            behavior = %context.decision.behavior,
            may_decline = context.decision.may_decline,
            "Follow-up behavior selected"
        );

        let request = context
            .request
            .with_temperature(self.settings.followup_temperature)
            .with_max_tokens(self.settings.max_tokens);

        let reply = self.completion.complete(request);
        match tokio::time::timeout(self.settings.followup_timeout, reply).await {
            Ok(Ok(raw)) => {
                tracing::debug!(%raw, "Follow-up completion received");
                follow_up_message(&raw)
            }
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Follow-up call failed, omitting message");
                None
            }
            Err(_) => {
                tracing::warn!(
                    timeout_ms = self.settings.followup_timeout.as_millis() as u64,
                    "Follow-up call timed out, omitting message"
                );
                None
            }
        }
    }
}
