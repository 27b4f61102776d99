//! Completion extractor
//!
//! Completion text is not guaranteed to be bare JSON: models prepend
//! reasoning, wrap the object in a fenced block, or emit several fragments.
//! Extraction tries an ordered list of pure strategies and keeps the first
//! success. A failure is always reported, never defaulted.

use crate::core::error::SearchError;
use crate::core::filter::OrderFilter;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// First `{...}` span with at most one level of nested braces
static BRACE_SPAN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{[^{}]*(?:\{[^{}]*\}[^{}]*)*\}").expect("valid brace span regex")
});

/// Fenced code block, optionally tagged `json`, holding an object
static CODE_FENCE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("valid code fence regex")
});

/// One way of turning completion text into a filter
#[derive(Clone, Copy)]
pub struct Strategy {
    pub name: &'static str,
    pub parse: fn(&str) -> Option<OrderFilter>,
}

impl std::fmt::Debug for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Strategy").field("name", &self.name).finish()
    }
}

/// Default strategy order
pub const STRATEGIES: &[Strategy] = &[
    Strategy {
        name: "whole_text",
        parse: parse_whole_text,
    },
    Strategy {
        name: "brace_span",
        parse: parse_brace_span,
    },
    Strategy {
        name: "code_fence",
        parse: parse_code_fence,
    },
];

/// Decode a JSON object into a filter; anything else is a miss
fn parse_object(text: &str) -> Option<OrderFilter> {
    match serde_json::from_str::<Value>(text.trim()) {
        Ok(value @ Value::Object(_)) => serde_json::from_value(value).ok(),
        _ => None,
    }
}

/// Strategy: the entire text is one JSON object
pub fn parse_whole_text(text: &str) -> Option<OrderFilter> {
    parse_object(text)
}

/// Strategy: the first balanced brace span
pub fn parse_brace_span(text: &str) -> Option<OrderFilter> {
    BRACE_SPAN_RE
        .find(text)
        .and_then(|span| parse_object(span.as_str()))
}

/// Strategy: the interior of the first fenced code block
pub fn parse_code_fence(text: &str) -> Option<OrderFilter> {
    CODE_FENCE_RE
        .captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|body| parse_object(body.as_str()))
}

/// Extract a filter with the default strategies
pub fn extract(raw: &str) -> Result<OrderFilter, SearchError> {
    extract_with(STRATEGIES, raw)
}

/// Extract a filter trying `strategies` in order
pub fn extract_with(strategies: &[Strategy], raw: &str) -> Result<OrderFilter, SearchError> {
    for strategy in strategies {
        if let Some(filter) = (strategy.parse)(raw) {
            tracing::debug!(strategy = strategy.name, "extracted filter from completion");
            return Ok(filter);
        }
    }

    tracing::warn!(raw = %raw, "no extraction strategy matched completion text");
    Err(SearchError::ExtractionFailure {
        raw: raw.to_string(),
    })
}
