//! End-to-end tests for the search pipeline
//!
//! These tests verify that:
//! - A completion reply flows through extraction, validation and compilation
//! - Warnings and assumptions surface where the caller can see them
//! - Follow-up generation never fails a search
//! - One service instance serves concurrent requests

mod common;

use anyhow::anyhow;
use async_trait::async_trait;
use common::*;
use nlsearch::core::validation::DEFAULT_DATE_FIELD_ASSUMPTION;
use nlsearch::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn service_with(completion: impl CompletionService + 'static) -> SearchService {
    SearchService::new(Arc::new(completion), Arc::new(seeded_store())).with_today(today())
}

// =============================================================================
// Happy paths
// =============================================================================

mod happy_path_tests {
    use super::*;

    #[tokio::test]
    async fn test_delivered_orders_at_lockers() {
        let completion = ScriptedCompletionService::new()
            .reply(DELIVERED_AT_LOCKERS)
            .reply("NO_ASSUMPTION_MADE");
        let service = service_with(completion.clone());

        let response = service.search("delivered orders at lockers").await.unwrap();

        assert_eq!(ids(&response.results), vec![1]);
        assert!(response.warnings.is_empty());
        assert_eq!(response.follow_up, None);
        assert_eq!(response.filters.location_type.as_deref(), Some("LOCKER"));

        let follow_up_request = &completion.requests()[1];
        assert!(follow_up_request.user_text.contains("Result count: 1"));
        assert!(follow_up_request.user_text.contains("BEHAVIOR 3"));
    }

    #[tokio::test]
    async fn test_fenced_reply_with_prose() {
        let completion = ScriptedCompletionService::new()
            .reply("Here is the filter:\n```json\n{\"city\":\"Paris\"}\n```")
            .reply("NO_ASSUMPTION_MADE");

        let response = service_with(completion).search("orders in paris").await.unwrap();
        assert_eq!(ids(&response.results), vec![2]);
    }

    #[tokio::test]
    async fn test_results_are_newest_first() {
        let completion = ScriptedCompletionService::new()
            .reply("{}")
            .reply("NO_ASSUMPTION_MADE");

        let response = service_with(completion).search("all orders").await.unwrap();
        assert_eq!(ids(&response.results), vec![3, 2, 1, 4]);
    }

    #[tokio::test]
    async fn test_missing_carrier_passes_carrier_exclusion() {
        let completion = ScriptedCompletionService::new()
            .reply(r#"{"exclude_carrier_name":"dhl"}"#)
            .reply("NO_ASSUMPTION_MADE");

        let response = service_with(completion)
            .search("all orders excluding DHL carrier")
            .await
            .unwrap();
        assert_eq!(ids(&response.results), vec![3, 2, 4]);
    }

    #[tokio::test]
    async fn test_flag_membership() {
        let completion = ScriptedCompletionService::new()
            .reply(r#"{"flags":["VIP"],"exclude_flags":["EXPIRED"]}"#)
            .reply("NO_ASSUMPTION_MADE");

        let response = service_with(completion)
            .search("vip orders that are not expired")
            .await
            .unwrap();
        assert_eq!(ids(&response.results), vec![4]);
    }
}

// =============================================================================
// Warnings and assumptions
// =============================================================================

mod warning_tests {
    use super::*;

    #[tokio::test]
    async fn test_unknown_status_is_dropped_with_warning() {
        let completion = ScriptedCompletionService::new()
            .reply(r#"{"exclude_status":["PENDING","EXPIRED"]}"#)
            .reply("NO_ASSUMPTION_MADE");

        let response = service_with(completion)
            .search("orders excluding pending and expired")
            .await
            .unwrap();

        assert_eq!(response.warnings.len(), 1);
        assert!(response.warnings[0].starts_with("Unknown status 'PENDING' was ignored."));
        assert_eq!(
            response.filters.exclude_status,
            Some(vec!["EXPIRED".to_string()])
        );
        assert_eq!(ids(&response.results), vec![3, 1, 4]);
    }

    #[tokio::test]
    async fn test_defaulted_date_field_is_disclosed() {
        let completion = ScriptedCompletionService::new()
            .reply(r#"{"date_from":"2026-01-01","date_to":"2026-01-31"}"#)
            .reply("<reasoning>We have an assumption.</reasoning>\"Filtering by order creation date.\"");
        let service = service_with(completion.clone());

        let response = service.search("orders in January 2026").await.unwrap();

        assert_eq!(response.filters.date_field.as_deref(), Some("CREATED"));
        assert_eq!(ids(&response.results), vec![2, 1]);
        assert_eq!(
            response.follow_up.as_deref(),
            Some("Filtering by order creation date.")
        );

        let context = &completion.requests()[1].user_text;
        assert!(context.contains(DEFAULT_DATE_FIELD_ASSUMPTION));
        assert!(context.contains("BEHAVIOR 2"));
    }

    #[tokio::test]
    async fn test_date_field_keyword_suppresses_assumption() {
        let completion = ScriptedCompletionService::new()
            .reply(r#"{"date_from":"2026-01-01","date_to":"2026-01-31","date_field":"STORED"}"#)
            .reply("NO_ASSUMPTION_MADE");
        let service = service_with(completion.clone());

        let response = service.search("orders stored in January 2026").await.unwrap();

        assert_eq!(ids(&response.results), vec![2, 1, 4]);
        assert!(completion.requests()[1].user_text.contains("Assumptions made: None"));
    }

    #[tokio::test]
    async fn test_empty_results_ask_for_alternatives() {
        let completion = ScriptedCompletionService::new()
            .reply(r#"{"location_name":"Location B"}"#)
            .reply("No orders found for 'Location B'. Did you mean Location A?");
        let service = service_with(completion.clone());

        let response = service.search("orders at location b").await.unwrap();

        assert!(response.results.is_empty());
        assert_eq!(
            response.follow_up.as_deref(),
            Some("No orders found for 'Location B'. Did you mean Location A?")
        );
        assert!(completion.requests()[1].user_text.contains("BEHAVIOR 1"));
    }
}

// =============================================================================
// Failures
// =============================================================================

mod failure_tests {
    use super::*;

    struct FailingStore;

    #[async_trait]
    impl OrderStore for FailingStore {
        async fn execute(&self, _query: &CompiledQuery) -> Result<Vec<OrderRow>> {
            Err(anyhow!("connection reset"))
        }
    }

    #[tokio::test]
    async fn test_prose_reply_is_extraction_failure() {
        let completion = ScriptedCompletionService::new().reply("I cannot help with that.");
        let err = service_with(completion.clone())
            .search("what is the weather")
            .await
            .unwrap_err();

        assert!(matches!(err, SearchError::ExtractionFailure { .. }));
        assert_eq!(completion.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_auth_failure() {
        let completion = ScriptedCompletionService::new().fail(CompletionError::Auth {
            message: "403".into(),
        });
        let err = service_with(completion).search("orders").await.unwrap_err();
        assert!(matches!(err, SearchError::ServiceAuthFailure { .. }));
    }

    #[tokio::test]
    async fn test_transport_failure() {
        let completion = ScriptedCompletionService::new().fail(CompletionError::Transport {
            message: "connection refused".into(),
        });
        let err = service_with(completion).search("orders").await.unwrap_err();
        assert!(matches!(err, SearchError::ServiceFailure { .. }));
    }

    #[tokio::test]
    async fn test_store_failure_is_service_failure() {
        let completion = ScriptedCompletionService::new().reply("{}");
        let service = SearchService::new(Arc::new(completion), Arc::new(FailingStore));

        let err = service.search("orders").await.unwrap_err();
        match err {
            SearchError::ServiceFailure { message } => {
                assert!(message.contains("connection reset"))
            }
            other => panic!("unexpected {:?}", other),
        }
    }
}

// =============================================================================
// Follow-up degradation
// =============================================================================

mod follow_up_degradation_tests {
    use super::*;

    /// Fast interpretation, follow-up that never answers in time
    struct SlowFollowUp;

    #[async_trait]
    impl CompletionService for SlowFollowUp {
        async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
            if request.system_instructions.contains("structured JSON filters") {
                return Ok("{}".to_string());
            }
            tokio::time::sleep(Duration::from_secs(5)).await;
            Ok("too late".to_string())
        }
    }

    #[tokio::test]
    async fn test_follow_up_error_yields_no_message() {
        let completion = ScriptedCompletionService::new()
            .reply(DELIVERED_AT_LOCKERS)
            .fail(CompletionError::Transport {
                message: "503".into(),
            });

        let response = service_with(completion).search("delivered at lockers").await.unwrap();
        assert_eq!(ids(&response.results), vec![1]);
        assert_eq!(response.follow_up, None);
    }

    #[tokio::test]
    async fn test_follow_up_timeout_yields_no_message() {
        let settings = SearchSettings {
            followup_timeout: Duration::from_millis(50),
            ..Default::default()
        };
        let service = service_with(SlowFollowUp).with_settings(settings);

        let started = std::time::Instant::now();
        let response = service.search("all orders").await.unwrap();

        assert_eq!(response.results.len(), 4);
        assert_eq!(response.follow_up, None);
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_meta_only_reply_yields_no_message() {
        let completion = ScriptedCompletionService::new()
            .reply("{}")
            .reply("We need to decide.\nSo we output nothing.");

        let response = service_with(completion).search("all orders").await.unwrap();
        assert_eq!(response.follow_up, None);
    }
}

// =============================================================================
// Concurrency
// =============================================================================

mod concurrency_tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_searches_share_one_service() {
        let service = Arc::new(service_with(RoleCompletion::new(
            DELIVERED_AT_LOCKERS,
            "NO_ASSUMPTION_MADE",
        )));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let service = service.clone();
                let query = format!("delivered lockers {}", i);
                tokio::spawn(async move { service.search(&query).await })
            })
            .collect();

        for handle in handles {
            let response = handle.await.unwrap().unwrap();
            assert_eq!(ids(&response.results), vec![1]);
            assert_eq!(response.follow_up, None);
        }
    }
}
