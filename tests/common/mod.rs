//! Shared fixtures for integration tests
//!
//! Four joined order rows covering every location type in use, a missing
//! carrier, comma-joined flags and dates on both sides of a month boundary.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use nlsearch::core::{CompletionError, CompletionRequest, CompletionService, OrderRow};
use nlsearch::storage::InMemoryOrderStore;

pub const DELIVERED_AT_LOCKERS: &str = r#"{"exclude_status":["CREATED","COURIER_STORED","CUSTOMER_STORED","OPERATOR_COLLECTED","EXPIRED"],"location_type":"LOCKER"}"#;

pub fn at(year: i32, month: u32, day: u32, hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 2, 10).unwrap()
}

pub fn seed_rows() -> Vec<OrderRow> {
    vec![
        OrderRow {
            id: 1,
            tracking_no: Some("TRK-0001".into()),
            order_no: Some("ORD-0001".into()),
            service: Some("DELIVERY".into()),
            status: Some("DELIVERED".into()),
            collected_by_type: Some("CUSTOMER".into()),
            recipient_phone: Some("+85250000001".into()),
            compartment_no: Some(12),
            time_created: at(2026, 1, 10, 9),
            time_stored: Some(at(2026, 1, 11, 10)),
            time_collected: Some(at(2026, 1, 12, 18)),
            expires_at: None,
            flags: Some("FRAGILE".into()),
            location_name: Some("ABI Graphique Demo Locker Normal".into()),
            location_type: Some("LOCKER".into()),
            city: Some("Hong Kong".into()),
            company_name: Some("ABI Graphique Demo".into()),
            carrier_name: Some("DHL".into()),
        },
        OrderRow {
            id: 2,
            tracking_no: Some("TRK-0002".into()),
            order_no: Some("ORD-0002".into()),
            service: Some("DELIVERY".into()),
            status: Some("EXPIRED".into()),
            collected_by_type: None,
            recipient_phone: None,
            compartment_no: None,
            time_created: at(2026, 1, 20, 14),
            time_stored: Some(at(2026, 1, 21, 8)),
            time_collected: None,
            expires_at: Some(at(2026, 1, 28, 8)),
            flags: Some("EXPIRED,VIP".into()),
            location_name: Some("Location A".into()),
            location_type: Some("PUDO".into()),
            city: Some("Paris".into()),
            company_name: Some("Demo Company".into()),
            carrier_name: None,
        },
        OrderRow {
            id: 3,
            tracking_no: Some("TRK-0003".into()),
            order_no: Some("ORD-0003".into()),
            service: Some("RETURNS".into()),
            status: Some("CREATED".into()),
            collected_by_type: None,
            recipient_phone: None,
            compartment_no: None,
            time_created: at(2026, 2, 3, 11),
            time_stored: None,
            time_collected: None,
            expires_at: None,
            flags: None,
            location_name: Some("7Eleven Kwai Chung - PUDO".into()),
            location_type: Some("PUDO".into()),
            city: Some("Hong Kong".into()),
            company_name: Some("7Eleven Kwai Chung".into()),
            carrier_name: Some("SF Express".into()),
        },
        OrderRow {
            id: 4,
            tracking_no: Some("TRK-0004".into()),
            order_no: Some("ORD-0004".into()),
            service: Some("DELIVERY".into()),
            status: Some("CUSTOMER_STORED".into()),
            collected_by_type: None,
            recipient_phone: Some("+85250000004".into()),
            compartment_no: Some(3),
            time_created: at(2025, 12, 28, 16),
            time_stored: Some(at(2026, 1, 2, 9)),
            time_collected: None,
            expires_at: Some(at(2026, 1, 9, 9)),
            flags: Some("VIP".into()),
            location_name: Some("alfred24 Office Locker".into()),
            location_type: Some("LOCKER".into()),
            city: Some("Hong Kong".into()),
            company_name: Some("Demo Company".into()),
            carrier_name: Some("UPS".into()),
        },
    ]
}

pub fn seeded_store() -> InMemoryOrderStore {
    InMemoryOrderStore::with_rows(seed_rows())
}

pub fn ids(rows: &[OrderRow]) -> Vec<i64> {
    rows.iter().map(|r| r.id).collect()
}

/// Answers interpretation calls with a fixed filter and follow-up calls
/// with a fixed text, regardless of call order
#[derive(Clone)]
pub struct RoleCompletion {
    pub filter_json: String,
    pub follow_up: String,
}

impl RoleCompletion {
    pub fn new(filter_json: &str, follow_up: &str) -> Self {
        Self {
            filter_json: filter_json.to_string(),
            follow_up: follow_up.to_string(),
        }
    }
}

#[async_trait]
impl CompletionService for RoleCompletion {
    async fn complete(&self, request: CompletionRequest) -> Result<String, CompletionError> {
        if request.system_instructions.contains("structured JSON filters") {
            Ok(self.filter_json.clone())
        } else {
            Ok(self.follow_up.clone())
        }
    }
}
