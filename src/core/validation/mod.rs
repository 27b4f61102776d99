//! Filter validation
//!
//! Scrubs a candidate filter against the vocabulary registry. Validation
//! never fails: invalid values are dropped with a warning, and implicit
//! decisions the system takes on the user's behalf are recorded as
//! assumptions. Pure and deterministic.

pub mod validators;

use crate::core::filter::{OrderFilter, ValidatedFilter, non_blank};
use crate::core::vocabulary::{Axis, DateField};
use validators::{clear_unknown, retain_known};

/// Assumption recorded when a date range silently applies to creation time
pub const DEFAULT_DATE_FIELD_ASSUMPTION: &str = "Date filter defaulted to order creation time. \
     To filter by stored or collected time, specify 'stored' or 'collected' in your query.";

/// Query tokens taken as evidence that the user chose a date field
const DATE_FIELD_HINTS: &[&str] = &["created", "creation", "stored", "collected"];

/// Result of one validation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationOutcome {
    /// The scrubbed filter
    pub filter: ValidatedFilter,
    /// One entry per rejected value, in field order
    pub warnings: Vec<String>,
    /// Implicit decisions made while cleaning
    pub assumptions: Vec<String>,
}

impl ValidationOutcome {
    pub fn into_parts(self) -> (ValidatedFilter, Vec<String>, Vec<String>) {
        (self.filter, self.warnings, self.assumptions)
    }
}

/// Validate a candidate filter against the vocabulary registry
///
/// The candidate is not modified; the cleaned copy is returned. The
/// original query text is only consulted to decide whether a defaulted
/// date field must be reported as an assumption.
pub fn validate(candidate: &OrderFilter, original_query: &str) -> ValidationOutcome {
    let mut filter = candidate.clone();
    let mut warnings = Vec::new();
    let mut assumptions = Vec::new();

    retain_known(&mut filter.exclude_status, Axis::Status, &mut warnings);
    retain_known(&mut filter.service, Axis::Service, &mut warnings);
    retain_known(&mut filter.exclude_service, Axis::Service, &mut warnings);
    retain_known(&mut filter.collected_by, Axis::CollectedBy, &mut warnings);
    retain_known(&mut filter.exclude_collected_by, Axis::CollectedBy, &mut warnings);
    clear_unknown(&mut filter.location_type, Axis::LocationType, &mut warnings);
    retain_known(&mut filter.exclude_location_type, Axis::LocationType, &mut warnings);
    retain_known(&mut filter.flags, Axis::Flag, &mut warnings);
    retain_known(&mut filter.exclude_flags, Axis::Flag, &mut warnings);

    let explicit_date_field = normalize_date_field(&mut filter, &mut warnings);

    if filter.has_date_range() {
        if filter.date_field.is_none() {
            filter.date_field = Some(DateField::Created.as_str().to_string());
        }
        if !explicit_date_field && !mentions_date_field(original_query) {
            assumptions.push(DEFAULT_DATE_FIELD_ASSUMPTION.to_string());
        }
    }

    ValidationOutcome {
        filter: ValidatedFilter::new(filter),
        warnings,
        assumptions,
    }
}

/// Canonicalize `date_field`, coercing unrecognized tokens to `CREATED`.
///
/// Returns true only when the candidate named a recognized field itself.
fn normalize_date_field(filter: &mut OrderFilter, warnings: &mut Vec<String>) -> bool {
    let Some(raw) = non_blank(&filter.date_field).map(str::to_string) else {
        filter.date_field = None;
        return false;
    };

    match DateField::parse(&raw) {
        Some(field) => {
            filter.date_field = Some(field.as_str().to_string());
            true
        }
        None => {
            tracing::warn!(value = %raw, "coercing unknown date field to CREATED");
            warnings.push(format!(
                "Unknown date field '{}'. Using CREATED as default.",
                raw
            ));
            filter.date_field = Some(DateField::Created.as_str().to_string());
            false
        }
    }
}

/// Case-insensitive substring scan for date field keywords
///
/// Synonyms ("picked up", "dropped off") are not recognized.
fn mentions_date_field(query: &str) -> bool {
    let lower = query.to_lowercase();
    DATE_FIELD_HINTS.iter().any(|hint| lower.contains(hint))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Option<Vec<String>> {
        Some(values.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_unknown_service_is_dropped_with_one_warning() {
        let candidate = OrderFilter {
            service: strings(&["DELIVERY", "TELEPORT"]),
            ..Default::default()
        };
        let outcome = validate(&candidate, "delivery orders");

        assert_eq!(outcome.filter.service, strings(&["DELIVERY"]));
        assert_eq!(outcome.warnings.len(), 1);
        assert!(outcome.warnings[0].contains("TELEPORT"));
        assert!(outcome.assumptions.is_empty());
    }

    #[test]
    fn test_candidate_is_left_untouched() {
        let candidate = OrderFilter {
            flags: strings(&["VIP", "SHINY"]),
            ..Default::default()
        };
        let _ = validate(&candidate, "vip");
        assert_eq!(candidate.flags, strings(&["VIP", "SHINY"]));
    }

    #[test]
    fn test_every_enum_axis_is_scrubbed() {
        let candidate = OrderFilter {
            exclude_status: strings(&["EXPIRED", "LOST"]),
            service: strings(&["X1"]),
            exclude_service: strings(&["X2"]),
            collected_by: strings(&["DRONE"]),
            exclude_collected_by: strings(&["CUSTOMER", "ROBOT"]),
            location_type: Some("MOON".into()),
            exclude_location_type: strings(&["LOCKER", "CAVE"]),
            flags: strings(&["HEAVY"]),
            exclude_flags: strings(&["FRAGILE", "COLD"]),
            ..Default::default()
        };
        let outcome = validate(&candidate, "anything");

        assert_eq!(outcome.warnings.len(), 9);
        assert_eq!(outcome.filter.exclude_status, strings(&["EXPIRED"]));
        assert_eq!(outcome.filter.service, strings(&[]));
        assert_eq!(outcome.filter.exclude_collected_by, strings(&["CUSTOMER"]));
        assert_eq!(outcome.filter.location_type, None);
        assert_eq!(outcome.filter.exclude_location_type, strings(&["LOCKER"]));
        assert_eq!(outcome.filter.exclude_flags, strings(&["FRAGILE"]));
    }

    #[test]
    fn test_free_text_fields_pass_through() {
        let candidate = OrderFilter {
            location_name: Some("Nowhere Depot".into()),
            city: Some("Atlantis".into()),
            exclude_carrier_name: Some("Pigeon Post".into()),
            ..Default::default()
        };
        let outcome = validate(&candidate, "orders at nowhere depot");
        assert_eq!(*outcome.filter, candidate);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_date_from_without_field_records_assumption() {
        let candidate = OrderFilter {
            date_from: Some("2026-01-01".into()),
            ..Default::default()
        };
        let outcome = validate(&candidate, "orders since January");

        assert_eq!(outcome.filter.date_field.as_deref(), Some("CREATED"));
        assert_eq!(outcome.assumptions, vec![DEFAULT_DATE_FIELD_ASSUMPTION.to_string()]);
        assert!(outcome.warnings.is_empty());
    }

    #[test]
    fn test_date_keyword_in_query_suppresses_assumption() {
        let candidate = OrderFilter {
            date_from: Some("2026-01-01".into()),
            ..Default::default()
        };
        let outcome = validate(&candidate, "orders Collected since January");

        assert_eq!(outcome.filter.date_field.as_deref(), Some("CREATED"));
        assert!(outcome.assumptions.is_empty());
    }

    #[test]
    fn test_explicit_date_field_is_not_an_assumption() {
        let candidate = OrderFilter {
            date_to: Some("2026-02-01".into()),
            date_field: Some("created".into()),
            ..Default::default()
        };
        let outcome = validate(&candidate, "orders before February");

        assert_eq!(outcome.filter.date_field.as_deref(), Some("CREATED"));
        assert!(outcome.assumptions.is_empty());
    }

    #[test]
    fn test_unknown_date_field_is_coerced() {
        let candidate = OrderFilter {
            date_from: Some("2026-01-01".into()),
            date_field: Some("UPDATED".into()),
            ..Default::default()
        };
        let outcome = validate(&candidate, "orders updated in 2026");

        assert_eq!(outcome.filter.date_field.as_deref(), Some("CREATED"));
        assert_eq!(
            outcome.warnings,
            vec!["Unknown date field 'UPDATED'. Using CREATED as default.".to_string()]
        );
        assert_eq!(outcome.assumptions.len(), 1);
    }

    #[test]
    fn test_date_field_without_range_needs_no_assumption() {
        let candidate = OrderFilter {
            date_field: Some("STORED".into()),
            ..Default::default()
        };
        let outcome = validate(&candidate, "orders");
        assert_eq!(outcome.filter.date_field.as_deref(), Some("STORED"));
        assert!(outcome.assumptions.is_empty());
    }

    #[test]
    fn test_validation_is_idempotent() {
        let candidate = OrderFilter {
            exclude_status: strings(&["EXPIRED", "LOST"]),
            location_type: Some("CAVE".into()),
            date_from: Some("2026-01-01".into()),
            date_field: Some("sometime".into()),
            flags: strings(&["VIP", "SPARKLY"]),
            city: Some("Paris".into()),
            ..Default::default()
        };
        let first = validate(&candidate, "vip orders in paris");
        let second = validate(&first.filter, "vip orders in paris");

        assert_eq!(second.filter, first.filter);
        assert!(second.warnings.is_empty());
    }
}
