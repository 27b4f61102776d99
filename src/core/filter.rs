//! The structured order filter
//!
//! `OrderFilter` is the wire shape proposed by the completion service: every
//! field is optional and absence means "unconstrained". `ValidatedFilter` is
//! the same record after the validator has scrubbed it; only the validator
//! can construct one, so downstream code can rely on vocabulary membership.

use crate::core::vocabulary::DateField;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::ops::Deref;

/// Structured search intent over orders
///
/// Unknown keys are ignored when decoding so the model may emit extra
/// fields without breaking extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_type: Option<String>,

    /// Inclusive lower bound, `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,

    /// Inclusive upper bound, `YYYY-MM-DD`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,

    /// `CREATED`, `STORED` or `COLLECTED`; canonical upper case once validated
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_field: Option<String>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "one_or_many"
    )]
    pub exclude_status: Option<Vec<String>>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "one_or_many"
    )]
    pub collected_by: Option<Vec<String>>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "one_or_many"
    )]
    pub service: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub carrier_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_location_name: Option<String>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "one_or_many"
    )]
    pub exclude_location_type: Option<Vec<String>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_company_name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_carrier_name: Option<String>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "one_or_many"
    )]
    pub exclude_service: Option<Vec<String>>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "one_or_many"
    )]
    pub exclude_collected_by: Option<Vec<String>>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "one_or_many"
    )]
    pub flags: Option<Vec<String>>,

    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "one_or_many"
    )]
    pub exclude_flags: Option<Vec<String>>,
}

/// Accept `null`, a single string, or an array of strings for list fields.
///
/// Non-string array members are dropped rather than failing the whole filter.
fn one_or_many<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(vec![s])),
        Some(Value::Array(items)) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect(),
        )),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or an array of strings, got {}",
            other
        ))),
    }
}

/// Returns the value only if it has non-whitespace content
pub(crate) fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl OrderFilter {
    /// True when either date bound carries a value
    pub fn has_date_range(&self) -> bool {
        non_blank(&self.date_from).is_some() || non_blank(&self.date_to).is_some()
    }

    /// True when no field would contribute a predicate
    pub fn is_unconstrained(&self) -> bool {
        let scalars = [
            &self.location_name,
            &self.location_type,
            &self.date_from,
            &self.date_to,
            &self.city,
            &self.company_name,
            &self.carrier_name,
            &self.exclude_location_name,
            &self.exclude_city,
            &self.exclude_company_name,
            &self.exclude_carrier_name,
        ];
        let sets = [
            &self.exclude_status,
            &self.collected_by,
            &self.service,
            &self.exclude_location_type,
            &self.exclude_service,
            &self.exclude_collected_by,
            &self.flags,
            &self.exclude_flags,
        ];

        scalars.iter().all(|s| non_blank(s).is_none())
            && sets.iter().all(|s| s.as_ref().is_none_or(|v| v.is_empty()))
    }

    /// The date column selector, falling back to `CREATED`
    pub fn resolved_date_field(&self) -> DateField {
        self.date_field
            .as_deref()
            .and_then(DateField::parse)
            .unwrap_or_default()
    }
}

/// An `OrderFilter` that has passed through the validator
///
/// Every enum-valued member belongs to the vocabulary registry and
/// `date_field`, when present, is one of the canonical tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidatedFilter(OrderFilter);

impl ValidatedFilter {
    pub(crate) fn new(filter: OrderFilter) -> Self {
        Self(filter)
    }
}

impl Deref for ValidatedFilter {
    type Target = OrderFilter;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_ignores_unknown_keys() {
        let filter: OrderFilter =
            serde_json::from_value(json!({"city": "Paris", "confidence": 0.9})).unwrap();
        assert_eq!(filter.city.as_deref(), Some("Paris"));
        assert_eq!(
            filter,
            OrderFilter {
                city: Some("Paris".into()),
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_decode_single_string_as_list() {
        let filter: OrderFilter =
            serde_json::from_value(json!({"service": "DELIVERY", "flags": null})).unwrap();
        assert_eq!(filter.service, Some(vec!["DELIVERY".to_string()]));
        assert_eq!(filter.flags, None);
    }

    #[test]
    fn test_decode_drops_non_string_members() {
        let filter: OrderFilter =
            serde_json::from_value(json!({"exclude_status": ["EXPIRED", 3, null]})).unwrap();
        assert_eq!(filter.exclude_status, Some(vec!["EXPIRED".to_string()]));
    }

    #[test]
    fn test_decode_rejects_object_for_list() {
        let result: Result<OrderFilter, _> =
            serde_json::from_value(json!({"service": {"name": "DELIVERY"}}));
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_skips_absent_fields() {
        let filter = OrderFilter {
            location_type: Some("LOCKER".into()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&filter).unwrap(),
            json!({"location_type": "LOCKER"})
        );
    }

    #[test]
    fn test_unconstrained_ignores_blank_and_empty() {
        let filter = OrderFilter {
            city: Some("   ".into()),
            service: Some(vec![]),
            ..Default::default()
        };
        assert!(filter.is_unconstrained());

        let filter = OrderFilter {
            flags: Some(vec!["VIP".into()]),
            ..Default::default()
        };
        assert!(!filter.is_unconstrained());
    }

    #[test]
    fn test_resolved_date_field_defaults_to_created() {
        assert_eq!(OrderFilter::default().resolved_date_field(), DateField::Created);
        let filter = OrderFilter {
            date_field: Some("stored".into()),
            ..Default::default()
        };
        assert_eq!(filter.resolved_date_field(), DateField::Stored);
    }
}
