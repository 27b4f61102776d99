//! Query compiler
//!
//! Turns a validated filter into an ordered list of predicates and the
//! matching positional parameters. Predicates are appended in a fixed field
//! order so placeholders and parameters always line up.

use crate::core::error::SearchError;
use crate::core::filter::{OrderFilter, ValidatedFilter, non_blank};
use crate::core::vocabulary::{Axis, DateField};
use crate::query::predicate::{Column, Predicate};
use crate::query::{BASE_SELECT, CompiledQuery, ORDER_BY};

fn date_column(field: DateField) -> Column {
    match field {
        DateField::Created => Column::TimeCreated,
        DateField::Stored => Column::TimeStored,
        DateField::Collected => Column::TimeCollected,
    }
}

/// Whitespace tokens of a free-text field; empty when blank or absent
fn words(value: &Option<String>) -> Vec<String> {
    non_blank(value)
        .map(|s| s.split_whitespace().map(String::from).collect())
        .unwrap_or_default()
}

/// Non-empty set members, or `None` when there is nothing to constrain
fn members(values: &Option<Vec<String>>) -> Option<Vec<String>> {
    values.as_ref().filter(|v| !v.is_empty()).cloned()
}

struct Builder {
    predicates: Vec<Predicate>,
}

impl Builder {
    fn push(&mut self, predicate: Predicate) {
        self.predicates.push(predicate);
    }

    fn contains_all(&mut self, column: Column, value: &Option<String>) {
        let tokens = words(value);
        if !tokens.is_empty() {
            self.push(Predicate::ContainsAll { column, tokens });
        }
    }

    fn contains_none(&mut self, column: Column, value: &Option<String>, null_passes: bool) {
        let tokens = words(value);
        if !tokens.is_empty() {
            self.push(Predicate::ContainsNone {
                column,
                tokens,
                null_passes,
            });
        }
    }

    fn one_of(&mut self, column: Column, values: &Option<Vec<String>>) {
        if let Some(values) = members(values) {
            self.push(Predicate::In { column, values });
        }
    }

    fn none_of(&mut self, column: Column, values: &Option<Vec<String>>, null_passes: bool) {
        if let Some(values) = members(values) {
            self.push(Predicate::NotIn {
                column,
                values,
                null_passes,
            });
        }
    }
}

/// Compile a validated filter
///
/// Never fails: the validator already guaranteed vocabulary membership.
pub fn compile(filter: &ValidatedFilter) -> CompiledQuery {
    let f: &OrderFilter = filter;
    let mut b = Builder {
        predicates: Vec::new(),
    };

    b.contains_all(Column::LocationName, &f.location_name);

    if let Some(location_type) = non_blank(&f.location_type) {
        b.push(Predicate::Equals {
            column: Column::LocationType,
            value: location_type.to_string(),
        });
    }

    let column = date_column(f.resolved_date_field());
    if let Some(from) = non_blank(&f.date_from) {
        b.push(Predicate::DateOnOrAfter {
            column,
            date: from.to_string(),
        });
    }
    if let Some(to) = non_blank(&f.date_to) {
        b.push(Predicate::DateOnOrBefore {
            column,
            date: to.to_string(),
        });
    }

    b.none_of(Column::Status, &f.exclude_status, false);
    b.one_of(Column::Service, &f.service);
    b.contains_all(Column::City, &f.city);
    b.contains_all(Column::CompanyName, &f.company_name);
    b.contains_all(Column::CarrierName, &f.carrier_name);
    b.one_of(Column::CollectedBy, &f.collected_by);

    b.contains_none(Column::LocationName, &f.exclude_location_name, false);
    b.none_of(Column::LocationType, &f.exclude_location_type, false);
    b.contains_none(Column::City, &f.exclude_city, false);
    b.contains_none(Column::CompanyName, &f.exclude_company_name, false);
    b.contains_none(Column::CarrierName, &f.exclude_carrier_name, true);
    b.none_of(Column::Service, &f.exclude_service, false);
    b.none_of(Column::CollectedBy, &f.exclude_collected_by, true);

    if let Some(flags) = members(&f.flags) {
        b.push(Predicate::HasAnyFlag { flags });
    }
    if let Some(flags) = members(&f.exclude_flags) {
        b.push(Predicate::HasNoFlag { flags });
    }

    CompiledQuery::from_predicates(b.predicates)
}

/// Compile a filter that did not come from the validator
///
/// Fails with [`SearchError::InvalidFilter`] on the first enum value
/// outside the vocabulary registry.
pub fn compile_unvalidated(filter: &OrderFilter) -> Result<CompiledQuery, SearchError> {
    let sets: [(&str, &Option<Vec<String>>, Axis); 8] = [
        ("exclude_status", &filter.exclude_status, Axis::Status),
        ("service", &filter.service, Axis::Service),
        ("exclude_service", &filter.exclude_service, Axis::Service),
        ("collected_by", &filter.collected_by, Axis::CollectedBy),
        ("exclude_collected_by", &filter.exclude_collected_by, Axis::CollectedBy),
        ("exclude_location_type", &filter.exclude_location_type, Axis::LocationType),
        ("flags", &filter.flags, Axis::Flag),
        ("exclude_flags", &filter.exclude_flags, Axis::Flag),
    ];

    for (field, values, axis) in sets {
        if let Some(bad) = values.iter().flatten().find(|v| !axis.contains(v)) {
            return Err(SearchError::InvalidFilter {
                field: field.to_string(),
                value: bad.clone(),
            });
        }
    }

    let scalars = [
        ("location_type", non_blank(&filter.location_type), Axis::LocationType),
        ("date_field", non_blank(&filter.date_field), Axis::DateField),
    ];
    for (field, value, axis) in scalars {
        if let Some(bad) = value.filter(|v| !axis.contains(v)) {
            return Err(SearchError::InvalidFilter {
                field: field.to_string(),
                value: bad.to_string(),
            });
        }
    }

    Ok(compile(&ValidatedFilter::new(filter.clone())))
}

/// Full statement text for a WHERE clause
pub(crate) fn statement(where_clause: &str) -> String {
    format!("{} WHERE {}{}", BASE_SELECT, where_clause, ORDER_BY)
}
