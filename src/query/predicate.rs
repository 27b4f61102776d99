//! Typed predicates over the orders join
//!
//! A predicate renders to a MySQL fragment with `?` placeholders and can
//! also be evaluated against an [`OrderRow`] directly. Both paths share
//! SQL's null semantics: a comparison against a null column fails unless
//! the predicate explicitly lets nulls pass.

use crate::core::order::OrderRow;
use chrono::{NaiveDate, NaiveDateTime};

/// Columns of the fixed four-table join that predicates may reference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    LocationName,
    LocationType,
    City,
    CompanyName,
    CarrierName,
    Status,
    Service,
    CollectedBy,
    Flags,
    TimeCreated,
    TimeStored,
    TimeCollected,
}

impl Column {
    /// Qualified SQL column reference
    pub fn sql(self) -> &'static str {
        match self {
            Column::LocationName => "l.name",
            Column::LocationType => "l.location_type",
            Column::City => "l.city",
            Column::CompanyName => "c.name",
            Column::CarrierName => "car.name",
            Column::Status => "o.status",
            Column::Service => "o.service",
            Column::CollectedBy => "o.collected_by_type",
            Column::Flags => "o.flags",
            Column::TimeCreated => "o.time_created",
            Column::TimeStored => "o.time_stored",
            Column::TimeCollected => "o.time_collected",
        }
    }

    /// Text value of this column in a projected row
    fn text(self, row: &OrderRow) -> Option<&str> {
        match self {
            Column::LocationName => row.location_name.as_deref(),
            Column::LocationType => row.location_type.as_deref(),
            Column::City => row.city.as_deref(),
            Column::CompanyName => row.company_name.as_deref(),
            Column::CarrierName => row.carrier_name.as_deref(),
            Column::Status => row.status.as_deref(),
            Column::Service => row.service.as_deref(),
            Column::CollectedBy => row.collected_by_type.as_deref(),
            Column::Flags => row.flags.as_deref(),
            Column::TimeCreated | Column::TimeStored | Column::TimeCollected => None,
        }
    }

    /// Timestamp value of this column in a projected row
    fn timestamp(self, row: &OrderRow) -> Option<NaiveDateTime> {
        match self {
            Column::TimeCreated => Some(row.time_created),
            Column::TimeStored => row.time_stored,
            Column::TimeCollected => row.time_collected,
            _ => None,
        }
    }
}

/// A single conjunct of the compiled WHERE clause
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// Every token is a case-insensitive substring of the column
    ContainsAll { column: Column, tokens: Vec<String> },

    /// No token is a case-insensitive substring of the column
    ContainsNone {
        column: Column,
        tokens: Vec<String>,
        null_passes: bool,
    },

    /// Column equals the value
    Equals { column: Column, value: String },

    /// Column is one of the values
    In { column: Column, values: Vec<String> },

    /// Column is none of the values
    NotIn {
        column: Column,
        values: Vec<String>,
        null_passes: bool,
    },

    /// The flags column holds at least one of the tokens
    HasAnyFlag { flags: Vec<String> },

    /// The flags column holds none of the tokens; a null column passes
    HasNoFlag { flags: Vec<String> },

    /// Date portion of the column is on or after the bound
    DateOnOrAfter { column: Column, date: String },

    /// Date portion of the column is on or before the bound
    DateOnOrBefore { column: Column, date: String },
}

/// Escape LIKE metacharacters so a token matches literally
fn escape_like(token: &str) -> String {
    let mut escaped = String::with_capacity(token.len() + 2);
    for ch in token.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(ch);
    }
    escaped
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

fn like_any(column: Column, tokens: &[String], joiner: &str, params: &mut Vec<String>) -> String {
    let clauses: Vec<String> = tokens
        .iter()
        .map(|token| {
            params.push(format!("%{}%", escape_like(token)));
            format!("LOWER({}) LIKE LOWER(?)", column.sql())
        })
        .collect();
    clauses.join(joiner)
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn date_portion(column: Column, row: &OrderRow) -> Option<NaiveDate> {
    column.timestamp(row).map(|ts| ts.date())
}

fn has_any_flag(row: &OrderRow, flags: &[String]) -> bool {
    row.flag_tokens().any(|t| flags.iter().any(|f| f == t))
}

fn parse_bound(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").ok()
}

impl Predicate {
    /// Render this predicate, pushing its parameters in placeholder order
    pub fn to_sql(&self, params: &mut Vec<String>) -> String {
        match self {
            Predicate::ContainsAll { column, tokens } => {
                format!("({})", like_any(*column, tokens, " AND ", params))
            }
            Predicate::ContainsNone {
                column,
                tokens,
                null_passes,
            } => {
                let any = like_any(*column, tokens, " OR ", params);
                if *null_passes {
                    format!("({} IS NULL OR NOT ({}))", column.sql(), any)
                } else {
                    format!("NOT ({})", any)
                }
            }
            Predicate::Equals { column, value } => {
                params.push(value.clone());
                format!("{} = ?", column.sql())
            }
            Predicate::In { column, values } => {
                params.extend(values.iter().cloned());
                format!("{} IN ({})", column.sql(), placeholders(values.len()))
            }
            Predicate::NotIn {
                column,
                values,
                null_passes,
            } => {
                params.extend(values.iter().cloned());
                let not_in = format!("{} NOT IN ({})", column.sql(), placeholders(values.len()));
                if *null_passes {
                    format!("({} IS NULL OR {})", column.sql(), not_in)
                } else {
                    not_in
                }
            }
            Predicate::HasAnyFlag { flags } => {
                params.extend(flags.iter().cloned());
                let clauses = vec!["FIND_IN_SET(?, o.flags) > 0"; flags.len()];
                format!("({})", clauses.join(" OR "))
            }
            Predicate::HasNoFlag { flags } => {
                params.extend(flags.iter().cloned());
                let clauses = vec!["FIND_IN_SET(?, o.flags) = 0"; flags.len()];
                format!("(o.flags IS NULL OR ({}))", clauses.join(" AND "))
            }
            Predicate::DateOnOrAfter { column, date } => {
                params.push(date.clone());
                format!("DATE({}) >= ?", column.sql())
            }
            Predicate::DateOnOrBefore { column, date } => {
                params.push(date.clone());
                format!("DATE({}) <= ?", column.sql())
            }
        }
    }

    /// Evaluate this predicate against a row
    pub fn matches(&self, row: &OrderRow) -> bool {
        match self {
            Predicate::ContainsAll { column, tokens } => column
                .text(row)
                .is_some_and(|value| tokens.iter().all(|t| contains_ci(value, t))),
            Predicate::ContainsNone {
                column,
                tokens,
                null_passes,
            } => match column.text(row) {
                Some(value) => !tokens.iter().any(|t| contains_ci(value, t)),
                None => *null_passes,
            },
            Predicate::Equals { column, value } => column.text(row) == Some(value.as_str()),
            Predicate::In { column, values } => column
                .text(row)
                .is_some_and(|value| values.iter().any(|v| v == value)),
            Predicate::NotIn {
                column,
                values,
                null_passes,
            } => match column.text(row) {
                Some(value) => !values.iter().any(|v| v == value),
                None => *null_passes,
            },
            Predicate::HasAnyFlag { flags } => has_any_flag(row, flags),
            Predicate::HasNoFlag { flags } => !has_any_flag(row, flags),
            Predicate::DateOnOrAfter { column, date } => {
                match (date_portion(*column, row), parse_bound(date)) {
                    (Some(day), Some(bound)) => day >= bound,
                    _ => false,
                }
            }
            Predicate::DateOnOrBefore { column, date } => {
                match (date_portion(*column, row), parse_bound(date)) {
                    (Some(day), Some(bound)) => day <= bound,
                    _ => false,
                }
            }
        }
    }
}
