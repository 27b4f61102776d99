//! Query compilation over the orders join
//!
//! The base relation is fixed: orders inner-joined with locations and
//! companies, left-joined with carriers. Results are always ordered by
//! creation time, newest first.

pub mod compiler;
pub mod predicate;

pub use compiler::{compile, compile_unvalidated};
pub use predicate::{Column, Predicate};

use crate::core::order::OrderRow;
use std::cmp::Reverse;

/// Projection and joins shared by every search
pub const BASE_SELECT: &str = "SELECT o.id, o.tracking_no, o.order_no, o.service, o.status, \
     o.collected_by_type, o.recipient_phone, o.compartment_no, o.time_created, o.time_stored, \
     o.time_collected, o.expires_at, o.flags, l.name AS location_name, l.location_type, l.city, \
     c.name AS company_name, car.name AS carrier_name \
     FROM orders o \
     INNER JOIN locations l ON o.location_id = l.id \
     INNER JOIN companies c ON o.company_id = c.id \
     LEFT JOIN carriers car ON o.carrier_id = car.id";

/// Fixed result ordering
pub const ORDER_BY: &str = " ORDER BY o.time_created DESC";

/// Predicate list plus its rendered WHERE clause and positional parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledQuery {
    /// Conjuncts in compilation order
    pub predicates: Vec<Predicate>,
    /// `1=1` followed by one `AND` per predicate
    pub where_clause: String,
    /// Bind values in placeholder order
    pub params: Vec<String>,
}

impl CompiledQuery {
    pub(crate) fn from_predicates(predicates: Vec<Predicate>) -> Self {
        let mut params = Vec::new();
        let mut where_clause = String::from("1=1");
        for predicate in &predicates {
            where_clause.push_str(" AND ");
            where_clause.push_str(&predicate.to_sql(&mut params));
        }

        Self {
            predicates,
            where_clause,
            params,
        }
    }

    /// Complete SELECT statement
    pub fn sql(&self) -> String {
        compiler::statement(&self.where_clause)
    }

    /// Number of `?` placeholders in the WHERE clause
    pub fn placeholder_count(&self) -> usize {
        self.where_clause.matches('?').count()
    }

    /// True when every predicate accepts the row
    pub fn matches(&self, row: &OrderRow) -> bool {
        self.predicates.iter().all(|p| p.matches(row))
    }

    /// Apply the predicates and the fixed ordering to in-memory rows
    pub fn apply<'a>(&self, rows: impl IntoIterator<Item = &'a OrderRow>) -> Vec<OrderRow> {
        let mut selected: Vec<OrderRow> = rows
            .into_iter()
            .filter(|row| self.matches(row))
            .cloned()
            .collect();
        selected.sort_by_key(|row| Reverse(row.time_created));
        selected
    }
}
