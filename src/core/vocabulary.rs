//! Vocabulary registry
//!
//! Fixed enumerations of legal values for every enum-valued filter axis.
//! These are compile-time constants: the store schema defines them, not
//! runtime configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Order lifecycle statuses
pub const STATUSES: &[&str] = &[
    "CREATED",
    "COURIER_STORED",
    "CUSTOMER_STORED",
    "DELIVERED",
    "OPERATOR_COLLECTED",
    "EXPIRED",
];

/// Service lines
pub const SERVICES: &[&str] = &["DELIVERY", "RETURNS"];

/// Who collected the parcel out of its compartment
pub const COLLECTORS: &[&str] = &["COURIER", "CUSTOMER", "OPERATOR"];

/// Kinds of pickup location
pub const LOCATION_TYPES: &[&str] = &["PUDO", "LOCKER", "WAREHOUSE", "STORE"];

/// Tokens that may appear in the comma-joined `flags` column
pub const FLAGS: &[&str] = &["FRAGILE", "VIP", "EXPIRED"];

/// Timestamp selectors accepted by `date_field`
pub const DATE_FIELDS: &[&str] = &["CREATED", "STORED", "COLLECTED"];

/// A filter axis whose values are restricted to a fixed vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Status,
    Service,
    CollectedBy,
    LocationType,
    Flag,
    DateField,
}

impl Axis {
    /// Every axis, in registry order
    pub const ALL: [Axis; 6] = [
        Axis::Status,
        Axis::Service,
        Axis::CollectedBy,
        Axis::LocationType,
        Axis::Flag,
        Axis::DateField,
    ];

    /// Legal values for this axis
    pub fn values(self) -> &'static [&'static str] {
        match self {
            Axis::Status => STATUSES,
            Axis::Service => SERVICES,
            Axis::CollectedBy => COLLECTORS,
            Axis::LocationType => LOCATION_TYPES,
            Axis::Flag => FLAGS,
            Axis::DateField => DATE_FIELDS,
        }
    }

    /// Exact (case-sensitive) membership test
    pub fn contains(self, value: &str) -> bool {
        self.values().contains(&value)
    }

    /// Singular noun used in warnings ("Unknown status 'X'")
    pub fn noun(self) -> &'static str {
        match self {
            Axis::Status => "status",
            Axis::Service => "service",
            Axis::CollectedBy => "collected_by",
            Axis::LocationType => "location type",
            Axis::Flag => "flag",
            Axis::DateField => "date field",
        }
    }

    /// Label for the accepted set ("Valid statuses: ...")
    pub fn plural_label(self) -> &'static str {
        match self {
            Axis::Status => "Valid statuses",
            Axis::Service => "Valid services",
            Axis::CollectedBy => "Valid values",
            Axis::LocationType => "Valid types",
            Axis::Flag => "Valid flags",
            Axis::DateField => "Valid date fields",
        }
    }

    /// Comma-separated rendering of the vocabulary
    pub fn joined(self) -> String {
        self.values().join(", ")
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Which lifecycle timestamp a date range applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DateField {
    #[default]
    Created,
    Stored,
    Collected,
}

impl DateField {
    /// Case-insensitive parse of a `date_field` token
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_uppercase().as_str() {
            "CREATED" => Some(DateField::Created),
            "STORED" => Some(DateField::Stored),
            "COLLECTED" => Some(DateField::Collected),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DateField::Created => "CREATED",
            DateField::Stored => "STORED",
            DateField::Collected => "COLLECTED",
        }
    }
}

impl fmt::Display for DateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
