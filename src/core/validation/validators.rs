//! Reusable vocabulary scrubbers
//!
//! Each scrubber removes values outside an axis vocabulary in place and
//! appends one warning per rejected value.

use crate::core::vocabulary::Axis;

/// Warning text for a value rejected from `axis`
pub fn unknown_value_warning(axis: Axis, value: &str) -> String {
    format!(
        "Unknown {} '{}' was ignored. {}: {}",
        axis.noun(),
        value,
        axis.plural_label(),
        axis.joined()
    )
}

/// Scrubber: keep only vocabulary members of a set-valued field
///
/// Order and duplicates of accepted members are preserved.
pub fn retain_known(values: &mut Option<Vec<String>>, axis: Axis, warnings: &mut Vec<String>) {
    let Some(list) = values.as_mut() else {
        return;
    };

    list.retain(|value| {
        if axis.contains(value) {
            true
        } else {
            tracing::warn!(axis = %axis, value = %value, "dropping unknown filter value");
            warnings.push(unknown_value_warning(axis, value));
            false
        }
    });
}

/// Scrubber: clear a single-valued field that is outside the vocabulary
///
/// Blank values are cleared without a warning.
pub fn clear_unknown(value: &mut Option<String>, axis: Axis, warnings: &mut Vec<String>) {
    let Some(current) = value.as_deref() else {
        return;
    };

    if current.trim().is_empty() {
        *value = None;
    } else if !axis.contains(current) {
        tracing::warn!(axis = %axis, value = %current, "dropping unknown filter value");
        warnings.push(unknown_value_warning(axis, current));
        *value = None;
    }
}
