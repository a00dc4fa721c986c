//! Cell formatting helpers shared by export call sites.
//!
//! Exports render money with two decimals and absent optional values as
//! empty cells, so those conventions live here rather than being repeated
//! per module.

use std::fmt::Display;

/// Formats a monetary amount with two decimal places.
#[must_use]
pub fn money(value: f64) -> String {
    format!("{value:.2}")
}

/// Formats an optional value, rendering `None` as an empty cell.
#[must_use]
pub fn optional<T: Display>(value: Option<&T>) -> String {
    value.map_or_else(String::new, ToString::to_string)
}

/// Formats a boolean as `Yes`/`No` for human-facing exports.
#[must_use]
pub const fn flag(value: bool) -> &'static str {
    if value { "Yes" } else { "No" }
}
