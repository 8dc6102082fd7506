//! Clock abstraction for deterministic time handling.
//!
//! No engine in this crate reads the system clock directly. Every entry point
//! takes an explicit reference instant, and only the outermost caller may fall
//! back to real time via [`now`]. This keeps the engines deterministic and
//! makes the product's "time travel" debug mode a matter of passing a
//! different instant -- there is no mutable clock override anywhere inside
//! the core.

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};

/// Resolve a reference instant, falling back to the real clock.
///
/// Returns `reference` unchanged when supplied, otherwise the current
/// instant. Engines never call this themselves; it exists for the
/// application boundary, where "no override" should mean "real time".
pub fn now(reference: Option<DateTime<Utc>>) -> DateTime<Utc> {
    reference.unwrap_or_else(Utc::now)
}

/// Calendar day containing `instant` under the given fixed UTC offset.
///
/// Engines that bucket activity by day call this once per input timestamp and
/// once for the reference instant, so "today" is evaluated a single time per
/// computation and cannot drift across a midnight boundary mid-call.
pub fn day_of(instant: DateTime<Utc>, timezone: FixedOffset) -> NaiveDate {
    instant.with_timezone(&timezone).date_naive()
}
