//! Core error types for questline-core.
//!
//! The engines are total over their valid input domain, so the taxonomy is
//! narrow: only provably-invalid input is rejected, because it indicates an
//! upstream data bug the UI should surface rather than mask. Degenerate but
//! valid input (empty history, zero velocity, absent targets) is never an
//! error; it resolves to a neutral result instead.

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Core error type for questline-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Invalid-input errors reported to the immediate caller.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum ValidationError {
    /// Cumulative XP below zero indicates a caller bug, not a score
    #[error("cumulative XP must be non-negative, got {xp}")]
    NegativeXp { xp: i64 },

    /// A numeric field was NaN or infinite
    #[error("non-finite value in '{field}'")]
    NonFinite { field: &'static str },

    /// Goal end date precedes its start date
    #[error("goal end date {end} is before start date {start}")]
    EndBeforeStart {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
}
