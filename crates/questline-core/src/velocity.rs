//! Rate-of-progress estimation, trend direction, and completion projection.
//!
//! Velocity is the trailing-window average of logged progress per day. The
//! trend delta compares the trailing window against the prior equal-length
//! window, and the completion date is a linear extrapolation of the current
//! rate toward the goal's numeric target. Zero-activity input never errors;
//! it degrades to a "no velocity" result.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, ValidationError};
use crate::goal::{ActivityEntry, Goal, GoalPeriod};

/// Display clamp for the trend delta, in percent. Also the fixed delta
/// reported when the prior window is empty but the recent one is not.
pub const MAX_DELTA_PERCENT: f64 = 999.0;

/// Projections further out than this are treated as "no completion in sight".
pub const MAX_PROJECTION_DAYS: f64 = 36_500.0;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Result of a velocity computation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityResult {
    /// Progress units per day, averaged over the trailing window
    pub current_velocity: f64,
    /// Percent change vs. the prior equal-length window, clamped to ±999
    pub velocity_delta: f64,
    /// Whether the projected completion meets the goal's time budget
    /// (or, for frequency-only goals, whether any progress is being made)
    pub is_on_track: bool,
    /// Linear extrapolation of the completion date; `None` when velocity is
    /// zero or the goal has no numeric target
    pub estimated_completion_date: Option<DateTime<Utc>>,
}

impl VelocityResult {
    /// Per-day velocity scaled to the goal's tracking period, e.g. units
    /// per week for a weekly goal.
    pub fn velocity_per_period(&self, period: GoalPeriod) -> f64 {
        self.current_velocity * period.days_per_cycle()
    }
}

/// Analyzer for computing progress velocity from activity history.
#[derive(Debug, Clone, Copy)]
pub struct VelocityAnalyzer {
    /// Trailing window length in days
    pub window_days: i64,
}

impl Default for VelocityAnalyzer {
    fn default() -> Self {
        Self { window_days: 7 }
    }
}

impl VelocityAnalyzer {
    /// Create an analyzer with the default 7-day window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with a custom window (minimum one day).
    pub fn with_window(window_days: i64) -> Self {
        Self {
            window_days: window_days.max(1),
        }
    }

    /// Compute velocity, trend delta, and projected completion.
    ///
    /// Rejects non-finite entry values and malformed goal metadata; every
    /// degenerate-but-valid input (empty history, zero velocity, absent
    /// target) resolves to a neutral result instead of an error.
    pub fn compute(
        &self,
        entries: &[ActivityEntry],
        goal: &Goal,
        reference: DateTime<Utc>,
    ) -> Result<VelocityResult, CoreError> {
        goal.validate()?;
        for entry in entries {
            if !entry.value.is_finite() {
                return Err(ValidationError::NonFinite {
                    field: "entry.value",
                }
                .into());
            }
        }

        let window_days = self.window_days.max(1);
        let window = Duration::days(window_days);
        let recent_start = reference - window;
        let prior_start = recent_start - window;

        let mut recent_sum = 0.0;
        let mut prior_sum = 0.0;
        for entry in entries {
            if entry.timestamp > reference {
                continue;
            }
            if entry.timestamp > recent_start {
                recent_sum += entry.value;
            } else if entry.timestamp > prior_start {
                prior_sum += entry.value;
            }
        }

        let current_velocity = recent_sum / window_days as f64;
        let velocity_delta = trend_delta(recent_sum, prior_sum);

        let (is_on_track, estimated_completion_date) = match goal.target_value {
            None => (current_velocity > 0.0, None),
            Some(target) => project_completion(target, goal, current_velocity, reference),
        };

        Ok(VelocityResult {
            current_velocity,
            velocity_delta,
            is_on_track,
            estimated_completion_date,
        })
    }
}

/// Percent change of the recent window against the prior one.
///
/// A prior window at or below zero gives no meaningful base: report 0 when
/// nothing happened recently either, or the fixed display maximum when
/// progress appeared out of nowhere -- never NaN or infinity.
fn trend_delta(recent_sum: f64, prior_sum: f64) -> f64 {
    if prior_sum <= f64::EPSILON {
        if recent_sum > 0.0 {
            MAX_DELTA_PERCENT
        } else {
            0.0
        }
    } else {
        ((recent_sum - prior_sum) / prior_sum * 100.0).clamp(-MAX_DELTA_PERCENT, MAX_DELTA_PERCENT)
    }
}

fn project_completion(
    target: f64,
    goal: &Goal,
    current_velocity: f64,
    reference: DateTime<Utc>,
) -> (bool, Option<DateTime<Utc>>) {
    let remaining = target - goal.current_value;
    if remaining <= 0.0 {
        // Target already reached; nothing left to project.
        return (true, Some(reference));
    }
    if current_velocity <= 0.0 {
        return (false, None);
    }

    let days_needed = remaining / current_velocity;
    if days_needed > MAX_PROJECTION_DAYS {
        return (false, None);
    }

    let estimate = reference + Duration::seconds((days_needed * SECONDS_PER_DAY).round() as i64);
    let on_track = match goal.end_date {
        None => true,
        Some(end) => estimate <= end,
    };
    (on_track, Some(estimate))
}
