//! Shared data model: activity entries and goal metadata.
//!
//! These are the input records the analytics engines read. Entries are
//! immutable once created and the engines never mutate them; callers may
//! hand over history in any order, the engines bucket and sort as needed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One timestamped record of progress toward a goal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    /// When the progress was logged
    pub timestamp: DateTime<Utc>,
    /// Amount logged; 0.0 for boolean "did it" goals
    pub value: f64,
    /// Optional free-form note
    pub note: Option<String>,
}

impl ActivityEntry {
    /// Create a new entry with the given timestamp and value.
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self {
            timestamp,
            value,
            note: None,
        }
    }

    /// Attach a note to the entry.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Cadence a goal is tracked against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalPeriod {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl GoalPeriod {
    /// Days in one cycle of this period, used to normalize per-day rates.
    pub fn days_per_cycle(&self) -> f64 {
        match self {
            GoalPeriod::Daily => 1.0,
            GoalPeriod::Weekly => 7.0,
            GoalPeriod::Monthly => 30.0,
            GoalPeriod::Yearly => 365.0,
        }
    }
}

/// The subset of goal metadata the analytics engines read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    /// Numeric target; `None` means frequency-only tracking
    pub target_value: Option<f64>,
    /// Running total of logged progress
    pub current_value: f64,
    /// When tracking began
    pub start_date: DateTime<Utc>,
    /// Time budget; `None` means open-ended
    pub end_date: Option<DateTime<Utc>>,
    /// Tracking cadence
    pub period: GoalPeriod,
    /// Set by the caller once 100% is reached, independent of computed progress
    pub is_completed: bool,
}

impl Goal {
    /// Create a frequency-only, open-ended goal.
    pub fn new(start_date: DateTime<Utc>, period: GoalPeriod) -> Self {
        Self {
            target_value: None,
            current_value: 0.0,
            start_date,
            end_date: None,
            period,
            is_completed: false,
        }
    }

    /// Set a numeric target and the progress logged so far.
    pub fn with_target(mut self, target_value: f64, current_value: f64) -> Self {
        self.target_value = Some(target_value);
        self.current_value = current_value;
        self
    }

    /// Set the goal's time budget.
    pub fn with_end_date(mut self, end_date: DateTime<Utc>) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Mark the goal as completed by the caller.
    pub fn completed(mut self) -> Self {
        self.is_completed = true;
        self
    }

    /// Reject upstream data bugs: non-finite numbers and inverted date ranges.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(target) = self.target_value {
            if !target.is_finite() {
                return Err(ValidationError::NonFinite {
                    field: "goal.target_value",
                });
            }
        }
        if !self.current_value.is_finite() {
            return Err(ValidationError::NonFinite {
                field: "goal.current_value",
            });
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(ValidationError::EndBeforeStart {
                    start: self.start_date,
                    end,
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc_datetime(year: i32, month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_entry_builder() {
        let ts = utc_datetime(2026, 1, 10);
        let entry = ActivityEntry::new(ts, 2.5).with_note("morning run");
        assert_eq!(entry.timestamp, ts);
        assert_eq!(entry.value, 2.5);
        assert_eq!(entry.note.as_deref(), Some("morning run"));
    }

    #[test]
    fn test_period_days_per_cycle() {
        assert_eq!(GoalPeriod::Daily.days_per_cycle(), 1.0);
        assert_eq!(GoalPeriod::Weekly.days_per_cycle(), 7.0);
        assert_eq!(GoalPeriod::Monthly.days_per_cycle(), 30.0);
        assert_eq!(GoalPeriod::Yearly.days_per_cycle(), 365.0);
    }

    #[test]
    fn test_validate_accepts_well_formed_goal() {
        let goal = Goal::new(utc_datetime(2026, 1, 1), GoalPeriod::Weekly)
            .with_target(100.0, 40.0)
            .with_end_date(utc_datetime(2026, 6, 1));
        assert!(goal.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_non_finite_target() {
        let goal =
            Goal::new(utc_datetime(2026, 1, 1), GoalPeriod::Daily).with_target(f64::NAN, 0.0);
        assert_eq!(
            goal.validate(),
            Err(ValidationError::NonFinite {
                field: "goal.target_value"
            })
        );
    }

    #[test]
    fn test_validate_rejects_infinite_current_value() {
        let mut goal = Goal::new(utc_datetime(2026, 1, 1), GoalPeriod::Daily);
        goal.current_value = f64::INFINITY;
        assert_eq!(
            goal.validate(),
            Err(ValidationError::NonFinite {
                field: "goal.current_value"
            })
        );
    }

    #[test]
    fn test_validate_rejects_inverted_date_range() {
        let start = utc_datetime(2026, 3, 1);
        let end = utc_datetime(2026, 1, 1);
        let goal = Goal::new(start, GoalPeriod::Monthly).with_end_date(end);
        assert_eq!(goal.validate(), Err(ValidationError::EndBeforeStart { start, end }));
    }

    #[test]
    fn test_goal_serialization_round_trip() {
        let goal = Goal::new(utc_datetime(2026, 1, 1), GoalPeriod::Weekly).with_target(70.0, 7.0);
        let json = serde_json::to_string(&goal).unwrap();
        assert!(json.contains("\"period\":\"weekly\""));
        let back: Goal = serde_json::from_str(&json).unwrap();
        assert_eq!(back, goal);
    }
}
