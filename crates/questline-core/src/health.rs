//! Composite goal health scoring.
//!
//! Blends streak status and velocity trend against the goal's time budget
//! into one 1-5 level. The blend is a gated composite, not an average: a
//! long streak with collapsing velocity must not score as healthy, and no
//! single strong signal alone reaches the top tier. Evaluation order:
//!
//! 1. Streak status sets the base tier, with `AtRisk` capped at 2
//! 2. Velocity trend adjusts by ±1 level, clamped to [1, 5]
//! 3. Level 5 is reserved for a thriving streak AND an on-track projection
//!    AND a non-negative trend, all at once

use serde::{Deserialize, Serialize};

use crate::goal::Goal;
use crate::streak::{StreakResult, StreakStatus};
use crate::velocity::VelocityResult;

/// Velocity delta above which the health level gets a +1 boost, in percent.
pub const VELOCITY_BOOST_THRESHOLD: f64 = 10.0;
/// Velocity delta below which the health level gets a -1 drag, in percent.
pub const VELOCITY_DRAG_THRESHOLD: f64 = -10.0;

/// Categorical health label, one per level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Critical,
    Struggling,
    Steady,
    Thriving,
    Champion,
}

impl HealthStatus {
    fn from_level(level: u8) -> Self {
        match level {
            1 => HealthStatus::Critical,
            2 => HealthStatus::Struggling,
            3 => HealthStatus::Steady,
            4 => HealthStatus::Thriving,
            _ => HealthStatus::Champion,
        }
    }

    /// Presentation hint for badge/bar styling.
    pub fn color(&self) -> &'static str {
        match self {
            HealthStatus::Critical => "#ef4444",
            HealthStatus::Struggling => "#f97316",
            HealthStatus::Steady => "#eab308",
            HealthStatus::Thriving => "#22c55e",
            HealthStatus::Champion => "#a855f7",
        }
    }
}

/// Result of a goal health computation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalHealthResult {
    /// Composite health level, 1 (critical) to 5 (champion)
    pub health_level: u8,
    /// Categorical label for the level
    pub health_status: HealthStatus,
    /// Short, actionable explanation naming the weak dimension when low
    pub health_message: String,
    /// Presentation hint; carries no business meaning
    pub health_color: String,
}

/// Analyzer combining streak and velocity results into a health score.
#[derive(Debug, Clone, Copy)]
pub struct HealthAnalyzer {
    /// Velocity delta (percent) required for a +1 level boost
    pub boost_threshold: f64,
    /// Velocity delta (percent) below which the level drops by 1
    pub drag_threshold: f64,
}

impl Default for HealthAnalyzer {
    fn default() -> Self {
        Self {
            boost_threshold: VELOCITY_BOOST_THRESHOLD,
            drag_threshold: VELOCITY_DRAG_THRESHOLD,
        }
    }
}

impl HealthAnalyzer {
    /// Create an analyzer with the product's default thresholds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer with custom trend thresholds.
    pub fn with_thresholds(boost_threshold: f64, drag_threshold: f64) -> Self {
        Self {
            boost_threshold,
            drag_threshold,
        }
    }

    /// Combine streak and velocity results into a 1-5 health score.
    pub fn compute(
        &self,
        streak: &StreakResult,
        velocity: &VelocityResult,
        goal: &Goal,
    ) -> GoalHealthResult {
        if goal.is_completed {
            // A finished goal is celebrated regardless of trailing velocity.
            return result_for(5, completed_message(streak));
        }

        let base = match streak.status {
            StreakStatus::Inactive | StreakStatus::Broken => 1,
            StreakStatus::Starting => 2,
            // The at-risk signal dominates: the tier is capped at 2 no
            // matter how long the streak is.
            StreakStatus::AtRisk => 2,
            StreakStatus::Building => 3,
            StreakStatus::Thriving => 4,
        };

        let mut level: u8 = if velocity.velocity_delta > self.boost_threshold {
            (base + 1).min(5)
        } else if velocity.velocity_delta < self.drag_threshold {
            (base - 1).max(1)
        } else {
            base
        };

        // Champion is a conjunctive gate, not an additive bonus.
        let champion_eligible = streak.status == StreakStatus::Thriving
            && velocity.is_on_track
            && velocity.velocity_delta >= 0.0;
        if level == 5 && !champion_eligible {
            level = 4;
        }

        result_for(level, message_for(level, streak, velocity))
    }
}

fn result_for(level: u8, message: String) -> GoalHealthResult {
    let status = HealthStatus::from_level(level);
    GoalHealthResult {
        health_level: level,
        health_status: status,
        health_message: message,
        health_color: status.color().to_string(),
    }
}

fn completed_message(streak: &StreakResult) -> String {
    if streak.longest_streak > 1 {
        format!(
            "Goal complete -- your best run was {} days. Time for the next one?",
            streak.longest_streak
        )
    } else {
        "Goal complete. Time for the next one?".to_string()
    }
}

/// Name the specific weak dimension for low levels so the message is
/// actionable, not generic.
fn message_for(level: u8, streak: &StreakResult, velocity: &VelocityResult) -> String {
    match level {
        1 => match streak.status {
            StreakStatus::Inactive => {
                "No activity yet -- log your first entry to get this goal moving.".to_string()
            }
            StreakStatus::Broken => {
                "Your streak broke. One entry today starts a new one.".to_string()
            }
            _ => "Pace has dropped sharply -- log some progress to recover.".to_string(),
        },
        2 => {
            if streak.status == StreakStatus::AtRisk {
                format!(
                    "Streak at risk! Log something today to keep your {}-day streak alive.",
                    streak.current_streak
                )
            } else if velocity.velocity_delta < 0.0 {
                "You're getting started, but your pace is slipping week over week.".to_string()
            } else {
                "Early days -- a couple more consecutive days will build momentum.".to_string()
            }
        }
        3 => "Steady progress. Keep the rhythm going.".to_string(),
        4 => {
            if velocity.is_on_track {
                format!(
                    "Thriving: {}-day streak and on pace to finish.",
                    streak.current_streak
                )
            } else {
                format!(
                    "Strong {}-day streak, but the current pace won't hit the deadline.",
                    streak.current_streak
                )
            }
        }
        _ => format!(
            "Champion: {}-day streak, accelerating, and on track to finish.",
            streak.current_streak
        ),
    }
}
