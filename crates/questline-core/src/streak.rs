//! Consecutive-activity-day streak computation and risk classification.
//!
//! A streak is the number of consecutive calendar days with at least one
//! activity entry, counted backward from today (or yesterday). Status
//! classification drives the product's loss-aversion loop:
//! - **AtRisk**: last activity was exactly yesterday and nothing is logged
//!   today yet -- the user must act today or the streak breaks
//! - **Broken**: more than one day has passed since the last entry
//! - **Starting / Building / Thriving**: tiers by current streak length

use std::collections::BTreeSet;

use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

use crate::clock;
use crate::goal::ActivityEntry;

/// Minimum current streak for the `Building` tier.
pub const BUILDING_MIN_DAYS: u32 = 3;
/// Minimum current streak for the `Thriving` tier.
pub const THRIVING_MIN_DAYS: u32 = 7;

/// Classification of a goal's streak state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreakStatus {
    /// No entries exist at all
    Inactive,
    /// History exists but the gap since the last entry exceeds one day
    Broken,
    /// Current streak of 1-2 days
    Starting,
    /// Current streak of 3-6 days
    Building,
    /// Current streak of 7+ days
    Thriving,
    /// Last entry was exactly yesterday and today has no entry yet
    AtRisk,
}

/// Result of a streak computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakResult {
    /// Consecutive days with at least one entry, counted back from today or yesterday
    pub current_streak: u32,
    /// Longest consecutive-day run anywhere in the history
    pub longest_streak: u32,
    /// Risk classification
    pub status: StreakStatus,
}

impl StreakResult {
    fn inactive() -> Self {
        Self {
            current_streak: 0,
            longest_streak: 0,
            status: StreakStatus::Inactive,
        }
    }
}

/// Analyzer for computing streaks from activity history.
#[derive(Debug, Clone, Copy)]
pub struct StreakAnalyzer {
    /// Fixed UTC offset used to bucket entries into calendar days
    pub timezone: FixedOffset,
}

impl Default for StreakAnalyzer {
    fn default() -> Self {
        Self {
            timezone: Utc.fix(),
        }
    }
}

impl StreakAnalyzer {
    /// Create an analyzer that buckets days in UTC.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an analyzer that buckets days in the given fixed offset.
    pub fn with_timezone(timezone: FixedOffset) -> Self {
        Self { timezone }
    }

    /// Compute streak length, longest streak, and risk status.
    ///
    /// Entries may arrive in any order; multiple entries on the same calendar
    /// day collapse to one, and entries timestamped after `reference` are
    /// ignored -- the streak only scores what already happened. "Today" is
    /// evaluated exactly once from `reference`, so the result is stable even
    /// if the call straddles midnight.
    pub fn compute(&self, entries: &[ActivityEntry], reference: DateTime<Utc>) -> StreakResult {
        let days: BTreeSet<NaiveDate> = entries
            .iter()
            .filter(|entry| entry.timestamp <= reference)
            .map(|entry| clock::day_of(entry.timestamp, self.timezone))
            .collect();

        let Some(&last_day) = days.iter().next_back() else {
            return StreakResult::inactive();
        };

        let today = clock::day_of(reference, self.timezone);
        let gap_days = (today - last_day).num_days();
        let longest_streak = longest_run(&days);

        if gap_days > 1 {
            return StreakResult {
                current_streak: 0,
                longest_streak,
                status: StreakStatus::Broken,
            };
        }

        let current_streak = run_ending_at(&days, last_day);
        let status = if gap_days == 1 {
            // The at-risk signal overrides the length tier: whatever the
            // streak length, it breaks unless the user logs today.
            StreakStatus::AtRisk
        } else {
            tier_for(current_streak)
        };

        StreakResult {
            current_streak,
            longest_streak,
            status,
        }
    }
}

fn tier_for(current_streak: u32) -> StreakStatus {
    if current_streak >= THRIVING_MIN_DAYS {
        StreakStatus::Thriving
    } else if current_streak >= BUILDING_MIN_DAYS {
        StreakStatus::Building
    } else {
        StreakStatus::Starting
    }
}

/// Length of the consecutive-day run that ends on `last`.
fn run_ending_at(days: &BTreeSet<NaiveDate>, last: NaiveDate) -> u32 {
    let mut streak = 1u32;
    let mut cursor = last;
    while let Some(prev) = cursor.pred_opt() {
        if !days.contains(&prev) {
            break;
        }
        streak += 1;
        cursor = prev;
    }
    streak
}

/// Longest consecutive-day run anywhere in the set.
fn longest_run(days: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;
    for &day in days {
        run = match prev {
            Some(p) if p.succ_opt() == Some(day) => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(day);
    }
    longest
}
