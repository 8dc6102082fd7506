//! Quest XP awarding and level-curve inversion.
//!
//! XP comes from a fixed difficulty table plus bonuses for finishing before
//! the scheduled deadline, keeping a recurrence streak, and completing every
//! quest of the day ("perfect day"). The perfect-day flag is supplied by the
//! caller so this engine stays pure and knows nothing about other quests.
//!
//! Levels follow a quadratic cumulative-requirement curve: early levels come
//! quickly, later ones slowly. [`LevelCurve::level_for_xp`] inverts the curve
//! exactly, so the forward and inverse mappings always round-trip.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, ValidationError};

/// Difficulty tier of a quest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestDifficulty {
    Easy,
    Medium,
    Hard,
}

/// The subset of quest metadata relevant to XP awarding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quest {
    /// Difficulty tier, selects the base XP
    pub difficulty: QuestDifficulty,
    /// Scheduled deadline; completion at or before it earns the early bonus
    pub deadline: Option<DateTime<Utc>>,
    /// Consecutive completions of a recurring quest, supplied by the caller
    pub completion_streak: u32,
}

impl Quest {
    /// Create a one-off quest with no deadline and no recurrence history.
    pub fn new(difficulty: QuestDifficulty) -> Self {
        Self {
            difficulty,
            deadline: None,
            completion_streak: 0,
        }
    }

    /// Set the scheduled deadline.
    pub fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set the recurrence streak counter.
    pub fn with_completion_streak(mut self, completion_streak: u32) -> Self {
        self.completion_streak = completion_streak;
        self
    }
}

/// XP awarded for one quest completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestXpEvent {
    /// XP from the difficulty table
    pub base_xp: u32,
    /// Sum of all applicable bonuses
    pub bonus_xp: u32,
    /// `base_xp + bonus_xp`
    pub total_xp: u32,
}

/// Product-tuned XP constants.
///
/// These are tuning knobs, not frozen contracts; override individual fields
/// to retune rewards without touching the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XpTable {
    /// Base XP for an easy quest
    pub easy_base_xp: u32,
    /// Base XP for a medium quest
    pub medium_base_xp: u32,
    /// Base XP for a hard quest
    pub hard_base_xp: u32,
    /// Bonus for completing at or before the scheduled deadline
    pub early_completion_bonus: u32,
    /// Bonus when every quest scheduled for the day was completed
    pub perfect_day_bonus: u32,
    /// Bonus per consecutive completion of a recurring quest
    pub streak_bonus_per_completion: u32,
    /// Cap on the recurrence streak bonus
    pub max_streak_bonus: u32,
}

impl Default for XpTable {
    fn default() -> Self {
        Self {
            easy_base_xp: 10,
            medium_base_xp: 25,
            hard_base_xp: 50,
            early_completion_bonus: 10,
            perfect_day_bonus: 25,
            streak_bonus_per_completion: 2,
            max_streak_bonus: 20,
        }
    }
}

impl XpTable {
    /// Create the product's default XP table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Base XP for a difficulty tier.
    pub fn base_xp(&self, difficulty: QuestDifficulty) -> u32 {
        match difficulty {
            QuestDifficulty::Easy => self.easy_base_xp,
            QuestDifficulty::Medium => self.medium_base_xp,
            QuestDifficulty::Hard => self.hard_base_xp,
        }
    }

    /// XP awarded for completing `quest` at `completion_instant`.
    ///
    /// `perfect_day` is computed by the caller (this engine does not know
    /// about the day's other quests). Deterministic: same inputs always
    /// yield the same event.
    pub fn compute_quest_xp(
        &self,
        quest: &Quest,
        completion_instant: DateTime<Utc>,
        perfect_day: bool,
    ) -> QuestXpEvent {
        let base_xp = self.base_xp(quest.difficulty);

        let mut bonus_xp = quest
            .completion_streak
            .saturating_mul(self.streak_bonus_per_completion)
            .min(self.max_streak_bonus);
        if let Some(deadline) = quest.deadline {
            if completion_instant <= deadline {
                bonus_xp += self.early_completion_bonus;
            }
        }
        if perfect_day {
            bonus_xp += self.perfect_day_bonus;
        }

        QuestXpEvent {
            base_xp,
            bonus_xp,
            total_xp: base_xp + bonus_xp,
        }
    }
}

/// Level position derived from cumulative XP.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelInfo {
    /// Current level, starting at 1
    pub level: u32,
    /// XP earned within the current level
    pub current_level_xp: u64,
    /// XP still needed to reach the next level
    pub xp_to_next_level: u64,
    /// Progress through the current level, 0-100
    pub progress_percent: f64,
}

/// Quadratic XP-requirement curve.
///
/// Cumulative XP required to reach level `n` is `coefficient * (n - 1)^2`,
/// so the per-level cost grows with every level: early levels land fast to
/// hook the user, later ones slowly to sustain engagement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCurve {
    /// Curve steepness; the product default is 100
    pub coefficient: u64,
}

impl Default for LevelCurve {
    fn default() -> Self {
        Self { coefficient: 100 }
    }
}

impl LevelCurve {
    /// Create the product's default curve.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a curve with a custom steepness (minimum 1).
    pub fn with_coefficient(coefficient: u64) -> Self {
        Self {
            coefficient: coefficient.max(1),
        }
    }

    /// Cumulative XP required to reach `level`. Level 1 costs nothing.
    pub fn xp_required_for_level(&self, level: u32) -> u64 {
        let steps = u64::from(level.saturating_sub(1));
        self.coefficient.saturating_mul(steps.saturating_mul(steps))
    }

    /// Find the unique level whose requirement range contains `cumulative_xp`.
    ///
    /// Exact inversion of [`xp_required_for_level`]: for every non-negative
    /// input, `xp_required_for_level(level) <= xp <
    /// xp_required_for_level(level + 1)`. Negative XP is a caller bug and is
    /// rejected rather than clamped.
    ///
    /// [`xp_required_for_level`]: LevelCurve::xp_required_for_level
    pub fn level_for_xp(&self, cumulative_xp: i64) -> Result<LevelInfo, CoreError> {
        if cumulative_xp < 0 {
            return Err(ValidationError::NegativeXp { xp: cumulative_xp }.into());
        }
        let xp = cumulative_xp as u64;

        // Closed-form estimate, then fix up against the exact integer
        // boundaries so float rounding can never shift the level.
        let mut level = integer_sqrt(xp / self.coefficient.max(1)) as u32 + 1;
        while self.xp_required_for_level(level + 1) <= xp {
            level += 1;
        }
        while level > 1 && self.xp_required_for_level(level) > xp {
            level -= 1;
        }

        let floor = self.xp_required_for_level(level);
        let ceiling = self.xp_required_for_level(level + 1);
        let current_level_xp = xp - floor;
        let xp_to_next_level = ceiling - xp;
        let span = ceiling - floor;
        let progress_percent = if span > 0 {
            current_level_xp as f64 / span as f64 * 100.0
        } else {
            0.0
        };

        Ok(LevelInfo {
            level,
            current_level_xp,
            xp_to_next_level,
            progress_percent,
        })
    }
}

/// Largest `x` with `x * x <= n`.
fn integer_sqrt(n: u64) -> u64 {
    if n == 0 {
        return 0;
    }
    // Compare in u128: squaring the estimate can exceed u64 for n near
    // u64::MAX, and a saturated square would stall the fix-up loops.
    let wide = u128::from(n);
    let mut x = (n as f64).sqrt() as u64;
    while u128::from(x) * u128::from(x) > wide {
        x -= 1;
    }
    while u128::from(x + 1) * u128::from(x + 1) <= wide {
        x += 1;
    }
    x
}
