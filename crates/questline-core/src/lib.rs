//! # Questline Core Library
//!
//! Progress and gamification analytics for the Questline life tracker. The
//! crate turns a user's raw activity history -- timestamped goal-progress
//! entries and quest completions -- into the derived metrics that drive the
//! product's motivational feedback loops.
//!
//! ## Engines
//!
//! - [`StreakAnalyzer`]: consecutive-activity-day streaks and risk
//!   classification
//! - [`VelocityAnalyzer`]: rate of progress, trend direction, and projected
//!   completion date
//! - [`HealthAnalyzer`]: composite 1-5 goal health blending streak, pacing,
//!   and time budget
//! - [`XpTable`] / [`LevelCurve`]: quest XP awarding and exact level-curve
//!   inversion
//!
//! ## Purity
//!
//! Every engine is a pure function over its inputs: no I/O, no shared
//! mutable state, no system-clock reads. Each entry point takes an explicit
//! reference instant ([`clock::now`] resolves the real clock only at the
//! application boundary), so results are deterministic, safe to compute
//! from any thread, and cheap enough to re-run on every render.

pub mod clock;
pub mod error;
pub mod goal;
pub mod health;
pub mod streak;
pub mod velocity;
pub mod xp;

pub use error::{CoreError, ValidationError};
pub use goal::{ActivityEntry, Goal, GoalPeriod};
pub use health::{GoalHealthResult, HealthAnalyzer, HealthStatus};
pub use streak::{StreakAnalyzer, StreakResult, StreakStatus};
pub use velocity::{VelocityAnalyzer, VelocityResult};
pub use xp::{LevelCurve, LevelInfo, Quest, QuestDifficulty, QuestXpEvent, XpTable};
