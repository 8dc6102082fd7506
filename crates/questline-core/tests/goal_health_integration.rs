//! Integration tests for the full analytics pipeline.
//!
//! Exercises the raw-history -> streak -> velocity -> health workflow the
//! product runs on every render, including the champion gate and the
//! degenerate states a brand-new goal passes through.

use chrono::{DateTime, Duration, TimeZone, Utc};

use questline_core::{
    clock, ActivityEntry, Goal, GoalPeriod, HealthAnalyzer, HealthStatus, LevelCurve, Quest,
    QuestDifficulty, StreakAnalyzer, StreakStatus, VelocityAnalyzer, XpTable,
};

fn utc_datetime(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

fn daily_entries(reference: DateTime<Utc>, count: i64, end_offset: i64, value: f64) -> Vec<ActivityEntry> {
    (0..count)
        .map(|i| ActivityEntry::new(reference - Duration::days(end_offset + i), value))
        .collect()
}

#[test]
fn test_new_goal_starts_neutral() {
    let reference = clock::now(Some(utc_datetime(2026, 1, 10, 12)));
    let goal = Goal::new(utc_datetime(2026, 1, 1, 0), GoalPeriod::Weekly).with_target(70.0, 0.0);

    let streak = StreakAnalyzer::new().compute(&[], reference);
    let velocity = VelocityAnalyzer::new().compute(&[], &goal, reference).unwrap();
    let health = HealthAnalyzer::new().compute(&streak, &velocity, &goal);

    assert_eq!(streak.status, StreakStatus::Inactive);
    assert_eq!(velocity.current_velocity, 0.0);
    assert_eq!(velocity.velocity_delta, 0.0);
    assert_eq!(health.health_level, 1);
    assert_eq!(health.health_status, HealthStatus::Critical);
}

#[test]
fn test_accelerating_week_reaches_champion() {
    let reference = utc_datetime(2026, 1, 20, 12);
    let goal = Goal::new(utc_datetime(2026, 1, 1, 0), GoalPeriod::Weekly)
        .with_target(200.0, 150.0)
        .with_end_date(utc_datetime(2026, 3, 1, 0));

    // Prior week at 1 unit/day, recent week at 2: thriving streak, +100%
    // trend, and 50 remaining at 2/day projects to mid-February, well
    // inside the time budget.
    let mut entries = daily_entries(reference, 7, 7, 1.0);
    entries.extend(daily_entries(reference, 7, 0, 2.0));

    let streak = StreakAnalyzer::new().compute(&entries, reference);
    let velocity = VelocityAnalyzer::new().compute(&entries, &goal, reference).unwrap();
    let health = HealthAnalyzer::new().compute(&streak, &velocity, &goal);

    assert_eq!(streak.current_streak, 14);
    assert_eq!(streak.status, StreakStatus::Thriving);
    assert_eq!(velocity.current_velocity, 2.0);
    assert_eq!(velocity.velocity_delta, 100.0);
    assert!(velocity.is_on_track);
    assert_eq!(health.health_level, 5);
    assert_eq!(health.health_status, HealthStatus::Champion);
}

#[test]
fn test_missed_deadline_blocks_champion_despite_streak() {
    let reference = utc_datetime(2026, 1, 20, 12);
    // Same strong history, but the time budget expires before the
    // projected completion (50 remaining at 2/day needs 25 more days).
    let goal = Goal::new(utc_datetime(2026, 1, 1, 0), GoalPeriod::Weekly)
        .with_target(200.0, 150.0)
        .with_end_date(utc_datetime(2026, 1, 25, 0));

    let mut entries = daily_entries(reference, 7, 7, 1.0);
    entries.extend(daily_entries(reference, 7, 0, 2.0));

    let streak = StreakAnalyzer::new().compute(&entries, reference);
    let velocity = VelocityAnalyzer::new().compute(&entries, &goal, reference).unwrap();
    let health = HealthAnalyzer::new().compute(&streak, &velocity, &goal);

    assert_eq!(streak.status, StreakStatus::Thriving);
    assert!(!velocity.is_on_track);
    assert_eq!(health.health_level, 4);
    assert!(health.health_message.contains("won't hit the deadline"));
}

#[test]
fn test_lapsed_goal_reports_broken_streak_and_low_health() {
    let reference = utc_datetime(2026, 1, 13, 12);
    let goal = Goal::new(utc_datetime(2026, 1, 1, 0), GoalPeriod::Daily).with_target(30.0, 10.0);

    // 10 active days, then 3 days of silence.
    let entries = daily_entries(reference, 10, 3, 1.0);

    let streak = StreakAnalyzer::new().compute(&entries, reference);
    let velocity = VelocityAnalyzer::new().compute(&entries, &goal, reference).unwrap();
    let health = HealthAnalyzer::new().compute(&streak, &velocity, &goal);

    assert_eq!(streak.current_streak, 0);
    assert_eq!(streak.longest_streak, 10);
    assert_eq!(streak.status, StreakStatus::Broken);
    assert!(health.health_level <= 2);
}

#[test]
fn test_at_risk_goal_gets_actionable_warning() {
    let reference = utc_datetime(2026, 1, 20, 9);
    let goal = Goal::new(utc_datetime(2026, 1, 1, 0), GoalPeriod::Daily);

    // 12-day streak that ended yesterday; nothing logged today yet.
    let entries = daily_entries(reference, 12, 1, 1.0);

    let streak = StreakAnalyzer::new().compute(&entries, reference);
    let velocity = VelocityAnalyzer::new().compute(&entries, &goal, reference).unwrap();
    let health = HealthAnalyzer::new().compute(&streak, &velocity, &goal);

    assert_eq!(streak.status, StreakStatus::AtRisk);
    assert_eq!(streak.current_streak, 12);
    assert_eq!(health.health_level, 2);
    assert!(health.health_message.contains("12-day streak"));
}

#[test]
fn test_quest_rewards_feed_the_level_curve() {
    let table = XpTable::new();
    let curve = LevelCurve::new();
    let day = utc_datetime(2026, 1, 10, 0);

    // A week of daily hard quests finished early on perfect days.
    let mut cumulative_xp: i64 = 0;
    for i in 0..7u32 {
        let quest = Quest::new(QuestDifficulty::Hard)
            .with_deadline(day + Duration::days(i64::from(i)) + Duration::hours(20))
            .with_completion_streak(i);
        let completed_at = day + Duration::days(i64::from(i)) + Duration::hours(10);
        let event = table.compute_quest_xp(&quest, completed_at, true);

        assert_eq!(event.total_xp, event.base_xp + event.bonus_xp);
        cumulative_xp += i64::from(event.total_xp);
    }

    // 7 * (50 + 10 + 25) + streak bonuses 0+2+4+6+8+10+12 = 595 + 42.
    assert_eq!(cumulative_xp, 637);

    let info = curve.level_for_xp(cumulative_xp).unwrap();
    assert_eq!(info.level, 3); // level 3 spans [400, 900)
    assert_eq!(info.current_level_xp, 237);
    assert_eq!(info.xp_to_next_level, 263);
}
