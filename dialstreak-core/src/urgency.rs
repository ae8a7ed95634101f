//! Streak-reminder urgency: how close is the agent to losing today's streak.
//!
//! The deadline is the next agent-local midnight. Dismissal of a shown
//! reminder is session state the presentation layer holds; this module only
//! answers "how urgent, and should it show at all".

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::streak::LoginStreakState;
use crate::time::{local_date, next_local_midnight};

/// Ordered urgency tiers. Cutoffs (time remaining until local midnight):
/// `< 30min` Critical, `< 2h` High, `< 6h` Medium, otherwise Low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Low,
    Medium,
    High,
    Critical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencyReport {
    pub level: UrgencyLevel,
    /// Whole hours until the local-midnight deadline.
    pub hours_remaining: i64,
    /// Minutes past the whole hour (0..60).
    pub minutes_remaining: i64,
    /// False when the agent already logged in today or has no streak to lose.
    pub should_show: bool,
}

/// Classify reminder urgency for an agent at instant `now_utc`.
pub fn classify_urgency(
    state: &LoginStreakState,
    now_utc: DateTime<Utc>,
    tz: Tz,
) -> UrgencyReport {
    let today: NaiveDate = local_date(now_utc, tz);
    let deadline = next_local_midnight(now_utc, tz);

    let remaining = deadline - now_utc;
    let total_minutes = remaining.num_minutes().max(0);
    let hours_remaining = total_minutes / 60;
    let minutes_remaining = total_minutes % 60;

    let level = if total_minutes < 30 {
        UrgencyLevel::Critical
    } else if total_minutes < 2 * 60 {
        UrgencyLevel::High
    } else if total_minutes < 6 * 60 {
        UrgencyLevel::Medium
    } else {
        UrgencyLevel::Low
    };

    let should_show = state.current_streak > 0 && !state.credited_on(today);

    UrgencyReport {
        level,
        hours_remaining,
        minutes_remaining,
        should_show,
    }
}
