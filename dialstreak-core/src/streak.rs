//! Login-streak ledger: the per-agent daily login state machine.
//!
//! The ledger is pure: it maps (previous state, today's agent-local calendar
//! date) to the next state. Persistence, and the at-most-once-per-day
//! serialization of concurrent credit attempts, belong to the store layer.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::time::day_diff;

/// Per-agent login-streak state.
///
/// Invariant: `longest_streak >= current_streak` after every update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LoginStreakState {
    pub current_streak: u32,
    pub longest_streak: u32,
    /// Agent-local calendar date of the last credited login. Date only; the
    /// exact instant is tracked separately by the store.
    pub last_login_date: Option<NaiveDate>,
}

impl LoginStreakState {
    /// True if a login has already been credited for `today`.
    pub fn credited_on(&self, today: NaiveDate) -> bool {
        self.last_login_date == Some(today)
    }
}

/// Compute the next streak state for a login on `today`.
///
/// - first login ever → streak 1
/// - last login exactly yesterday → streak + 1
/// - last login today → no-op (state returned unchanged)
/// - anything else (gap of 2+ days, or a clock that went backwards) → reset to 1
pub fn advance_streak(state: &LoginStreakState, today: NaiveDate) -> LoginStreakState {
    let current = match state.last_login_date {
        None => 1,
        Some(last) => match day_diff(last, today) {
            0 => return *state,
            1 => state.current_streak + 1,
            _ => 1,
        },
    };

    LoginStreakState {
        current_streak: current,
        longest_streak: state.longest_streak.max(current),
        last_login_date: Some(today),
    }
}
