//! Lead score engine: interaction history → bounded 0..100 composite score.
//!
//! Additive bonus/penalty terms, then a clamp. Every term is deterministic in
//! the supplied `now`; recalculation on identical inputs is bit-identical.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Call outcome recorded by the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackKind {
    Interested,
    NotInterested,
    NotAnswered,
    Callback,
    WrongNumber,
}

impl FeedbackKind {
    /// Signals that actively argue against pursuing the lead.
    pub fn is_negative(&self) -> bool {
        matches!(self, FeedbackKind::NotInterested | FeedbackKind::WrongNumber)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum ActivityKind {
    Created,
    Feedback { feedback: FeedbackKind },
    StatusChange,
    Note,
    WhatsappSent,
}

/// One immutable entry of a lead's interaction history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadActivityEvent {
    pub kind: ActivityKind,
    pub at: DateTime<Utc>,
    pub note: Option<String>,
}

impl LeadActivityEvent {
    pub fn new(kind: ActivityKind, at: DateTime<Utc>) -> Self {
        Self { kind, at, note: None }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }
}

/// Per-term breakdown. `total_score` is the clamped sum of everything else.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeadScoreBreakdown {
    pub base_score: f64,
    pub interaction_bonus: f64,
    pub interest_bonus: f64,
    pub callback_bonus: f64,
    pub recency_bonus: f64,
    pub deal_value_bonus: f64,
    pub close_date_bonus: f64,
    /// Negative or zero.
    pub penalties: f64,
    pub total_score: f64,
}

/// Qualitative bands over the 0..100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreLabel {
    Hot,
    Warm,
    Cold,
}

impl ScoreLabel {
    pub fn label(&self) -> &'static str {
        match self {
            ScoreLabel::Hot => "hot",
            ScoreLabel::Warm => "warm",
            ScoreLabel::Cold => "cold",
        }
    }
}

const BASE_SCORE: f64 = 20.0;
const PER_INTERACTION: f64 = 3.0;
const INTERACTION_CAP: f64 = 15.0;
const INTEREST_BONUS: f64 = 15.0;
const NOT_INTERESTED_PENALTY: f64 = -15.0;
const WRONG_NUMBER_PENALTY: f64 = -20.0;
const REPEAT_NEGATIVE_PENALTY: f64 = -3.0;
const REPEAT_NEGATIVE_CAP: f64 = -9.0;
const PER_CALLBACK: f64 = 5.0;
const CALLBACK_CAP: f64 = 10.0;
const STALE_DAYS: i64 = 30;
const VERY_STALE_DAYS: i64 = 90;

/// Score a lead from its full event history plus deal metadata, as of `now`.
pub fn score_lead(
    events: &[LeadActivityEvent],
    deal_value: Option<f64>,
    expected_close_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> LeadScoreBreakdown {
    let interaction_bonus = (events.len() as f64 * PER_INTERACTION).min(INTERACTION_CAP);

    // Latest feedback decides the interest term; chronological scan so ties
    // resolve to the later entry in input order.
    let mut latest_feedback: Option<(DateTime<Utc>, FeedbackKind)> = None;
    let mut callback_count = 0u32;
    let mut negative_count = 0u32;
    let mut last_activity: Option<DateTime<Utc>> = None;

    for event in events {
        last_activity = Some(last_activity.map_or(event.at, |t| t.max(event.at)));
        if let ActivityKind::Feedback { feedback } = event.kind {
            if latest_feedback.map_or(true, |(t, _)| event.at >= t) {
                latest_feedback = Some((event.at, feedback));
            }
            if feedback == FeedbackKind::Callback {
                callback_count += 1;
            }
            if feedback.is_negative() {
                negative_count += 1;
            }
        }
    }

    let mut interest_bonus = 0.0;
    let mut penalties = 0.0;
    match latest_feedback.map(|(_, f)| f) {
        Some(FeedbackKind::Interested) => interest_bonus = INTEREST_BONUS,
        Some(FeedbackKind::NotInterested) => penalties += NOT_INTERESTED_PENALTY,
        Some(FeedbackKind::WrongNumber) => penalties += WRONG_NUMBER_PENALTY,
        _ => {}
    }

    // Each repeat negative signal beyond the first digs the hole deeper.
    if negative_count > 1 {
        penalties +=
            (REPEAT_NEGATIVE_PENALTY * (negative_count - 1) as f64).max(REPEAT_NEGATIVE_CAP);
    }

    let callback_bonus = (callback_count as f64 * PER_CALLBACK).min(CALLBACK_CAP);

    let mut recency_bonus = 0.0;
    if let Some(last) = last_activity {
        // Future-dated events (dialer clock skew) clamp to "today".
        let days_since = (now - last).num_days().max(0);
        recency_bonus = match days_since {
            0 => 15.0,
            1..=3 => 10.0,
            4..=7 => 5.0,
            8..=14 => 2.0,
            _ => 0.0,
        };
        if days_since > VERY_STALE_DAYS {
            penalties += -15.0;
        } else if days_since > STALE_DAYS {
            penalties += -10.0;
        }
    }

    let deal_value_bonus = match deal_value {
        Some(v) if v >= 50_000.0 => 10.0,
        Some(v) if v >= 10_000.0 => 7.0,
        Some(v) if v >= 1_000.0 => 4.0,
        Some(v) if v > 0.0 => 2.0,
        _ => 0.0,
    };

    let close_date_bonus = match expected_close_date {
        Some(close) => {
            let days_out = (close - now).num_days();
            if (0..=7).contains(&days_out) {
                8.0
            } else if (8..=30).contains(&days_out) {
                4.0
            } else {
                0.0
            }
        }
        None => 0.0,
    };

    let sum = BASE_SCORE
        + interaction_bonus
        + interest_bonus
        + callback_bonus
        + recency_bonus
        + deal_value_bonus
        + close_date_bonus
        + penalties;

    LeadScoreBreakdown {
        base_score: BASE_SCORE,
        interaction_bonus,
        interest_bonus,
        callback_bonus,
        recency_bonus,
        deal_value_bonus,
        close_date_bonus,
        penalties,
        total_score: sum.clamp(0.0, 100.0),
    }
}

/// Qualitative band for a score: >= 70 hot, >= 40 warm, else cold.
pub fn score_label(score: f64) -> ScoreLabel {
    if score >= 70.0 {
        ScoreLabel::Hot
    } else if score >= 40.0 {
        ScoreLabel::Warm
    } else {
        ScoreLabel::Cold
    }
}
