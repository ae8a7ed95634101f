//! dialstreak-core: pure engine for telesales streaks, milestones, and lead
//! scoring.
//!
//! Everything here is a deterministic function of explicit inputs: "now" and
//! "today" are always parameters, never read from a clock. Persistence and
//! presentation live in sibling crates.

pub mod error;
pub mod evaluator;
pub mod goal_streak;
pub mod lead_score;
pub mod milestones;
pub mod streak;
pub mod time;
pub mod urgency;

pub use error::CoreError;
pub use evaluator::{
    evaluate, newly_earned, project_celebrations, Celebration, CelebrationConfig, EarnedKey,
    EarnedMilestone, MilestoneReport, UpcomingMilestone,
};
pub use goal_streak::{derive_streak, GoalRecord, GoalStreak, GoalType, Metric, PerformanceSource};
pub use lead_score::{
    score_lead, score_label, ActivityKind, FeedbackKind, LeadActivityEvent, LeadScoreBreakdown,
    ScoreLabel,
};
pub use milestones::{catalog, highest_met, next_unmet, MilestoneDefinition, Rarity};
pub use streak::{advance_streak, LoginStreakState};
pub use urgency::{classify_urgency, UrgencyLevel, UrgencyReport};
