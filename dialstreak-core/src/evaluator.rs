//! Milestone evaluator: intersect goal streaks with the catalog.
//!
//! Deterministic projection: at most one earned badge and one upcoming badge
//! per (metric, goal_type) pair. The celebration side effect lives with the
//! caller: it diffs the previous earned set via [`newly_earned`] and fires
//! once per newly-crossed threshold.

use serde::{Deserialize, Serialize};

use crate::goal_streak::{GoalStreak, GoalType, Metric};
use crate::milestones::{highest_met, next_unmet, MilestoneDefinition, Rarity};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EarnedMilestone {
    pub metric: Metric,
    pub goal_type: GoalType,
    pub milestone: MilestoneDefinition,
    pub current_streak: u32,
}

impl EarnedMilestone {
    pub fn key(&self) -> EarnedKey {
        EarnedKey {
            metric: self.metric,
            goal_type: self.goal_type,
            threshold: self.milestone.threshold,
        }
    }
}

/// Compact, persistable identity of an earned badge. The full
/// [`MilestoneDefinition`] is static catalog data, so only the threshold
/// needs remembering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EarnedKey {
    pub metric: Metric,
    pub goal_type: GoalType,
    pub threshold: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UpcomingMilestone {
    pub metric: Metric,
    pub goal_type: GoalType,
    pub milestone: MilestoneDefinition,
    /// Periods still to go.
    pub remaining: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct MilestoneReport {
    pub earned: Vec<EarnedMilestone>,
    pub upcoming: Vec<UpcomingMilestone>,
    pub total_badges: usize,
    pub legendary_count: usize,
    pub epic_count: usize,
}

/// Evaluate a set of goal streaks (one per (metric, goal_type) pair) into
/// earned badges and next-milestone progress.
pub fn evaluate(streaks: &[GoalStreak]) -> MilestoneReport {
    let mut report = MilestoneReport::default();

    for streak in streaks {
        if let Some(milestone) = highest_met(streak.current_streak, streak.goal_type) {
            report.earned.push(EarnedMilestone {
                metric: streak.metric,
                goal_type: streak.goal_type,
                milestone,
                current_streak: streak.current_streak,
            });
            match milestone.rarity {
                Rarity::Legendary => report.legendary_count += 1,
                Rarity::Epic => report.epic_count += 1,
                _ => {}
            }
        }

        if let Some((milestone, remaining)) = next_unmet(streak.current_streak, streak.goal_type) {
            report.upcoming.push(UpcomingMilestone {
                metric: streak.metric,
                goal_type: streak.goal_type,
                milestone,
                remaining,
            });
        }
    }

    report.total_badges = report.earned.len();
    report
}

/// Badges present in `next` but not already covered by the remembered `prev`
/// set, i.e. the ones to celebrate.
///
/// Re-evaluating an unchanged streak diffs to nothing, so celebrations fire
/// at most once per crossed threshold.
pub fn newly_earned(prev: &[EarnedKey], next: &[EarnedMilestone]) -> Vec<EarnedMilestone> {
    next.iter()
        .filter(|n| {
            !prev.iter().any(|p| {
                p.metric == n.metric
                    && p.goal_type == n.goal_type
                    && p.threshold >= n.milestone.threshold
            })
        })
        .copied()
        .collect()
}

/// Celebration preferences, threaded explicitly from the agent's profile
/// rather than read from any global toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CelebrationConfig {
    pub play_sound: bool,
}

impl Default for CelebrationConfig {
    fn default() -> Self {
        Self { play_sound: true }
    }
}

/// A one-time celebration intent for the notification layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Celebration {
    pub title: String,
    pub body: String,
    pub rarity: Rarity,
    pub play_sound: bool,
}

/// Project newly-earned badges into celebration intents.
pub fn project_celebrations(
    prev: &[EarnedKey],
    next: &[EarnedMilestone],
    config: CelebrationConfig,
) -> Vec<Celebration> {
    newly_earned(prev, next)
        .into_iter()
        .map(|e| Celebration {
            title: format!("{} {}", e.milestone.icon, e.milestone.name),
            body: format!(
                "{} {} goal streak hit {} periods",
                e.metric.label(),
                e.goal_type.label(),
                e.current_streak
            ),
            rarity: e.milestone.rarity,
            play_sound: config.play_sound,
        })
        .collect()
}
