//! Static milestone catalog: streak thresholds with rarity, name, and icon.
//!
//! Single source of truth; presentation maps rarity to styling, nothing more.
//! Thresholds are strictly increasing within each goal type's table.

use serde::{Deserialize, Serialize};

use crate::goal_streak::GoalType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub fn label(&self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }
}

// Serialize-only: the names/icons are static catalog data, so nothing ever
// deserializes back into a definition.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MilestoneDefinition {
    /// Consecutive completed periods required.
    pub threshold: u32,
    pub name: &'static str,
    pub icon: &'static str,
    pub rarity: Rarity,
}

/// Weekly-goal milestone tiers (periods = weeks).
pub const WEEKLY_MILESTONES: [MilestoneDefinition; 6] = [
    MilestoneDefinition { threshold: 2, name: "Back to Back", icon: "🔥", rarity: Rarity::Common },
    MilestoneDefinition { threshold: 4, name: "Perfect Month", icon: "⚡", rarity: Rarity::Uncommon },
    MilestoneDefinition { threshold: 8, name: "Relentless", icon: "🎯", rarity: Rarity::Rare },
    MilestoneDefinition { threshold: 12, name: "Quarter Crusher", icon: "💎", rarity: Rarity::Epic },
    MilestoneDefinition { threshold: 26, name: "Half-Year Hero", icon: "🏆", rarity: Rarity::Epic },
    MilestoneDefinition { threshold: 52, name: "Iron Year", icon: "👑", rarity: Rarity::Legendary },
];

/// Monthly-goal milestone tiers (periods = months).
pub const MONTHLY_MILESTONES: [MilestoneDefinition; 6] = [
    MilestoneDefinition { threshold: 2, name: "Double Down", icon: "🔥", rarity: Rarity::Common },
    MilestoneDefinition { threshold: 3, name: "Quarter Closer", icon: "⚡", rarity: Rarity::Uncommon },
    MilestoneDefinition { threshold: 6, name: "Six Straight", icon: "🎯", rarity: Rarity::Rare },
    MilestoneDefinition { threshold: 9, name: "Unstoppable", icon: "💎", rarity: Rarity::Epic },
    MilestoneDefinition { threshold: 12, name: "Year of Fire", icon: "🏆", rarity: Rarity::Legendary },
    MilestoneDefinition { threshold: 24, name: "Two-Year Titan", icon: "👑", rarity: Rarity::Legendary },
];

/// The ascending milestone table for a goal type.
pub fn catalog(goal_type: GoalType) -> &'static [MilestoneDefinition] {
    match goal_type {
        GoalType::Weekly => &WEEKLY_MILESTONES,
        GoalType::Monthly => &MONTHLY_MILESTONES,
    }
}

/// Greatest-threshold entry with `threshold <= streak`, if any.
pub fn highest_met(streak: u32, goal_type: GoalType) -> Option<MilestoneDefinition> {
    catalog(goal_type)
        .iter()
        .rev()
        .find(|m| m.threshold <= streak)
        .copied()
}

/// Smallest-threshold entry with `threshold > streak`, with periods to go.
pub fn next_unmet(streak: u32, goal_type: GoalType) -> Option<(MilestoneDefinition, u32)> {
    catalog(goal_type)
        .iter()
        .find(|m| m.threshold > streak)
        .map(|m| (*m, m.threshold - streak))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_strictly_increasing() {
        for gt in [GoalType::Weekly, GoalType::Monthly] {
            let table = catalog(gt);
            for pair in table.windows(2) {
                assert!(pair[0].threshold < pair[1].threshold);
            }
        }
    }

    #[test]
    fn highest_met_picks_exact_threshold() {
        // Exactly at a tier gets that tier, not its neighbors.
        let m = highest_met(8, GoalType::Weekly).unwrap();
        assert_eq!(m.threshold, 8);
        assert_eq!(m.rarity, Rarity::Rare);
    }

    #[test]
    fn highest_met_between_tiers() {
        let m = highest_met(11, GoalType::Weekly).unwrap();
        assert_eq!(m.threshold, 8);
    }

    #[test]
    fn below_first_tier_is_none() {
        assert!(highest_met(1, GoalType::Weekly).is_none());
        assert!(highest_met(0, GoalType::Monthly).is_none());
    }

    #[test]
    fn next_unmet_carries_remaining() {
        let (m, remaining) = next_unmet(5, GoalType::Weekly).unwrap();
        assert_eq!(m.threshold, 8);
        assert_eq!(remaining, 3);
    }

    #[test]
    fn past_top_tier_has_no_next() {
        assert!(next_unmet(52, GoalType::Weekly).is_none());
        assert!(next_unmet(100, GoalType::Monthly).is_none());
    }
}
