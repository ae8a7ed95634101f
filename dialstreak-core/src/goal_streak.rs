//! Goal records and the consecutive-completed-period streak deriver.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Period length of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    Weekly,
    Monthly,
}

impl GoalType {
    pub fn label(&self) -> &'static str {
        match self {
            GoalType::Weekly => "weekly",
            GoalType::Monthly => "monthly",
        }
    }
}

/// What the goal measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Metric {
    Calls,
    Interested,
    Leads,
    Conversion,
}

impl Metric {
    pub const ALL: [Metric; 4] = [
        Metric::Calls,
        Metric::Interested,
        Metric::Leads,
        Metric::Conversion,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Metric::Calls => "calls",
            Metric::Interested => "interested",
            Metric::Leads => "leads",
            Metric::Conversion => "conversion",
        }
    }
}

/// One goal period as persisted. Many per agent over time; the store keeps at
/// most one active record per (agent, goal_type, metric).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalRecord {
    pub id: String,
    pub agent_id: String,
    pub goal_type: GoalType,
    pub metric: Metric,
    pub target_value: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_active: bool,
    pub completed_at: Option<NaiveDate>,
}

impl GoalRecord {
    /// A period is closed once its end date is behind `as_of`.
    pub fn is_closed(&self, as_of: NaiveDate) -> bool {
        self.end_date < as_of
    }
}

/// Seam to the performance-data collaborator: the value actually measured for
/// a goal period (calls made, leads created, ...). Fetch failures surface as
/// `CoreError::DataUnavailable`; the deriver never retries.
pub trait PerformanceSource {
    fn measured_value(&self, record: &GoalRecord) -> Result<f64, CoreError>;
}

/// Derived, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalStreak {
    pub metric: Metric,
    pub goal_type: GoalType,
    /// Consecutive most-recent closed periods where the goal was completed.
    pub current_streak: u32,
}

/// Walk an agent's goal history (one (metric, goal_type) pair) newest-first
/// and count the run of consecutive completed periods.
///
/// Rules:
/// - a period still open at `as_of` is skipped, never a break
/// - a closed period counts iff `completed_at` is set AND the measured value
///   met the target
/// - counting stops at the first closed-incomplete period or at a gap
///   (records whose boundaries are not adjacent per the period length)
/// - empty history → streak 0
pub fn derive_streak(
    history: &[GoalRecord],
    metric: Metric,
    goal_type: GoalType,
    as_of: NaiveDate,
    performance: &impl PerformanceSource,
) -> Result<GoalStreak, CoreError> {
    let mut periods: Vec<&GoalRecord> = history
        .iter()
        .filter(|r| r.metric == metric && r.goal_type == goal_type)
        .collect();
    periods.sort_by(|a, b| b.end_date.cmp(&a.end_date));

    let mut count: u32 = 0;
    let mut prev_start: Option<NaiveDate> = None;

    for record in periods {
        if !record.is_closed(as_of) {
            continue;
        }

        // Gap check against the nearest newer counted period: the newer
        // record's start must be exactly one day after this record's end
        // (weekly goals run Mon..Sun, monthly first..last of month, so
        // adjacency is always end + 1 day == next start).
        if let Some(newer_start) = prev_start {
            if record.end_date + Duration::days(1) != newer_start {
                break;
            }
        }

        let completed = record.completed_at.is_some()
            && performance.measured_value(record)? >= record.target_value;
        if !completed {
            break;
        }

        count += 1;
        prev_start = Some(record.start_date);
    }

    Ok(GoalStreak {
        metric,
        goal_type,
        current_streak: count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Measured values keyed by record id; anything absent is a fetch failure.
    struct FixedPerformance(Vec<(String, f64)>);

    impl PerformanceSource for FixedPerformance {
        fn measured_value(&self, record: &GoalRecord) -> Result<f64, CoreError> {
            self.0
                .iter()
                .find(|(id, _)| *id == record.id)
                .map(|(_, v)| *v)
                .ok_or_else(|| CoreError::unavailable(format!("no measurement for {}", record.id)))
        }
    }

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn week(id: &str, start: &str, end: &str, completed: bool) -> GoalRecord {
        GoalRecord {
            id: id.to_string(),
            agent_id: "a1".to_string(),
            goal_type: GoalType::Weekly,
            metric: Metric::Calls,
            target_value: 50.0,
            start_date: d(start),
            end_date: d(end),
            is_active: false,
            completed_at: completed.then(|| d(end)),
        }
    }

    fn met(ids: &[&str]) -> FixedPerformance {
        FixedPerformance(ids.iter().map(|id| (id.to_string(), 60.0)).collect())
    }

    #[test]
    fn empty_history_is_zero() {
        let s = derive_streak(&[], Metric::Calls, GoalType::Weekly, d("2024-06-10"), &met(&[]))
            .unwrap();
        assert_eq!(s.current_streak, 0);
    }

    #[test]
    fn three_consecutive_completed_weeks() {
        // ISO weeks, Mon..Sun, adjacent.
        let history = vec![
            week("w1", "2024-05-20", "2024-05-26", true),
            week("w2", "2024-05-27", "2024-06-02", true),
            week("w3", "2024-06-03", "2024-06-09", true),
        ];
        let s = derive_streak(
            &history,
            Metric::Calls,
            GoalType::Weekly,
            d("2024-06-12"),
            &met(&["w1", "w2", "w3"]),
        )
        .unwrap();
        assert_eq!(s.current_streak, 3);
    }

    #[test]
    fn closed_incomplete_most_recent_breaks_to_zero() {
        let history = vec![
            week("w1", "2024-05-20", "2024-05-26", true),
            week("w2", "2024-05-27", "2024-06-02", true),
            week("w3", "2024-06-03", "2024-06-09", true),
            week("w4", "2024-06-10", "2024-06-16", false),
        ];
        // w4 is closed (as_of past its end) and incomplete → streak 0.
        let s = derive_streak(
            &history,
            Metric::Calls,
            GoalType::Weekly,
            d("2024-06-20"),
            &met(&["w1", "w2", "w3"]),
        )
        .unwrap();
        assert_eq!(s.current_streak, 0);
    }

    #[test]
    fn open_incomplete_most_recent_is_skipped() {
        let history = vec![
            week("w1", "2024-05-20", "2024-05-26", true),
            week("w2", "2024-05-27", "2024-06-02", true),
            week("w3", "2024-06-03", "2024-06-09", true),
            week("w4", "2024-06-10", "2024-06-16", false),
        ];
        // w4 is still in progress → not a break; streak counts w3..w1.
        let s = derive_streak(
            &history,
            Metric::Calls,
            GoalType::Weekly,
            d("2024-06-12"),
            &met(&["w1", "w2", "w3"]),
        )
        .unwrap();
        assert_eq!(s.current_streak, 3);
    }

    #[test]
    fn missing_period_is_a_gap() {
        // Week of 05-27 missing entirely.
        let history = vec![
            week("w1", "2024-05-20", "2024-05-26", true),
            week("w3", "2024-06-03", "2024-06-09", true),
        ];
        let s = derive_streak(
            &history,
            Metric::Calls,
            GoalType::Weekly,
            d("2024-06-12"),
            &met(&["w1", "w3"]),
        )
        .unwrap();
        assert_eq!(s.current_streak, 1);
    }

    #[test]
    fn completed_at_without_measured_target_does_not_count() {
        let history = vec![week("w3", "2024-06-03", "2024-06-09", true)];
        // Measured 60 against target 50 counts...
        let ok = derive_streak(
            &history,
            Metric::Calls,
            GoalType::Weekly,
            d("2024-06-12"),
            &FixedPerformance(vec![("w3".to_string(), 60.0)]),
        )
        .unwrap();
        assert_eq!(ok.current_streak, 1);

        // ...measured 40 does not, even with completed_at set.
        let short = derive_streak(
            &history,
            Metric::Calls,
            GoalType::Weekly,
            d("2024-06-12"),
            &FixedPerformance(vec![("w3".to_string(), 40.0)]),
        )
        .unwrap();
        assert_eq!(short.current_streak, 0);
    }

    #[test]
    fn fetch_failure_surfaces_not_swallowed() {
        let history = vec![week("w3", "2024-06-03", "2024-06-09", true)];
        let err = derive_streak(
            &history,
            Metric::Calls,
            GoalType::Weekly,
            d("2024-06-12"),
            &FixedPerformance(vec![]),
        )
        .unwrap_err();
        assert!(matches!(err, CoreError::DataUnavailable(_)));
    }

    #[test]
    fn other_metrics_are_ignored() {
        let mut other = week("x1", "2024-06-03", "2024-06-09", true);
        other.metric = Metric::Leads;
        let history = vec![other, week("w3", "2024-06-03", "2024-06-09", true)];
        let s = derive_streak(
            &history,
            Metric::Calls,
            GoalType::Weekly,
            d("2024-06-12"),
            &met(&["w3"]),
        )
        .unwrap();
        assert_eq!(s.current_streak, 1);
    }
}
