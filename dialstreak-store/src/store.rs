use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use dialstreak_core::{
    advance_streak, EarnedKey, GoalRecord, GoalType, LeadActivityEvent, LoginStreakState, Metric,
};

/// Default root: `~/.dialstreak`.
pub fn default_root() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".dialstreak"))
}

/// Per-agent presentation/notification preferences. Threaded explicitly into
/// the evaluator's celebration config, never a process-global.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentProfile {
    #[serde(default = "default_timezone")]
    pub timezone: String,
    #[serde(default = "default_true")]
    pub celebration_sounds: bool,
}

fn default_timezone() -> String {
    "UTC".to_string()
}

fn default_true() -> bool {
    true
}

impl Default for AgentProfile {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            celebration_sounds: true,
        }
    }
}

/// Persisted streak state plus the secondary full-instant login stamp, which
/// is distinct from the date-only field the ledger reasons about.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct StreakRecord {
    pub state: LoginStreakState,
    pub last_login_at_utc: Option<DateTime<Utc>>,
}

/// Deal metadata for a contact, fed to the lead score engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LeadCard {
    pub deal_value: Option<f64>,
    pub expected_close_date: Option<DateTime<Utc>>,
}

/// What `credit_login` did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditOutcome {
    /// First credit of the day; state was advanced and written.
    Credited,
    /// Already credited today; nothing written.
    AlreadyCredited,
}

#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn open_default() -> Result<Self> {
        Ok(Self::new(default_root()?))
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn ensure_root(&self) -> Result<()> {
        fs::create_dir_all(&self.root).with_context(|| format!("create {}", self.root.display()))
    }

    fn read_json<T: Default + for<'de> Deserialize<'de>>(&self, name: &str) -> Result<T> {
        let path = self.root.join(name);
        if !path.exists() {
            return Ok(T::default());
        }
        let s = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
        serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<()> {
        self.ensure_root()?;
        let path = self.root.join(name);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&path, json).with_context(|| format!("write {}", path.display()))
    }

    // ---- agent profile ----

    pub fn load_profile(&self, agent_id: &str) -> Result<AgentProfile> {
        self.read_json(&format!("profile_{agent_id}.json"))
    }

    pub fn save_profile(&self, agent_id: &str, profile: &AgentProfile) -> Result<()> {
        self.write_json(&format!("profile_{agent_id}.json"), profile)
    }

    // ---- login streak ----

    pub fn load_streak(&self, agent_id: &str) -> Result<StreakRecord> {
        self.read_json(&format!("streak_{agent_id}.json"))
    }

    pub fn save_streak(&self, agent_id: &str, record: &StreakRecord) -> Result<()> {
        self.write_json(&format!("streak_{agent_id}.json"), record)
    }

    /// Credit a login for the agent's local calendar day `today`.
    ///
    /// Conditional write: if the stored state already carries `today`, the
    /// call is a no-op and reports `AlreadyCredited`. Serializing concurrent
    /// processes beyond that is out of scope for a file store; a relational
    /// backend would key a unique constraint on (agent, date).
    pub fn credit_login(
        &self,
        agent_id: &str,
        today: NaiveDate,
        now_utc: DateTime<Utc>,
    ) -> Result<(CreditOutcome, StreakRecord)> {
        let mut record = self.load_streak(agent_id)?;

        if record.state.credited_on(today) {
            return Ok((CreditOutcome::AlreadyCredited, record));
        }

        record.state = advance_streak(&record.state, today);
        record.last_login_at_utc = Some(now_utc);
        self.save_streak(agent_id, &record)?;
        Ok((CreditOutcome::Credited, record))
    }

    // ---- goal history ----

    fn load_all_goals(&self, agent_id: &str) -> Result<Vec<GoalRecord>> {
        self.read_json(&format!("goals_{agent_id}.json"))
    }

    /// History for one (metric, goal_type) pair, oldest first.
    pub fn load_goal_history(
        &self,
        agent_id: &str,
        metric: Metric,
        goal_type: GoalType,
    ) -> Result<Vec<GoalRecord>> {
        let mut goals: Vec<GoalRecord> = self
            .load_all_goals(agent_id)?
            .into_iter()
            .filter(|g| g.metric == metric && g.goal_type == goal_type)
            .collect();
        goals.sort_by_key(|g| g.end_date);
        Ok(goals)
    }

    /// Append a goal record, deactivating any prior active record for the
    /// same (metric, goal_type) pair.
    pub fn append_goal_record(&self, agent_id: &str, record: GoalRecord) -> Result<()> {
        let mut goals = self.load_all_goals(agent_id)?;
        for g in goals.iter_mut() {
            if g.metric == record.metric && g.goal_type == record.goal_type {
                g.is_active = false;
            }
        }
        goals.push(record);
        self.write_json(&format!("goals_{agent_id}.json"), &goals)
    }

    // ---- lead activity + card ----

    pub fn load_activity(&self, contact_id: &str) -> Result<Vec<LeadActivityEvent>> {
        self.read_json(&format!("activity_{contact_id}.json"))
    }

    pub fn append_activity(&self, contact_id: &str, events: &[LeadActivityEvent]) -> Result<()> {
        let mut all = self.load_activity(contact_id)?;
        all.extend_from_slice(events);
        all.sort_by_key(|e| e.at);
        self.write_json(&format!("activity_{contact_id}.json"), &all)
    }

    pub fn load_lead(&self, contact_id: &str) -> Result<LeadCard> {
        self.read_json(&format!("lead_{contact_id}.json"))
    }

    pub fn save_lead(&self, contact_id: &str, card: &LeadCard) -> Result<()> {
        self.write_json(&format!("lead_{contact_id}.json"), card)
    }

    // ---- earned-badge memory (for one-time celebrations) ----

    pub fn load_earned(&self, agent_id: &str) -> Result<Vec<EarnedKey>> {
        self.read_json(&format!("earned_{agent_id}.json"))
    }

    pub fn save_earned(&self, agent_id: &str, earned: &[EarnedKey]) -> Result<()> {
        self.write_json(&format!("earned_{agent_id}.json"), &earned.to_vec())
    }

    // ---- measured performance values ----

    pub fn load_measurements(&self, agent_id: &str) -> Result<crate::StoredPerformance> {
        Ok(crate::StoredPerformance::new(
            self.read_json(&format!("measured_{agent_id}.json"))?,
        ))
    }

    pub fn save_measurements(
        &self,
        agent_id: &str,
        values: &std::collections::HashMap<String, f64>,
    ) -> Result<()> {
        self.write_json(&format!("measured_{agent_id}.json"), values)
    }
}
