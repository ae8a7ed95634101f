//! dialstreak-store: JSON-file-backed persistence collaborator.
//!
//! One file per record family under a root directory (default
//! `~/.dialstreak`). This is the layer that owns the at-most-once-per-day
//! login credit: `credit_login` is a conditional read-modify-write keyed on
//! the stored calendar date, so a same-day repeat never touches disk.

pub mod performance;
pub mod store;

pub use performance::StoredPerformance;
pub use store::{AgentProfile, CreditOutcome, LeadCard, Store, StreakRecord};
