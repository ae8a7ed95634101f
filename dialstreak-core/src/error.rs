//! Core failure types.
//!
//! Only two things can go wrong inside the engine itself: an input that is
//! structurally broken (a date that does not parse), or a collaborator the
//! caller wired in (performance data, activity fetch) reporting that it could
//! not produce a value. Missing/empty history is never an error; every
//! derivation degrades to a zero-valued result instead.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Malformed input the engine refuses to guess around (e.g. an
    /// unparseable date). Scores and streaks must never be NaN-propagated.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A data source the engine depends on failed to answer. The engine does
    /// not retry; backoff is the caller's call.
    #[error("data unavailable: {0}")]
    DataUnavailable(String),
}

impl CoreError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        CoreError::InvalidInput(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        CoreError::DataUnavailable(msg.into())
    }
}
