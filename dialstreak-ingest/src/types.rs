use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Normalized output of call-log parsers (dialer-agnostic)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallLogRow {
    pub contact_id: String,
    pub at: DateTime<Utc>,
    /// Raw disposition text as the dialer exported it ("INTERESTED - demo
    /// booked", "no answer", ...).
    pub disposition: String,
    pub note: Option<String>,
}
