//! Generic dialer call-log CSV parser.
//!
//! Expected header (column order fixed by the dialer's export):
//!   contact_id,timestamp,disposition,note
//! with RFC3339 timestamps. A malformed timestamp is fatal; rows are never
//! silently dropped.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use std::path::Path;

use crate::types::CallLogRow;

/// Parse a dialer CSV export into normalized call-log rows.
pub fn parse_dialer_csv(path: impl AsRef<Path>) -> Result<Vec<CallLogRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;

    let mut out = Vec::new();
    for (i, result) in rdr.records().enumerate() {
        let record = result?;

        let contact_id = record.get(0).unwrap_or("").trim().to_string();
        if contact_id.is_empty() {
            continue;
        }

        let ts = record.get(1).unwrap_or("").trim();
        let at: DateTime<Utc> = match DateTime::parse_from_rfc3339(ts) {
            Ok(dt) => dt.with_timezone(&Utc),
            Err(e) => bail!("row {}: bad timestamp '{}': {}", i + 2, ts, e),
        };

        let disposition = record.get(2).unwrap_or("").trim().to_string();
        let note = record
            .get(3)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .map(|s| s.to_string());

        out.push(CallLogRow {
            contact_id,
            at,
            disposition,
            note,
        });
    }

    Ok(out)
}
