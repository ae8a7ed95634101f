//! dialstreak-ingest: dialer call-log ingestion (CSV) into core activity events.

pub mod dispositions;
pub mod parsers;
pub mod types;

pub use dispositions::DispositionClassifier;
pub use types::CallLogRow;

use anyhow::Result;
use dialstreak_core::{ActivityKind, LeadActivityEvent};

/// Convert normalized call-log rows into per-contact activity events.
///
/// Rows with a recognized disposition become feedback events; the rest become
/// note events so no recorded touch is lost. Returns `(contact_id, event)`
/// pairs in input order.
pub fn rows_to_events(rows: &[CallLogRow]) -> Result<Vec<(String, LeadActivityEvent)>> {
    let classifier = DispositionClassifier::new()?;

    let mut out = Vec::with_capacity(rows.len());
    for row in rows {
        let kind = match classifier.classify(&row.disposition) {
            Some(feedback) => ActivityKind::Feedback { feedback },
            None => ActivityKind::Note,
        };

        let mut event = LeadActivityEvent::new(kind, row.at);
        event.note = match (&row.note, row.disposition.is_empty()) {
            (Some(note), _) => Some(note.clone()),
            (None, false) => Some(row.disposition.clone()),
            (None, true) => None,
        };

        out.push((row.contact_id.clone(), event));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use dialstreak_core::FeedbackKind;

    #[test]
    fn test_rows_to_events_classifies_and_falls_back() {
        let at = Utc.with_ymd_and_hms(2024, 6, 10, 14, 0, 0).unwrap();
        let rows = vec![
            CallLogRow {
                contact_id: "c-1".to_string(),
                at,
                disposition: "call back friday".to_string(),
                note: None,
            },
            CallLogRow {
                contact_id: "c-1".to_string(),
                at,
                disposition: "weird status".to_string(),
                note: Some("left brochure".to_string()),
            },
        ];

        let events = rows_to_events(&rows).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[0].1.kind,
            ActivityKind::Feedback {
                feedback: FeedbackKind::Callback
            }
        );
        assert_eq!(events[0].1.note.as_deref(), Some("call back friday"));
        assert_eq!(events[1].1.kind, ActivityKind::Note);
        assert_eq!(events[1].1.note.as_deref(), Some("left brochure"));
    }
}
