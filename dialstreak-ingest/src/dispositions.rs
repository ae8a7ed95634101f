//! Deterministic classification of free-text dialer dispositions.
//!
//! Dialer exports are messy: "INTERESTED - demo booked", "cb tomorrow 3pm",
//! "wrong no.", "NA x3". We match case-insensitive keyword patterns in a
//! fixed precedence order; anything unrecognized classifies to `None` and the
//! row is imported as a plain note event.

use anyhow::Result;
use dialstreak_core::FeedbackKind;
use regex::Regex;

/// Compiled disposition rules, in precedence order: "not interested" must win
/// before the bare "interested" pattern gets a look.
pub struct DispositionClassifier {
    rules: Vec<(Regex, FeedbackKind)>,
}

impl DispositionClassifier {
    pub fn new() -> Result<Self> {
        let table: [(&str, FeedbackKind); 5] = [
            (
                r"(?i)\bnot\s+interested\b|\bno\s+interest\b|\bdeclin",
                FeedbackKind::NotInterested,
            ),
            (
                r"(?i)\bwrong\s+(number|no\.?)\b|\binvalid\s+number\b|\bdisconnected\b",
                FeedbackKind::WrongNumber,
            ),
            (
                r"(?i)\bcall\s*back\b|\bcb\b|\bfollow\s*up\b",
                FeedbackKind::Callback,
            ),
            (
                r"(?i)\bno\s+answer\b|\bnot\s+answered\b|\bna\b|\bvoicemail\b|\bbusy\b",
                FeedbackKind::NotAnswered,
            ),
            (
                r"(?i)\binterested\b|\bhot\s+lead\b|\bdemo\s+booked\b|\bwants\b",
                FeedbackKind::Interested,
            ),
        ];

        let mut rules = Vec::with_capacity(table.len());
        for (pattern, kind) in table {
            rules.push((Regex::new(pattern)?, kind));
        }
        Ok(Self { rules })
    }

    /// Classify a raw disposition string; `None` means "no recognized outcome".
    pub fn classify(&self, raw: &str) -> Option<FeedbackKind> {
        self.rules
            .iter()
            .find(|(re, _)| re.is_match(raw))
            .map(|(_, kind)| *kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_common_dispositions() {
        let c = DispositionClassifier::new().unwrap();
        let cases = [
            ("INTERESTED - demo booked", Some(FeedbackKind::Interested)),
            ("Not interested, remove", Some(FeedbackKind::NotInterested)),
            ("cb tomorrow 3pm", Some(FeedbackKind::Callback)),
            ("no answer x3", Some(FeedbackKind::NotAnswered)),
            ("wrong no.", Some(FeedbackKind::WrongNumber)),
            ("left voicemail", Some(FeedbackKind::NotAnswered)),
            ("gibberish-disposition", None),
        ];
        for (raw, want) in cases {
            assert_eq!(c.classify(raw), want, "for '{raw}'");
        }
    }

    #[test]
    fn test_not_interested_beats_interested() {
        let c = DispositionClassifier::new().unwrap();
        assert_eq!(
            c.classify("NOT INTERESTED in anything"),
            Some(FeedbackKind::NotInterested)
        );
    }
}
