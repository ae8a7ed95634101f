//! Measured-performance source backed by the stored measurements map.

use std::collections::HashMap;

use dialstreak_core::{CoreError, GoalRecord, PerformanceSource};

/// Measured values keyed by goal record id, as synced from the dialer's
/// reporting export. A missing key means the reporting pipeline has no number
/// for that period: a fetch failure, not a zero.
#[derive(Debug, Clone, Default)]
pub struct StoredPerformance {
    values: HashMap<String, f64>,
}

impl StoredPerformance {
    pub fn new(values: HashMap<String, f64>) -> Self {
        Self { values }
    }
}

impl PerformanceSource for StoredPerformance {
    fn measured_value(&self, record: &GoalRecord) -> Result<f64, CoreError> {
        self.values
            .get(&record.id)
            .copied()
            .ok_or_else(|| CoreError::unavailable(format!("no measurement for goal {}", record.id)))
    }
}
