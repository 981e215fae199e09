use crate::reporter::model::record::TestExecutionRecord;
use crate::reporter::model::status::TestStatus;
use serde_derive::Serialize;

/// Aggregate statistics over a registry snapshot. Pure data; recompute it
/// from a fresh snapshot rather than mutating it.
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionSummary {
    pub total_tests: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub total_duration_ms: u64,
    pub pass_rate: f64,
}

impl ExecutionSummary {
    pub fn from_records(records: &[TestExecutionRecord]) -> Self {
        let total_tests = records.len();
        let mut passed = 0;
        let mut failed = 0;
        let mut skipped = 0;
        let mut total_duration_ms = 0u64;
        for record in records {
            match record.status() {
                TestStatus::Passed => passed += 1,
                TestStatus::Failed => failed += 1,
                TestStatus::Skipped => skipped += 1,
                TestStatus::Running => {}
            }
            // Abandoned (still Running) records have no duration yet.
            if let Some(duration) = record.duration() {
                total_duration_ms += duration.as_millis() as u64;
            }
        }
        let pass_rate = if total_tests > 0 {
            passed as f64 / total_tests as f64 * 100.0
        } else {
            0.0
        };
        Self {
            total_tests,
            passed,
            failed,
            skipped,
            total_duration_ms,
            pass_rate,
        }
    }
}
