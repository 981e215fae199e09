use crate::reporter::model::status::{TestStatus, Verdict};
use crate::reporter::model::telemetry::{ResponseTelemetry, TelemetryEntry};
use chrono::{DateTime, Utc};
use serde_derive::Serialize;
use std::time::Duration;

/// Full lifecycle state of one test case run.
///
/// Names are not unique across a run (a re-run of "X" appends a fresh
/// record), so every record carries its own UUID; handles resolve against
/// that id, never against the name.
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TestExecutionRecord {
    id: uuid::Uuid,
    name: String,
    description: String,
    started_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ended_at: Option<DateTime<Utc>>,
    status: TestStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stack_trace: Option<String>,
    #[serde(
        rename = "durationMs",
        with = "crate::reporter::serialize::option_duration_millis",
        skip_serializing_if = "Option::is_none"
    )]
    duration: Option<Duration>,
    telemetry: Vec<TelemetryEntry>,
}

impl TestExecutionRecord {
    pub(crate) fn new(name: &str, description: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            name: name.to_owned(),
            description: description.to_owned(),
            started_at: Utc::now(),
            ended_at: None,
            status: TestStatus::Running,
            error_message: None,
            stack_trace: None,
            duration: None,
            telemetry: Vec::new(),
        }
    }

    pub fn id(&self) -> uuid::Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    pub fn status(&self) -> TestStatus {
        self.status
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn stack_trace(&self) -> Option<&str> {
        self.stack_trace.as_deref()
    }

    /// Wall-clock duration, set exactly once at the terminal transition.
    /// `None` while the record is still running.
    pub fn duration(&self) -> Option<Duration> {
        self.duration
    }

    pub fn telemetry(&self) -> &[TelemetryEntry] {
        &self.telemetry
    }

    pub(crate) fn push_telemetry(&mut self, entry: TelemetryEntry) {
        self.telemetry.push(entry);
    }

    /// Attaches `response` to the most recently appended unanswered entry.
    /// Returns `false` when every entry is already answered (or none exist).
    pub(crate) fn attach_response(&mut self, response: ResponseTelemetry) -> bool {
        match self.telemetry.iter_mut().rev().find(|entry| !entry.is_answered()) {
            Some(entry) => entry.attach_response(response),
            None => false,
        }
    }

    /// Terminal transition. Returns `false` without touching the record when
    /// it is already terminal; the first call wins.
    pub(crate) fn finish(&mut self, verdict: Verdict) -> bool {
        if self.status.is_terminal() {
            return false;
        }
        let ended_at = Utc::now();
        self.status = verdict.status();
        if let Verdict::Failed { message, trace } = verdict {
            self.error_message = message;
            self.stack_trace = trace;
        }
        self.ended_at = Some(ended_at);
        self.duration = Some(
            ended_at
                .signed_duration_since(self.started_at)
                .to_std()
                .unwrap_or_default(),
        );
        true
    }
}
