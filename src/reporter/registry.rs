use crate::reporter::error::Error;
use crate::reporter::html::HtmlReporter;
use crate::reporter::model::method::Method;
use crate::reporter::model::record::TestExecutionRecord;
use crate::reporter::model::status::Verdict;
use crate::reporter::model::telemetry::{Headers, ResponseTelemetry, TelemetryEntry};
use crate::reporter::observer::{Event, Observer};
use crate::reporter::summary::ExecutionSummary;
use std::iter::FromIterator;
use std::path::Path;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;

macro_rules! lock {
    ($name: expr) => {
        match $name {
            Ok(locked) => locked,
            Err(e) => panic!("{:#?}", e),
        }
    };
}

/// Opaque reference to one specific record instance inside a registry.
///
/// Tests sharing a name (re-runs, parallel parametrized cases) get distinct
/// handles; the embedded record id keeps a handle from resolving against an
/// unrelated record occupying the same slot after a `reset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordHandle {
    index: usize,
    id: uuid::Uuid,
}

/// Result of a registry mutation. Everything except `Recorded` is a
/// tolerated no-op: bookkeeping misuse is logged, never raised, so the
/// reporter cannot fail a test suite on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Recorded,
    /// The handle does not resolve to a live record (e.g. after `reset`).
    UnknownHandle,
    /// The record already reached a terminal status.
    TerminalRecord,
    /// No unanswered telemetry entry to pair a response with.
    NoPendingRequest,
}

impl Outcome {
    pub fn is_recorded(self) -> bool {
        self == Outcome::Recorded
    }
}

/// Process-wide store of all execution records for one test run.
///
/// Appends briefly take the collection write lock; every other mutation
/// locks only the targeted record, so concurrently running tests never
/// serialize against each other. `snapshot` clones each record under its
/// own mutex and therefore never observes a half-written entry.
#[derive(Default)]
pub struct ExecutionRegistry {
    records: RwLock<Vec<Arc<Mutex<TestExecutionRecord>>>>,
    observers: Vec<Box<dyn Observer>>,
}

impl ExecutionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an observer. Call before the run starts; the registry is
    /// shared immutably (`Arc`) once tests are executing.
    pub fn add_observer(&mut self, observer: Box<dyn Observer>) {
        self.observers.push(observer);
    }

    /// Opens a new record in `Running` state and returns its handle.
    pub fn begin_test(&self, name: &str, description: &str) -> RecordHandle {
        let record = TestExecutionRecord::new(name, description);
        let id = record.id();
        let mut records = lock!(self.records.write());
        let index = records.len();
        records.push(Arc::new(Mutex::new(record)));
        drop(records);
        self.notify(Event::TestStarted {
            name: name.to_owned(),
            description: description.to_owned(),
        });
        RecordHandle { index, id }
    }

    /// Appends an unanswered telemetry entry for an outgoing request.
    /// Request headers are case-insensitive with last-write-wins semantics.
    pub fn record_request_sent<I>(
        &self,
        handle: &RecordHandle,
        method: Method,
        endpoint: &str,
        headers: I,
        body: Option<String>,
    ) -> Outcome
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let slot = match self.slot(handle) {
            Some(slot) => slot,
            None => {
                warn!("Request on unknown record handle, ignoring: {} {}", method, endpoint);
                return Outcome::UnknownHandle;
            }
        };
        let test_name;
        {
            let mut record = lock!(slot.lock());
            if record.status().is_terminal() {
                warn!(
                    "Request on finished test '{}', ignoring: {} {}",
                    record.name(),
                    method,
                    endpoint
                );
                return Outcome::TerminalRecord;
            }
            record.push_telemetry(TelemetryEntry::new(
                method,
                endpoint,
                Headers::from_iter(headers),
                body,
            ));
            test_name = record.name().to_owned();
        }
        self.notify(Event::RequestSent {
            test_name,
            method,
            endpoint: endpoint.to_owned(),
        });
        Outcome::Recorded
    }

    /// Attaches a response to the most recently appended unanswered entry.
    /// Duplicate response header names are comma-folded in observed order.
    /// Tolerates duplicate or out-of-order reporting as a no-op.
    pub fn record_response_received<I>(
        &self,
        handle: &RecordHandle,
        status_code: u16,
        status_text: &str,
        headers: I,
        body: &str,
        content_type: &str,
        duration: Duration,
    ) -> Outcome
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let slot = match self.slot(handle) {
            Some(slot) => slot,
            None => {
                warn!("Response on unknown record handle, ignoring: {}", status_code);
                return Outcome::UnknownHandle;
            }
        };
        let response = ResponseTelemetry::new(
            status_code,
            status_text,
            Headers::folded(headers),
            body,
            content_type,
            duration,
        );
        let test_name;
        {
            let mut record = lock!(slot.lock());
            if !record.attach_response(response) {
                warn!(
                    "Response without a pending request on test '{}', ignoring: {}",
                    record.name(),
                    status_code
                );
                return Outcome::NoPendingRequest;
            }
            test_name = record.name().to_owned();
        }
        self.notify(Event::ResponseReceived {
            test_name,
            status_code,
            status_text: status_text.to_owned(),
            duration,
        });
        Outcome::Recorded
    }

    /// Terminal transition for the record behind `handle`. Idempotent: the
    /// first verdict wins, later calls are ignored.
    pub fn end_test(&self, handle: &RecordHandle, verdict: Verdict) -> Outcome {
        let slot = match self.slot(handle) {
            Some(slot) => slot,
            None => {
                warn!("Verdict on unknown record handle, ignoring");
                return Outcome::UnknownHandle;
            }
        };
        let event;
        {
            let mut record = lock!(slot.lock());
            if !record.finish(verdict) {
                warn!("Verdict on already finished test '{}', ignoring", record.name());
                return Outcome::TerminalRecord;
            }
            event = Event::TestFinished {
                name: record.name().to_owned(),
                status: record.status(),
                duration: record.duration().unwrap_or_default(),
                error_message: record.error_message().map(str::to_owned),
            };
        }
        self.notify(event);
        Outcome::Recorded
    }

    /// Point-in-time copy of all records in insertion order. Each record is
    /// cloned under its own lock, so a snapshot taken while another thread
    /// appends telemetry never contains a torn record.
    pub fn snapshot(&self) -> Vec<TestExecutionRecord> {
        let records = lock!(self.records.read());
        let slots: Vec<Arc<Mutex<TestExecutionRecord>>> = records.iter().cloned().collect();
        drop(records);
        slots
            .iter()
            .map(|slot| lock!(slot.lock()).clone())
            .collect()
    }

    /// Drops all records. Only between independent runs; handles issued
    /// before a reset become stale and further calls on them are no-ops.
    pub fn reset(&self) {
        lock!(self.records.write()).clear();
    }

    /// Snapshot, aggregate and write the HTML report in one call.
    pub fn render<P: AsRef<Path>>(&self, output: P) -> Result<(), Error> {
        let records = self.snapshot();
        let summary = ExecutionSummary::from_records(&records);
        HtmlReporter::new()?.write(&summary, &records, output)
    }

    fn slot(&self, handle: &RecordHandle) -> Option<Arc<Mutex<TestExecutionRecord>>> {
        let records = lock!(self.records.read());
        let slot = records.get(handle.index)?.clone();
        drop(records);
        if lock!(slot.lock()).id() == handle.id {
            Some(slot)
        } else {
            None
        }
    }

    fn notify(&self, event: Event) {
        for observer in &self.observers {
            observer.notify(&event);
        }
    }
}
