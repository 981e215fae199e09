//! Test-execution reporter for the ZenQA API test harness.
//!
//! The harness drives HTTP calls against a remote API; this crate observes
//! the lifecycle of every test case (start, each request/response, verdict),
//! accumulates the telemetry in an [`ExecutionRegistry`], aggregates it into
//! an [`ExecutionSummary`] and renders a single self-contained HTML report.
//!
//! The registry is an explicit value owned by the run orchestrator, shared
//! between workers behind an `Arc`:
//!
//! ```
//! use zenqa_reporter::{ExecutionRegistry, Method, Verdict};
//!
//! let registry = ExecutionRegistry::new();
//! let handle = registry.begin_test("Objects_Get_ReturnsList", "GET /objects smoke");
//! registry.record_request_sent(
//!     &handle,
//!     Method::Get,
//!     "/objects",
//!     vec![("Accept".to_owned(), "application/json".to_owned())],
//!     None,
//! );
//! registry.record_response_received(
//!     &handle,
//!     200,
//!     "OK",
//!     vec![("Content-Type".to_owned(), "application/json".to_owned())],
//!     "[]",
//!     "application/json",
//!     std::time::Duration::from_millis(15),
//! );
//! registry.end_test(&handle, Verdict::Passed);
//! assert_eq!(registry.snapshot().len(), 1);
//! ```

extern crate chrono;
extern crate derivative;
extern crate serde_derive;
extern crate uuid;

#[macro_use]
extern crate log;

#[macro_use]
extern crate derive_builder;

pub mod configuration;
pub mod logging;
pub mod reporter;

pub use self::configuration::Settings;
pub use self::logging::init_logging;
pub use self::reporter::error::Error;
pub use self::reporter::html::HtmlReporter;
pub use self::reporter::model::method::Method;
pub use self::reporter::model::record::TestExecutionRecord;
pub use self::reporter::model::status::{TestStatus, Verdict};
pub use self::reporter::model::telemetry::{Headers, ResponseTelemetry, TelemetryEntry};
pub use self::reporter::observer::{Event, LogObserver, Observer};
pub use self::reporter::registry::{ExecutionRegistry, Outcome, RecordHandle};
pub use self::reporter::summary::ExecutionSummary;
