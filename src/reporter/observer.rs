use crate::reporter::model::method::Method;
use crate::reporter::model::status::TestStatus;
use std::time::Duration;

/// A state transition successfully applied to the registry. Observers see
/// events after the mutation commits, outside any registry lock; rejected
/// (no-op) calls never produce an event.
#[derive(Debug, Clone)]
pub enum Event {
    TestStarted {
        name: String,
        description: String,
    },
    RequestSent {
        test_name: String,
        method: Method,
        endpoint: String,
    },
    ResponseReceived {
        test_name: String,
        status_code: u16,
        status_text: String,
        duration: Duration,
    },
    TestFinished {
        name: String,
        status: TestStatus,
        duration: Duration,
        error_message: Option<String>,
    },
}

/// Subscriber to registry state transitions. Implementations must be cheap
/// and non-blocking; they run on the thread that performed the mutation.
pub trait Observer: Send + Sync {
    fn notify(&self, event: &Event);
}

/// Stock observer emitting one log line per lifecycle/telemetry event.
#[derive(Debug, Default)]
pub struct LogObserver;

impl Observer for LogObserver {
    fn notify(&self, event: &Event) {
        match event {
            Event::TestStarted { name, description } => {
                if description.is_empty() {
                    info!("Test started: {}", name);
                } else {
                    info!("Test started: {} - {}", name, description);
                }
            }
            Event::RequestSent {
                test_name,
                method,
                endpoint,
            } => {
                info!("[{}] HTTP {} {}", test_name, method, endpoint);
            }
            Event::ResponseReceived {
                test_name,
                status_code,
                status_text,
                duration,
            } => {
                info!(
                    "[{}] HTTP {} {} in {} ms",
                    test_name,
                    status_code,
                    status_text,
                    duration.as_millis()
                );
            }
            Event::TestFinished {
                name,
                status,
                duration,
                error_message,
            } => {
                info!("Test {}: {} in {} ms", status, name, duration.as_millis());
                if let Some(message) = error_message {
                    error!("Test failed: {} - {}", name, message);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {

    use super::{Event, Observer};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    pub(crate) struct CountingObserver {
        pub(crate) events: Arc<AtomicUsize>,
    }

    impl Observer for CountingObserver {
        fn notify(&self, _event: &Event) {
            self.events.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_observer_sees_every_applied_mutation() {
        use crate::reporter::model::method::Method;
        use crate::reporter::model::status::Verdict;
        use crate::reporter::registry::ExecutionRegistry;
        use std::time::Duration;

        let events = Arc::new(AtomicUsize::new(0));
        let mut registry = ExecutionRegistry::new();
        registry.add_observer(Box::new(CountingObserver {
            events: events.clone(),
        }));

        let handle = registry.begin_test("t1", "");
        registry.record_request_sent(&handle, Method::Get, "/objects", Vec::new(), None);
        registry.record_response_received(
            &handle,
            200,
            "OK",
            Vec::new(),
            "[]",
            "application/json",
            Duration::from_millis(15),
        );
        registry.end_test(&handle, Verdict::Passed);
        // Rejected mutation, no event.
        registry.end_test(&handle, Verdict::Passed);

        assert_eq!(events.load(Ordering::SeqCst), 4);
    }
}
