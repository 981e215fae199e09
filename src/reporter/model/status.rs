use serde_derive::Serialize;
use std::fmt;

/// Lifecycle state of a test record. `Running` is the initial state; the
/// other three are terminal and a record enters exactly one of them.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TestStatus {
    Running,
    Passed,
    Failed,
    Skipped,
}

impl TestStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, TestStatus::Running)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            TestStatus::Running => "running",
            TestStatus::Passed => "passed",
            TestStatus::Failed => "failed",
            TestStatus::Skipped => "skipped",
        };
        f.write_str(name)
    }
}

/// Final verdict supplied by the test runner at `end_test`. Failure details
/// ride on the `Failed` variant so they cannot be attached to any other
/// outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Failed {
        message: Option<String>,
        trace: Option<String>,
    },
    Skipped,
}

impl Verdict {
    pub fn status(&self) -> TestStatus {
        match self {
            Verdict::Passed => TestStatus::Passed,
            Verdict::Failed { .. } => TestStatus::Failed,
            Verdict::Skipped => TestStatus::Skipped,
        }
    }
}
