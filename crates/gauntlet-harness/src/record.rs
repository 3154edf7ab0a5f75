//! Pass/fail state and accumulated diagnostics for one scope.
//!
//! A record is created at the start of a suite activation or a test run.
//! The first failure in a scope wins: once a record is failed, later
//! failures in the same scope are ignored so cascading errors from
//! subsequent phases do not drown the original diagnosis.

use crate::failure::Failure;
use crate::report::FailureReporter;

/// Lifecycle state of a [`FailureRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordState {
    Started,
    Failed,
}

/// Accumulated result for one suite activation or one test run.
#[derive(Debug, Clone)]
pub struct FailureRecord {
    state: RecordState,
    messages: Vec<String>,
    suite_name: Option<String>,
    test_name: Option<String>,
}

impl FailureRecord {
    /// Fresh record for a suite activation (`None` = the no-suite scope)
    pub fn for_suite(suite_name: Option<&str>) -> Self {
        Self {
            state: RecordState::Started,
            messages: Vec::new(),
            suite_name: suite_name.map(str::to_string),
            test_name: None,
        }
    }

    /// Snapshot this record for a single test, inheriting any suite-level
    /// failure without letting later suite mutations reach the test copy.
    pub fn for_test(&self, test_name: &str) -> Self {
        let mut copy = self.clone();
        copy.test_name = Some(test_name.to_string());
        copy
    }

    pub fn state(&self) -> RecordState {
        self.state
    }

    pub fn is_failed(&self) -> bool {
        self.state == RecordState::Failed
    }

    pub fn suite_name(&self) -> Option<&str> {
        self.suite_name.as_deref()
    }

    pub fn test_name(&self) -> Option<&str> {
        self.test_name.as_deref()
    }

    /// Diagnostic lines in the order they were recorded
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Append a plain diagnostic line
    pub fn log(&mut self, msg: impl Into<String>) {
        self.messages.push(msg.into());
    }

    /// Record a failure. No-op if this record already failed.
    pub fn fail(&mut self, failure: &Failure, reporter: &FailureReporter) {
        if self.is_failed() {
            return;
        }
        self.state = RecordState::Failed;
        self.messages.extend(reporter.render(failure));
    }
}
