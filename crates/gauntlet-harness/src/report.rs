//! Failure reporter: turns a typed failure into deterministic,
//! human-readable diagnostic lines.
//!
//! Classification keys off [`FailureKind`]; the offending frame is the
//! location the failure itself carries (captured via `#[track_caller]`
//! or the panic hook), so no framework frames ever appear in a report.

use crate::failure::{Failure, FailureKind};
use crate::source::{boxed, context_window, FsSource, SourceLocator};

const HEADER: &str = "+-- FAILURE DETECTED! ------------------";
const REASON: &str = "+-- Reason --";
const FOOTER: &str = "+---------------------------------------";

/// Renders failures into report lines.
pub struct FailureReporter {
    locator: Box<dyn SourceLocator>,
}

impl Default for FailureReporter {
    fn default() -> Self {
        Self::new(Box::new(FsSource))
    }
}

impl FailureReporter {
    /// Reporter with a custom source locator (in-memory in tests).
    pub fn new(locator: Box<dyn SourceLocator>) -> Self {
        Self { locator }
    }

    /// Render the full report block for one failure.
    pub fn render(&self, failure: &Failure) -> Vec<String> {
        let mut lines = vec![HEADER.to_string()];

        match &failure.location {
            Some(loc) => {
                lines.push(format!("|  at line {} in '{}'", loc.line, loc.file));
                if let Ok(source) = self.locator.read(&loc.file) {
                    let window =
                        context_window(&source, loc.line as usize, self.needle(failure));
                    lines.extend(boxed(&window));
                }
                lines.push(REASON.to_string());
                lines.push(format!("| {}", self.reason(failure)));
            }
            // No usable frame: fall back to the bare reason
            None => lines.push(format!("| {}", self.reason(failure))),
        }

        lines.push(FOOTER.to_string());
        lines
    }

    /// The one-line explanation of the failure.
    pub fn reason(&self, failure: &Failure) -> String {
        match &failure.kind {
            FailureKind::Assertion { message } => format!("assert False, {}", message),
            FailureKind::Helper {
                name,
                subjects,
                message,
            } => match subjects.as_slice() {
                [] => format!("{}(), {}", name, message),
                [one] => format!("{}({}), {}", name, one, message),
                [first, second, ..] => format!("{}({}, {}), {}", name, first, second, message),
            },
            FailureKind::Error { message } => message.clone(),
        }
    }

    /// Text the context window re-anchors on: the opening line of the
    /// failing call contains this name.
    fn needle(&self, failure: &Failure) -> Option<&'static str> {
        match &failure.kind {
            FailureKind::Helper { name, .. } => Some(*name),
            FailureKind::Assertion { .. } => Some("check"),
            FailureKind::Error { .. } => None,
        }
    }
}
