//! Typed failure values produced by assertion helpers and caught panics.
//!
//! Failures are report payload, not propagation errors: the reporter keys
//! its classification off [`FailureKind`] instead of inspecting runtime
//! types, and the call site is captured through `#[track_caller]` so the
//! recorded frame is always the author's code, never the harness's own.

use std::fmt;
use std::panic::Location;

/// Result of one test or lifecycle phase body.
pub type Outcome = Result<(), Failure>;

/// A source position attached to a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// Path as the compiler recorded it
    pub file: String,
    /// 1-based line number
    pub line: u32,
}

impl SourceLocation {
    /// Create a location from explicit parts
    pub fn new(file: impl Into<String>, line: u32) -> Self {
        Self {
            file: file.into(),
            line,
        }
    }

    /// Capture the caller's position.
    #[track_caller]
    pub fn caller() -> Self {
        let loc = Location::caller();
        Self::new(loc.file(), loc.line())
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}

/// Classification of a failure, decided when the failure is raised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// A boolean assertion (the `check!` macro) evaluated to false
    Assertion { message: String },
    /// An assertion helper or explicit `fail` call, carrying the helper
    /// name and zero, one or two stringified subject values
    Helper {
        name: &'static str,
        subjects: Vec<String>,
        message: String,
    },
    /// Anything else: a propagated error or a caught panic
    Error { message: String },
}

/// A failure raised inside a test or suite phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: FailureKind,
    pub location: Option<SourceLocation>,
}

impl Failure {
    /// Boolean assertion failure at the caller's position
    #[track_caller]
    pub fn assertion(message: impl Into<String>) -> Self {
        Self {
            kind: FailureKind::Assertion {
                message: message.into(),
            },
            location: Some(SourceLocation::caller()),
        }
    }

    /// Helper failure at the caller's position
    #[track_caller]
    pub fn helper(
        name: &'static str,
        subjects: Vec<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind: FailureKind::Helper {
                name,
                subjects,
                message: message.into(),
            },
            location: Some(SourceLocation::caller()),
        }
    }

    /// Unclassified failure with no usable source position
    pub fn error(message: impl Into<String>) -> Self {
        Self::error_at(message, None)
    }

    /// Unclassified failure with an explicit position (used when a panic
    /// location was captured by the hook)
    pub fn error_at(message: impl Into<String>, location: Option<SourceLocation>) -> Self {
        Self {
            kind: FailureKind::Error {
                message: message.into(),
            },
            location,
        }
    }

    /// Replace the captured location, mostly useful when reconstructing
    /// failures in reporter tests
    pub fn with_location(mut self, location: SourceLocation) -> Self {
        self.location = Some(location);
        self
    }
}

impl<E: std::error::Error> From<E> for Failure {
    fn from(err: E) -> Self {
        Failure::error(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assertion_captures_caller() {
        let failure = Failure::assertion("Wibble");
        let loc = failure.location.expect("assertion carries a location");
        assert!(loc.file.ends_with("failure.rs"));
        assert!(loc.line > 0);
    }

    #[test]
    fn test_helper_kind_payload() {
        let failure = Failure::helper("assert_eq", vec!["12".into(), "13".into()], "nope");
        match failure.kind {
            FailureKind::Helper {
                name,
                subjects,
                message,
            } => {
                assert_eq!(name, "assert_eq");
                assert_eq!(subjects, vec!["12", "13"]);
                assert_eq!(message, "nope");
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_error_has_no_location_by_default() {
        let failure = Failure::error("boom");
        assert_eq!(failure.location, None);
    }

    #[test]
    fn test_from_std_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let failure = Failure::from(io_err);
        assert_eq!(
            failure.kind,
            FailureKind::Error {
                message: "gone".to_string()
            }
        );
    }

    #[test]
    fn test_location_display() {
        let loc = SourceLocation::new("src/demo.rs", 12);
        assert_eq!(loc.to_string(), "src/demo.rs:12");
    }
}
