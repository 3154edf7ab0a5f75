//! Fatal errors: registration and lookup problems that abort a run
//! before (or instead of) executing tests. Per-test failures never show
//! up here; they are contained in failure records.

use thiserror::Error;

/// Registration-time and lookup errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("more than one test or suite with the same name: '{name}'")]
    DuplicateName { name: String },

    #[error("no registered test named '{name}'")]
    UnknownTest { name: String },

    #[error("test '{test}' references suite '{suite}' which was never registered")]
    DanglingSuiteReference { test: String, suite: String },
}

/// Errors surfaced by the harness entry point.
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}
