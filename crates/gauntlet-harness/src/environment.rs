//! Shared mutable environment handed to suite and test phases.
//!
//! The environment is owned by the suite runner for the duration of one
//! suite activation and lent (`&mut`) to tests and fixtures during their
//! invocation window. A fresh copy is derived from the run's initial
//! configuration on every (re)activation, so mutations never leak from
//! one suite into the next.

use crate::value::Value;
use indexmap::IndexMap;

/// Insertion-ordered key/value bag shared across a suite's lifetime.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    entries: IndexMap<String, Value>,
}

impl Environment {
    /// Create an empty environment
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value by key
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    /// Insert or overwrite a value
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.entries.insert(key.into(), value.into());
    }

    /// Remove a key, returning its value if it was present
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.entries.shift_remove(key)
    }

    /// Check whether a key is present
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the environment has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl FromIterator<(String, Value)> for Environment {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
