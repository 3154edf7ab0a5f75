//! Named test and suite definitions.
//!
//! The registry is an explicit instance threaded through the harness,
//! write-once per name, read many. Iteration order is registration
//! order, which is also the default execution order.

use crate::environment::Environment;
use crate::error::RegistryError;
use crate::failure::{Failure, Outcome};
use crate::fixture::{Fixture, FixtureFactory, TestBody};
use indexmap::IndexMap;

/// A registered test case. Immutable once registered.
#[derive(Debug)]
pub struct TestDefinition {
    pub name: String,
    pub suite_name: Option<String>,
    pub body: TestBody,
}

/// A registered suite.
pub struct SuiteDefinition {
    pub name: String,
    pub factory: FixtureFactory,
}

impl std::fmt::Debug for SuiteDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SuiteDefinition")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A test resolved to its suite and body.
#[derive(Debug)]
pub struct Resolved<'a> {
    pub suite: Option<&'a SuiteDefinition>,
    pub test: &'a TestDefinition,
}

/// Holds all test and suite definitions for one run.
#[derive(Debug, Default)]
pub struct Registry {
    tests: IndexMap<String, TestDefinition>,
    suites: IndexMap<String, SuiteDefinition>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a bare function test that ignores the environment.
    pub fn register_fn(
        &mut self,
        name: impl Into<String>,
        suite: Option<&str>,
        body: impl Fn() -> Outcome + 'static,
    ) -> Result<(), RegistryError> {
        self.insert_test(name.into(), suite, TestBody::Function(Box::new(move |_| body())))
    }

    /// Register a bare function test that receives the environment.
    pub fn register_fn_with_env(
        &mut self,
        name: impl Into<String>,
        suite: Option<&str>,
        body: impl Fn(&mut Environment) -> Outcome + 'static,
    ) -> Result<(), RegistryError> {
        self.insert_test(name.into(), suite, TestBody::Function(Box::new(body)))
    }

    /// Register a fixture test whose constructor receives the environment.
    pub fn register_fixture(
        &mut self,
        name: impl Into<String>,
        suite: Option<&str>,
        factory: impl Fn(&mut Environment) -> Result<Box<dyn Fixture>, Failure> + 'static,
    ) -> Result<(), RegistryError> {
        self.insert_test(name.into(), suite, TestBody::Fixture(Box::new(factory)))
    }

    /// Register a fixture test whose constructor ignores the environment.
    pub fn register_fixture_no_env(
        &mut self,
        name: impl Into<String>,
        suite: Option<&str>,
        factory: impl Fn() -> Result<Box<dyn Fixture>, Failure> + 'static,
    ) -> Result<(), RegistryError> {
        self.insert_test(
            name.into(),
            suite,
            TestBody::Fixture(Box::new(move |_| factory())),
        )
    }

    /// Register a suite whose constructor receives the environment.
    pub fn register_suite(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(&mut Environment) -> Result<Box<dyn Fixture>, Failure> + 'static,
    ) -> Result<(), RegistryError> {
        self.insert_suite(name.into(), Box::new(factory))
    }

    /// Register a suite whose constructor ignores the environment.
    pub fn register_suite_no_env(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn() -> Result<Box<dyn Fixture>, Failure> + 'static,
    ) -> Result<(), RegistryError> {
        self.insert_suite(name.into(), Box::new(move |_| factory()))
    }

    fn insert_test(
        &mut self,
        name: String,
        suite: Option<&str>,
        body: TestBody,
    ) -> Result<(), RegistryError> {
        if self.tests.contains_key(&name) {
            return Err(RegistryError::DuplicateName { name });
        }
        self.tests.insert(
            name.clone(),
            TestDefinition {
                name,
                suite_name: suite.map(str::to_string),
                body,
            },
        );
        Ok(())
    }

    fn insert_suite(&mut self, name: String, factory: FixtureFactory) -> Result<(), RegistryError> {
        if self.suites.contains_key(&name) {
            return Err(RegistryError::DuplicateName { name });
        }
        self.suites
            .insert(name.clone(), SuiteDefinition { name, factory });
        Ok(())
    }

    /// All test names in registration order.
    pub fn test_names(&self) -> impl Iterator<Item = &str> {
        self.tests.keys().map(String::as_str)
    }

    pub fn contains_test(&self, name: &str) -> bool {
        self.tests.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Resolve a test name to its suite and body.
    pub fn resolve(&self, name: &str) -> Result<Resolved<'_>, RegistryError> {
        let test = self
            .tests
            .get(name)
            .ok_or_else(|| RegistryError::UnknownTest {
                name: name.to_string(),
            })?;
        let suite = match &test.suite_name {
            Some(suite_name) => Some(self.suites.get(suite_name).ok_or_else(|| {
                RegistryError::DanglingSuiteReference {
                    test: test.name.clone(),
                    suite: suite_name.clone(),
                }
            })?),
            None => None,
        };
        Ok(Resolved { suite, test })
    }

    /// Verify every referenced suite exists, before anything runs.
    pub fn check_consistency(&self) -> Result<(), RegistryError> {
        for test in self.tests.values() {
            if let Some(suite_name) = &test.suite_name {
                if !self.suites.contains_key(suite_name) {
                    return Err(RegistryError::DanglingSuiteReference {
                        test: test.name.clone(),
                        suite: suite_name.clone(),
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;
    impl Fixture for Noop {}

    fn noop_suite(_: &mut Environment) -> Result<Box<dyn Fixture>, Failure> {
        Ok(Box::new(Noop))
    }

    #[test]
    fn test_duplicate_test_name_rejected() {
        let mut registry = Registry::new();
        registry.register_fn("T1", None, || Ok(())).unwrap();

        let err = registry.register_fn("T1", None, || Ok(())).unwrap_err();
        assert_eq!(
            err,
            RegistryError::DuplicateName {
                name: "T1".to_string()
            }
        );
    }

    #[test]
    fn test_duplicate_suite_name_rejected() {
        let mut registry = Registry::new();
        registry.register_suite("S1", noop_suite).unwrap();
        assert!(registry.register_suite("S1", noop_suite).is_err());
    }

    #[test]
    fn test_names_in_registration_order() {
        let mut registry = Registry::new();
        registry.register_fn("T2", None, || Ok(())).unwrap();
        registry.register_fn("T1", None, || Ok(())).unwrap();
        registry.register_fn("T3", None, || Ok(())).unwrap();

        let names: Vec<&str> = registry.test_names().collect();
        assert_eq!(names, vec!["T2", "T1", "T3"]);
    }

    #[test]
    fn test_resolve_unknown_test() {
        let registry = Registry::new();
        assert_eq!(
            registry.resolve("nope").unwrap_err(),
            RegistryError::UnknownTest {
                name: "nope".to_string()
            }
        );
    }

    #[test]
    fn test_resolve_returns_suite_pairing() {
        let mut registry = Registry::new();
        registry.register_suite("S1", noop_suite).unwrap();
        registry.register_fn("T1", Some("S1"), || Ok(())).unwrap();
        registry.register_fn("T2", None, || Ok(())).unwrap();

        let resolved = registry.resolve("T1").unwrap();
        assert_eq!(resolved.suite.map(|s| s.name.as_str()), Some("S1"));
        assert_eq!(resolved.test.name, "T1");

        let resolved = registry.resolve("T2").unwrap();
        assert!(resolved.suite.is_none());
    }

    #[test]
    fn test_consistency_catches_dangling_suite() {
        let mut registry = Registry::new();
        registry
            .register_fn("T1", Some("missing"), || Ok(()))
            .unwrap();

        let err = registry.check_consistency().unwrap_err();
        assert_eq!(
            err,
            RegistryError::DanglingSuiteReference {
                test: "T1".to_string(),
                suite: "missing".to_string()
            }
        );
    }

    #[test]
    fn test_consistency_passes_when_suites_exist() {
        let mut registry = Registry::new();
        registry.register_suite("S1", noop_suite).unwrap();
        registry.register_fn("T1", Some("S1"), || Ok(())).unwrap();
        registry.register_fn("T2", None, || Ok(())).unwrap();
        assert!(registry.check_consistency().is_ok());
    }
}
