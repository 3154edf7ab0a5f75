//! Run entry point: drives the registry, suite transitions, and the
//! per-test report output.

use crate::environment::Environment;
use crate::error::{HarnessError, RegistryError};
use crate::record::FailureRecord;
use crate::registry::Registry;
use crate::report::FailureReporter;
use crate::suite::SuiteRunner;
use std::io::{self, Write};

/// Outcome of one executed test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseReport {
    pub name: String,
    pub passed: bool,
}

/// Results of a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub cases: Vec<CaseReport>,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.cases.len()
    }

    pub fn passed(&self) -> usize {
        self.cases.iter().filter(|c| c.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.cases.iter().filter(|c| !c.passed).count()
    }

    pub fn all_passed(&self) -> bool {
        self.failed() == 0
    }
}

/// Owns the registry, the reporter, and the run's initial configuration.
pub struct Harness {
    registry: Registry,
    reporter: FailureReporter,
    initial_env: Environment,
}

impl Harness {
    pub fn new(registry: Registry) -> Self {
        Self {
            registry,
            reporter: FailureReporter::default(),
            initial_env: Environment::new(),
        }
    }

    /// Seed the configuration every suite activation starts from.
    pub fn with_initial_env(mut self, env: Environment) -> Self {
        self.initial_env = env;
        self
    }

    /// Swap the failure reporter (stubbed source locator in tests).
    pub fn with_reporter(mut self, reporter: FailureReporter) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run every registered test (or just `test_name`), reporting to stdout.
    pub fn run(&self, test_name: Option<&str>) -> Result<RunSummary, HarnessError> {
        let mut stdout = io::stdout();
        self.run_with(test_name, &mut stdout)
    }

    /// Run with the report written to `out`.
    ///
    /// Registration and lookup problems are fatal and surface here;
    /// per-test failures are printed and the run continues, so one
    /// failing test never aborts the rest.
    pub fn run_with<W: Write>(
        &self,
        test_name: Option<&str>,
        out: &mut W,
    ) -> Result<RunSummary, HarnessError> {
        self.registry.check_consistency()?;

        let names: Vec<String> = match test_name {
            Some(name) => {
                if !self.registry.contains_test(name) {
                    return Err(RegistryError::UnknownTest {
                        name: name.to_string(),
                    }
                    .into());
                }
                vec![name.to_string()]
            }
            None => self.registry.test_names().map(str::to_string).collect(),
        };

        let mut suites = SuiteRunner::new(&self.reporter, self.initial_env.clone());
        let mut summary = RunSummary::default();

        for name in &names {
            writeln!(out, "Running test case '{}'", name)?;
            let resolved = self.registry.resolve(name)?;
            suites.switch_to(resolved.suite);

            let record = suites.run_test(name, &resolved.test.body);
            self.emit(&record, out)?;

            summary.cases.push(CaseReport {
                name: name.clone(),
                passed: !record.is_failed(),
            });
        }

        // Leave no suite active so the last teardown runs
        suites.switch_to(None);
        Ok(summary)
    }

    fn emit<W: Write>(&self, record: &FailureRecord, out: &mut W) -> io::Result<()> {
        for msg in record.messages() {
            writeln!(out, "{}", msg)?;
        }
        Ok(())
    }
}
