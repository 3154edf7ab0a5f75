//! Suite orchestration: activation, reuse, and teardown of the shared
//! setup/teardown context between consecutive tests.

use crate::environment::Environment;
use crate::fixture::Fixture;
use crate::record::FailureRecord;
use crate::registry::SuiteDefinition;
use crate::report::FailureReporter;
use crate::runner::TestRunner;
use crate::unwind::catch;

/// Tracks the active suite and owns the live environment.
///
/// Switching to the suite that is already active (and whose activation
/// record has not failed) is a no-op. Any other switch tears the current
/// suite down, best-effort, then activates the target: fresh record,
/// fresh environment copied from the initial configuration, construct,
/// setup. `None` is the valid no-suite state.
pub struct SuiteRunner<'a> {
    reporter: &'a FailureReporter,
    initial_env: Environment,
    env: Environment,
    record: FailureRecord,
    active_name: Option<String>,
    active: Option<Box<dyn Fixture>>,
}

impl<'a> SuiteRunner<'a> {
    pub fn new(reporter: &'a FailureReporter, initial_env: Environment) -> Self {
        Self {
            reporter,
            env: initial_env.clone(),
            initial_env,
            record: FailureRecord::for_suite(None),
            active_name: None,
            active: None,
        }
    }

    /// The current activation's record.
    pub fn record(&self) -> &FailureRecord {
        &self.record
    }

    /// The live environment lent to tests during this activation.
    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// Make `target` the active suite, if it is not already.
    pub fn switch_to(&mut self, target: Option<&SuiteDefinition>) {
        let target_name = target.map(|suite| suite.name.as_str());
        if self.active_name.as_deref() == target_name && !self.record.is_failed() {
            return;
        }
        self.deactivate();
        self.activate(target);
    }

    /// Run one test under the current activation.
    pub fn run_test(&mut self, name: &str, body: &crate::fixture::TestBody) -> FailureRecord {
        TestRunner::new(name, body, &self.record, &mut self.env, self.reporter).run()
    }

    /// Tear down whatever is active. Never propagates: a teardown
    /// failure lands in the outgoing record and is dropped with it.
    fn deactivate(&mut self) {
        if let Some(mut fixture) = self.active.take() {
            let env = &mut self.env;
            if let Err(failure) = catch(|| fixture.teardown(env)) {
                self.record.fail(&failure, self.reporter);
            }
        }
        self.active_name = None;
    }

    fn activate(&mut self, target: Option<&SuiteDefinition>) {
        self.record = FailureRecord::for_suite(target.map(|suite| suite.name.as_str()));
        self.env = self.initial_env.clone();

        let Some(suite) = target else {
            return;
        };
        self.active_name = Some(suite.name.clone());

        let env = &mut self.env;
        let fixture = match catch(|| (suite.factory)(env)) {
            Ok(fixture) => fixture,
            Err(failure) => {
                self.record.fail(&failure, self.reporter);
                return;
            }
        };
        self.active = Some(fixture);

        if let Some(fixture) = self.active.as_mut() {
            let env = &mut self.env;
            if let Err(failure) = catch(|| fixture.setup(env)) {
                self.record.fail(&failure, self.reporter);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment::Environment;
    use crate::failure::{Failure, Outcome};
    use crate::fixture::FixtureFactory;
    use crate::value::Value;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Counters {
        setups: Rc<RefCell<usize>>,
        teardowns: Rc<RefCell<usize>>,
    }

    struct CountingSuite {
        counters: Counters,
        fail_setup: bool,
    }

    impl Fixture for CountingSuite {
        fn setup(&mut self, env: &mut Environment) -> Outcome {
            *self.counters.setups.borrow_mut() += 1;
            env.set("BING", 3);
            if self.fail_setup {
                Err(Failure::error("suite setup exploded"))
            } else {
                Ok(())
            }
        }

        fn teardown(&mut self, env: &mut Environment) -> Outcome {
            *self.counters.teardowns.borrow_mut() += 1;
            env.remove("BING");
            Ok(())
        }
    }

    fn suite_def(name: &str, counters: Counters, fail_setup: bool) -> SuiteDefinition {
        let factory: FixtureFactory = Box::new(move |_| {
            Ok(Box::new(CountingSuite {
                counters: counters.clone(),
                fail_setup,
            }) as Box<dyn Fixture>)
        });
        SuiteDefinition {
            name: name.to_string(),
            factory,
        }
    }

    #[test]
    fn test_activation_runs_setup_and_fills_env() {
        let reporter = FailureReporter::default();
        let counters = Counters::default();
        let s1 = suite_def("S1", counters.clone(), false);

        let mut suites = SuiteRunner::new(&reporter, Environment::new());
        suites.switch_to(Some(&s1));

        assert_eq!(*counters.setups.borrow(), 1);
        assert_eq!(suites.env().get("BING"), Some(&Value::Int(3)));
        assert!(!suites.record().is_failed());
    }

    #[test]
    fn test_same_suite_twice_is_a_no_op() {
        let reporter = FailureReporter::default();
        let counters = Counters::default();
        let s1 = suite_def("S1", counters.clone(), false);

        let mut suites = SuiteRunner::new(&reporter, Environment::new());
        suites.switch_to(Some(&s1));
        suites.switch_to(Some(&s1));

        assert_eq!(*counters.setups.borrow(), 1);
        assert_eq!(*counters.teardowns.borrow(), 0);
    }

    #[test]
    fn test_switch_away_tears_down() {
        let reporter = FailureReporter::default();
        let counters = Counters::default();
        let s1 = suite_def("S1", counters.clone(), false);

        let mut suites = SuiteRunner::new(&reporter, Environment::new());
        suites.switch_to(Some(&s1));
        suites.switch_to(None);

        assert_eq!(*counters.teardowns.borrow(), 1);
        assert!(!suites.env().contains("BING"));
    }

    #[test]
    fn test_environment_resets_between_suites() {
        let reporter = FailureReporter::default();
        let mut initial = Environment::new();
        initial.set("base", "kept");

        let a_counters = Counters::default();
        let b_counters = Counters::default();
        let s1 = suite_def("S1", a_counters, false);
        let s2 = suite_def("S2", b_counters, false);

        let mut suites = SuiteRunner::new(&reporter, initial);
        suites.switch_to(Some(&s1));
        suites.env().get("BING").expect("set by S1 setup");

        suites.switch_to(Some(&s2));
        // S2 sees the initial configuration plus its own setup, nothing of S1's
        assert_eq!(suites.env().get("base"), Some(&Value::Str("kept".into())));
        assert_eq!(suites.env().get("BING"), Some(&Value::Int(3)));
    }

    #[test]
    fn test_setup_failure_marks_activation_record() {
        let reporter = FailureReporter::default();
        let counters = Counters::default();
        let s1 = suite_def("S1", counters.clone(), true);

        let mut suites = SuiteRunner::new(&reporter, Environment::new());
        suites.switch_to(Some(&s1));

        assert!(suites.record().is_failed());
        // Construction succeeded, so deactivation still tears down
        suites.switch_to(None);
        assert_eq!(*counters.teardowns.borrow(), 1);
        assert!(!suites.record().is_failed(), "no-suite state starts clean");
    }

    #[test]
    fn test_construct_failure_skips_setup_and_teardown() {
        let reporter = FailureReporter::default();
        let factory: FixtureFactory = Box::new(|_| Err(Failure::error("no such resource")));
        let s1 = SuiteDefinition {
            name: "S1".to_string(),
            factory,
        };

        let mut suites = SuiteRunner::new(&reporter, Environment::new());
        suites.switch_to(Some(&s1));
        assert!(suites.record().is_failed());

        // Nothing was constructed, so nothing to tear down
        suites.switch_to(None);
        assert!(!suites.record().is_failed());
    }

    #[test]
    fn test_null_suite_is_valid_and_fresh() {
        let reporter = FailureReporter::default();
        let mut suites = SuiteRunner::new(&reporter, Environment::new());
        // Already in the no-suite state: switching to it again is a no-op
        suites.switch_to(None);
        assert!(!suites.record().is_failed());
        assert!(suites.env().is_empty());
    }
}
