//! Per-test execution: the CONSTRUCT → SETUP → RUN → TEARDOWN machine.

use crate::environment::Environment;
use crate::fixture::TestBody;
use crate::record::FailureRecord;
use crate::report::FailureReporter;
use crate::unwind::catch;

/// Runs one test case against the active suite's environment.
///
/// The runner starts from a snapshot of the suite's record, so a failed
/// suite setup poisons every test under it: such a test skips straight
/// to done without constructing or executing anything. Teardown is
/// best-effort; it runs whenever the fixture was constructed, whatever
/// happened in setup or run, and nothing a phase does can escape past
/// the captured record.
pub struct TestRunner<'a> {
    body: &'a TestBody,
    record: FailureRecord,
    env: &'a mut Environment,
    reporter: &'a FailureReporter,
}

impl<'a> TestRunner<'a> {
    pub fn new(
        name: &str,
        body: &'a TestBody,
        suite_record: &FailureRecord,
        env: &'a mut Environment,
        reporter: &'a FailureReporter,
    ) -> Self {
        Self {
            body,
            record: suite_record.for_test(name),
            env,
            reporter,
        }
    }

    /// Execute all phases and return the completed record.
    pub fn run(self) -> FailureRecord {
        let TestRunner {
            body,
            mut record,
            env,
            reporter,
        } = self;

        if record.is_failed() {
            return record;
        }

        match body {
            // Function tests have no separate lifecycle phases
            TestBody::Function(call) => {
                if let Err(failure) = catch(|| call(&mut *env)) {
                    record.fail(&failure, reporter);
                }
            }
            TestBody::Fixture(factory) => {
                let mut fixture = match catch(|| factory(&mut *env)) {
                    Ok(fixture) => fixture,
                    Err(failure) => {
                        // Construction failed: no object, no further phases
                        record.fail(&failure, reporter);
                        return record;
                    }
                };

                if let Err(failure) = catch(|| fixture.setup(&mut *env)) {
                    record.fail(&failure, reporter);
                }

                if !record.is_failed() {
                    if let Err(failure) = catch(|| fixture.run(&mut *env)) {
                        record.fail(&failure, reporter);
                    }
                }

                // Best-effort cleanup; an earlier failure already owns the record
                if let Err(failure) = catch(|| fixture.teardown(&mut *env)) {
                    record.fail(&failure, reporter);
                }
            }
        }

        record
    }
}
