//! Test and suite bodies.
//!
//! The [`Fixture`] trait is the capability interface for class-style
//! bodies: lifecycle phases are optional trait methods with no-op
//! defaults, resolved once at registration instead of probed by name at
//! every call. Plain function tests have no separate lifecycle phases
//! and go straight to their run body.

use crate::environment::Environment;
use crate::failure::{Failure, Outcome};

/// A test or suite object with optional lifecycle phases.
///
/// Implement only the phases the case needs; the defaults do nothing.
/// Every phase receives the suite's live environment.
pub trait Fixture {
    fn setup(&mut self, env: &mut Environment) -> Outcome {
        let _ = env;
        Ok(())
    }

    fn run(&mut self, env: &mut Environment) -> Outcome {
        let _ = env;
        Ok(())
    }

    fn teardown(&mut self, env: &mut Environment) -> Outcome {
        let _ = env;
        Ok(())
    }
}

/// Constructs a fixture for one activation; the CONSTRUCT phase.
pub type FixtureFactory = Box<dyn Fn(&mut Environment) -> Result<Box<dyn Fixture>, Failure>>;

/// A registered test body, normalized at registration time. Whether the
/// author's callable wanted the environment was decided by the
/// `register_*` variant used, so no signature inspection happens here.
pub enum TestBody {
    /// Bare function: no construct/setup/teardown phases
    Function(Box<dyn Fn(&mut Environment) -> Outcome>),
    /// Fixture: full construct/setup/run/teardown lifecycle
    Fixture(FixtureFactory),
}

impl std::fmt::Debug for TestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestBody::Function(_) => f.write_str("TestBody::Function"),
            TestBody::Fixture(_) => f.write_str("TestBody::Fixture"),
        }
    }
}
