//! Assertion helpers for test bodies.
//!
//! Every helper is `#[track_caller]` and returns a typed
//! [`Failure`](crate::Failure) instead of panicking, so test bodies
//! propagate with `?` and the reporter receives the author's call site.
//! `==` and `!=` are used explicitly since both can be overloaded.

use crate::failure::{Failure, Outcome};
use std::fmt::Display;

/// Check that two values compare equal.
#[track_caller]
pub fn assert_eq<L, R>(left: L, right: R, msg: &str) -> Outcome
where
    L: PartialEq<R> + Display,
    R: Display,
{
    if left == right {
        Ok(())
    } else {
        Err(Failure::helper(
            "assert_eq",
            vec![left.to_string(), right.to_string()],
            msg,
        ))
    }
}

/// Check that two values compare unequal.
#[track_caller]
pub fn assert_ne<L, R>(left: L, right: R, msg: &str) -> Outcome
where
    L: PartialEq<R> + Display,
    R: Display,
{
    if left != right {
        Ok(())
    } else {
        Err(Failure::helper(
            "assert_ne",
            vec![left.to_string(), right.to_string()],
            msg,
        ))
    }
}

/// Check that a condition holds.
#[track_caller]
pub fn assert_true(cond: bool, msg: &str) -> Outcome {
    if cond {
        Ok(())
    } else {
        Err(Failure::helper("assert_true", vec![cond.to_string()], msg))
    }
}

/// Check that a condition does not hold.
#[track_caller]
pub fn assert_false(cond: bool, msg: &str) -> Outcome {
    if !cond {
        Ok(())
    } else {
        Err(Failure::helper("assert_false", vec![cond.to_string()], msg))
    }
}

/// Check that two references point at the same object.
#[track_caller]
pub fn assert_is<T: Display>(left: &T, right: &T, msg: &str) -> Outcome {
    if std::ptr::eq(left, right) {
        Ok(())
    } else {
        Err(Failure::helper(
            "assert_is",
            vec![left.to_string(), right.to_string()],
            msg,
        ))
    }
}

/// Fail unconditionally.
#[track_caller]
pub fn fail(msg: &str) -> Outcome {
    Err(Failure::helper("fail", Vec::new(), msg))
}

/// Boolean assertion for test bodies.
///
/// Returns early from the enclosing function with an assertion-kind
/// [`Failure`](crate::Failure) when the condition is false; the report
/// renders it as `assert False, <message>`.
///
/// ```
/// use gauntlet_harness::{check, Outcome};
///
/// fn body() -> Outcome {
///     check!(1 + 1 == 2, "arithmetic broke");
///     Ok(())
/// }
/// assert!(body().is_ok());
/// ```
#[macro_export]
macro_rules! check {
    ($cond:expr) => {
        $crate::check!($cond, "")
    };
    ($cond:expr, $($msg:tt)+) => {
        if !$cond {
            return ::core::result::Result::Err($crate::Failure::assertion(
                ::std::format!($($msg)+),
            ));
        }
    };
}
