//! Panic containment for phase boundaries.
//!
//! Every construct/setup/run/teardown invocation goes through [`catch`]:
//! a panic inside a test body becomes an unclassified failure instead of
//! tearing down the run. A process-wide hook stashes the panic location
//! (the same trick libtest uses) and stays silent while a phase is being
//! captured, so reports do not get the default panic spew interleaved.

use crate::failure::{Failure, SourceLocation};
use std::any::Any;
use std::cell::{Cell, RefCell};
use std::panic::{self, AssertUnwindSafe};
use std::sync::Once;

static HOOK: Once = Once::new();

thread_local! {
    static LAST_PANIC: RefCell<Option<SourceLocation>> = RefCell::new(None);
    static CAPTURING: Cell<bool> = Cell::new(false);
}

fn install_hook() {
    HOOK.call_once(|| {
        let previous = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let location = info
                .location()
                .map(|loc| SourceLocation::new(loc.file(), loc.line()));
            let capturing = CAPTURING.with(|flag| flag.get());
            LAST_PANIC.with(|slot| *slot.borrow_mut() = location);
            if !capturing {
                previous(info);
            }
        }));
    });
}

/// Run one phase, converting a panic into a `Failure`.
pub(crate) fn catch<T>(phase: impl FnOnce() -> Result<T, Failure>) -> Result<T, Failure> {
    install_hook();
    CAPTURING.with(|flag| flag.set(true));
    LAST_PANIC.with(|slot| slot.borrow_mut().take());

    let result = panic::catch_unwind(AssertUnwindSafe(phase));

    CAPTURING.with(|flag| flag.set(false));
    match result {
        Ok(outcome) => outcome,
        Err(payload) => {
            let location = LAST_PANIC.with(|slot| slot.borrow_mut().take());
            Err(Failure::error_at(panic_message(payload.as_ref()), location))
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "panic with non-string payload".to_string()
    }
}
