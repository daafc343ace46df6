//! The checker slot
//!
//! [`Checker`] is the dependency production code checks through. It is a
//! cheap, cloneable handle over a replaceable `Arc<dyn FaultCheck>`, so a
//! test can swap the occupant for a decorator and every clone observes it.
//!
//! # Example
//!
//! ```ignore
//! use faultcheck_checker::{Checker, Fault};
//!
//! fn parse(checker: &Checker, input: &str) -> Result<u32, Fault> {
//!     checker.recover(|| {
//!         checker.is_true(!input.is_empty(), "empty input");
//!         checker.value(input.parse::<u32>().map_err(Fault::wrap))
//!     })
//! }
//! ```

use crate::check::{FaultCheck, Panicked};
use crate::fault::Fault;
use crate::site::CallSite;
use crate::standard::StandardChecker;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

static GLOBAL: Lazy<Checker> = Lazy::new(Checker::standard);

/// Process-wide checker slot for code that does not thread a handle through.
pub fn global() -> &'static Checker {
    &GLOBAL
}

/// Whether `site` lies inside this crate's own sources.
///
/// A tracked check should never be attributed here; if it is, a front-end
/// frame was missing `#[track_caller]`.
pub fn is_checker_frame(site: &CallSite) -> bool {
    site.is_in_dir_of(file!())
}

/// Shared, replaceable checking dependency.
#[derive(Clone)]
pub struct Checker {
    slot: Arc<RwLock<Arc<dyn FaultCheck>>>,
}

impl Checker {
    /// Create a slot occupied by `check`.
    pub fn new(check: impl FaultCheck + 'static) -> Self {
        Self::from_arc(Arc::new(check))
    }

    /// Create a slot occupied by a shared checker.
    pub fn from_arc(check: Arc<dyn FaultCheck>) -> Self {
        Checker {
            slot: Arc::new(RwLock::new(check)),
        }
    }

    /// Create a slot occupied by the [`StandardChecker`].
    pub fn standard() -> Self {
        Self::new(StandardChecker::new())
    }

    /// Current occupant of the slot.
    pub fn current(&self) -> Arc<dyn FaultCheck> {
        self.slot.read().clone()
    }

    /// Swap the occupant, returning the previous one.
    pub fn replace(&self, check: Arc<dyn FaultCheck>) -> Arc<dyn FaultCheck> {
        std::mem::replace(&mut *self.slot.write(), check)
    }

    /// Whether the slot currently holds exactly `check`.
    pub fn holds(&self, check: &Arc<dyn FaultCheck>) -> bool {
        same_checker(&self.current(), check)
    }

    /// Fail with `message` unless `condition` holds.
    #[track_caller]
    pub fn is_true(&self, condition: bool, message: &str) {
        let at = CallSite::caller();
        self.current().is_true(at, condition, message)
    }

    /// Fail with a formatted message unless `condition` holds.
    #[track_caller]
    pub fn is_true_fmt(&self, condition: bool, message: fmt::Arguments<'_>) {
        let at = CallSite::caller();
        self.current().is_true_fmt(at, condition, message)
    }

    /// Unwrap `result`, failing with its error.
    #[track_caller]
    pub fn value<T, E>(&self, result: Result<T, E>) -> T
    where
        E: Into<Fault>,
    {
        let at = CallSite::caller();
        match result {
            Ok(value) => {
                self.current().value(at, None);
                value
            }
            Err(e) => {
                self.current().value(at, Some(e.into()));
                unwound(at)
            }
        }
    }

    /// Fail with the error in `result`, if any.
    #[track_caller]
    pub fn error<E>(&self, result: Result<(), E>)
    where
        E: Into<Fault>,
    {
        let at = CallSite::caller();
        self.current().error(at, result.err().map(Into::into))
    }

    /// Pass `value` through, failing with `result`'s error and reporting
    /// `value` alongside it.
    #[track_caller]
    pub fn output<T, E>(&self, value: T, result: Result<(), E>) -> T
    where
        T: fmt::Debug,
        E: Into<Fault>,
    {
        let at = CallSite::caller();
        self.current()
            .output(at, &value, result.err().map(Into::into));
        value
    }

    /// Build the failure for `err` without unwinding.
    #[track_caller]
    pub fn failure<E>(&self, err: Option<E>) -> Option<Fault>
    where
        E: Into<Fault>,
    {
        let at = CallSite::caller();
        self.current().failure(at, err.map(Into::into))
    }

    /// Run `body`, recovering any fault raised by a check inside it.
    ///
    /// Foreign panics propagate unchanged.
    pub fn recover<T>(&self, body: impl FnOnce() -> T) -> Result<T, Fault> {
        let (value, panicked): (Option<T>, Option<Panicked>) =
            match panic::catch_unwind(AssertUnwindSafe(body)) {
                Ok(value) => (Some(value), None),
                Err(payload) => (None, Some(payload)),
            };
        let fault = self.current().recover(panicked);
        match (value, fault) {
            (_, Some(fault)) => Err(fault),
            (Some(value), None) => Ok(value),
            (None, None) => Err(Fault::msg("checked body unwound without a fault")),
        }
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checker").finish_non_exhaustive()
    }
}

/// Pointer identity of two checkers, ignoring vtables.
pub fn same_checker(a: &Arc<dyn FaultCheck>, b: &Arc<dyn FaultCheck>) -> bool {
    std::ptr::eq(Arc::as_ptr(a) as *const (), Arc::as_ptr(b) as *const ())
}

// An occupant that declined to unwind on a failing passthrough leaves no value
// to return, so the fault is raised here instead.
fn unwound(at: CallSite) -> ! {
    crate::fault::raise(Fault::msg("checker accepted a failed value").at(at))
}
