//! The real checker

use crate::check::{FaultCheck, Panicked};
use crate::fault::{raise, Fault};
use crate::site::CallSite;
use std::fmt;
use std::panic;
use tracing::trace;

/// Checker that raises a [`Fault`] stamped with the failing call site.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardChecker;

impl StandardChecker {
    /// Create a new standard checker
    pub fn new() -> Self {
        StandardChecker
    }

    fn fail(&self, at: CallSite, fault: Fault) -> ! {
        trace!(target: "faultcheck::checker", site = %at, error = %fault, "Check failed");
        raise(fault.at(at))
    }
}

impl FaultCheck for StandardChecker {
    fn is_true(&self, at: CallSite, condition: bool, message: &str) {
        if !condition {
            self.fail(at, Fault::msg(message));
        }
    }

    fn is_true_fmt(&self, at: CallSite, condition: bool, message: fmt::Arguments<'_>) {
        if !condition {
            self.fail(at, Fault::msg(message.to_string()));
        }
    }

    fn value(&self, at: CallSite, err: Option<Fault>) {
        if let Some(fault) = err {
            self.fail(at, fault);
        }
    }

    fn error(&self, at: CallSite, err: Option<Fault>) {
        if let Some(fault) = err {
            self.fail(at, fault);
        }
    }

    fn output(&self, at: CallSite, output: &dyn fmt::Debug, err: Option<Fault>) {
        if let Some(fault) = err {
            let message = format!("{}; output: {:?}", fault, output);
            self.fail(at, fault.context(message));
        }
    }

    fn failure(&self, at: CallSite, err: Option<Fault>) -> Option<Fault> {
        err.map(|fault| fault.at(at))
    }

    fn recover(&self, panicked: Option<Panicked>) -> Option<Fault> {
        let payload = panicked?;
        match payload.downcast::<Fault>() {
            Ok(fault) => Some(*fault),
            Err(foreign) => panic::resume_unwind(foreign),
        }
    }
}
