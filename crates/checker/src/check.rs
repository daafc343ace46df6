//! The checking interface
//!
//! Production code never calls these methods directly; it goes through the
//! [`Checker`](crate::Checker) slot, whose `#[track_caller]` front-end
//! captures the [`CallSite`] and forwards it here explicitly. Keeping the
//! trait object-safe is what lets a test swap in a recording decorator.

use crate::fault::Fault;
use crate::site::CallSite;
use std::any::Any;
use std::fmt;

/// Payload captured from an unwinding check.
pub type Panicked = Box<dyn Any + Send + 'static>;

/// Checking operations with unwind-based failure propagation.
///
/// Every method except [`failure`](FaultCheck::failure) and
/// [`recover`](FaultCheck::recover) unwinds when its check fails. The unwind
/// is caught by `recover` at the boundary of the checked body.
pub trait FaultCheck: Send + Sync {
    /// Fail with `message` unless `condition` holds.
    fn is_true(&self, at: CallSite, condition: bool, message: &str);

    /// Fail with the formatted message unless `condition` holds.
    fn is_true_fmt(&self, at: CallSite, condition: bool, message: fmt::Arguments<'_>);

    /// Fail with `err` if present; the caller passes its value through.
    fn value(&self, at: CallSite, err: Option<Fault>);

    /// Fail with `err` if present.
    fn error(&self, at: CallSite, err: Option<Fault>);

    /// Fail with `err` if present, reporting `output` in the message.
    fn output(&self, at: CallSite, output: &dyn fmt::Debug, err: Option<Fault>);

    /// Build the failure for `err` without unwinding.
    fn failure(&self, at: CallSite, err: Option<Fault>) -> Option<Fault>;

    /// Convert a captured unwind into the fault that caused it.
    ///
    /// `None` means the body completed. Payloads that are not faults are
    /// foreign panics and must be resumed, not swallowed.
    fn recover(&self, panicked: Option<Panicked>) -> Option<Fault>;
}
