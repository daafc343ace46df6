//! Checking interface for faultcheck
//!
//! This crate defines what production code checks through:
//! - Fault: the error value raised by a failing check
//! - CallSite / Operation: where a check was made and which one
//! - FaultCheck: the object-safe checking interface
//! - StandardChecker: the real checker, unwinding on failure
//! - Checker: the replaceable slot with `#[track_caller]` front-end methods
//!
//! Failing checks unwind with a [`Fault`] payload; [`Checker::recover`] at
//! the boundary of the checked body turns it back into a `Result`.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod check;
pub mod checker;
pub mod fault;
pub mod site;
pub mod standard;

pub use check::{FaultCheck, Panicked};
pub use checker::{global, is_checker_frame, same_checker, Checker};
pub use fault::{raise, Fault, SharedError};
pub use site::{CallSite, Operation};
pub use standard::StandardChecker;
