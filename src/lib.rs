//! faultcheck - recording and fault injection for unwind-checked code
//!
//! Production code validates conditions through a [`Checker`] slot; a
//! failing check unwinds to the nearest [`Checker::recover`]. Tests swap a
//! [`TestChecker`] into that slot to record every check, force any one of
//! them to fail, and verify across many runs that every failure path was
//! exercised.
//!
//! # Quick Start
//!
//! ```ignore
//! use faultcheck::{Checker, Fault, TestChecker};
//!
//! fn open(checker: &Checker, path: &str) -> Result<usize, Fault> {
//!     checker.recover(|| {
//!         checker.is_true(!path.is_empty(), "empty path");
//!         checker.value(std::fs::metadata(path).map(|m| m.len() as usize))
//!     })
//! }
//!
//! let checker = Checker::standard();
//! let tester = TestChecker::new(None);
//! let _patch = tester.patch(&checker);
//!
//! tester.start_recording();
//! open(&checker, "Cargo.toml")?;
//! let mut master = tester.recording();
//!
//! tester.fail_at(1, "permission denied");
//! tester.start_recording();
//! assert!(open(&checker, "Cargo.toml").is_err());
//! master.track_errors(&tester.recording())?;
//! ```
//!
//! # Architecture
//!
//! - [`faultcheck_checker`]: the checking interface, the real checker, and
//!   the replaceable slot.
//! - [`faultcheck_testing`]: call-site resolution, recorder, fault injector,
//!   the recording decorator, and cross-run coverage tracking.

pub use faultcheck_checker::*;
pub use faultcheck_testing::*;
