//! Fault-injection harness for code checked through faultcheck
//!
//! Swap a [`TestChecker`] into the [`Checker`](faultcheck_checker::Checker)
//! slot the code under test uses, then:
//!
//! - **Record**: every check an execution performs lands in a [`Recording`],
//!   attributed to the expression that made it.
//! - **Inject**: [`TestChecker::fail_at`] forces the Nth check to fail.
//! - **Cover**: [`Recording::track_errors`] merges the errors of many runs
//!   into a clean master; [`Recording::all_errors_seen`] reports whether
//!   every failure path was exercised.
//!
//! # Example
//!
//! ```ignore
//! use faultcheck_checker::Checker;
//! use faultcheck_testing::TestChecker;
//!
//! let checker = Checker::standard();
//! let tester = TestChecker::new(None);
//! let _patch = tester.patch(&checker);
//!
//! tester.start_recording();
//! let _ = load_config(&checker);
//! let master = tester.recording();
//!
//! tester.fail_at(2, "disk full");
//! tester.start_recording();
//! assert!(load_config(&checker).is_err());
//! assert!(tester.recording().error_matches(2, "disk full"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod decorator;
pub mod error;
pub mod injector;
pub mod patch;
pub mod recorder;
pub mod recording;
pub mod resolver;

pub use config::{TestCheckerConfig, MAX_INITIAL_CAPACITY};
pub use decorator::{ErrorSink, TestChecker};
pub use error::{ConfigError, Result, TrackError};
pub use injector::{FaultInjector, PendingFault};
pub use patch::Resetter;
pub use recorder::Recorder;
pub use recording::{Recording, Site};
pub use resolver::{is_harness_frame, resolve, ResolvedSite};
