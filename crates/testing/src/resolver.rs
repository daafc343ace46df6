//! Call-site resolution
//!
//! The checker slot hands every operation the location of the expression
//! that invoked it. That location is only meaningful if it points at the
//! code under test: a location inside the checker or harness sources means
//! a front-end frame dropped `#[track_caller]` and the caller is unknown.

use faultcheck_checker::{is_checker_frame, CallSite, Operation};
use tracing::warn;

/// Operation and caller identity of one tracked check.
///
/// Both fields are `None` for a degraded record whose caller could not be
/// attributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ResolvedSite {
    /// The checking operation invoked.
    pub operation: Option<Operation>,
    /// Location of the code that invoked it.
    pub call_site: Option<CallSite>,
}

impl ResolvedSite {
    /// The empty record stored when attribution fails.
    pub const fn unknown() -> Self {
        ResolvedSite {
            operation: None,
            call_site: None,
        }
    }

    /// Whether the caller was attributed.
    pub fn is_resolved(&self) -> bool {
        self.call_site.is_some()
    }
}

/// Whether `site` lies inside the harness or checker sources.
pub fn is_harness_frame(site: &CallSite) -> bool {
    site.is_in_dir_of(file!()) || is_checker_frame(site)
}

/// Attribute `operation`, invoked at `at`, to its caller.
pub fn resolve(operation: Operation, at: CallSite) -> ResolvedSite {
    if is_harness_frame(&at) {
        warn!(
            target: "faultcheck::testing",
            operation = %operation,
            site = %at,
            "Check attributed to harness frame, recording unknown site"
        );
        return ResolvedSite::unknown();
    }
    ResolvedSite {
        operation: Some(operation),
        call_site: Some(at),
    }
}
