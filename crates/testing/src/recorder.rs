//! Per-execution check recorder

use crate::recording::{Recording, Site};
use crate::resolver::resolve;
use faultcheck_checker::{CallSite, Fault, Operation};
use tracing::trace;

/// Append-only log of the checks made by the current execution.
///
/// One execution at a time: [`start_recording`](Recorder::start_recording)
/// discards the previous log wholesale. The outcome of each check is set at
/// most once.
#[derive(Debug, Default)]
pub struct Recorder {
    sites: Vec<Site>,
    // Whether the last site's outcome has been tracked.
    tracked: bool,
}

impl Recorder {
    /// Create a recorder that pre-allocates `capacity` sites.
    pub fn with_capacity(capacity: usize) -> Self {
        Recorder {
            sites: Vec::with_capacity(capacity),
            tracked: false,
        }
    }

    /// Reset to an empty log for a new execution.
    ///
    /// The allocation is kept for the next execution.
    pub fn start_recording(&mut self) {
        self.sites.clear();
        self.tracked = false;
    }

    /// Append the check `operation` invoked at `at`, returning its position.
    pub fn record(&mut self, operation: Operation, at: CallSite) -> usize {
        self.sites.push(Site::resolved(resolve(operation, at)));
        self.tracked = false;
        let index = self.sites.len() - 1;
        trace!(target: "faultcheck::testing", index, operation = %operation, site = %at, "Recorded check");
        index
    }

    /// Position of the most recent check, `None` before the first one.
    pub fn last_index(&self) -> Option<usize> {
        self.sites.len().checked_sub(1)
    }

    /// Set the outcome of the most recent check.
    ///
    /// A no-op when nothing has been recorded yet, or when the outcome was
    /// already tracked. An enclosing recovery that completes cleanly must
    /// not erase a failure absorbed by a nested one.
    pub fn track_error(&mut self, error: Option<Fault>) {
        if self.tracked {
            trace!(target: "faultcheck::testing", "Outcome already tracked");
            return;
        }
        if let Some(last) = self.sites.last_mut() {
            last.set_error(error);
            self.tracked = true;
        }
    }

    /// Sites recorded so far.
    pub fn sequence(&self) -> &[Site] {
        &self.sites
    }

    /// Snapshot of the current log.
    pub fn recording(&self) -> Recording {
        Recording::from_sites(self.sites.clone())
    }
}
