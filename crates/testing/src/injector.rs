//! Single-slot positional fault injection
//!
//! The target is "the Nth check this execution performs", which is known
//! before that check's call site is. Arming replaces any pending fault;
//! firing does not disarm, so a fault stays armed across executions until
//! [`FaultInjector::reset_failures`].

use faultcheck_checker::Fault;
use tracing::debug;

/// A fault waiting for the check at `index`.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingFault {
    /// Target position in the recording
    pub index: usize,
    /// Fault to report there
    pub fault: Fault,
}

/// Holds at most one pending fault.
#[derive(Debug, Default)]
pub struct FaultInjector {
    pending: Option<PendingFault>,
}

impl FaultInjector {
    /// Create a disarmed injector
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm `fault` for the check at `index`, replacing any pending fault.
    pub fn fail_at(&mut self, index: usize, fault: Fault) {
        debug!(target: "faultcheck::testing", index, error = %fault, "Armed fault");
        self.pending = Some(PendingFault { index, fault });
    }

    /// Disarm.
    pub fn reset_failures(&mut self) {
        self.pending = None;
    }

    /// The pending fault if `current` is its target.
    pub fn consume(&self, current: Option<usize>) -> Option<Fault> {
        match (&self.pending, current) {
            (Some(pending), Some(index)) if pending.index == index => Some(pending.fault.clone()),
            _ => None,
        }
    }

    /// The pending fault, if armed.
    pub fn pending(&self) -> Option<&PendingFault> {
        self.pending.as_ref()
    }

    /// Whether a fault is armed.
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }
}
