//! The recording, fault-injecting checker
//!
//! [`TestChecker`] implements [`FaultCheck`] by recording each check,
//! consulting the injector, then delegating to the checker it wraps. An
//! injected fault travels the same path an organic one would, so the code
//! under test cannot tell them apart.
//!
//! Injection is asymmetric. Condition checks are forced false
//! and report their own message. Error-bearing checks take the injected
//! fault only when they carry no organic error, so a real failure is never
//! masked by an armed one.

use crate::config::TestCheckerConfig;
use crate::error::ConfigError;
use crate::injector::FaultInjector;
use crate::patch::Resetter;
use crate::recorder::Recorder;
use crate::recording::Recording;
use faultcheck_checker::{
    same_checker, CallSite, Checker, Fault, FaultCheck, Operation, Panicked, StandardChecker,
};
use parking_lot::{Mutex, RwLock};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Receives a diagnostic for every fault that escapes a checked body.
pub type ErrorSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Checker decorator for tests.
pub struct TestChecker {
    recorder: Mutex<Recorder>,
    injector: Mutex<FaultInjector>,
    checker: RwLock<Arc<dyn FaultCheck>>,
    on_error: Mutex<Option<ErrorSink>>,
    config: TestCheckerConfig,
}

impl TestChecker {
    /// Create a test checker wrapping a [`StandardChecker`].
    ///
    /// [`patch`](TestChecker::patch) replaces the wrapped checker with
    /// whatever occupied the patched slot.
    pub fn new(on_error: Option<ErrorSink>) -> Arc<Self> {
        Self::build(TestCheckerConfig::default(), on_error)
    }

    /// Create a test checker with explicit configuration.
    pub fn with_config(
        config: TestCheckerConfig,
        on_error: Option<ErrorSink>,
    ) -> Result<Arc<Self>, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, on_error))
    }

    fn build(config: TestCheckerConfig, on_error: Option<ErrorSink>) -> Arc<Self> {
        Arc::new(TestChecker {
            recorder: Mutex::new(Recorder::with_capacity(config.initial_capacity)),
            injector: Mutex::new(FaultInjector::new()),
            checker: RwLock::new(Arc::new(StandardChecker::new())),
            on_error: Mutex::new(on_error),
            config,
        })
    }

    /// Configuration in effect.
    pub fn config(&self) -> &TestCheckerConfig {
        &self.config
    }

    /// Begin a new execution, discarding the previous recording.
    pub fn start_recording(&self) {
        self.recorder.lock().start_recording();
    }

    /// Snapshot of the current execution's recording.
    pub fn recording(&self) -> Recording {
        self.recorder.lock().recording()
    }

    /// Position of the check currently in flight.
    pub fn last_index(&self) -> Option<usize> {
        self.recorder.lock().last_index()
    }

    /// Make the check at `index` fail with `fault`.
    ///
    /// Only one failure can be pending; arming replaces the previous one.
    pub fn fail_at(&self, index: usize, fault: impl Into<Fault>) {
        self.injector.lock().fail_at(index, fault.into());
    }

    /// Clear any pending failure.
    pub fn reset_failures(&self) {
        self.injector.lock().reset_failures();
    }

    /// Install this checker in `slot`, wrapping its current occupant.
    ///
    /// Resetters of patches stacked on one slot must run in reverse order.
    /// A restore that finds another checker in the slot is skipped with a
    /// warning, leaving the slot as it is.
    pub fn patch(self: &Arc<Self>, slot: &Checker) -> Resetter {
        let me: Arc<dyn FaultCheck> = self.clone();
        let original = slot.current();
        if same_checker(&original, &me) {
            warn!(target: "faultcheck::testing", "Slot already holds this test checker");
            return Resetter::noop();
        }
        *self.checker.write() = original.clone();
        slot.replace(me.clone());
        debug!(target: "faultcheck::testing", "Patched checker slot");

        let slot = slot.clone();
        Resetter::new(move || {
            if !slot.holds(&me) {
                warn!(
                    target: "faultcheck::testing",
                    "Slot no longer holds this test checker, skipping restore"
                );
                return;
            }
            slot.replace(original);
            debug!(target: "faultcheck::testing", "Restored checker slot");
        })
    }

    /// Replace the error sink until the returned resetter runs.
    pub fn on_error<F>(self: &Arc<Self>, sink: F) -> Resetter
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        let sink: ErrorSink = Arc::new(sink);
        let previous = self.on_error.lock().replace(sink);
        let me = self.clone();
        Resetter::new(move || {
            *me.on_error.lock() = previous;
        })
    }

    /// Whether an error sink is installed.
    pub fn has_error_sink(&self) -> bool {
        self.on_error.lock().is_some()
    }

    fn wrapped(&self) -> Arc<dyn FaultCheck> {
        self.checker.read().clone()
    }

    // Record the check and return the fault armed for its position, if any.
    fn intercept(&self, operation: Operation, at: CallSite) -> Option<Fault> {
        let index = {
            let mut recorder = self.recorder.lock();
            recorder.record(operation, at);
            recorder.last_index()
        };
        let injected = self.injector.lock().consume(index);
        if let Some(fault) = &injected {
            debug!(
                target: "faultcheck::testing",
                index = ?index,
                operation = %operation,
                error = %fault,
                "Injecting fault"
            );
        }
        injected
    }

    fn report(&self, fault: &Fault) {
        let sink = self.on_error.lock().clone();
        if let Some(sink) = sink {
            let diagnostic = if self.config.verbose_trace {
                format!("\n{}", fault.trace())
            } else {
                fault.to_string()
            };
            sink(diagnostic.as_str());
        }
    }
}

impl FaultCheck for TestChecker {
    fn is_true(&self, at: CallSite, condition: bool, message: &str) {
        let injected = self.intercept(Operation::True, at);
        let condition = condition && injected.is_none();
        self.wrapped().is_true(at, condition, message)
    }

    fn is_true_fmt(&self, at: CallSite, condition: bool, message: fmt::Arguments<'_>) {
        let injected = self.intercept(Operation::Truef, at);
        let condition = condition && injected.is_none();
        self.wrapped().is_true_fmt(at, condition, message)
    }

    fn value(&self, at: CallSite, err: Option<Fault>) {
        let injected = self.intercept(Operation::Return, at);
        self.wrapped().value(at, err.or(injected))
    }

    fn error(&self, at: CallSite, err: Option<Fault>) {
        let injected = self.intercept(Operation::Error, at);
        self.wrapped().error(at, err.or(injected))
    }

    fn output(&self, at: CallSite, output: &dyn fmt::Debug, err: Option<Fault>) {
        let injected = self.intercept(Operation::Output, at);
        self.wrapped().output(at, output, err.or(injected))
    }

    fn failure(&self, at: CallSite, err: Option<Fault>) -> Option<Fault> {
        let injected = self.intercept(Operation::Failure, at);
        self.wrapped().failure(at, err.or(injected))
    }

    fn recover(&self, panicked: Option<Panicked>) -> Option<Fault> {
        let fault = self.wrapped().recover(panicked);
        self.recorder.lock().track_error(fault.clone());
        if let Some(fault) = &fault {
            debug!(target: "faultcheck::testing", error = %fault, "Recovered fault");
            self.report(fault);
        }
        fault
    }
}

impl fmt::Debug for TestChecker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestChecker")
            .field("recorded", &self.recorder.lock().sequence().len())
            .field("armed", &self.injector.lock().is_armed())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
