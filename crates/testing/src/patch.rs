//! Scoped, reversible patches.

use std::fmt;

/// Undoes a patch when reset or dropped.
///
/// Hold it for the duration of the test body: dropping it, including while
/// unwinding from a failed assertion, restores what the patch replaced.
/// Binding it to `_` drops it on the spot.
#[must_use = "the patch is undone as soon as the Resetter is dropped"]
pub struct Resetter {
    reset: Option<Box<dyn FnOnce() + Send>>,
}

impl Resetter {
    pub(crate) fn new(reset: impl FnOnce() + Send + 'static) -> Self {
        Resetter {
            reset: Some(Box::new(reset)),
        }
    }

    /// A resetter with nothing to undo.
    pub fn noop() -> Self {
        Resetter { reset: None }
    }

    /// Undo the patch now.
    pub fn reset(mut self) {
        self.run();
    }

    fn run(&mut self) {
        if let Some(reset) = self.reset.take() {
            reset();
        }
    }
}

impl Drop for Resetter {
    fn drop(&mut self) {
        self.run();
    }
}

impl fmt::Debug for Resetter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resetter")
            .field("pending", &self.reset.is_some())
            .finish()
    }
}
