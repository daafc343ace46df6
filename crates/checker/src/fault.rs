//! The error value carried through the checking interface
//!
//! A failing check raises a [`Fault`] by unwinding with it as the payload.
//! The matching `recover` turns the payload back into a value. Faults are
//! cheap to clone so a recorder can keep a copy of every observed error.

use crate::site::CallSite;
use std::error::Error as StdError;
use std::fmt::Write as _;
use std::panic;
use std::sync::Arc;
use thiserror::Error;

/// Shared, type-erased source error.
pub type SharedError = Arc<dyn StdError + Send + Sync + 'static>;

/// Error raised by a failing check.
///
/// `Display` shows the message only, so two faults raised at different
/// locations with the same text render identically. Use [`Fault::trace`]
/// for the full diagnostic.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct Fault {
    message: String,
    #[source]
    source: Option<SharedError>,
    location: Option<CallSite>,
}

impl Fault {
    /// Create a fault with a plain message.
    pub fn msg(message: impl Into<String>) -> Self {
        Fault {
            message: message.into(),
            source: None,
            location: None,
        }
    }

    /// Adopt an arbitrary error. The message is taken from its `Display`.
    ///
    /// Wrapping a `Fault` returns it unchanged.
    pub fn wrap<E>(error: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        let boxed: Box<dyn StdError + Send + Sync> = Box::new(error);
        match boxed.downcast::<Fault>() {
            Ok(fault) => *fault,
            Err(other) => Fault {
                message: other.to_string(),
                source: Some(Arc::from(other)),
                location: None,
            },
        }
    }

    /// Replace the message, keeping the original fault as the source.
    pub fn context(self, message: impl Into<String>) -> Self {
        let location = self.location;
        Fault {
            message: message.into(),
            source: Some(Arc::new(self)),
            location,
        }
    }

    /// Stamp the raise location unless one is already present.
    pub fn at(mut self, site: CallSite) -> Self {
        self.location.get_or_insert(site);
        self
    }

    /// The fault message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Where the fault was raised, if known.
    pub fn location(&self) -> Option<CallSite> {
        self.location
    }

    /// Verbose diagnostic: message, raise location, then the source chain.
    pub fn trace(&self) -> String {
        let mut out = self.message.clone();
        if let Some(location) = &self.location {
            let _ = write!(out, "\n    at {}", location);
        }
        let mut source = StdError::source(self);
        while let Some(cause) = source {
            let _ = write!(out, "\ncaused by: {}", cause);
            source = cause.source();
        }
        out
    }
}

impl PartialEq for Fault {
    fn eq(&self, other: &Self) -> bool {
        self.message == other.message && self.location == other.location
    }
}

impl From<&str> for Fault {
    fn from(message: &str) -> Self {
        Fault::msg(message)
    }
}

impl From<String> for Fault {
    fn from(message: String) -> Self {
        Fault::msg(message)
    }
}

impl From<std::io::Error> for Fault {
    fn from(e: std::io::Error) -> Self {
        Fault::wrap(e)
    }
}

impl From<std::fmt::Error> for Fault {
    fn from(e: std::fmt::Error) -> Self {
        Fault::wrap(e)
    }
}

impl From<anyhow::Error> for Fault {
    fn from(e: anyhow::Error) -> Self {
        let boxed: Box<dyn StdError + Send + Sync> = e.into();
        Fault::from(boxed)
    }
}

impl From<Box<dyn StdError + Send + Sync>> for Fault {
    fn from(boxed: Box<dyn StdError + Send + Sync>) -> Self {
        match boxed.downcast::<Fault>() {
            Ok(fault) => *fault,
            Err(other) => Fault {
                message: other.to_string(),
                source: Some(Arc::from(other)),
                location: None,
            },
        }
    }
}

/// Unwind the current check with `fault` as the payload.
///
/// Uses `resume_unwind`, so the panic hook does not run and nothing is
/// printed for failing checks. Pair with [`Checker::recover`](crate::Checker::recover).
pub fn raise(fault: Fault) -> ! {
    panic::resume_unwind(Box::new(fault))
}
