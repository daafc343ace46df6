//! Call-site identity and operation names
//!
//! A [`CallSite`] is the source location of the expression that invoked a
//! checking operation. It is captured with `#[track_caller]`, so it is stable
//! across executions of the same code path and compares structurally.

use std::fmt;
use std::panic::Location;
use std::path::Path;

/// Source location of a checking call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CallSite {
    file: &'static str,
    line: u32,
    column: u32,
}

impl CallSite {
    /// Create a call site from explicit coordinates.
    pub const fn new(file: &'static str, line: u32, column: u32) -> Self {
        CallSite { file, line, column }
    }

    /// Capture the location of the caller.
    ///
    /// Propagates through every `#[track_caller]` frame, so when invoked from
    /// a tracked front-end method this yields the code under test, not the
    /// front-end itself.
    #[track_caller]
    pub fn caller() -> Self {
        Self::from(Location::caller())
    }

    /// Source file path, as reported by the compiler.
    pub fn file(&self) -> &'static str {
        self.file
    }

    /// 1-based line number.
    pub fn line(&self) -> u32 {
        self.line
    }

    /// 1-based column number.
    pub fn column(&self) -> u32 {
        self.column
    }

    /// Whether this site lies in the same source directory as `source_file`.
    ///
    /// `source_file` is normally a `file!()` expansion, which uses the same
    /// path convention as `Location::file`.
    pub fn is_in_dir_of(&self, source_file: &str) -> bool {
        match (Path::new(self.file).parent(), Path::new(source_file).parent()) {
            (Some(ours), Some(theirs)) => ours == theirs,
            _ => false,
        }
    }
}

impl From<&'static Location<'static>> for CallSite {
    fn from(location: &'static Location<'static>) -> Self {
        CallSite {
            file: location.file(),
            line: location.line(),
            column: location.column(),
        }
    }
}

impl fmt::Display for CallSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// A checking operation of the [`FaultCheck`](crate::FaultCheck) interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Boolean condition with a fixed message.
    True,
    /// Boolean condition with a formatted message.
    Truef,
    /// Value passthrough guarded by an error.
    Return,
    /// Bare error check.
    Error,
    /// Value passthrough whose value is reported alongside the error.
    Output,
    /// Failure construction without unwinding.
    Failure,
}

impl Operation {
    /// Get all operations
    pub fn all() -> Vec<Operation> {
        vec![
            Operation::True,
            Operation::Truef,
            Operation::Return,
            Operation::Error,
            Operation::Output,
            Operation::Failure,
        ]
    }

    /// Name recorded for this operation.
    pub fn name(&self) -> &'static str {
        match self {
            Operation::True => "True",
            Operation::Truef => "Truef",
            Operation::Return => "Return",
            Operation::Error => "Error",
            Operation::Output => "Output",
            Operation::Failure => "Failure",
        }
    }

    /// Whether injection overrides the condition rather than the error.
    pub fn is_condition(&self) -> bool {
        matches!(self, Operation::True | Operation::Truef)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
