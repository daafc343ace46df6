//! Error types for the fault-injection harness
//!
//! Only structural problems are errors here. Faults observed during a
//! recorded execution are data and live in the recording.

use thiserror::Error;

/// Result type alias for harness operations
pub type Result<T> = std::result::Result<T, TrackError>;

/// Failure to merge a candidate recording into a master recording.
///
/// Both variants mean the two recordings do not come from the same code
/// path, which is a bug in the test, not in the code under test.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrackError {
    /// Candidate recorded more checks than the master holds.
    #[error("error recording has {candidate} entries while master has {master}")]
    LengthMismatch {
        /// Candidate length
        candidate: usize,
        /// Master length
        master: usize,
    },

    /// Operation or call site differs at `index`.
    #[error("recording number {index} doesn't match master")]
    PositionMismatch {
        /// First differing position
        index: usize,
    },
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Initial recording capacity exceeds the allowed maximum.
    #[error("Initial capacity {requested} exceeds maximum {max}")]
    CapacityTooLarge {
        /// Requested capacity
        requested: usize,
        /// Allowed maximum
        max: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_display() {
        let err = TrackError::LengthMismatch {
            candidate: 5,
            master: 1,
        };
        assert_eq!(
            err.to_string(),
            "error recording has 5 entries while master has 1"
        );
    }

    #[test]
    fn test_position_mismatch_display() {
        let err = TrackError::PositionMismatch { index: 0 };
        let msg = err.to_string();
        assert!(msg.starts_with("recording number"));
        assert!(msg.contains('0'));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::CapacityTooLarge {
            requested: 10,
            max: 5,
        };
        assert!(err.to_string().contains("exceeds maximum 5"));
    }
}
