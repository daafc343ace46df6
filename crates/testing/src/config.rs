//! Harness configuration.

use crate::error::ConfigError;

/// Upper bound for [`TestCheckerConfig::initial_capacity`].
pub const MAX_INITIAL_CAPACITY: usize = 4096;

/// Configuration for a [`TestChecker`](crate::TestChecker).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCheckerConfig {
    /// Send the full fault trace to the error sink (default: true).
    ///
    /// When false the sink receives only the fault message.
    pub verbose_trace: bool,

    /// Sites pre-allocated for recordings (default: 16).
    pub initial_capacity: usize,
}

impl Default for TestCheckerConfig {
    fn default() -> Self {
        TestCheckerConfig {
            verbose_trace: true,
            initial_capacity: 16,
        }
    }
}

impl TestCheckerConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set trace verbosity (builder pattern).
    pub fn with_verbose_trace(mut self, verbose: bool) -> Self {
        self.verbose_trace = verbose;
        self
    }

    /// Set initial recording capacity (builder pattern).
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.initial_capacity > MAX_INITIAL_CAPACITY {
            return Err(ConfigError::CapacityTooLarge {
                requested: self.initial_capacity,
                max: MAX_INITIAL_CAPACITY,
            });
        }
        Ok(())
    }

    /// Terse configuration for table-driven suites that print every error.
    pub fn for_testing() -> Self {
        TestCheckerConfig {
            verbose_trace: false,
            initial_capacity: 8,
        }
    }
}
