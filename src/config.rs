//! Configuration Module
//!
//! Settings for a single memoized function.

use std::time::Duration;

/// Default name attached to log events of a memoized function.
pub const DEFAULT_NAME: &str = "memoized";

/// Per-wrapper configuration.
///
/// Built programmatically; nothing is read from the environment.
#[derive(Debug, Clone)]
pub struct MemoizeConfig {
    /// How long a cached result stays valid, measured from insertion
    pub timeout: Duration,
    /// Name used in log events to tell wrappers apart
    pub name: String,
}

impl MemoizeConfig {
    /// Creates a config with the given timeout and the default name.
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            name: DEFAULT_NAME.to_string(),
        }
    }

    /// Creates a config from a timeout in milliseconds.
    pub fn from_millis(timeout_ms: u64) -> Self {
        Self::new(Duration::from_millis(timeout_ms))
    }

    /// Sets the name reported in log events.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Default for MemoizeConfig {
    fn default() -> Self {
        Self::new(Duration::ZERO)
    }
}
