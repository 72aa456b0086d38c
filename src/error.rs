//! Error types for the memoizer
//!
//! Provides unified error handling using thiserror.

use thiserror::Error;

// == Memoize Error Enum ==
/// Errors raised by the memoizer itself.
///
/// Failures of the wrapped function are never wrapped in this type; they
/// reach the caller unchanged.
#[derive(Error, Debug)]
pub enum MemoizeError {
    /// Arguments could not be serialized into a default cache key
    #[error("Failed to derive cache key: {0}")]
    KeySerialization(#[from] serde_json::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the memoizer.
pub type Result<T> = std::result::Result<T, MemoizeError>;
