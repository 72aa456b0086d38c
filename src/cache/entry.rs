//! Cache Entry Module
//!
//! Defines the structure for individual memoized results with TTL support.

use std::time::Duration;

use tokio::time::Instant;

// == Cache Entry ==
/// A single memoized result with its expiry metadata.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    /// The stored result
    pub value: V,
    /// Instant from which the result is no longer served, None = never
    pub expires_at: Option<Instant>,
    /// Identifies this insertion among all insertions of the store
    pub generation: u64,
}

impl<V> CacheEntry<V> {
    // == Constructor ==
    /// Creates a new entry that expires `ttl` after now.
    ///
    /// A TTL too large to be represented as an instant (e.g.
    /// `Duration::MAX`) yields an entry without deadline.
    pub fn new(value: V, ttl: Duration, generation: u64) -> Self {
        Self {
            value,
            expires_at: Instant::now().checked_add(ttl),
            generation,
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is greater than or equal to
    /// its deadline, so a zero TTL yields an entry that is never served.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => Instant::now() >= expires,
            None => false,
        }
    }
}
