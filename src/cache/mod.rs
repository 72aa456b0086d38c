//! Cache Module
//!
//! Per-function result storage with TTL expiration.

mod entry;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use store::MemoStore;
