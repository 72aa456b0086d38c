//! TTL Memo - function-result memoization with time-based expiry
//!
//! Wraps a function so repeated calls with equivalent arguments return the
//! previously computed result until a configured timeout elapses. Each cached
//! entry expires independently, measured from the moment it was stored.

pub mod cache;
pub mod config;
pub mod error;
pub mod key;
pub mod memoize;
pub mod tasks;

pub use config::MemoizeConfig;
pub use error::{MemoizeError, Result};
pub use key::Resolver;
pub use memoize::{memoize, try_memoize, Memoized};
pub use tasks::{Scheduler, TokioScheduler};
