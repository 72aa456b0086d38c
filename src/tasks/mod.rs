//! Background Tasks Module
//!
//! Deferred tasks that run alongside memoized functions.
//!
//! # Tasks
//! - Expiry: drops a memoized result once its TTL has elapsed

mod expiry;

pub use expiry::{schedule_expiry, ExpiryTask, Scheduler, TokioScheduler};
