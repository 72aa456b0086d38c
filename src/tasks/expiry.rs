//! Expiry Timers
//!
//! One-shot deferred tasks that drop a memoized result once its TTL elapses.

use std::sync::Weak;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tracing::{debug, trace};

use crate::cache::MemoStore;

/// Callback run by a [`Scheduler`] when its delay has elapsed.
pub type ExpiryTask = Box<dyn FnOnce() + Send + 'static>;

/// Deferred-timer service: runs a callback once, after at least `delay`.
pub trait Scheduler: Send + Sync {
    /// Returns false if the callback was dropped instead of scheduled.
    fn schedule(&self, delay: Duration, task: ExpiryTask) -> bool;
}

// == Tokio Scheduler ==
/// Runs each callback on a detached task of the ambient tokio runtime.
///
/// Outside a runtime the callback is dropped and `schedule` returns false.
#[derive(Debug, Default, Clone, Copy)]
pub struct TokioScheduler;

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: ExpiryTask) -> bool {
        match Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    task();
                });
                true
            }
            Err(_) => {
                debug!("No tokio runtime available, expiry timer skipped");
                false
            }
        }
    }
}

/// Schedules removal of the entry stored under `key` with `generation`.
///
/// When the timer fires, the key is removed only if it still holds that
/// generation. A result recomputed under the same key after the lookup found
/// this one expired keeps its own full timeout.
///
/// The timer only holds a weak handle on the store: once the memoized
/// function is dropped the callback does nothing. Returns whether the
/// scheduler accepted the timer.
pub fn schedule_expiry<V>(
    scheduler: &dyn Scheduler,
    store: Weak<Mutex<MemoStore<V>>>,
    name: &str,
    key: String,
    generation: u64,
    ttl: Duration,
) -> bool
where
    V: Send + 'static,
{
    trace!(
        name = %name,
        key = %key,
        ttl = ?ttl,
        "Scheduling expiry"
    );

    let name = name.to_string();
    scheduler.schedule(
        ttl,
        Box::new(move || {
            let Some(store) = store.upgrade() else {
                trace!(
                    name = %name,
                    key = %key,
                    "Expiry fired after memoized function was dropped"
                );
                return;
            };

            if store.lock().expire(&key, generation) {
                debug!(name = %name, key = %key, "Memoized result expired");
            }
        }),
    )
}
