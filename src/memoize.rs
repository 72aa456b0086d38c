//! Memoize Module
//!
//! Wraps a function so repeated calls with equivalent arguments reuse the
//! previously computed result until its timeout elapses.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;
use tracing::debug;

use crate::cache::MemoStore;
use crate::config::MemoizeConfig;
use crate::error::{MemoizeError, Result};
use crate::key::{cache_key, Resolver};
use crate::tasks::{schedule_expiry, Scheduler, TokioScheduler};

// == Memoized ==
/// A function wrapped with a private, time-limited result cache.
///
/// `A` is the argument tuple of the wrapped function, `V` the cached result.
/// Every wrapper owns its cache; two wrappers around the same function never
/// share results.
pub struct Memoized<A, V, F> {
    func: F,
    resolver: Option<Resolver<A>>,
    config: MemoizeConfig,
    scheduler: Arc<dyn Scheduler>,
    store: Arc<Mutex<MemoStore<V>>>,
    _args: PhantomData<fn(A)>,
}

/// Wraps `func` so its results are cached for `timeout`.
///
/// Calls are keyed by `resolver` when given, otherwise by the JSON encoding
/// of the argument tuple.
///
/// ```
/// use std::time::Duration;
/// use ttl_memo::memoize;
///
/// let square = memoize(|(n,): (u64,)| n * n, Duration::from_secs(5), None);
///
/// assert_eq!(square.call((12,)).unwrap(), 144);
/// // Served from the cache
/// assert_eq!(square.call((12,)).unwrap(), 144);
/// ```
pub fn memoize<A, V, F>(
    func: F,
    timeout: Duration,
    resolver: Option<Resolver<A>>,
) -> Memoized<A, V, F>
where
    F: Fn(A) -> V,
{
    Memoized::with_config(func, MemoizeConfig::new(timeout), resolver)
}

/// Wraps a fallible `func`; only `Ok` results are cached.
///
/// Use [`Memoized::try_call`] on the returned wrapper.
pub fn try_memoize<A, V, E, F>(
    func: F,
    timeout: Duration,
    resolver: Option<Resolver<A>>,
) -> Memoized<A, V, F>
where
    F: Fn(A) -> std::result::Result<V, E>,
{
    Memoized::with_config(func, MemoizeConfig::new(timeout), resolver)
}

impl<A, V, F> Memoized<A, V, F> {
    // == Constructor ==
    /// Creates a wrapper from a full configuration.
    pub fn with_config(func: F, config: MemoizeConfig, resolver: Option<Resolver<A>>) -> Self {
        Self {
            func,
            resolver,
            config,
            scheduler: Arc::new(TokioScheduler),
            store: Arc::new(Mutex::new(MemoStore::new())),
            _args: PhantomData,
        }
    }

    /// Replaces the timer service used to expire entries.
    pub fn with_scheduler(mut self, scheduler: Arc<dyn Scheduler>) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Returns the wrapper configuration.
    pub fn config(&self) -> &MemoizeConfig {
        &self.config
    }

    // == Lookup ==
    fn cached(&self, args: &A) -> Result<(String, Option<V>)>
    where
        A: Serialize,
        V: Clone,
    {
        let key = cache_key(self.resolver.as_ref(), args)?;
        let cached = self.store.lock().get(&key);

        match cached {
            Some(_) => debug!(name = %self.config.name, key = %key, "Cache hit"),
            None => debug!(name = %self.config.name, key = %key, "Cache miss"),
        }

        Ok((key, cached))
    }

    // == Store ==
    fn remember(&self, key: String, value: V)
    where
        V: Send + 'static,
    {
        let ttl = self.config.timeout;
        let (generation, entries) = {
            let mut store = self.store.lock();
            let generation = store.insert(key.clone(), value, ttl);
            (generation, store.len())
        };

        debug!(
            name = %self.config.name,
            key = %key,
            entries,
            "Result cached"
        );

        let scheduled = schedule_expiry(
            self.scheduler.as_ref(),
            Arc::downgrade(&self.store),
            &self.config.name,
            key,
            generation,
            ttl,
        );

        // Without a timer, expired entries of other keys are reclaimed here
        if !scheduled {
            let removed = self.store.lock().cleanup_expired();
            if removed > 0 {
                debug!(name = %self.config.name, removed, "Expired results reclaimed");
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn cached_len(&self) -> usize {
        self.store.lock().len()
    }
}

impl<A, V, F> Memoized<A, V, F>
where
    A: Serialize,
    V: Clone + Send + 'static,
    F: Fn(A) -> V,
{
    // == Call ==
    /// Returns the cached result for `args`, computing it on a miss.
    ///
    /// The wrapped function is not invoked on a hit. A panic inside it
    /// propagates and leaves nothing cached. The only error is a failure to
    /// serialize `args` into a default key.
    pub fn call(&self, args: A) -> Result<V> {
        let (key, cached) = self.cached(&args)?;
        if let Some(value) = cached {
            return Ok(value);
        }

        // The lock is released while user code runs
        let value = (self.func)(args);
        self.remember(key, value.clone());
        Ok(value)
    }
}

impl<A, V, E, F> Memoized<A, V, F>
where
    A: Serialize,
    V: Clone + Send + 'static,
    F: Fn(A) -> std::result::Result<V, E>,
    E: From<MemoizeError>,
{
    // == Try Call ==
    /// Like [`Memoized::call`] for fallible functions.
    ///
    /// An `Err` from the wrapped function is returned unchanged and nothing
    /// is cached, so the next call with the same key runs it again.
    pub fn try_call(&self, args: A) -> std::result::Result<V, E> {
        let (key, cached) = self.cached(&args)?;
        if let Some(value) = cached {
            return Ok(value);
        }

        let value = (self.func)(args)?;
        self.remember(key, value.clone());
        Ok(value)
    }
}

impl<A, V, F> fmt::Debug for Memoized<A, V, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memoized")
            .field("config", &self.config)
            .field("has_resolver", &self.resolver.is_some())
            .finish_non_exhaustive()
    }
}
