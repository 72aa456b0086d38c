//! Cache Key Module
//!
//! Derives the string key a call is cached under.

use serde::Serialize;

use crate::error::Result;

/// Caller-supplied key function.
///
/// Receives the exact arguments of the call. Arguments that resolve to the
/// same string share one cache entry.
pub type Resolver<A> = Box<dyn Fn(&A) -> String + Send + Sync>;

/// Serializes the argument tuple into its JSON text.
///
/// A 1-tuple `("X",)` becomes `["X"]` and `(1, "a")` becomes `[1,"a"]`.
/// Map-typed arguments must iterate deterministically (e.g. `BTreeMap`) for
/// equal arguments to produce equal keys.
pub fn json_key<A>(args: &A) -> Result<String>
where
    A: Serialize + ?Sized,
{
    Ok(serde_json::to_string(args)?)
}

/// Returns the resolver's key if one is configured, the JSON key otherwise.
pub fn cache_key<A>(resolver: Option<&Resolver<A>>, args: &A) -> Result<String>
where
    A: Serialize,
{
    match resolver {
        Some(resolve) => Ok(resolve(args)),
        None => json_key(args),
    }
}
