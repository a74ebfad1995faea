//! Persistent cache backends.
//!
//! A backend is an external durable store with a `get`/`save` capability.
//! The cache treats backends as opaque: it never inspects how they store
//! values, only whether a lookup produced one. Backends are handed to the
//! cache as an ordered chain by a [`BackendDiscovery`] provider; ordering
//! within the chain is significant and fixed for the chain's lifetime.
//!
//! - [`memory`]: process-local map, the baseline backend
//! - [`jsonfile`]: one JSON document per key under a base directory

pub mod jsonfile;
pub mod memory;

pub use jsonfile::JsonFileBackend;
pub use memory::MemoryBackend;

use std::sync::Arc;

use thiserror::Error;

use crate::error::CacheError;

/// Errors produced by backend implementations.
///
/// Custom backends without a matching variant can surface anything through
/// [`BackendError::Other`].
#[derive(Error, Debug)]
pub enum BackendError {
    /// I/O failure in a filesystem- or network-backed store.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A stored value could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Implementation-specific failure.
    #[error("backend error: {0}")]
    Other(#[from] Box<dyn std::error::Error + Send + Sync>),
}

/// A persistent store the cache writes through to and falls back on.
///
/// `get` returns `Ok(None)` when the backend holds no value for the key;
/// this is distinct from any stored value, so a backend can legitimately
/// hold an empty container. `save` overwrites unconditionally.
///
/// Implementations take `&self` because the cache holds backends behind
/// [`Arc`]; mutable stores use interior mutability.
pub trait Backend<K, V>: Send + Sync {
    /// Short identifier used in log fields.
    fn name(&self) -> &str {
        "backend"
    }

    /// Look up the value stored for `key`, or `None` if the backend has none.
    fn get(&self, key: &K) -> Result<Option<V>, BackendError>;

    /// Persist `value` for `key`, overwriting any prior value.
    fn save(&self, key: &K, value: &V) -> Result<(), BackendError>;
}

/// An ordered chain of backend handles.
pub type BackendChain<K, V> = Vec<Arc<dyn Backend<K, V>>>;

/// Yields the ordered backend chain for a cache.
///
/// Invoked once at cache construction and again on every `clear()`, which
/// re-runs discovery and replaces the chain. Injected rather than global so
/// chains are swappable in tests and per cache instance.
pub trait BackendDiscovery<K, V>: Send + Sync {
    /// Produce the ordered chain. Fails with
    /// [`CacheError::Configuration`] when backends cannot be loaded.
    fn discover(&self) -> Result<BackendChain<K, V>, CacheError>;
}

/// Discovery over a fixed, pre-built chain.
///
/// The common case for hosts that assemble their backends up front. Every
/// `discover` call hands out the same handles in the same order.
pub struct StaticChain<K, V> {
    backends: BackendChain<K, V>,
}

impl<K, V> StaticChain<K, V> {
    /// A chain over the given backends, ordered as given.
    pub fn new(backends: BackendChain<K, V>) -> Self {
        Self { backends }
    }

    /// A chain with no backends: the cache degrades to memory + default
    /// factory.
    pub fn empty() -> Self {
        Self {
            backends: Vec::new(),
        }
    }
}

impl<K, V> BackendDiscovery<K, V> for StaticChain<K, V> {
    fn discover(&self) -> Result<BackendChain<K, V>, CacheError> {
        Ok(self.backends.clone())
    }
}
