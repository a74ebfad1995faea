//! The write-through overlay: memory first, then the backend chain.
//!
//! Every read consults the in-memory map before any backend I/O; misses
//! fall through the chain in declared order and stop at the first backend
//! holding a value. Every write fans out to all backends before touching
//! memory, so memory never records a value the chain has not been offered.
//! A read miss resolves and then re-propagates the value through the whole
//! chain, including the backend that supplied it.

use std::collections::hash_map;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

use tracing::{debug, info};

use crate::backend::{BackendChain, BackendDiscovery};
use crate::cache::factory::DefaultFactory;
use crate::error::CacheError;

/// Write-through tiered key/value cache.
///
/// Composes an in-memory map (the hot tier), an ordered chain of persistent
/// backends discovered at construction, and a default factory for keys with
/// no recorded value anywhere.
///
/// The cache is synchronous and assumes exclusive single-caller use: backend
/// calls block the caller in sequence, and a hung backend hangs the
/// operation. Backend errors propagate unchanged and abort the in-progress
/// fan-out with no rollback, so a partial `set` failure can leave backends
/// inconsistent with each other; memory is only updated after every backend
/// accepted the write.
pub struct TieredCache<K, V> {
    memory: HashMap<K, V>,
    backends: BackendChain<K, V>,
    discovery: Arc<dyn BackendDiscovery<K, V>>,
    default: DefaultFactory<V>,
}

impl<K, V> TieredCache<K, V>
where
    K: Eq + Hash + Clone + fmt::Debug,
    V: Clone,
{
    /// Construct a cache, running backend discovery once.
    ///
    /// Fails with [`CacheError::Configuration`] when the discovery provider
    /// cannot produce a chain; no cache is constructed in that case.
    pub fn new(
        discovery: Arc<dyn BackendDiscovery<K, V>>,
        default: DefaultFactory<V>,
    ) -> Result<Self, CacheError> {
        Self::with_entries(discovery, default, [])
    }

    /// Construct a cache with memory pre-seeded from `entries`.
    ///
    /// Seeding fills memory only: no backend `save` is issued for seeded
    /// entries until they are next written through [`set`](Self::set).
    pub fn with_entries(
        discovery: Arc<dyn BackendDiscovery<K, V>>,
        default: DefaultFactory<V>,
        entries: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Self, CacheError> {
        let backends = discovery.discover()?;
        info!(backends = backends.len(), "Tiered cache constructed");

        Ok(Self {
            memory: entries.into_iter().collect(),
            backends,
            discovery,
            default,
        })
    }

    /// Look up `key`, resolving through the tiers.
    ///
    /// A memory hit returns immediately with no backend I/O. On a miss the
    /// backends are probed in declared order and the first non-absent value
    /// wins; if none holds the key the default factory materializes one.
    /// The resolved value is then written back via [`set`](Self::set) — a
    /// full fan-out to every backend, not just a memory fill — before being
    /// returned.
    ///
    /// Fails only when a backend probe fails, when a mid-resolution `save`
    /// fails, or on a total miss with a disabled factory.
    pub fn get(&mut self, key: &K) -> Result<V, CacheError> {
        if let Some(value) = self.memory.get(key) {
            return Ok(value.clone());
        }

        let mut resolved = None;
        for backend in &self.backends {
            if let Some(value) = backend.get(key)? {
                debug!(key = ?key, backend = backend.name(), "Resolved key from backend");
                resolved = Some(value);
                break;
            }
        }

        let value = match resolved {
            Some(value) => value,
            None => {
                debug!(key = ?key, "Key absent from every tier, materializing default");
                self.default.make()?
            }
        };

        // A read miss is also a write: the resolved value goes back through
        // the whole chain, including the backend that supplied it.
        self.set(key.clone(), value.clone())?;
        Ok(value)
    }

    /// Write `value` for `key` through every backend, then update memory.
    ///
    /// Backends are saved in declared order. The first backend error aborts
    /// the fan-out — later backends are not called and memory keeps its
    /// prior value — leaving already-written backends ahead of the rest.
    /// On success memory is overwritten unconditionally.
    pub fn set(&mut self, key: K, value: V) -> Result<(), CacheError> {
        for backend in &self.backends {
            backend.save(&key, &value)?;
        }

        debug!(key = ?key, backends = self.backends.len(), "Wrote key through chain");
        self.memory.insert(key, value);
        Ok(())
    }

    /// [`set`](Self::set) each entry in iteration order.
    ///
    /// Equivalent to sequential `set` calls: each entry triggers its own
    /// full backend fan-out, and an error mid-sequence leaves earlier
    /// entries written and later ones untouched.
    pub fn bulk_set(&mut self, entries: impl IntoIterator<Item = (K, V)>) -> Result<(), CacheError> {
        for (key, value) in entries {
            self.set(key, value)?;
        }
        Ok(())
    }

    /// Write `value` for `key` only if `key` is absent from memory, then
    /// return the value recorded for `key`.
    ///
    /// `None` materializes the value via the default factory. The return
    /// goes through [`get`](Self::get) semantics, so a key already present
    /// yields the in-memory value, not the one passed in.
    pub fn set_if_absent(&mut self, key: K, value: Option<V>) -> Result<V, CacheError> {
        let value = match value {
            Some(value) => value,
            None => self.default.make()?,
        };

        if !self.memory.contains_key(&key) {
            self.set(key.clone(), value)?;
        }
        self.get(&key)
    }

    /// Drop every in-memory entry and re-run backend discovery.
    ///
    /// Nothing stored in any backend is deleted; only this cache's view is
    /// reset. The chain reference is replaced with a freshly discovered
    /// one, so a provider whose answer changed takes effect here.
    pub fn clear(&mut self) -> Result<(), CacheError> {
        self.memory.clear();
        self.backends = self.discovery.discover()?;
        info!(backends = self.backends.len(), "Cache cleared, chain rediscovered");
        Ok(())
    }

    /// Number of keys currently in memory.
    pub fn len(&self) -> usize {
        self.memory.len()
    }

    /// Whether memory holds no keys.
    pub fn is_empty(&self) -> bool {
        self.memory.is_empty()
    }

    /// Whether `key` is present in memory. Never touches backends.
    pub fn contains_key(&self, key: &K) -> bool {
        self.memory.contains_key(key)
    }

    /// Iterate over in-memory entries, in no particular order.
    pub fn iter(&self) -> hash_map::Iter<'_, K, V> {
        self.memory.iter()
    }

    /// Iterate over in-memory keys.
    pub fn keys(&self) -> hash_map::Keys<'_, K, V> {
        self.memory.keys()
    }

    /// Iterate over in-memory values.
    pub fn values(&self) -> hash_map::Values<'_, K, V> {
        self.memory.values()
    }

    /// Number of backends in the current chain.
    pub fn backend_count(&self) -> usize {
        self.backends.len()
    }
}

impl<'a, K, V> IntoIterator for &'a TieredCache<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = hash_map::Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.memory.iter()
    }
}

impl<K, V> fmt::Debug for TieredCache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TieredCache")
            .field("entries", &self.memory.len())
            .field("backends", &self.backends.len())
            .field("default", &self.default.is_enabled())
            .finish()
    }
}
