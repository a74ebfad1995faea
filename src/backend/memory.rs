//! Process-local in-memory backend.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Mutex, PoisonError};

use crate::backend::{Backend, BackendError};

/// A backend over a plain in-process map.
///
/// Not durable across restarts; useful as the innermost tier of a chain,
/// as a shared store handed to several caches, and as the workhorse fake
/// in tests. Never fails.
pub struct MemoryBackend<K, V> {
    name: String,
    store: Mutex<HashMap<K, V>>,
}

impl<K, V> MemoryBackend<K, V> {
    /// An empty backend named `"memory"`.
    pub fn new() -> Self {
        Self::named("memory")
    }

    /// An empty backend with the given log name, for chains holding more
    /// than one.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            store: Mutex::new(HashMap::new()),
        }
    }

    /// Number of keys currently stored.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether the backend holds no keys.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // A poisoned lock still guards a fully-written map (no operation
    // leaves it mid-mutation), so recover the data instead of panicking.
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<K, V>> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<K, V> Default for MemoryBackend<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Backend<K, V> for MemoryBackend<K, V>
where
    K: Eq + Hash + Clone + Send,
    V: Clone + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn get(&self, key: &K) -> Result<Option<V>, BackendError> {
        Ok(self.lock().get(key).cloned())
    }

    fn save(&self, key: &K, value: &V) -> Result<(), BackendError> {
        self.lock().insert(key.clone(), value.clone());
        Ok(())
    }
}
