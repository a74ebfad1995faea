//! Default-value factory for keys with no recorded value anywhere.

use std::fmt;
use std::sync::Arc;

use crate::error::CacheError;

/// Produces a fresh value for a key that missed memory and every backend.
///
/// The factory has a fixed `() -> V` signature; there is no duck typing to
/// validate at call time. Hosts that want a total miss to be an error
/// instead of a materialized value disable the factory explicitly.
#[derive(Clone)]
pub enum DefaultFactory<V> {
    /// No default: a total miss resolves to
    /// [`CacheError::MissingDefault`].
    Disabled,
    /// Invoke the function for each total miss.
    Factory(Arc<dyn Fn() -> V + Send + Sync>),
}

impl<V> DefaultFactory<V> {
    /// A factory from any `Fn() -> V` closure.
    pub fn from_fn(f: impl Fn() -> V + Send + Sync + 'static) -> Self {
        Self::Factory(Arc::new(f))
    }

    /// Whether a total miss can be materialized.
    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Factory(_))
    }

    /// Produce a fresh default value.
    pub(crate) fn make(&self) -> Result<V, CacheError> {
        match self {
            Self::Factory(f) => Ok(f()),
            Self::Disabled => Err(CacheError::MissingDefault),
        }
    }
}

/// `V::default()` per total miss.
impl<V: Default + 'static> Default for DefaultFactory<V> {
    fn default() -> Self {
        Self::from_fn(V::default)
    }
}

impl<V> fmt::Debug for DefaultFactory<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Disabled => f.write_str("DefaultFactory::Disabled"),
            Self::Factory(_) => f.write_str("DefaultFactory::Factory"),
        }
    }
}
