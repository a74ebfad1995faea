//! Top-level cache errors.

use thiserror::Error;

use crate::backend::BackendError;

/// Errors surfaced by [`TieredCache`](crate::TieredCache) operations.
///
/// Backend failures propagate unchanged: the cache adds no retry or rollback
/// layer, and a failure mid-fan-out aborts the operation at that point.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Backend discovery failed at construction or on `clear()`.
    #[error("cache configuration error: {0}")]
    Configuration(String),

    /// A key missed memory and every backend, and no default factory is
    /// configured to materialize a value for it.
    #[error("no value for key and the default factory is disabled")]
    MissingDefault,

    /// A backend `get` or `save` call failed.
    #[error(transparent)]
    Backend(#[from] BackendError),
}
