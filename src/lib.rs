//! kv-overlay: write-through tiered key/value cache.
//!
//! An in-memory overlay backed by an ordered chain of pluggable persistent
//! backends:
//!   memory (hot) → backend 1 → backend 2 → … (in declared order)
//!
//! Reads consult memory first and fall through the backend chain on a miss;
//! a key absent everywhere is materialized by a caller-supplied default
//! factory. Every write fans out to all backends before the memory update,
//! and a read miss re-propagates the resolved value through the whole chain.
//!
//! The core is synchronous and single-caller: backend calls run in sequence
//! on the calling thread, and no internal locking is provided. Hosts that
//! need concurrent access must serialize calls externally.

pub mod backend;
pub mod cache;
pub mod error;

pub use backend::{Backend, BackendChain, BackendDiscovery, BackendError, StaticChain};
pub use backend::{JsonFileBackend, MemoryBackend};
pub use cache::factory::DefaultFactory;
pub use cache::overlay::TieredCache;
pub use error::CacheError;
