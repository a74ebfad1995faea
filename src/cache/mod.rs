//! The overlay cache core.
//!
//! - [`overlay`]: [`TieredCache`](overlay::TieredCache), the write-through
//!   overlay over an ordered backend chain
//! - [`factory`]: [`DefaultFactory`](factory::DefaultFactory), the typed
//!   default-value factory for keys absent from every tier

pub mod factory;
pub mod overlay;
