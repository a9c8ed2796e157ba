//! Read-through caching of connection pages.
//!
//! - [`ReadThroughCache`]: signature-keyed cache around page computation
//! - [`DirtyFlag`]: namespace-wide invalidation marker
//! - [`CacheInvalidator`]: store observer that sets the flag on writes
//! - [`MemoryCache`]: in-process [`SharedCache`](crate::traits::SharedCache)

pub mod dirty_flag;
pub mod invalidator;
pub mod memory;
pub mod read_through;

pub use dirty_flag::DirtyFlag;
pub use invalidator::CacheInvalidator;
pub use memory::{CacheUnreachable, MemoryCache};
pub use read_through::{CacheOutcome, ReadThroughCache};
