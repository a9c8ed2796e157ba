//! Pagewise Server: connection pagination over pluggable stores, with a read-through page cache.

pub mod cache;
pub mod pagination;
pub mod service;
pub mod storage;
pub mod traits;

#[cfg(test)]
mod test_support;

pub use cache::{CacheInvalidator, DirtyFlag, MemoryCache, ReadThroughCache};
pub use pagination::paginate;
pub use service::{build_pagination_pipeline, CacheConfig, PagingConfig, PaginationService};
pub use storage::{CompositeMutationObserver, MemoryStore, MutationObserver};
pub use traits::{DocumentStore, SharedCache};
