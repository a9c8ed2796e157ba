//! Page-serving service stack.
//!
//! 1. **Configuration** (`config`): paging and cache settings
//! 2. **Pagination** (`paginate`): the pipeline as a tower `Service`
//! 3. **Middleware** (`middleware`): Tower layers (metrics, read-through cache)

pub mod config;
pub mod middleware;
pub mod paginate;

// Re-export key types for convenient access.
pub use config::{CacheConfig, PagingConfig, DEFAULT_CACHE_TTL};
pub use middleware::build_pagination_pipeline;
pub use paginate::{PageFuture, PaginationService};
