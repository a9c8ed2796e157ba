//! Pipeline composition: wraps the pagination service with its middleware.

use std::sync::Arc;

use pagewise_core::{Connection, PageRequest, PaginationError};
use tower::{Service, ServiceBuilder};

use super::cache::ReadThroughCacheLayer;
use super::metrics::MetricsLayer;
use crate::cache::ReadThroughCache;
use crate::service::config::PagingConfig;
use crate::service::paginate::{PageFuture, PaginationService};
use crate::traits::DocumentStore;

/// Build the page-serving stack over `store`.
///
/// Layer order (outermost to innermost):
/// 1. `MetricsLayer` -- span per request, so cache hits are timed too
/// 2. `ReadThroughCacheLayer` -- answer from cache or fall through
/// 3. `PaginationService` -- run the pipeline against the store
///
/// Pass [`ReadThroughCache::disabled`] to run without caching.
#[must_use]
pub fn build_pagination_pipeline(
    store: Arc<dyn DocumentStore>,
    paging: PagingConfig,
    cache: ReadThroughCache,
) -> impl Service<PageRequest, Response = Connection, Error = PaginationError, Future = PageFuture>
       + Clone
       + Send
       + 'static {
    ServiceBuilder::new()
        .layer(MetricsLayer)
        .layer(ReadThroughCacheLayer::new(cache))
        .service(PaginationService::new(store, paging))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
