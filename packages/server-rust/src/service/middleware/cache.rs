//! Read-through cache middleware.
//!
//! Answers from the [`ReadThroughCache`] when it can and forwards to the
//! inner service otherwise. The inner service never sees cache errors.

use std::task::{Context, Poll};

use pagewise_core::{Connection, PageRequest, PaginationError};
use tower::{Layer, Service};

use crate::cache::ReadThroughCache;
use crate::service::paginate::PageFuture;

// ---------------------------------------------------------------------------
// ReadThroughCacheLayer
// ---------------------------------------------------------------------------

/// Tower layer that puts a [`ReadThroughCache`] in front of a page service.
#[derive(Debug, Clone)]
pub struct ReadThroughCacheLayer {
    cache: ReadThroughCache,
}

impl ReadThroughCacheLayer {
    #[must_use]
    pub fn new(cache: ReadThroughCache) -> Self {
        Self { cache }
    }
}

impl<S> Layer<S> for ReadThroughCacheLayer {
    type Service = ReadThroughCacheService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        ReadThroughCacheService {
            inner,
            cache: self.cache.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// ReadThroughCacheService
// ---------------------------------------------------------------------------

/// Service wrapper that consults the cache before calling `inner`.
#[derive(Debug, Clone)]
pub struct ReadThroughCacheService<S> {
    inner: S,
    cache: ReadThroughCache,
}

impl<S> Service<PageRequest> for ReadThroughCacheService<S>
where
    S: Service<PageRequest, Response = Connection, Error = PaginationError>
        + Clone
        + Send
        + 'static,
    S::Future: Send + 'static,
{
    type Response = Connection;
    type Error = PaginationError;
    type Future = PageFuture;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: PageRequest) -> Self::Future {
        // The ready instance goes into the future; a fresh clone stays behind.
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let cache = self.cache.clone();
        Box::pin(async move {
            cache
                .get_or_compute(&request, || inner.call(request.clone()))
                .await
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use pagewise_core::{ConnectionArgs, Document, Query};
    use tower::ServiceExt;

    use super::*;
    use crate::cache::MemoryCache;
    use crate::service::config::{CacheConfig, PagingConfig};
    use crate::service::paginate::PaginationService;
    use crate::storage::MemoryStore;
    use crate::test_support::RecordingStore;

    async fn recording_store() -> Arc<RecordingStore> {
        let store = RecordingStore::wrap(MemoryStore::new());
        for id in ["a", "b", "c"] {
            store.inner.insert("items", Document::new(id)).await;
        }
        Arc::new(store)
    }

    fn request() -> PageRequest {
        PageRequest::new(Query::all("items"), ConnectionArgs::default().first(2))
    }

    #[tokio::test]
    async fn repeated_request_skips_the_store() {
        let store = recording_store().await;
        let cache = ReadThroughCache::new(Arc::new(MemoryCache::new()), CacheConfig::default());
        let service = ReadThroughCacheLayer::new(cache)
            .layer(PaginationService::new(store.clone(), PagingConfig::default()));

        let first = service.clone().oneshot(request()).await.unwrap();
        let reads = store.calls().len();
        assert!(reads > 0);

        let second = service.oneshot(request()).await.unwrap();
        assert_eq!(first, second);
        assert_eq!(store.calls().len(), reads);
    }

    #[tokio::test]
    async fn unreachable_cache_still_answers() {
        let store = recording_store().await;
        let memory = Arc::new(MemoryCache::new());
        memory.set_unreachable(true);
        let cache = ReadThroughCache::new(memory, CacheConfig::default());
        let service = ReadThroughCacheLayer::new(cache)
            .layer(PaginationService::new(store.clone(), PagingConfig::default()));
        let uncached = PaginationService::new(store.clone(), PagingConfig::default());

        let via_cache = service.oneshot(request()).await.unwrap();
        let direct = uncached.oneshot(request()).await.unwrap();
        assert_eq!(via_cache, direct);
    }
}
