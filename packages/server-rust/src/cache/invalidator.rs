//! Store observer that keeps the dirty flag in step with writes.

use async_trait::async_trait;
use pagewise_core::Document;
use tracing::warn;

use super::DirtyFlag;
use crate::storage::MutationObserver;

/// Marks the cache namespace updated on every store mutation.
///
/// Registered on a [`CompositeMutationObserver`](crate::storage::CompositeMutationObserver)
/// so writes through [`MemoryStore`](crate::storage::MemoryStore) invalidate cached pages.
#[derive(Debug, Clone)]
pub struct CacheInvalidator {
    flag: DirtyFlag,
}

impl CacheInvalidator {
    #[must_use]
    pub fn new(flag: DirtyFlag) -> Self {
        Self { flag }
    }

    async fn invalidate(&self, collection: &str) {
        if let Err(error) = self.flag.mark_updated().await {
            warn!(collection, %error, "failed to mark cache updated");
        }
    }
}

#[async_trait]
impl MutationObserver for CacheInvalidator {
    async fn on_put(&self, collection: &str, _document: &Document, _old: Option<&Document>) {
        self.invalidate(collection).await;
    }

    async fn on_remove(&self, collection: &str, _document: &Document) {
        self.invalidate(collection).await;
    }

    async fn on_clear(&self, collection: &str) {
        self.invalidate(collection).await;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::cache::MemoryCache;
    use crate::service::config::CacheConfig;
    use crate::storage::{CompositeMutationObserver, MemoryStore};

    #[tokio::test]
    async fn store_writes_mark_flag_updated() {
        let cache = Arc::new(MemoryCache::new());
        let flag = DirtyFlag::new(cache.clone(), &CacheConfig::default());
        let observer =
            CompositeMutationObserver::new(vec![Arc::new(CacheInvalidator::new(flag.clone()))]);
        let store = MemoryStore::with_observer(Arc::new(observer));

        store.insert("items", Document::new("a")).await;
        assert!(flag.is_updated().await.unwrap());

        flag.mark_fresh().await.unwrap();
        store.remove("items", "a").await;
        assert!(flag.is_updated().await.unwrap());

        flag.mark_fresh().await.unwrap();
        store.clear("items").await;
        assert!(flag.is_updated().await.unwrap());
    }

    #[tokio::test]
    async fn unreachable_cache_does_not_fail_writes() {
        let cache = Arc::new(MemoryCache::new());
        let flag = DirtyFlag::new(cache.clone(), &CacheConfig::default());
        let invalidator = CacheInvalidator::new(flag);
        cache.set_unreachable(true);
        invalidator.on_clear("items").await;
    }
}
