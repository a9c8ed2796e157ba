//! Namespace-wide staleness marker.
//!
//! One flag guards every cached page under a [`CacheConfig`] prefix. Any
//! write to the underlying data must call [`DirtyFlag::mark_updated`]; the
//! next cache miss recomputes a page and calls [`DirtyFlag::mark_fresh`].
//!
//! The flag is not versioned. A reader that observes "fresh" just before a
//! concurrent writer marks it updated may still serve the old page, and a
//! miss that finishes after such a write resets the flag over it. Both
//! windows last at most one in-flight request; pages cached during it stay
//! reachable until the next write or until `ttl` expires.

use std::sync::Arc;
use std::time::Duration;

use crate::service::config::CacheConfig;
use crate::traits::SharedCache;

const UPDATED: &str = "true";
const FRESH: &str = "false";

/// Handle to the shared dirty flag stored in a [`SharedCache`].
#[derive(Clone)]
pub struct DirtyFlag {
    cache: Arc<dyn SharedCache>,
    key: String,
    ttl: Duration,
}

impl DirtyFlag {
    #[must_use]
    pub fn new(cache: Arc<dyn SharedCache>, config: &CacheConfig) -> Self {
        Self {
            cache,
            key: config.dirty_flag_key.clone(),
            ttl: config.ttl,
        }
    }

    /// Whether cached pages must be bypassed. A missing flag reads as fresh.
    ///
    /// # Errors
    ///
    /// Propagates the cache error; callers treat it as "cache unreachable".
    pub async fn is_updated(&self) -> anyhow::Result<bool> {
        Ok(self.cache.get(&self.key).await?.as_deref() == Some(UPDATED))
    }

    /// Invalidates every cached page in the namespace.
    ///
    /// # Errors
    ///
    /// Propagates the cache error.
    pub async fn mark_updated(&self) -> anyhow::Result<()> {
        self.cache.set(&self.key, UPDATED, self.ttl).await
    }

    /// Re-enables cache hits after a page was recomputed.
    ///
    /// # Errors
    ///
    /// Propagates the cache error.
    pub async fn mark_fresh(&self) -> anyhow::Result<()> {
        self.cache.set(&self.key, FRESH, self.ttl).await
    }
}

impl std::fmt::Debug for DirtyFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DirtyFlag")
            .field("key", &self.key)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}
