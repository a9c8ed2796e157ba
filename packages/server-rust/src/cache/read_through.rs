//! Read-through page cache gated by the shared [`DirtyFlag`].
//!
//! A page is served from the cache only when the cache answers, the flag
//! reads fresh, and a decodable payload exists under the request's key.
//! Every other path recomputes. Cache failures are logged and never reach
//! the caller.

use std::future::Future;
use std::sync::Arc;

use pagewise_core::{Connection, PageRequest, PaginationResult};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::DirtyFlag;
use crate::service::config::CacheConfig;
use crate::traits::SharedCache;

/// How a call was answered, recorded on the enclosing span as `cache`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheOutcome {
    Hit,
    Miss,
    /// The dirty flag was set.
    Stale,
    /// The cache did not answer; nothing was read or written.
    Unavailable,
    Disabled,
}

impl CacheOutcome {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            CacheOutcome::Hit => "hit",
            CacheOutcome::Miss => "miss",
            CacheOutcome::Stale => "stale",
            CacheOutcome::Unavailable => "unavailable",
            CacheOutcome::Disabled => "disabled",
        }
    }
}

#[derive(Clone)]
struct Backend {
    cache: Arc<dyn SharedCache>,
    flag: DirtyFlag,
}

/// Wraps page computation with a signature-keyed cache.
#[derive(Clone)]
pub struct ReadThroughCache {
    backend: Option<Backend>,
    config: CacheConfig,
}

impl std::fmt::Debug for ReadThroughCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReadThroughCache")
            .field("enabled", &self.backend.is_some())
            .field("config", &self.config)
            .finish()
    }
}

impl ReadThroughCache {
    #[must_use]
    pub fn new(cache: Arc<dyn SharedCache>, config: CacheConfig) -> Self {
        let flag = DirtyFlag::new(cache.clone(), &config);
        Self {
            backend: Some(Backend { cache, flag }),
            config,
        }
    }

    /// A cache that always recomputes.
    #[must_use]
    pub fn disabled() -> Self {
        Self {
            backend: None,
            config: CacheConfig::default(),
        }
    }

    /// The dirty flag guarding this cache's namespace, if enabled.
    #[must_use]
    pub fn dirty_flag(&self) -> Option<&DirtyFlag> {
        self.backend.as_ref().map(|backend| &backend.flag)
    }

    /// `<prefix>:<sha256 of the JSON-encoded request>`.
    ///
    /// The request is hashed raw: `first: 5` and an equivalent defaulted
    /// request get different keys.
    ///
    /// # Errors
    ///
    /// Fails only if the request cannot be encoded as JSON.
    pub fn cache_key(&self, request: &PageRequest) -> serde_json::Result<String> {
        let encoded = serde_json::to_vec(request)?;
        let digest = Sha256::digest(&encoded);
        Ok(format!("{}:{}", self.config.key_prefix, hex::encode(digest)))
    }

    /// Returns the cached page for `request`, or runs `compute` and caches
    /// its result.
    ///
    /// # Errors
    ///
    /// Only errors from `compute` are returned.
    pub async fn get_or_compute<F, Fut>(
        &self,
        request: &PageRequest,
        compute: F,
    ) -> PaginationResult<Connection>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = PaginationResult<Connection>>,
    {
        let Some(backend) = &self.backend else {
            record(CacheOutcome::Disabled);
            return compute().await;
        };
        let key = match self.cache_key(request) {
            Ok(key) => key,
            Err(error) => {
                warn!(%error, "request not encodable, bypassing cache");
                record(CacheOutcome::Unavailable);
                return compute().await;
            }
        };

        let outcome = match backend.flag.is_updated().await {
            Ok(true) => CacheOutcome::Stale,
            Ok(false) => match lookup(backend, &key).await {
                Some(connection) => {
                    record(CacheOutcome::Hit);
                    return Ok(connection);
                }
                None => CacheOutcome::Miss,
            },
            Err(error) => {
                warn!(%error, "cache unreachable, bypassing");
                CacheOutcome::Unavailable
            }
        };
        record(outcome);

        let connection = compute().await?;
        if outcome != CacheOutcome::Unavailable {
            self.write_back(backend, &key, &connection).await;
        }
        Ok(connection)
    }

    async fn write_back(&self, backend: &Backend, key: &str, connection: &Connection) {
        let payload = match serde_json::to_string(connection) {
            Ok(payload) => payload,
            Err(error) => {
                warn!(key, %error, "page not encodable, not cached");
                return;
            }
        };
        if let Err(error) = backend.cache.set(key, &payload, self.config.ttl).await {
            warn!(key, %error, "cache write failed");
            return;
        }
        if let Err(error) = backend.flag.mark_fresh().await {
            warn!(%error, "failed to reset dirty flag");
        }
    }
}

async fn lookup(backend: &Backend, key: &str) -> Option<Connection> {
    let payload = match backend.cache.get(key).await {
        Ok(payload) => payload?,
        Err(error) => {
            warn!(key, %error, "cache read failed");
            return None;
        }
    };
    match serde_json::from_str(&payload) {
        Ok(connection) => Some(connection),
        Err(error) => {
            warn!(key, %error, "discarding undecodable cached page");
            None
        }
    }
}

fn record(outcome: CacheOutcome) {
    tracing::Span::current().record("cache", outcome.as_str());
    debug!(cache = outcome.as_str(), "cache lookup");
}
