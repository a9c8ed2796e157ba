//! In-process [`SharedCache`] with per-entry expiry.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::time::Instant;

use crate::traits::SharedCache;

/// Returned by every [`MemoryCache`] call while it is marked unreachable.
#[derive(Debug, thiserror::Error)]
#[error("cache unreachable")]
pub struct CacheUnreachable;

#[derive(Debug, Clone)]
struct Entry {
    value: String,
    expires_at: Instant,
}

/// `DashMap`-backed cache. Expired entries are dropped lazily on read.
///
/// Expiry uses [`tokio::time::Instant`], so paused-clock tests can advance
/// past a TTL without sleeping.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, Entry>,
    unreachable: AtomicBool,
    reject_writes: AtomicBool,
}

impl MemoryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates losing (or regaining) the connection to the cache.
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::Release);
    }

    /// Keeps reads working while every `set` fails.
    pub fn set_reject_writes(&self, reject: bool) {
        self.reject_writes.store(reject, Ordering::Release);
    }

    /// Number of stored entries, expired ones included until next read.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn check_reachable(&self) -> anyhow::Result<()> {
        if self.unreachable.load(Ordering::Acquire) {
            return Err(CacheUnreachable.into());
        }
        Ok(())
    }
}

#[async_trait]
impl SharedCache for MemoryCache {
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>> {
        self.check_reachable()?;
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key) {
            if entry.expires_at > now {
                return Ok(Some(entry.value.clone()));
            }
        }
        self.entries.remove_if(key, |_, entry| entry.expires_at <= now);
        Ok(None)
    }

    async fn set(&self, key: &str, value: &str, ttl: Duration) -> anyhow::Result<()> {
        self.check_reachable()?;
        if self.reject_writes.load(Ordering::Acquire) {
            anyhow::bail!("cache rejected write to {key}");
        }
        self.entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }
}
