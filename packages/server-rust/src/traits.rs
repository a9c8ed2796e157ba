use std::time::Duration;

use async_trait::async_trait;
use pagewise_core::{Document, QueryPlan};

/// Ordered document store the pagination engine reads from.
/// Implementations: in-memory (`MemoryStore`), external databases via adapters.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Materialize the documents selected by `plan` in plan order,
    /// honoring its filter, sort, skip and limit.
    async fn find(&self, plan: &QueryPlan) -> anyhow::Result<Vec<Document>>;

    /// Count the documents `plan` would return, skip and limit applied.
    async fn count(&self, plan: &QueryPlan) -> anyhow::Result<u64>;

    /// Point read by identifier, returning only `_id` plus the projected fields.
    async fn find_one(
        &self,
        collection: &str,
        id: &str,
        projection: &[String],
    ) -> anyhow::Result<Option<Document>>;
}

/// Shared key-value cache with per-entry expiry.
/// Every call is best-effort: callers treat errors as "cache unavailable".
#[async_trait]
pub trait SharedCache: Send + Sync {
    /// Fetch the value stored at `key`, if present and not expired.
    async fn get(&self, key: &str) -> anyhow::Result<Option<String>>;

    /// Store `value` at `key`, replacing any previous value, expiring after `ttl`.
    async fn set(&self, key: &str, value: &str, ttl: Duration) -> anyhow::Result<()>;
}
