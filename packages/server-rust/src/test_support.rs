//! Store doubles shared by unit tests.

use async_trait::async_trait;
use pagewise_core::{Document, QueryPlan};
use parking_lot::Mutex;

use crate::storage::MemoryStore;
use crate::traits::DocumentStore;

/// One call observed by [`RecordingStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Find(QueryPlan),
    Count(QueryPlan),
    FindOne { collection: String, id: String },
}

/// [`MemoryStore`] wrapper that records every read in order.
#[derive(Default)]
pub struct RecordingStore {
    pub inner: MemoryStore,
    calls: Mutex<Vec<StoreCall>>,
}

impl RecordingStore {
    pub fn wrap(inner: MemoryStore) -> Self {
        Self {
            inner,
            calls: Mutex::default(),
        }
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }
}

#[async_trait]
impl DocumentStore for RecordingStore {
    async fn find(&self, plan: &QueryPlan) -> anyhow::Result<Vec<Document>> {
        self.calls.lock().push(StoreCall::Find(plan.clone()));
        self.inner.find(plan).await
    }

    async fn count(&self, plan: &QueryPlan) -> anyhow::Result<u64> {
        self.calls.lock().push(StoreCall::Count(plan.clone()));
        self.inner.count(plan).await
    }

    async fn find_one(
        &self,
        collection: &str,
        id: &str,
        projection: &[String],
    ) -> anyhow::Result<Option<Document>> {
        self.calls.lock().push(StoreCall::FindOne {
            collection: collection.to_string(),
            id: id.to_string(),
        });
        self.inner.find_one(collection, id, projection).await
    }
}

/// Store whose every read fails.
pub struct FailingStore;

#[async_trait]
impl DocumentStore for FailingStore {
    async fn find(&self, _plan: &QueryPlan) -> anyhow::Result<Vec<Document>> {
        anyhow::bail!("store offline")
    }

    async fn count(&self, _plan: &QueryPlan) -> anyhow::Result<u64> {
        anyhow::bail!("store offline")
    }

    async fn find_one(
        &self,
        _collection: &str,
        _id: &str,
        _projection: &[String],
    ) -> anyhow::Result<Option<Document>> {
        anyhow::bail!("store offline")
    }
}
