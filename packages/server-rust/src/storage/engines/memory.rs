//! In-memory [`DocumentStore`] implementation backed by [`DashMap`].
//!
//! Provides concurrent read/write access without external locking.
//! Suitable for development, testing, and deployments where the paginated
//! collections fit in memory.

use std::cmp::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use pagewise_core::{Document, QueryPlan, SortDirection, SortKey, Value};

use crate::storage::matcher::Matcher;
use crate::storage::mutation_observer::{CompositeMutationObserver, MutationObserver};
use crate::traits::DocumentStore;

static NULL: Value = Value::Null;

/// In-memory document store: collection name -> (`_id` -> document).
///
/// Reads take a point-in-time snapshot of the collection, so concurrent
/// writes never fail a read; they may or may not be visible to it.
/// Writes notify the registered [`MutationObserver`]s after they land.
pub struct MemoryStore {
    collections: DashMap<String, DashMap<String, Document>>,
    observer: Arc<CompositeMutationObserver>,
}

impl MemoryStore {
    /// Creates a new, empty store with no observers.
    #[must_use]
    pub fn new() -> Self {
        Self::with_observer(Arc::new(CompositeMutationObserver::default()))
    }

    /// Creates a new, empty store notifying `observer` on every write.
    #[must_use]
    pub fn with_observer(observer: Arc<CompositeMutationObserver>) -> Self {
        Self {
            collections: DashMap::new(),
            observer,
        }
    }

    /// Inserts or replaces a document. Returns the previous version if any.
    pub async fn insert(&self, collection: &str, document: Document) -> Option<Document> {
        let old = self
            .collections
            .entry(collection.to_string())
            .or_default()
            .insert(document.id.clone(), document.clone());
        self.observer
            .on_put(collection, &document, old.as_ref())
            .await;
        old
    }

    /// Inserts every document in order.
    pub async fn insert_many<I>(&self, collection: &str, documents: I)
    where
        I: IntoIterator<Item = Document>,
    {
        for document in documents {
            self.insert(collection, document).await;
        }
    }

    /// Removes a document by identifier, returning it.
    pub async fn remove(&self, collection: &str, id: &str) -> Option<Document> {
        let removed = self
            .collections
            .get(collection)
            .and_then(|docs| docs.remove(id))
            .map(|(_, doc)| doc);
        if let Some(ref doc) = removed {
            self.observer.on_remove(collection, doc).await;
        }
        removed
    }

    /// Removes every document of a collection.
    pub async fn clear(&self, collection: &str) {
        self.collections.remove(collection);
        self.observer.on_clear(collection).await;
    }

    /// Number of documents in a collection.
    #[must_use]
    pub fn len(&self, collection: &str) -> usize {
        self.collections.get(collection).map_or(0, |docs| docs.len())
    }

    /// Whether a collection holds no documents.
    #[must_use]
    pub fn is_empty(&self, collection: &str) -> bool {
        self.len(collection) == 0
    }

    fn snapshot(&self, collection: &str) -> Vec<Document> {
        let mut snapshot = Vec::new();
        if let Some(docs) = self.collections.get(collection) {
            snapshot.extend(docs.iter().map(|entry| entry.value().clone()));
        }
        snapshot
    }

    /// Filtered and sorted documents for `plan`, before skip/limit.
    fn select(&self, plan: &QueryPlan) -> anyhow::Result<Vec<Document>> {
        let matcher = Matcher::compile(plan.filter.as_ref())?;
        let mut docs: Vec<Document> = self
            .snapshot(&plan.collection)
            .into_iter()
            .filter(|doc| matcher.matches(doc))
            .collect();
        docs.sort_by(|a, b| compare_by(&plan.sort, a, b));
        Ok(docs)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Orders two documents by the plan's sort keys.
///
/// Falls back to `_id` ascending so an unsorted plan is still deterministic.
fn compare_by(sort: &[SortKey], a: &Document, b: &Document) -> Ordering {
    for key in sort {
        let av = a.lookup(&key.field);
        let bv = b.lookup(&key.field);
        let ordering = av
            .as_deref()
            .unwrap_or(&NULL)
            .total_cmp(bv.as_deref().unwrap_or(&NULL));
        let ordering = match key.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    a.id.cmp(&b.id)
}

/// Converts a plan bound to `usize`, saturating on narrow targets.
fn as_index(n: u64) -> usize {
    usize::try_from(n).unwrap_or(usize::MAX)
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, plan: &QueryPlan) -> anyhow::Result<Vec<Document>> {
        let docs = self.select(plan)?;
        let limit = plan.limit.map_or(usize::MAX, as_index);
        Ok(docs
            .into_iter()
            .skip(as_index(plan.skip))
            .take(limit)
            .collect())
    }

    async fn count(&self, plan: &QueryPlan) -> anyhow::Result<u64> {
        let matched = self.select(plan)?.len() as u64;
        let remaining = matched.saturating_sub(plan.skip);
        Ok(plan.limit.map_or(remaining, |limit| remaining.min(limit)))
    }

    async fn find_one(
        &self,
        collection: &str,
        id: &str,
        projection: &[String],
    ) -> anyhow::Result<Option<Document>> {
        Ok(self
            .collections
            .get(collection)
            .and_then(|docs| docs.get(id).map(|doc| doc.project(projection))))
    }
}
