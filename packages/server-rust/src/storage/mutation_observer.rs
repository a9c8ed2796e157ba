//! Mutation observer trait and composite implementation.
//!
//! Defines [`MutationObserver`] for reacting to document writes in a
//! [`MemoryStore`](super::MemoryStore), and [`CompositeMutationObserver`]
//! which fans out notifications to multiple observers.

use std::sync::Arc;

use async_trait::async_trait;
use pagewise_core::Document;

/// Observer for document writes.
///
/// Implementations can invalidate caches, maintain indexes, or broadcast
/// change events. Called after the write is visible to readers.
///
/// Used as `Arc<dyn MutationObserver>`.
#[async_trait]
pub trait MutationObserver: Send + Sync {
    /// Called after a document is inserted or replaced.
    async fn on_put(&self, collection: &str, document: &Document, old: Option<&Document>);

    /// Called after a document is removed.
    async fn on_remove(&self, collection: &str, document: &Document);

    /// Called after a whole collection is cleared.
    async fn on_clear(&self, collection: &str);
}

/// Composite observer that fans out to multiple observers.
///
/// Observers are notified in registration order.
#[derive(Default)]
pub struct CompositeMutationObserver {
    observers: Vec<Arc<dyn MutationObserver>>,
}

impl CompositeMutationObserver {
    /// Creates a composite observer with the given list of observers.
    #[must_use]
    pub fn new(observers: Vec<Arc<dyn MutationObserver>>) -> Self {
        Self { observers }
    }

    /// Adds an observer after construction.
    pub fn add(&mut self, observer: Arc<dyn MutationObserver>) {
        self.observers.push(observer);
    }

    /// Number of registered observers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.observers.len()
    }

    /// Whether no observers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }
}

#[async_trait]
impl MutationObserver for CompositeMutationObserver {
    async fn on_put(&self, collection: &str, document: &Document, old: Option<&Document>) {
        for observer in &self.observers {
            observer.on_put(collection, document, old).await;
        }
    }

    async fn on_remove(&self, collection: &str, document: &Document) {
        for observer in &self.observers {
            observer.on_remove(collection, document).await;
        }
    }

    async fn on_clear(&self, collection: &str) {
        for observer in &self.observers {
            observer.on_clear(collection).await;
        }
    }
}
