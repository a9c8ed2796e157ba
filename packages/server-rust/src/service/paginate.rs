//! The pagination pipeline as a tower [`Service`].

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use pagewise_core::{Connection, PageRequest, PaginationError, PaginationResult};
use tower::Service;

use crate::pagination::paginate;
use crate::service::config::PagingConfig;
use crate::traits::DocumentStore;

/// Boxed future returned by every service in the pagination stack.
pub type PageFuture = Pin<Box<dyn Future<Output = PaginationResult<Connection>> + Send>>;

/// Innermost service: runs [`paginate`] against a shared store.
///
/// Cheap to clone; clones share the store and configuration.
#[derive(Clone)]
pub struct PaginationService {
    store: Arc<dyn DocumentStore>,
    config: Arc<PagingConfig>,
}

impl PaginationService {
    #[must_use]
    pub fn new(store: Arc<dyn DocumentStore>, config: PagingConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

impl Service<PageRequest> for PaginationService {
    type Response = Connection;
    type Error = PaginationError;
    type Future = PageFuture;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, request: PageRequest) -> Self::Future {
        let store = Arc::clone(&self.store);
        let config = Arc::clone(&self.config);
        Box::pin(async move {
            paginate(
                store.as_ref(),
                &request.query,
                &request.args,
                request.options,
                &config,
            )
            .await
        })
    }
}
