//! Metrics middleware for page requests.
//!
//! Records request duration, outcome and cache disposition on a `tracing`
//! span, not a full metrics crate.

use std::task::{Context, Poll};
use std::time::Instant;

use pagewise_core::{Connection, PageRequest, PaginationError};
use tower::{Layer, Service};
use tracing::{info_span, Instrument};

use crate::service::paginate::PageFuture;

// ---------------------------------------------------------------------------
// MetricsLayer
// ---------------------------------------------------------------------------

/// Tower layer that instruments page requests with timing via `tracing` spans.
#[derive(Debug, Clone)]
pub struct MetricsLayer;

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsService { inner }
    }
}

// ---------------------------------------------------------------------------
// MetricsService
// ---------------------------------------------------------------------------

/// Service wrapper that records duration and outcome in a `paginate` span.
///
/// Inner layers may record `cache` on the same span.
#[derive(Debug, Clone)]
pub struct MetricsService<S> {
    inner: S,
}

impl<S> Service<PageRequest> for MetricsService<S>
where
    S: Service<PageRequest, Response = Connection, Error = PaginationError> + Send,
    S::Future: Send + 'static,
{
    type Response = Connection;
    type Error = PaginationError;
    type Future = PageFuture;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: PageRequest) -> Self::Future {
        let collection = request.query.collection.clone();

        let span = info_span!(
            "paginate",
            collection = %collection,
            duration_ms = tracing::field::Empty,
            outcome = tracing::field::Empty,
            cache = tracing::field::Empty,
        );

        let fut = self.inner.call(request);

        Box::pin(
            async move {
                let start = Instant::now();
                let result = fut.await;

                let outcome = match &result {
                    Ok(_) => "ok",
                    Err(err) => err.kind(),
                };

                let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
                tracing::Span::current().record("duration_ms", duration_ms);
                tracing::Span::current().record("outcome", outcome);

                match &result {
                    Ok(connection) => tracing::info!(
                        collection = %collection,
                        duration_ms,
                        outcome,
                        nodes = connection.nodes.len(),
                        "page served"
                    ),
                    Err(error) => tracing::info!(
                        collection = %collection,
                        duration_ms,
                        outcome,
                        %error,
                        "page request failed"
                    ),
                }

                result
            }
            .instrument(span),
        )
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
