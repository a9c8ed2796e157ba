//! Store-agnostic connection pagination.
//!
//! The pipeline for one call, in order:
//!
//! 1. [`normalize`](normalize::normalize) validates and defaults the raw
//!    arguments (no store access on failure)
//! 2. `totalCount` is counted over the base filter, if requested
//! 3. [`resolve_boundary`](boundary::resolve_boundary) turns a
//!    `before`/`after` reference into a sort position
//! 4. [`compose_range_filter`](filter::compose_range_filter) restricts the
//!    base filter to one side of that position
//! 5. a [`PageMode`] strategy derives the page read and probe flags
//! 6. the page is read and [`assemble`](page_info::assemble) builds `pageInfo`

pub mod boundary;
pub mod filter;
pub mod normalize;
pub mod page_info;
pub mod strategy;

use pagewise_core::{
    sort_keys, Connection, ConnectionArgs, PageOptions, PaginationResult, Query, QueryPlan,
};
use tracing::debug;

pub use boundary::{resolve_boundary, BoundaryRecord, ResolvedBoundary};
pub use filter::{compose_range_filter, range_operator};
pub use normalize::{normalize, CursorRef, Direction, NormalizedArgs};
pub use page_info::assemble;
pub use strategy::{PageFlags, PageMode, PageSelection};

use crate::service::config::PagingConfig;
use crate::traits::DocumentStore;

/// Selects one page of `query` according to `args`.
///
/// Returns the nodes in requested order, `pageInfo` with the requested
/// flags, and `totalCount` over the base filter when requested.
///
/// # Errors
///
/// `InvalidParameter` for rejected arguments (before any store access),
/// `NotFound` for a cursor that no longer resolves, and `Store` for any
/// store failure, propagated unchanged.
pub async fn paginate(
    store: &dyn DocumentStore,
    query: &Query,
    args: &ConnectionArgs,
    options: PageOptions,
    config: &PagingConfig,
) -> PaginationResult<Connection> {
    let normalized = normalize(args, config)?;
    let base = QueryPlan::from_query(query);

    // Counted before boundary filtering: reflects the base filter only.
    let total_count = if options.include_total_count {
        Some(store.count(&base).await?)
    } else {
        None
    };

    let boundary = match &normalized.cursor {
        Some(cursor) => {
            Some(resolve_boundary(store, &query.collection, cursor, &normalized.sort).await?)
        }
        None => None,
    };
    let has_more = boundary.is_some();

    let filter = compose_range_filter(base.filter.as_ref(), boundary.as_ref(), &normalized.sort);
    let range = base
        .with_filter(filter)
        .with_sort(sort_keys(&normalized.sort.field, normalized.sort.order));

    let selection = normalized.mode.select(store, &range, &options).await?;
    debug!(
        collection = %query.collection,
        mode = normalized.mode.name(),
        skip = selection.plan.skip,
        limit = ?selection.plan.limit,
        "page selected"
    );

    let nodes = store.find(&selection.plan).await?;
    let page_info = assemble(selection.flags, has_more, &options, &nodes);

    Ok(Connection {
        nodes,
        page_info,
        total_count,
    })
}
