//! Page selection strategies.
//!
//! Each strategy derives the main read from the range-filtered plan and,
//! when asked, issues the cheapest probe that decides a page-boundary flag.
//! Flags a strategy cannot derive locally are left `None` for the
//! assembler to fill from the boundary fallback.

use pagewise_core::{PageOptions, PaginationResult, QueryPlan};
use tracing::debug;

use crate::traits::DocumentStore;

/// The active pagination mode with its resolved page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    /// `first`/`after`: take the first `limit` documents of the range.
    Forward { limit: u32 },
    /// `last`/`before`: take the last `limit` documents of the range.
    Backward { limit: u32 },
    /// `offset`/`first`: skip `offset` documents, then take `limit`.
    Offset { offset: u32, limit: u32 },
}

/// Probe-derived page flags; `None` when not requested or not derivable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PageFlags {
    pub has_next_page: Option<bool>,
    pub has_previous_page: Option<bool>,
}

/// The main read to execute plus the flags computed on the way.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSelection {
    pub plan: QueryPlan,
    pub flags: PageFlags,
}

impl PageMode {
    /// Short name for logs.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            PageMode::Forward { .. } => "forward",
            PageMode::Backward { .. } => "backward",
            PageMode::Offset { .. } => "offset",
        }
    }

    /// Derives the page read from `range`, probing only for requested flags.
    ///
    /// `range` is the filtered, sorted plan with no skip or limit.
    pub async fn select(
        &self,
        store: &dyn DocumentStore,
        range: &QueryPlan,
        options: &PageOptions,
    ) -> PaginationResult<PageSelection> {
        match *self {
            PageMode::Forward { limit } => forward(store, range, limit, options).await,
            PageMode::Backward { limit } => backward(store, range, limit, options).await,
            PageMode::Offset { offset, limit } => {
                offset_page(store, range, offset, limit, options).await
            }
        }
    }
}

async fn forward(
    store: &dyn DocumentStore,
    range: &QueryPlan,
    limit: u32,
    options: &PageOptions,
) -> PaginationResult<PageSelection> {
    let limit = u64::from(limit);
    let mut flags = PageFlags::default();

    // One extra document beyond the page answers hasNextPage without a full count.
    if options.include_has_next_page {
        let probed = store.count(&range.with_limit(limit + 1)).await?;
        flags.has_next_page = Some(probed > limit);
        debug!(limit, probed, "forward probe");
    }

    Ok(PageSelection {
        plan: range.with_limit(limit),
        flags,
    })
}

async fn backward(
    store: &dyn DocumentStore,
    range: &QueryPlan,
    limit: u32,
    options: &PageOptions,
) -> PaginationResult<PageSelection> {
    let limit = u64::from(limit);
    let total = store.count(range).await?;
    let skip = total.saturating_sub(limit);
    let mut flags = PageFlags::default();

    if options.include_has_previous_page {
        flags.has_previous_page = Some(if skip == 0 {
            false
        } else {
            let probed = store
                .count(&range.with_skip(skip - 1).with_limit(limit + 1))
                .await?;
            debug!(limit, skip, probed, "backward probe");
            probed > limit
        });
    }

    Ok(PageSelection {
        plan: range.with_skip(skip).with_limit(limit),
        flags,
    })
}

async fn offset_page(
    store: &dyn DocumentStore,
    range: &QueryPlan,
    offset: u32,
    limit: u32,
    options: &PageOptions,
) -> PaginationResult<PageSelection> {
    let skip = u64::from(offset);
    let limit = u64::from(limit);
    let mut flags = PageFlags {
        has_next_page: None,
        has_previous_page: Some(offset > 0),
    };

    if options.include_has_next_page {
        let probed = store.count(&range.with_skip(skip + limit).with_limit(1)).await?;
        flags.has_next_page = Some(probed > 0);
        debug!(skip, limit, probed, "offset probe");
    }

    Ok(PageSelection {
        plan: range.with_skip(skip).with_limit(limit),
        flags,
    })
}
