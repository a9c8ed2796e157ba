//! Final [`PageInfo`] assembly.

use pagewise_core::{Document, PageInfo, PageOptions};

use super::strategy::PageFlags;

/// Merges probe flags, the boundary fallback, and the realized page.
///
/// A probe-derived flag always wins; `has_more` (true iff a cursor was
/// supplied) only fills flags the strategy could not compute. Flags that
/// were not requested are omitted. Cursors are the `_id`s of the first and
/// last node, absent for an empty page.
#[must_use]
pub fn assemble(
    flags: PageFlags,
    has_more: bool,
    options: &PageOptions,
    nodes: &[Document],
) -> PageInfo {
    PageInfo {
        has_next_page: options
            .include_has_next_page
            .then(|| flags.has_next_page.unwrap_or(has_more)),
        has_previous_page: options
            .include_has_previous_page
            .then(|| flags.has_previous_page.unwrap_or(has_more)),
        start_cursor: nodes.first().map(|doc| doc.id.clone()),
        end_cursor: nodes.last().map(|doc| doc.id.clone()),
    }
}
