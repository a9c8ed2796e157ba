//! Range filter composition.
//!
//! Restricts the base filter to documents strictly before or after a
//! resolved boundary in sort order, breaking sort-field ties on `_id` so the
//! order is total and stable across pages.

use pagewise_core::{PredicateNode, PredicateOp, SortDirection, SortSpec, ID_FIELD};

use super::boundary::ResolvedBoundary;
use super::normalize::Direction;

/// Comparison that selects documents beyond the boundary.
///
/// "After" means further along the requested order, so the operator flips
/// for descending sorts.
#[must_use]
pub fn range_operator(direction: Direction, order: SortDirection) -> PredicateOp {
    match (direction, order) {
        (Direction::Before, SortDirection::Asc) | (Direction::After, SortDirection::Desc) => {
            PredicateOp::Lt
        }
        (Direction::Before, SortDirection::Desc) | (Direction::After, SortDirection::Asc) => {
            PredicateOp::Gt
        }
    }
}

/// Builds the filter for one page read.
///
/// Without a boundary the base filter is returned unchanged. The result is
/// a fresh tree; `base` is never modified.
#[must_use]
pub fn compose_range_filter(
    base: Option<&PredicateNode>,
    boundary: Option<&ResolvedBoundary>,
    sort: &SortSpec,
) -> Option<PredicateNode> {
    let Some(boundary) = boundary else {
        return base.cloned();
    };
    let op = range_operator(boundary.direction, sort.order);
    let record = &boundary.record;

    let condition = if sort.is_id() {
        PredicateNode::compare(op, ID_FIELD, record.id.as_str())
    } else {
        PredicateNode::or(vec![
            PredicateNode::compare(op, sort.field.as_str(), record.sort_value.clone()),
            PredicateNode::and(vec![
                PredicateNode::eq(sort.field.as_str(), record.sort_value.clone()),
                PredicateNode::compare(op, ID_FIELD, record.id.as_str()),
            ]),
        ])
    };

    Some(match base {
        None => condition,
        Some(base) => PredicateNode::and(vec![base.clone(), condition]),
    })
}
