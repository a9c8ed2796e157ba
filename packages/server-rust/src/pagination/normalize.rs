//! Argument validation and defaulting.
//!
//! Runs before any store access: every rejected combination surfaces as
//! [`PaginationError::InvalidParameter`] without touching the store.

use pagewise_core::{
    ConnectionArgs, PaginationError, PaginationResult, SortDirection, SortSpec, ID_FIELD,
};

use super::strategy::PageMode;
use crate::service::config::PagingConfig;

/// Which side of the referenced document the page lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Before,
    After,
}

/// A `before`/`after` reference, not yet resolved against the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorRef {
    pub direction: Direction,
    pub id: String,
}

/// Validated, defaulted connection arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedArgs {
    pub mode: PageMode,
    pub cursor: Option<CursorRef>,
    pub sort: SortSpec,
}

/// Validates `args` and fills in defaults.
///
/// - `first` with `last`, `offset` with `last`, and `after` with `before`
///   are rejected.
/// - `sortBy` defaults to `_id` and must not be empty; `sortOrder` defaults
///   to `asc` and must be `asc` or `desc`. An absent `sortBy` is defaulted
///   rather than rejected so that an empty argument set still returns the
///   first page; only an explicitly empty `sortBy` is an error.
/// - A zero `first`/`last` counts as absent, and empty cursors are ignored.
pub fn normalize(args: &ConnectionArgs, config: &PagingConfig) -> PaginationResult<NormalizedArgs> {
    if args.first.is_some() && args.last.is_some() {
        return Err(invalid("Request either first or last but not both"));
    }
    if args.offset.is_some() && args.last.is_some() {
        return Err(invalid("Request either last or offset but not both"));
    }

    let after = args.after.as_deref().filter(|c| !c.is_empty());
    let before = args.before.as_deref().filter(|c| !c.is_empty());
    let cursor = match (after, before) {
        (Some(_), Some(_)) => {
            return Err(invalid(
                "Including both 'after' and 'before' params is not allowed",
            ))
        }
        (Some(id), None) => Some(CursorRef {
            direction: Direction::After,
            id: id.to_string(),
        }),
        (None, Some(id)) => Some(CursorRef {
            direction: Direction::Before,
            id: id.to_string(),
        }),
        (None, None) => None,
    };

    let field = match args.sort_by.as_deref() {
        None => ID_FIELD.to_string(),
        Some("") => return Err(invalid("sortBy is required")),
        Some(field) => field.to_string(),
    };
    let order = match args.sort_order.as_deref() {
        None => SortDirection::Asc,
        Some(raw) => SortDirection::parse(raw)
            .ok_or_else(|| invalid(format!("sortOrder must be asc or desc, got {raw:?}")))?,
    };

    let mode = if let Some(offset) = args.offset {
        PageMode::Offset {
            offset,
            limit: page_size(args.first, config),
        }
    } else if let Some(last) = args.last.filter(|n| *n > 0) {
        PageMode::Backward {
            limit: page_size(Some(last), config),
        }
    } else {
        PageMode::Forward {
            limit: page_size(args.first, config),
        }
    };

    Ok(NormalizedArgs {
        mode,
        cursor,
        sort: SortSpec { field, order },
    })
}

/// Requested size, or the configured default, capped by `max_limit`.
fn page_size(requested: Option<u32>, config: &PagingConfig) -> u32 {
    let size = requested
        .filter(|n| *n > 0)
        .unwrap_or(config.default_limit);
    config.max_limit.map_or(size, |max| size.min(max))
}

fn invalid(message: impl Into<String>) -> PaginationError {
    PaginationError::InvalidParameter(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn norm(args: &ConnectionArgs) -> PaginationResult<NormalizedArgs> {
        normalize(args, &PagingConfig::default())
    }

    fn assert_invalid(args: &ConnectionArgs) {
        assert!(matches!(
            norm(args),
            Err(PaginationError::InvalidParameter(_))
        ));
    }

    #[test]
    fn empty_args_default_to_forward_by_id() {
        let n = norm(&ConnectionArgs::default()).unwrap();
        assert_eq!(n.mode, PageMode::Forward { limit: 20 });
        assert!(n.cursor.is_none());
        assert_eq!(n.sort.field, "_id");
        assert_eq!(n.sort.order, SortDirection::Asc);
    }

    #[test]
    fn first_and_last_always_conflict() {
        assert_invalid(&ConnectionArgs::default().first(5).last(5));
        assert_invalid(&ConnectionArgs::default().first(0).last(3).offset(2));
        assert_invalid(&ConnectionArgs::default().first(1).last(1).after("d1"));
    }

    #[test]
    fn offset_and_last_conflict() {
        assert_invalid(&ConnectionArgs::default().offset(0).last(3));
    }

    #[test]
    fn after_and_before_conflict() {
        assert_invalid(&ConnectionArgs::default().after("a").before("b"));
    }

    #[test]
    fn sort_spec_validation() {
        let mut args = ConnectionArgs::default();
        args.sort_by = Some(String::new());
        assert_invalid(&args);

        let mut args = ConnectionArgs::default();
        args.sort_order = Some("sideways".into());
        assert_invalid(&args);

        let args = ConnectionArgs::default().sort("priority", SortDirection::Desc);
        let n = norm(&args).unwrap();
        assert_eq!(n.sort.field, "priority");
        assert_eq!(n.sort.order, SortDirection::Desc);
    }

    #[test]
    fn mode_selection() {
        let n = norm(&ConnectionArgs::default().first(5).after("d1")).unwrap();
        assert_eq!(n.mode, PageMode::Forward { limit: 5 });
        assert_eq!(
            n.cursor,
            Some(CursorRef {
                direction: Direction::After,
                id: "d1".into()
            })
        );

        let n = norm(&ConnectionArgs::default().last(3).before("d9")).unwrap();
        assert_eq!(n.mode, PageMode::Backward { limit: 3 });
        assert_eq!(n.cursor.map(|c| c.direction), Some(Direction::Before));

        let n = norm(&ConnectionArgs::default().offset(40).first(10)).unwrap();
        assert_eq!(n.mode, PageMode::Offset { offset: 40, limit: 10 });

        let n = norm(&ConnectionArgs::default().offset(0)).unwrap();
        assert_eq!(n.mode, PageMode::Offset { offset: 0, limit: 20 });
    }

    #[test]
    fn zero_sizes_and_empty_cursors_count_as_absent() {
        let n = norm(&ConnectionArgs::default().first(0).after("")).unwrap();
        assert_eq!(n.mode, PageMode::Forward { limit: 20 });
        assert!(n.cursor.is_none());

        let n = norm(&ConnectionArgs::default().last(0)).unwrap();
        assert_eq!(n.mode, PageMode::Forward { limit: 20 });
    }

    #[test]
    fn max_limit_caps_requested_sizes() {
        let config = PagingConfig {
            default_limit: 20,
            max_limit: Some(50),
        };
        let n = normalize(&ConnectionArgs::default().first(500), &config).unwrap();
        assert_eq!(n.mode, PageMode::Forward { limit: 50 });
        let n = normalize(&ConnectionArgs::default().last(500), &config).unwrap();
        assert_eq!(n.mode, PageMode::Backward { limit: 50 });
    }
}
