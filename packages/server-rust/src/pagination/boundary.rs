//! Resolution of `before`/`after` references into sort positions.

use pagewise_core::{PaginationError, PaginationResult, SortSpec, Value};
use tracing::debug;

use super::normalize::{CursorRef, Direction};
use crate::traits::DocumentStore;

/// Sort position of the referenced document.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundaryRecord {
    pub id: String,
    /// Value of the active sort field; `Null` when the document lacks it.
    pub sort_value: Value,
}

/// A cursor resolved against the store.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBoundary {
    pub direction: Direction,
    pub record: BoundaryRecord,
}

/// Fetches the `_id` and sort-field value of the document `cursor` points at.
///
/// Issues exactly one projected point read. A reference to a document that
/// does not exist fails with [`PaginationError::NotFound`] instead of
/// producing an undefined range.
pub async fn resolve_boundary(
    store: &dyn DocumentStore,
    collection: &str,
    cursor: &CursorRef,
    sort: &SortSpec,
) -> PaginationResult<ResolvedBoundary> {
    let projection = if sort.is_id() {
        Vec::new()
    } else {
        vec![sort.field.clone()]
    };
    let doc = store
        .find_one(collection, &cursor.id, &projection)
        .await?
        .ok_or_else(|| {
            PaginationError::NotFound(format!(
                "cursor {} does not reference a document in {collection}",
                cursor.id
            ))
        })?;

    let sort_value = doc
        .lookup(&sort.field)
        .map_or(Value::Null, std::borrow::Cow::into_owned);
    debug!(
        collection,
        id = %doc.id,
        direction = ?cursor.direction,
        "resolved pagination boundary"
    );

    Ok(ResolvedBoundary {
        direction: cursor.direction,
        record: BoundaryRecord {
            id: doc.id,
            sort_value,
        },
    })
}

#[cfg(test)]
mod tests {
    use pagewise_core::{Document, SortDirection};

    use super::*;
    use crate::storage::MemoryStore;

    async fn store() -> MemoryStore {
        let store = MemoryStore::new();
        store
            .insert(
                "items",
                Document::new("d1")
                    .with_field("priority", 4)
                    .with_field("title", "hat"),
            )
            .await;
        store
    }

    fn cursor(id: &str) -> CursorRef {
        CursorRef {
            direction: Direction::After,
            id: id.to_string(),
        }
    }

    #[tokio::test]
    async fn resolves_sort_value_and_id() {
        let store = store().await;
        let sort = SortSpec {
            field: "priority".into(),
            order: SortDirection::Asc,
        };
        let boundary = resolve_boundary(&store, "items", &cursor("d1"), &sort)
            .await
            .unwrap();
        assert_eq!(boundary.direction, Direction::After);
        assert_eq!(boundary.record.id, "d1");
        assert_eq!(boundary.record.sort_value, Value::Int(4));
    }

    #[tokio::test]
    async fn id_sort_uses_identifier_as_value() {
        let store = store().await;
        let sort = SortSpec {
            field: "_id".into(),
            order: SortDirection::Desc,
        };
        let boundary = resolve_boundary(&store, "items", &cursor("d1"), &sort)
            .await
            .unwrap();
        assert_eq!(boundary.record.sort_value, Value::String("d1".into()));
    }

    #[tokio::test]
    async fn missing_sort_field_resolves_to_null() {
        let store = store().await;
        let sort = SortSpec {
            field: "rank".into(),
            order: SortDirection::Asc,
        };
        let boundary = resolve_boundary(&store, "items", &cursor("d1"), &sort)
            .await
            .unwrap();
        assert_eq!(boundary.record.sort_value, Value::Null);
    }

    #[tokio::test]
    async fn unknown_reference_is_not_found() {
        let store = store().await;
        let sort = SortSpec {
            field: "priority".into(),
            order: SortDirection::Asc,
        };
        let err = resolve_boundary(&store, "items", &cursor("nope"), &sort)
            .await
            .unwrap_err();
        assert!(matches!(err, PaginationError::NotFound(_)));
    }
}
