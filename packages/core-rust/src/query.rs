//! Predicate trees, the upstream base query, and the immutable store plan.
//!
//! A [`Query`] is what an upstream query builder hands to the pagination
//! engine: a collection and an optional base predicate. The engine never
//! mutates it; every stage derives a fresh [`QueryPlan`] instead.

use serde::{Deserialize, Serialize};

use crate::types::{Value, ID_FIELD};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Predicate operators for query filtering.
///
/// Lowercase variants on the wire (`"eq"`, `"gte"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PredicateOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    Like,
    Regex,
    And,
    Or,
    Not,
}

/// Sort direction for query ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Parses the wire spelling (`"asc"` / `"desc"`).
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(SortDirection::Asc),
            "desc" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    /// Wire spelling of the direction.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

/// A recursive predicate node for query filtering.
///
/// Leaf nodes carry `attribute` + `value`; `and`/`or`/`not` carry `children`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredicateNode {
    pub op: PredicateOp,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub attribute: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub children: Option<Vec<PredicateNode>>,
}

impl PredicateNode {
    /// Leaf comparing `attribute` against `value` with `op`.
    #[must_use]
    pub fn compare(op: PredicateOp, attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            op,
            attribute: Some(attribute.into()),
            value: Some(value.into()),
            children: None,
        }
    }

    /// Equality leaf.
    #[must_use]
    pub fn eq(attribute: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::compare(PredicateOp::Eq, attribute, value)
    }

    /// Conjunction of `children`.
    #[must_use]
    pub fn and(children: Vec<PredicateNode>) -> Self {
        Self::branch(PredicateOp::And, children)
    }

    /// Disjunction of `children`.
    #[must_use]
    pub fn or(children: Vec<PredicateNode>) -> Self {
        Self::branch(PredicateOp::Or, children)
    }

    /// Negation of `child`.
    #[must_use]
    pub fn not(child: PredicateNode) -> Self {
        Self::branch(PredicateOp::Not, vec![child])
    }

    fn branch(op: PredicateOp, children: Vec<PredicateNode>) -> Self {
        Self {
            op,
            attribute: None,
            value: None,
            children: Some(children),
        }
    }
}

// ---------------------------------------------------------------------------
// Query and plan
// ---------------------------------------------------------------------------

/// Base query supplied by the upstream query builder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Query {
    /// Collection to read from.
    pub collection: String,
    /// Base filter. `None` matches every document.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub predicate: Option<PredicateNode>,
}

impl Query {
    /// Query over the whole collection.
    #[must_use]
    pub fn all(collection: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            predicate: None,
        }
    }

    /// Query restricted by `predicate`.
    #[must_use]
    pub fn filtered(collection: impl Into<String>, predicate: PredicateNode) -> Self {
        Self {
            collection: collection.into(),
            predicate: Some(predicate),
        }
    }
}

/// One key of a store sort.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

/// Immutable description of a single store read.
///
/// Every `with_*` method returns a new plan; probes and the main read are
/// derived from a shared base plan without touching it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryPlan {
    pub collection: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub filter: Option<PredicateNode>,
    #[serde(default)]
    pub sort: Vec<SortKey>,
    #[serde(default)]
    pub skip: u64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub limit: Option<u64>,
}

impl QueryPlan {
    /// Unsorted, unbounded plan for the base query.
    #[must_use]
    pub fn from_query(query: &Query) -> Self {
        Self {
            collection: query.collection.clone(),
            filter: query.predicate.clone(),
            sort: Vec::new(),
            skip: 0,
            limit: None,
        }
    }

    #[must_use]
    pub fn with_filter(&self, filter: Option<PredicateNode>) -> Self {
        Self {
            filter,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_sort(&self, sort: Vec<SortKey>) -> Self {
        Self {
            sort,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_skip(&self, skip: u64) -> Self {
        Self {
            skip,
            ..self.clone()
        }
    }

    #[must_use]
    pub fn with_limit(&self, limit: u64) -> Self {
        Self {
            limit: Some(limit),
            ..self.clone()
        }
    }
}

/// Builds the store sort for `field`, always breaking ties on `_id`.
#[must_use]
pub fn sort_keys(field: &str, direction: SortDirection) -> Vec<SortKey> {
    let id_key = SortKey {
        field: ID_FIELD.to_string(),
        direction,
    };
    if field == ID_FIELD {
        vec![id_key]
    } else {
        vec![
            SortKey {
                field: field.to_string(),
                direction,
            },
            id_key,
        ]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_direction_parses_wire_spelling() {
        assert_eq!(SortDirection::parse("asc"), Some(SortDirection::Asc));
        assert_eq!(SortDirection::parse("desc"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse("DESC"), None);
        assert_eq!(SortDirection::Desc.as_str(), "desc");
    }

    #[test]
    fn predicate_serializes_camel_case_without_empty_fields() {
        let node = PredicateNode::and(vec![PredicateNode::eq("shopId", "s1")]);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "op": "and",
                "children": [{"op": "eq", "attribute": "shopId", "value": "s1"}]
            })
        );
    }

    #[test]
    fn plan_derivation_leaves_base_untouched() {
        let base = QueryPlan::from_query(&Query::all("items"));
        let probe = base.with_skip(4).with_limit(6);

        assert_eq!(base.skip, 0);
        assert!(base.limit.is_none());
        assert_eq!(probe.skip, 4);
        assert_eq!(probe.limit, Some(6));
        assert_eq!(probe.collection, "items");
    }

    #[test]
    fn sort_keys_append_id_tiebreaker() {
        let keys = sort_keys("priority", SortDirection::Desc);
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].field, "priority");
        assert_eq!(keys[1].field, "_id");
        assert_eq!(keys[1].direction, SortDirection::Desc);

        let keys = sort_keys("_id", SortDirection::Asc);
        assert_eq!(keys.len(), 1);
    }
}
