use std::borrow::Cow;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name of the identifier field every document carries.
pub const ID_FIELD: &str = "_id";

/// Generic runtime value type for document fields.
///
/// Supports all JSON-compatible types. Serialized untagged so that a
/// document round-trips through plain JSON (cache payloads, fixtures).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// JSON null.
    Null,
    /// JSON boolean.
    Bool(bool),
    /// JSON integer (signed 64-bit).
    Int(i64),
    /// JSON floating-point (64-bit IEEE 754).
    Float(f64),
    /// JSON string (UTF-8).
    String(String),
    /// JSON array (ordered sequence of values).
    Array(Vec<Value>),
    /// JSON object.
    /// Uses `BTreeMap` for deterministic serialization order.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Rank of the value's type in the cross-type sort order.
    ///
    /// Null sorts first, then numbers, strings, objects, arrays and booleans.
    fn type_rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Int(_) | Value::Float(_) => 1,
            Value::String(_) => 2,
            Value::Map(_) => 3,
            Value::Array(_) => 4,
            Value::Bool(_) => 5,
        }
    }

    /// Total order over all values, shared by sorting and range predicates.
    ///
    /// Values of different types are ordered by type rank; numbers compare
    /// numerically regardless of integer/float representation.
    #[must_use]
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        let by_rank = self.type_rank().cmp(&other.type_rank());
        if by_rank != Ordering::Equal {
            return by_rank;
        }
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            // Precision loss above 2^53 is accepted for mixed int/float comparison.
            #[allow(clippy::cast_precision_loss)]
            (Value::Int(a), Value::Float(b)) => (*a as f64).total_cmp(b),
            #[allow(clippy::cast_precision_loss)]
            (Value::Float(a), Value::Int(b)) => a.total_cmp(&(*b as f64)),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Array(a), Value::Array(b)) => a
                .iter()
                .zip(b.iter())
                .map(|(x, y)| x.total_cmp(y))
                .find(|o| *o != Ordering::Equal)
                .unwrap_or_else(|| a.len().cmp(&b.len())),
            (Value::Map(a), Value::Map(b)) => a
                .iter()
                .zip(b.iter())
                .map(|((ka, va), (kb, vb))| ka.cmp(kb).then_with(|| va.total_cmp(vb)))
                .find(|o| *o != Ordering::Equal)
                .unwrap_or_else(|| a.len().cmp(&b.len())),
            _ => Ordering::Equal,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

/// A stored record: a unique identifier plus arbitrary named fields.
///
/// Serializes as a flat JSON object with the identifier under `_id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier within a collection.
    #[serde(rename = "_id")]
    pub id: String,
    /// All other fields.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl Document {
    /// Creates a document with no fields besides its identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: BTreeMap::new(),
        }
    }

    /// Adds or replaces a top-level field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(name.into(), value.into());
        self
    }

    /// Looks up a field by dotted path (`product.price`).
    ///
    /// `_id` resolves to the identifier. Returns `None` if any path segment
    /// is missing or traverses a non-object value.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<Cow<'_, Value>> {
        if path == ID_FIELD {
            return Some(Cow::Owned(Value::String(self.id.clone())));
        }
        let mut segments = path.split('.');
        let mut current = self.fields.get(segments.next()?)?;
        for segment in segments {
            match current {
                Value::Map(map) => current = map.get(segment)?,
                _ => return None,
            }
        }
        Some(Cow::Borrowed(current))
    }

    /// Returns a copy holding only the identifier and the requested top-level
    /// fields. Dotted paths project their root field.
    #[must_use]
    pub fn project(&self, fields: &[String]) -> Document {
        let mut projected = Document::new(self.id.clone());
        for field in fields {
            let root = field.split('.').next().unwrap_or(field);
            if let Some(value) = self.fields.get(root) {
                projected.fields.insert(root.to_string(), value.clone());
            }
        }
        projected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_across_representations() {
        assert_eq!(Value::Int(2).total_cmp(&Value::Float(2.5)), Ordering::Less);
        assert_eq!(Value::Float(3.0).total_cmp(&Value::Int(3)), Ordering::Equal);
    }

    #[test]
    fn cross_type_order_is_total() {
        let ordered = [
            Value::Null,
            Value::Int(100),
            Value::String("a".into()),
            Value::Map(BTreeMap::new()),
            Value::Array(vec![]),
            Value::Bool(false),
        ];
        for pair in ordered.windows(2) {
            assert_eq!(pair[0].total_cmp(&pair[1]), Ordering::Less);
        }
    }

    #[test]
    fn lookup_resolves_id_and_nested_paths() {
        let mut product = BTreeMap::new();
        product.insert("price".to_string(), Value::Int(42));
        let doc = Document::new("d1")
            .with_field("title", "shirt")
            .with_field("product", Value::Map(product));

        assert_eq!(doc.lookup("_id").as_deref(), Some(&Value::String("d1".into())));
        assert_eq!(doc.lookup("product.price").as_deref(), Some(&Value::Int(42)));
        assert!(doc.lookup("product.missing").is_none());
        assert!(doc.lookup("title.nested").is_none());
    }

    #[test]
    fn project_keeps_only_requested_fields() {
        let doc = Document::new("d1")
            .with_field("priority", 3)
            .with_field("title", "shirt");
        let projected = doc.project(&["priority".to_string()]);
        assert_eq!(projected.id, "d1");
        assert_eq!(projected.fields.len(), 1);
        assert_eq!(projected.fields.get("priority"), Some(&Value::Int(3)));
    }

    #[test]
    fn document_serializes_flat_with_underscore_id() {
        let doc = Document::new("d1").with_field("priority", 3);
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json, serde_json::json!({"_id": "d1", "priority": 3}));

        let back: Document = serde_json::from_value(json).unwrap();
        assert_eq!(back, doc);
    }
}
