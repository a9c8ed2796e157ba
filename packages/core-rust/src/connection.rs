//! Connection types for Relay-style list queries.
//!
//! [`ConnectionArgs`] is the raw client argument set (cursor or offset
//! pagination plus sort), [`PageOptions`] says which derived values the
//! caller actually needs, and [`Connection`] is the response shape.

use serde::{Deserialize, Serialize};

use crate::query::{Query, SortDirection};
use crate::types::{Document, ID_FIELD};

/// Page size applied when neither `first` nor `last` is supplied.
pub const DEFAULT_LIMIT: u32 = 20;

/// Raw connection arguments as received from a client.
///
/// Nothing here is validated; see the normalizer in the server crate.
/// `sort_order` stays a string so that unknown spellings can be reported
/// as invalid parameters instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionArgs {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub first: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub after: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub last: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub before: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sort_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub sort_order: Option<String>,
}

impl ConnectionArgs {
    #[must_use]
    pub fn first(mut self, n: u32) -> Self {
        self.first = Some(n);
        self
    }

    #[must_use]
    pub fn last(mut self, n: u32) -> Self {
        self.last = Some(n);
        self
    }

    #[must_use]
    pub fn after(mut self, cursor: impl Into<String>) -> Self {
        self.after = Some(cursor.into());
        self
    }

    #[must_use]
    pub fn before(mut self, cursor: impl Into<String>) -> Self {
        self.before = Some(cursor.into());
        self
    }

    #[must_use]
    pub fn offset(mut self, n: u32) -> Self {
        self.offset = Some(n);
        self
    }

    #[must_use]
    pub fn sort(mut self, field: impl Into<String>, order: SortDirection) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = Some(order.as_str().to_string());
        self
    }
}

/// Validated sort specification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    /// Non-empty field path.
    pub field: String,
    pub order: SortDirection,
}

impl SortSpec {
    /// Whether the sort is on the identifier itself (no tiebreak needed).
    #[must_use]
    pub fn is_id(&self) -> bool {
        self.field == ID_FIELD
    }
}

/// Which derived values the caller wants computed.
///
/// Each flag that is off saves at least one store round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageOptions {
    pub include_has_next_page: bool,
    pub include_has_previous_page: bool,
    pub include_total_count: bool,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            include_has_next_page: true,
            include_has_previous_page: true,
            include_total_count: true,
        }
    }
}

/// Information about the returned page.
///
/// Flags are absent when not requested; cursors are absent for an empty page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub has_next_page: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub has_previous_page: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub end_cursor: Option<String>,
}

/// A paginated list response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection {
    /// Page contents in requested order.
    pub nodes: Vec<Document>,
    pub page_info: PageInfo,
    /// Size of the base-filtered set, ignoring cursors and page size.
    pub total_count: Option<u64>,
}

/// Everything that determines a connection response.
///
/// Also the input to the cache signature, so it must stay the raw,
/// unnormalized form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageRequest {
    pub query: Query,
    pub args: ConnectionArgs,
    #[serde(default)]
    pub options: PageOptions,
}

impl PageRequest {
    #[must_use]
    pub fn new(query: Query, args: ConnectionArgs) -> Self {
        Self {
            query,
            args,
            options: PageOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: PageOptions) -> Self {
        self.options = options;
        self
    }
}
