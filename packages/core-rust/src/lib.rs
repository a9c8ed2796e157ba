//! Pagewise Core: documents, predicate trees, query plans, and connection types.

pub mod connection;
pub mod error;
pub mod query;
pub mod types;

pub use connection::{
    Connection, ConnectionArgs, PageInfo, PageOptions, PageRequest, SortSpec, DEFAULT_LIMIT,
};
pub use error::{PaginationError, PaginationResult};
pub use query::{sort_keys, PredicateNode, PredicateOp, Query, QueryPlan, SortDirection, SortKey};
pub use types::{Document, Value, ID_FIELD};
