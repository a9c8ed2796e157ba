//! Document storage for the pagination engine.
//!
//! Provides the pieces an in-process deployment needs behind the
//! [`DocumentStore`](crate::traits::DocumentStore) port:
//!
//! - [`MemoryStore`]: concurrent in-memory collections with filter, sort,
//!   skip, limit, count and projected point reads
//! - [`Matcher`]: compiled predicate evaluation used by in-memory engines
//!
//! Additionally defines [`MutationObserver`] for reacting to document writes
//! and [`CompositeMutationObserver`] for fan-out to multiple observers.

pub mod engines;
pub mod matcher;
pub mod mutation_observer;

pub use engines::*;
pub use matcher::Matcher;
pub use mutation_observer::*;
