//! Concrete [`DocumentStore`](crate::traits::DocumentStore) engines.

pub mod memory;

pub use memory::MemoryStore;
