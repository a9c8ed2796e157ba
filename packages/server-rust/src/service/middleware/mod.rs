//! Tower middleware layers for the page-serving pipeline.
//!
//! - [`metrics`]: Request timing and outcome via `tracing` spans
//! - [`cache`]: Read-through page cache
//! - [`pipeline`]: Composes all layers into a single service stack

pub mod cache;
pub mod metrics;
pub mod pipeline;

pub use cache::{ReadThroughCacheLayer, ReadThroughCacheService};
pub use metrics::{MetricsLayer, MetricsService};
pub use pipeline::build_pagination_pipeline;
