//! Search index mirror
//!
//! The index is a denormalized copy of the driver store used for querying.
//! Writes reach it through [`QueuedSearchIndexer`], never synchronously.

pub mod elasticsearch;
pub mod queued_indexer;

pub use elasticsearch::{DriverDocument, ElasticsearchDriverIndex};
pub use queued_indexer::{run_worker, QueuedSearchIndexer};
