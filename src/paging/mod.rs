//! Partitioning strategies for fatserve.
//!
//! Two strategies deliver the content blob within the transport's unit
//! size:
//!
//! - **Sequential**: a stateful cursor walks the content in order; the end
//!   is signaled by one explicit empty reply
//! - **Static**: the content is pre-split at setup into an addressable
//!   table of chunks plus a one-byte chunk count

pub mod partition;
pub mod sequential;

pub use partition::PartitionTable;
pub use sequential::{Page, SequentialPager};

/// Largest chunk count the one-byte count resource can report.
pub const MAX_CHUNK_COUNT: usize = u8::MAX as usize;
