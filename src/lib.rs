//! # fatserve
//!
//! Chunked content delivery core for single-session block transports.
//!
//! fatserve serves one large, opaque content blob to a remote peer over a
//! transport whose exchange unit is a small fixed-size block. The peer
//! cannot ask for byte ranges; it can only ask for the next piece. The
//! core tracks per-session delivery state, hands back bounded chunks in
//! order, and signals completion with an explicit empty reply.
//!
//! ## Features
//!
//! - **Sequential delivery**: cursor-driven in-order paging with a
//!   two-step terminal (final slice, then one empty reply)
//! - **Static delivery**: content pre-split into addressable chunks plus
//!   a one-byte chunk count
//! - **Session binding**: cursor reset on every connect and disconnect,
//!   synchronous read dispatch, explicit single-session enforcement

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(missing_docs)]
// Note: unsafe is needed for memory-mapped I/O (memmap2)
#![warn(unsafe_code)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod io;
pub mod paging;
pub mod session;
pub mod transport;

// Re-export commonly used types at crate root
pub use error::{Error, Result};

// Re-export core domain types
pub use core::{Chunk, ContentBuffer, Cursor};

// Re-export configuration types
pub use config::{DEFAULT_CAPACITY, DEFAULT_MAX_UNIT, ServeConfig, ServeMode};

// Re-export paging types
pub use paging::{MAX_CHUNK_COUNT, Page, PartitionTable, SequentialPager};

// Re-export session and transport types
pub use session::SessionBinder;
pub use transport::{
    LinkEvent, ReadReply, ReplySink, ReplyStatus, ResourceId, ResourceRegistry, SessionId,
};

// Re-export CLI types
pub use cli::{Cli, Commands, OutputFormat};
