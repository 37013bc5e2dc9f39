//! Core domain models for fatserve.
//!
//! This module contains the fundamental data structures of the delivery
//! protocol: the content blob, the session cursor, and chunk descriptors.
//! These are pure domain models with no I/O dependencies.

pub mod chunk;
pub mod content;
pub mod cursor;

pub use chunk::Chunk;
pub use content::ContentBuffer;
pub use cursor::Cursor;
