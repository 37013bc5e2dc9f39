//! Content loading and chunk export.

pub mod reader;

pub use reader::{load_content, write_chunks};
