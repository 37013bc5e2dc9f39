//! CLI layer for fatserve.
//!
//! Provides the command-line interface using clap, with commands for
//! inspecting, splitting, and simulating delivery of a content file.

pub mod commands;
pub mod output;
pub mod parser;

pub use commands::execute;
pub use output::OutputFormat;
pub use parser::{Cli, Commands};
