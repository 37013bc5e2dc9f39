//! Command-line argument parsing.
//!
//! Defines the CLI structure using clap derive macros.

use crate::config::{DEFAULT_CAPACITY, DEFAULT_MAX_UNIT};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// fatserve: chunked content delivery for block-unit transports.
///
/// Inspect how a content blob would be served, pre-split it into
/// addressable chunks, or simulate a full sequential delivery session.
#[derive(Parser, Debug)]
#[command(name = "fatserve")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format (text, json).
    #[arg(long, default_value = "text", global = true)]
    pub format: String,

    /// The subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summarize how a content file would be served.
    Info {
        /// Path to the content file (built-in demo page if omitted).
        file: Option<PathBuf>,

        /// Per-read unit size in bytes.
        #[arg(long, default_value_t = DEFAULT_MAX_UNIT, env = "FATSERVE_MAX_UNIT")]
        max_unit: usize,

        /// Content capacity in bytes; longer content is truncated.
        #[arg(long, default_value_t = DEFAULT_CAPACITY, env = "FATSERVE_CAPACITY")]
        capacity: usize,
    },

    /// Pre-split a content file into an addressable chunk table.
    Split {
        /// Path to the content file (built-in demo page if omitted).
        file: Option<PathBuf>,

        /// Per-read unit size in bytes.
        #[arg(long, default_value_t = DEFAULT_MAX_UNIT, env = "FATSERVE_MAX_UNIT")]
        max_unit: usize,

        /// Content capacity in bytes; longer content is truncated.
        #[arg(long, default_value_t = DEFAULT_CAPACITY, env = "FATSERVE_CAPACITY")]
        capacity: usize,

        /// Write each chunk to a numbered file in this directory.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Simulate a sequential delivery session, read by read.
    Traverse {
        /// Path to the content file (built-in demo page if omitted).
        file: Option<PathBuf>,

        /// Per-read unit size in bytes.
        #[arg(long, default_value_t = DEFAULT_MAX_UNIT, env = "FATSERVE_MAX_UNIT")]
        max_unit: usize,

        /// Content capacity in bytes; longer content is truncated.
        #[arg(long, default_value_t = DEFAULT_CAPACITY, env = "FATSERVE_CAPACITY")]
        capacity: usize,

        /// Traverse twice to show the restart after the terminal reply.
        #[arg(long)]
        twice: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_info_defaults() {
        let cli = Cli::try_parse_from(["fatserve", "info"]).unwrap();
        match cli.command {
            Commands::Info {
                file,
                max_unit,
                capacity,
            } => {
                assert!(file.is_none());
                assert_eq!(max_unit, DEFAULT_MAX_UNIT);
                assert_eq!(capacity, DEFAULT_CAPACITY);
            }
            _ => panic!("expected info command"),
        }
    }

    #[test]
    fn test_parse_split_with_out() {
        let cli =
            Cli::try_parse_from(["fatserve", "split", "page.html", "--out", "chunks"]).unwrap();
        match cli.command {
            Commands::Split { file, out, .. } => {
                assert_eq!(file, Some(PathBuf::from("page.html")));
                assert_eq!(out, Some(PathBuf::from("chunks")));
            }
            _ => panic!("expected split command"),
        }
    }

    #[test]
    fn test_parse_traverse_flags() {
        let cli = Cli::try_parse_from([
            "fatserve", "traverse", "page.html", "--max-unit", "32", "--twice",
        ])
        .unwrap();
        match cli.command {
            Commands::Traverse {
                max_unit, twice, ..
            } => {
                assert_eq!(max_unit, 32);
                assert!(twice);
            }
            _ => panic!("expected traverse command"),
        }
    }

    #[test]
    fn test_parse_global_format() {
        let cli = Cli::try_parse_from(["fatserve", "--format", "json", "info"]).unwrap();
        assert_eq!(cli.format, "json");
    }

    #[test]
    fn test_parse_requires_subcommand() {
        assert!(Cli::try_parse_from(["fatserve"]).is_err());
    }
}
