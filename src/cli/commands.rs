//! CLI command implementations.
//!
//! Contains the business logic for each CLI command.

use crate::cli::output::{
    InfoReport, OutputFormat, StaticOutcome, TraceRow, format_info, format_split, format_traverse,
    preview,
};
use crate::cli::parser::{Cli, Commands};
use crate::config::ServeConfig;
use crate::core::ContentBuffer;
use crate::error::Result;
use crate::io::{load_content, write_chunks};
use crate::paging::PartitionTable;
use crate::session::SessionBinder;
use crate::transport::{LinkEvent, ReadReply, ReplyError, ReplySink, ResourceId, SessionId};
use std::path::PathBuf;

/// Built-in demo page served when no content file is given.
const DEMO_PAGE: &str = "<html><head><title>fatserve</title></head><body>\
<h1>Served in 20-byte pieces</h1>\
<p>This page reached you one small read at a time, with an empty reply \
to say it was done.</p>\
</body></html>";

/// Preview width for traversal traces.
const PREVIEW_LEN: usize = 30;

/// Executes the CLI command.
///
/// # Arguments
///
/// * `cli` - Parsed CLI arguments.
///
/// # Returns
///
/// Result with output string on success.
///
/// # Errors
///
/// Returns an error if the command fails to execute.
pub fn execute(cli: &Cli) -> Result<String> {
    let format = OutputFormat::parse(&cli.format);

    match &cli.command {
        Commands::Info {
            file,
            max_unit,
            capacity,
        } => cmd_info(file.as_deref().map(PathBuf::from), *max_unit, *capacity, format),
        Commands::Split {
            file,
            max_unit,
            capacity,
            out,
        } => cmd_split(
            file.as_deref().map(PathBuf::from),
            *max_unit,
            *capacity,
            out.as_deref().map(PathBuf::from),
            format,
        ),
        Commands::Traverse {
            file,
            max_unit,
            capacity,
            twice,
        } => cmd_traverse(
            file.as_deref().map(PathBuf::from),
            *max_unit,
            *capacity,
            *twice,
            format,
        ),
    }
}

/// Loads the content bytes and a display name for the source.
fn load_source(file: Option<&PathBuf>, capacity: usize) -> Result<(Vec<u8>, String, usize)> {
    match file {
        Some(path) => {
            let original_len = std::fs::metadata(path).map(|m| m.len()).unwrap_or(0);
            let bytes = load_content(path, capacity)?;
            Ok((
                bytes,
                path.to_string_lossy().to_string(),
                usize::try_from(original_len).unwrap_or(usize::MAX),
            ))
        }
        None => {
            let mut bytes = DEMO_PAGE.as_bytes().to_vec();
            let original_len = bytes.len();
            bytes.truncate(capacity);
            Ok((bytes, "demo page".to_string(), original_len))
        }
    }
}

fn cmd_info(
    file: Option<PathBuf>,
    max_unit: usize,
    capacity: usize,
    format: OutputFormat,
) -> Result<String> {
    let config = ServeConfig {
        max_unit,
        capacity,
        ..ServeConfig::default()
    };
    config.validate()?;

    let (bytes, source, original_len) = load_source(file.as_ref(), capacity)?;
    let content = ContentBuffer::new(bytes, capacity);

    let static_chunks = match PartitionTable::build(&content, max_unit) {
        Ok(table) => StaticOutcome::Chunks(table.total()),
        Err(err) => StaticOutcome::Unservable(err.to_string()),
    };

    let report = InfoReport {
        source,
        original_len,
        served_len: content.len(),
        truncated: original_len > content.len(),
        max_unit,
        // Every traversal ends with the explicit empty reply.
        sequential_reads: content.len().div_ceil(max_unit) + 1,
        static_chunks,
    };

    Ok(format_info(&report, format))
}

fn cmd_split(
    file: Option<PathBuf>,
    max_unit: usize,
    capacity: usize,
    out: Option<PathBuf>,
    format: OutputFormat,
) -> Result<String> {
    let (bytes, _, _) = load_source(file.as_ref(), capacity)?;
    let content = ContentBuffer::new(bytes, capacity);
    let table = PartitionTable::build(&content, max_unit)?;

    let written = match out {
        Some(dir) => Some(write_chunks(&dir, &content, table.iter(), "chunk")?),
        None => None,
    };

    let chunks: Vec<_> = table.iter().copied().collect();
    Ok(format_split(&chunks, written.as_deref(), format))
}

/// Sink that records the traversal trace.
struct TraceSink {
    rows: Vec<TraceRow>,
}

impl TraceSink {
    const fn new() -> Self {
        Self { rows: Vec::new() }
    }
}

impl ReplySink for TraceSink {
    fn reply(
        &mut self,
        _resource: ResourceId,
        reply: &ReadReply,
    ) -> std::result::Result<(), ReplyError> {
        self.rows.push(TraceRow {
            read: self.rows.len() + 1,
            len: reply.data.len(),
            terminal: reply.data.is_empty(),
            preview: preview(&reply.data, PREVIEW_LEN),
        });
        Ok(())
    }
}

fn cmd_traverse(
    file: Option<PathBuf>,
    max_unit: usize,
    capacity: usize,
    twice: bool,
    format: OutputFormat,
) -> Result<String> {
    let config = ServeConfig {
        max_unit,
        capacity,
        ..ServeConfig::default()
    };
    let (bytes, _, _) = load_source(file.as_ref(), capacity)?;

    let mut binder = SessionBinder::new(bytes, &config)?;
    let resource = binder.dynamic_resource().ok_or_else(|| {
        crate::error::CommandError::ExecutionFailed("no dynamic resource registered".to_string())
    })?;
    let mut sink = TraceSink::new();

    binder.handle_event(&LinkEvent::Connected { session: SessionId(1) }, &mut sink);

    let passes = if twice { 2 } else { 1 };
    for _ in 0..passes {
        loop {
            binder.handle_event(&LinkEvent::ReadRequest { resource }, &mut sink);
            if sink.rows.last().is_some_and(|row| row.terminal) {
                break;
            }
        }
    }

    binder.handle_event(&LinkEvent::Disconnected, &mut sink);

    Ok(format_traverse(&sink.rows, format))
}
