//! Output formatting for CLI commands.
//!
//! Supports text and JSON output formats.

use crate::core::Chunk;
use crate::error::Error;
use serde::Serialize;
use std::fmt::Write;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output.
    Json,
}

impl OutputFormat {
    /// Parses format from string.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Serving summary for the `info` command.
#[derive(Debug, Serialize)]
pub struct InfoReport {
    /// Content source (path or "demo page").
    pub source: String,

    /// Original content length in bytes.
    pub original_len: usize,

    /// Length actually served after the capacity clamp.
    pub served_len: usize,

    /// Whether the capacity clamp truncated the content.
    pub truncated: bool,

    /// Per-read unit size in bytes.
    pub max_unit: usize,

    /// Reads a sequential traversal takes, terminal reply included.
    pub sequential_reads: usize,

    /// Static chunk count, or the reason static mode cannot serve this.
    pub static_chunks: StaticOutcome,
}

/// Whether static mode can serve the content.
#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StaticOutcome {
    /// Chunk count the one-byte count resource would report.
    Chunks(u8),

    /// Static setup would fail with this error.
    Unservable(String),
}

/// One read of a simulated sequential traversal.
#[derive(Debug, Serialize)]
pub struct TraceRow {
    /// 1-based read number.
    pub read: usize,

    /// Reply payload length.
    pub len: usize,

    /// Whether this was the empty end-of-content reply.
    pub terminal: bool,

    /// Lossy text preview of the payload.
    pub preview: String,
}

/// Formats an error for the selected output format.
#[must_use]
pub fn format_error(err: &Error, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => err.to_string(),
        OutputFormat::Json => serde_json::json!({ "error": err.to_string() }).to_string(),
    }
}

/// Formats the `info` report.
#[must_use]
pub fn format_info(report: &InfoReport, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_info_text(report),
        OutputFormat::Json => format_json(report),
    }
}

fn format_info_text(report: &InfoReport) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "Source:           {}", report.source);
    let _ = writeln!(output, "  Content size:   {} bytes", report.original_len);
    let _ = writeln!(
        output,
        "  Served size:    {} bytes{}",
        report.served_len,
        if report.truncated { " (truncated)" } else { "" }
    );
    let _ = writeln!(output, "  Unit size:      {} bytes", report.max_unit);
    let _ = writeln!(
        output,
        "  Sequential:     {} reads (terminal reply included)",
        report.sequential_reads
    );
    match &report.static_chunks {
        StaticOutcome::Chunks(total) => {
            let _ = writeln!(output, "  Static:         {total} chunks");
        }
        StaticOutcome::Unservable(reason) => {
            let _ = writeln!(output, "  Static:         unservable ({reason})");
        }
    }
    output
}

/// Formats the `split` chunk table, plus written file paths if any.
#[must_use]
pub fn format_split(chunks: &[Chunk], written: Option<&[String]>, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_split_text(chunks, written),
        OutputFormat::Json => {
            #[derive(Serialize)]
            struct SplitReport<'a> {
                chunks: &'a [Chunk],
                written: Option<&'a [String]>,
            }
            format_json(&SplitReport { chunks, written })
        }
    }
}

fn format_split_text(chunks: &[Chunk], written: Option<&[String]>) -> String {
    if chunks.is_empty() {
        return "No chunks (empty content).\n".to_string();
    }

    let mut output = String::new();
    let _ = writeln!(output, "{:<7} {:<8} Length", "Chunk", "Offset");
    output.push_str(&"-".repeat(28));
    output.push('\n');

    for chunk in chunks {
        let _ = writeln!(
            output,
            "{:<7} {:<8} {}",
            chunk.index, chunk.offset, chunk.length
        );
    }
    let _ = writeln!(output, "Total: {} chunks", chunks.len());

    if let Some(paths) = written {
        let _ = writeln!(output, "Wrote {} files:", paths.len());
        for path in paths {
            let _ = writeln!(output, "  {path}");
        }
    }

    output
}

/// Formats a simulated traversal trace.
#[must_use]
pub fn format_traverse(rows: &[TraceRow], format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => format_traverse_text(rows),
        OutputFormat::Json => format_json(&rows),
    }
}

fn format_traverse_text(rows: &[TraceRow]) -> String {
    let mut output = String::new();
    let _ = writeln!(output, "{:<6} {:<6} Payload", "Read", "Len");
    output.push_str(&"-".repeat(44));
    output.push('\n');

    for row in rows {
        let payload = if row.terminal {
            "(terminal)".to_string()
        } else {
            row.preview.clone()
        };
        let _ = writeln!(output, "{:<6} {:<6} {}", row.read, row.len, payload);
    }

    output
}

fn format_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
}

/// Builds a short printable preview of a reply payload.
#[must_use]
pub fn preview(data: &[u8], max_len: usize) -> String {
    let text: String = String::from_utf8_lossy(data)
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .take(max_len)
        .collect();
    text
}
