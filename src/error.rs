//! Error types for fatserve operations.
//!
//! This module provides the error hierarchy using `thiserror` for all
//! serving operations: setup, session handling, protocol dispatch, I/O,
//! and CLI commands.

use thiserror::Error;

/// Result type alias for fatserve operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for fatserve operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Setup-time failures (resource registration, partition build).
    #[error("setup error: {0}")]
    Setup(#[from] SetupError),

    /// Protocol-level anomalies in a read request.
    #[error("protocol error: {0}")]
    Protocol(#[from] ProtocolError),

    /// Session lifecycle errors.
    #[error("session error: {0}")]
    Session(#[from] SessionError),

    /// I/O errors (content loading, chunk export).
    #[error("I/O error: {0}")]
    Io(#[from] IoError),

    /// CLI command errors.
    #[error("command error: {0}")]
    Command(#[from] CommandError),

    /// Configuration errors.
    #[error("configuration error: {message}")]
    Config {
        /// Description of the configuration error.
        message: String,
    },
}

/// Setup-time failures. All of these are fatal: construction fails rather
/// than running with truncated or undefined resource state.
#[derive(Error, Debug)]
pub enum SetupError {
    /// The transport's handle budget is exhausted.
    #[error("resource registration exhausted: budget of {budget} handles")]
    RegistrationExhausted {
        /// Configured handle budget.
        budget: usize,
    },

    /// Static partitioning produced more chunks than the one-byte count
    /// resource can report.
    #[error("content requires {required} chunks, count resource caps at {max}")]
    ChunkBudgetExceeded {
        /// Number of chunks the content would need.
        required: usize,
        /// Maximum representable chunk count.
        max: usize,
    },

    /// A resource was registered with a zero maximum size.
    #[error("resource max_size must be > 0")]
    ZeroSizeResource,
}

/// Protocol-level anomalies. These map to failure-status replies rather
/// than undefined behavior.
#[derive(Error, Debug)]
pub enum ProtocolError {
    /// A read addressed a resource id with no registered mapping.
    #[error("unknown resource: {id}")]
    UnknownResource {
        /// The unmapped resource id.
        id: u16,
    },

    /// A read addressed a chunk index beyond the partition table.
    #[error("chunk index {index} out of range (total {total})")]
    ChunkOutOfRange {
        /// Requested chunk index.
        index: usize,
        /// Total chunks in the table.
        total: usize,
    },

    /// A read arrived while no session was active.
    #[error("read request with no active session")]
    NoActiveSession,
}

/// Session lifecycle errors.
#[derive(Error, Debug)]
pub enum SessionError {
    /// A session start arrived while another session was active.
    #[error("session already active: {current}")]
    AlreadyActive {
        /// Handle of the currently active session.
        current: u16,
    },
}

/// I/O-specific errors for content loading and chunk export.
#[derive(Error, Debug)]
pub enum IoError {
    /// File not found.
    #[error("file not found: {path}")]
    FileNotFound {
        /// Path to the file that was not found.
        path: String,
    },

    /// Failed to read file.
    #[error("failed to read file: {path}: {reason}")]
    ReadFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Failed to write file.
    #[error("failed to write file: {path}: {reason}")]
    WriteFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Memory mapping error.
    #[error("memory mapping failed: {path}: {reason}")]
    MmapFailed {
        /// Path to the file.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Directory creation error.
    #[error("failed to create directory: {path}: {reason}")]
    DirectoryFailed {
        /// Path to the directory.
        path: String,
        /// Reason for failure.
        reason: String,
    },

    /// Generic I/O error wrapper.
    #[error("I/O error: {0}")]
    Generic(String),
}

/// CLI command-specific errors.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Invalid argument provided.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Command execution failed.
    #[error("command execution failed: {0}")]
    ExecutionFailed(String),

    /// Output format error.
    #[error("output format error: {0}")]
    OutputFormat(String),
}

// Implement From traits for standard library errors

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::Io(IoError::Generic(err.to_string()))
    }
}

impl From<serde_json::Error> for CommandError {
    fn from(err: serde_json::Error) -> Self {
        Self::OutputFormat(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::Config {
            message: "bad config".to_string(),
        };
        assert_eq!(err.to_string(), "configuration error: bad config");
    }

    #[test]
    fn test_setup_error_display() {
        let err = SetupError::RegistrationExhausted { budget: 64 };
        assert_eq!(
            err.to_string(),
            "resource registration exhausted: budget of 64 handles"
        );

        let err = SetupError::ChunkBudgetExceeded {
            required: 300,
            max: 255,
        };
        assert!(err.to_string().contains("300"));
        assert!(err.to_string().contains("255"));
    }

    #[test]
    fn test_protocol_error_display() {
        let err = ProtocolError::UnknownResource { id: 9 };
        assert_eq!(err.to_string(), "unknown resource: 9");

        let err = ProtocolError::ChunkOutOfRange { index: 7, total: 3 };
        assert_eq!(err.to_string(), "chunk index 7 out of range (total 3)");

        let err = ProtocolError::NoActiveSession;
        assert!(err.to_string().contains("no active session"));
    }

    #[test]
    fn test_session_error_display() {
        let err = SessionError::AlreadyActive { current: 2 };
        assert_eq!(err.to_string(), "session already active: 2");
    }

    #[test]
    fn test_io_error_display() {
        let err = IoError::FileNotFound {
            path: "/tmp/page.html".to_string(),
        };
        assert_eq!(err.to_string(), "file not found: /tmp/page.html");

        let err = IoError::MmapFailed {
            path: "/tmp/big".to_string(),
            reason: "out of memory".to_string(),
        };
        assert!(err.to_string().contains("memory mapping"));
    }

    #[test]
    fn test_command_error_display() {
        let err = CommandError::InvalidArgument("--max-unit".to_string());
        assert!(err.to_string().contains("invalid argument"));
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_error_from_setup() {
        let setup_err = SetupError::ZeroSizeResource;
        let err: Error = setup_err.into();
        assert!(matches!(err, Error::Setup(_)));
    }

    #[test]
    fn test_error_from_protocol() {
        let proto_err = ProtocolError::NoActiveSession;
        let err: Error = proto_err.into();
        assert!(matches!(err, Error::Protocol(_)));
    }

    #[test]
    fn test_error_from_session() {
        let session_err = SessionError::AlreadyActive { current: 1 };
        let err: Error = session_err.into();
        assert!(matches!(err, Error::Session(_)));
    }

    #[test]
    fn test_from_serde_json_error_to_command_error() {
        let json_err: serde_json::Error = serde_json::from_str::<i32>("invalid").unwrap_err();
        let err: CommandError = json_err.into();
        assert!(matches!(err, CommandError::OutputFormat(_)));
    }
}
