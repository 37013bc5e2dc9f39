//! Session cursor for sequential delivery.
//!
//! The cursor tracks how much of the content has been handed to the
//! current session. There is at most one live cursor at a time: the
//! session binder owns it and resets it on every session boundary.

use serde::{Deserialize, Serialize};

/// Traversal position for the current session.
///
/// `terminal` is set after the final real chunk has been delivered; the
/// next read then produces the explicit empty end-of-content reply and the
/// cursor returns to the start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    /// Byte offset of the next chunk to deliver.
    pub position: usize,

    /// Whether the next read must produce the terminal empty reply.
    pub terminal: bool,
}

impl Cursor {
    /// Creates a cursor at the start of the content.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            position: 0,
            terminal: false,
        }
    }

    /// Resets the cursor to the start of the content.
    pub const fn reset(&mut self) {
        self.position = 0;
        self.terminal = false;
    }

    /// Checks whether the cursor is at the start with no pending terminal.
    #[must_use]
    pub const fn is_fresh(&self) -> bool {
        self.position == 0 && !self.terminal
    }
}
