//! Sequential (cursor) delivery strategy.
//!
//! On each read the pager hands back the next bounded slice of the content
//! and advances the session cursor. The transport conveys end-of-content
//! via an explicit empty reply, not via a short final chunk: after the last
//! real slice, exactly one empty page follows, and the traversal then
//! restarts from the beginning.

use crate::core::{ContentBuffer, Cursor};

/// One read's worth of content in sequential mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page<'a> {
    /// Slice of the content blob; empty on the terminal page.
    pub data: &'a [u8],

    /// Whether this page is the explicit end-of-content reply.
    pub terminal: bool,
}

impl<'a> Page<'a> {
    /// The explicit empty end-of-content page.
    #[must_use]
    pub const fn terminal() -> Self {
        Self {
            data: &[],
            terminal: true,
        }
    }

    /// Returns the page length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Checks whether the page carries no data.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Stateful in-order pager over a content buffer.
///
/// The pager itself is immutable; all traversal state lives in the
/// [`Cursor`] owned by the session binder, so independent instances can
/// coexist under test.
///
/// # Examples
///
/// ```
/// use fatserve::core::{ContentBuffer, Cursor};
/// use fatserve::paging::SequentialPager;
///
/// let content = ContentBuffer::new(vec![7; 45], 10_000);
/// let pager = SequentialPager::new(20);
/// let mut cursor = Cursor::new();
///
/// assert_eq!(pager.next(&content, &mut cursor).len(), 20);
/// assert_eq!(pager.next(&content, &mut cursor).len(), 20);
/// assert_eq!(pager.next(&content, &mut cursor).len(), 5);
/// assert!(pager.next(&content, &mut cursor).terminal);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SequentialPager {
    /// Largest number of bytes returned in one read.
    max_unit: usize,
}

impl SequentialPager {
    /// Creates a pager bounded by `max_unit` bytes per read.
    #[must_use]
    pub const fn new(max_unit: usize) -> Self {
        Self { max_unit }
    }

    /// Returns the configured per-read byte bound.
    #[must_use]
    pub const fn max_unit(&self) -> usize {
        self.max_unit
    }

    /// Computes the next page and advances the cursor.
    ///
    /// A pending terminal flag (or empty content) yields the empty
    /// end-of-content page and resets the cursor, so the read after the
    /// terminal page restarts the traversal at offset 0. Delivering the
    /// final real slice only *arms* the flag: the empty page is a separate,
    /// explicit reply even when the last slice was full-size.
    pub fn next<'a>(&self, content: &'a ContentBuffer, cursor: &mut Cursor) -> Page<'a> {
        if cursor.terminal || content.is_empty() {
            cursor.reset();
            return Page::terminal();
        }

        let remaining = content.len() - cursor.position;
        let take = self.max_unit.min(remaining);
        // Range is in bounds: position < len and take <= remaining.
        let data = content
            .slice(cursor.position, cursor.position + take)
            .unwrap_or(&[]);

        cursor.position += take;
        if cursor.position >= content.len() {
            cursor.terminal = true;
        }

        Page {
            data,
            terminal: false,
        }
    }
}
