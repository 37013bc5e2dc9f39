//! Content buffer management for fatserve.
//!
//! The content buffer owns the opaque byte blob served to the peer. It is
//! created once at setup and never mutated while a session is active; both
//! paginators borrow it read-only.

use serde::{Deserialize, Serialize};

/// The opaque content blob served to the peer.
///
/// Content longer than the configured capacity is silently truncated at
/// construction, before any chunking occurs. This clamp is legacy transport
/// behavior and is load-bearing: peers of this protocol expect a bounded
/// transfer rather than a setup error.
///
/// # Examples
///
/// ```
/// use fatserve::core::ContentBuffer;
///
/// let content = ContentBuffer::new(b"hello".to_vec(), 10_000);
/// assert_eq!(content.len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentBuffer {
    bytes: Vec<u8>,
}

impl ContentBuffer {
    /// Creates a content buffer, truncating to `capacity` bytes.
    #[must_use]
    pub fn new(mut bytes: Vec<u8>, capacity: usize) -> Self {
        bytes.truncate(capacity);
        Self { bytes }
    }

    /// Returns the content length in bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Checks whether the buffer holds no content.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the full content as a byte slice.
    #[must_use]
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns a sub-slice of the content.
    ///
    /// # Arguments
    ///
    /// * `start` - Start byte offset.
    /// * `end` - End byte offset (exclusive).
    ///
    /// # Returns
    ///
    /// The slice, or `None` if the offsets are invalid.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> Option<&[u8]> {
        if start <= end && end <= self.bytes.len() {
            self.bytes.get(start..end)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_under_capacity() {
        let content = ContentBuffer::new(b"hello world".to_vec(), 10_000);
        assert_eq!(content.len(), 11);
        assert!(!content.is_empty());
        assert_eq!(content.as_slice(), b"hello world");
    }

    #[test]
    fn test_content_truncated_at_capacity() {
        let content = ContentBuffer::new(vec![0xAB; 12_000], 10_000);
        assert_eq!(content.len(), 10_000);
        assert!(content.as_slice().iter().all(|&b| b == 0xAB));
    }

    #[test]
    fn test_content_exactly_at_capacity() {
        let content = ContentBuffer::new(vec![1; 10_000], 10_000);
        assert_eq!(content.len(), 10_000);
    }

    #[test]
    fn test_content_empty() {
        let content = ContentBuffer::new(Vec::new(), 10_000);
        assert!(content.is_empty());
        assert_eq!(content.len(), 0);
    }

    #[test]
    fn test_content_slice() {
        let content = ContentBuffer::new(b"hello world".to_vec(), 10_000);
        assert_eq!(content.slice(0, 5), Some(&b"hello"[..]));
        assert_eq!(content.slice(6, 11), Some(&b"world"[..]));
        assert_eq!(content.slice(0, 100), None); // Out of bounds
        assert_eq!(content.slice(10, 5), None); // Invalid range
    }

    #[test]
    fn test_content_slice_empty_range() {
        let content = ContentBuffer::new(b"abc".to_vec(), 10_000);
        assert_eq!(content.slice(3, 3), Some(&b""[..]));
    }

    #[test]
    fn test_content_serialization() {
        let content = ContentBuffer::new(b"abc".to_vec(), 10_000);
        let json = serde_json::to_string(&content);
        assert!(json.is_ok());

        let deserialized: Result<ContentBuffer, _> = serde_json::from_str(&json.unwrap());
        assert_eq!(deserialized.unwrap(), content);
    }
}
