//! Static (pre-split) delivery strategy.
//!
//! At setup time the content is divided into an ordered table of
//! fixed-size chunks, each exposed as an independently addressable
//! resource, plus a one-byte count so the peer knows up front how many
//! chunks to fetch. Retrieval is random-access and idempotent: any chunk
//! may be re-read any number of times with identical results.

use crate::core::{Chunk, ContentBuffer};
use crate::error::{ProtocolError, Result, SetupError};
use crate::paging::MAX_CHUNK_COUNT;
use serde::{Deserialize, Serialize};

/// Ordered, read-only table of static chunks.
///
/// The table ties content size to `max_unit * 255`: a content blob that
/// would need more chunks than the one-byte count resource can report is
/// a fatal setup failure, not a silent cap.
///
/// # Examples
///
/// ```
/// use fatserve::core::ContentBuffer;
/// use fatserve::paging::PartitionTable;
///
/// let content = ContentBuffer::new(vec![0; 45], 10_000);
/// let table = PartitionTable::build(&content, 20).unwrap();
/// assert_eq!(table.total(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartitionTable {
    chunks: Vec<Chunk>,
    max_unit: usize,
}

impl PartitionTable {
    /// Builds the partition table for `content` with `max_unit`-byte chunks.
    ///
    /// Every chunk is exactly `max_unit` bytes except possibly the last,
    /// which carries the remainder (itself exactly `max_unit` bytes when
    /// the division is exact).
    ///
    /// # Errors
    ///
    /// Returns [`SetupError::ChunkBudgetExceeded`] if the chunk count would
    /// not fit the one-byte count resource.
    pub fn build(content: &ContentBuffer, max_unit: usize) -> Result<Self> {
        if max_unit == 0 {
            return Err(crate::error::Error::Config {
                message: "max_unit must be > 0".to_string(),
            });
        }

        let total = content.len().div_ceil(max_unit);
        if total > MAX_CHUNK_COUNT {
            return Err(SetupError::ChunkBudgetExceeded {
                required: total,
                max: MAX_CHUNK_COUNT,
            }
            .into());
        }

        let chunks = (0..total)
            .map(|index| {
                let offset = index * max_unit;
                let length = max_unit.min(content.len() - offset);
                Chunk::new(index, offset, length)
            })
            .collect();

        Ok(Self { chunks, max_unit })
    }

    /// Returns the chunk count as the one-byte count resource reports it.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn total(&self) -> u8 {
        // Bounded by MAX_CHUNK_COUNT at build time.
        self.chunks.len() as u8
    }

    /// Returns the chunk count as a usize.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Checks whether the table holds no chunks.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Returns the per-chunk byte bound the table was built with.
    #[must_use]
    pub const fn max_unit(&self) -> usize {
        self.max_unit
    }

    /// Returns the descriptor for chunk `index`, if present.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Chunk> {
        self.chunks.get(index)
    }

    /// Iterates over the chunk descriptors in index order.
    pub fn iter(&self) -> std::slice::Iter<'_, Chunk> {
        self.chunks.iter()
    }

    /// Resolves chunk `index` to its bytes in `content`.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::ChunkOutOfRange`] for an index beyond the
    /// table, or if the table does not match the content (never the case
    /// for a table built from the same buffer).
    pub fn chunk_bytes<'a>(&self, content: &'a ContentBuffer, index: usize) -> Result<&'a [u8]> {
        let chunk = self.get(index).ok_or(ProtocolError::ChunkOutOfRange {
            index,
            total: self.len(),
        })?;
        content
            .slice(chunk.offset, chunk.end())
            .ok_or_else(|| {
                ProtocolError::ChunkOutOfRange {
                    index,
                    total: self.len(),
                }
                .into()
            })
    }
}

impl<'a> IntoIterator for &'a PartitionTable {
    type Item = &'a Chunk;
    type IntoIter = std::slice::Iter<'a, Chunk>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
