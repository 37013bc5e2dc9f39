//! Content file loading with memory mapping support.
//!
//! Content files are opaque bytes. The serving capacity is applied at
//! load time, so an oversized file truncates before any chunking, and a
//! memory-mapped read never copies more than the capacity.

// Memory mapping requires unsafe but is safe for read-only access
#![allow(unsafe_code)]

use crate::core::{Chunk, ContentBuffer};
use crate::error::{IoError, Result};
use memmap2::Mmap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Threshold for using memory mapping (1MB).
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Loads a content file, capped to `capacity` bytes.
///
/// Small files are read directly; files at or above the mmap threshold
/// are memory-mapped and only the capped prefix is copied out.
///
/// # Arguments
///
/// * `path` - Path to the content file.
/// * `capacity` - Serving capacity in bytes.
///
/// # Errors
///
/// Returns an error if the file doesn't exist or can't be read.
///
/// # Examples
///
/// ```no_run
/// use fatserve::io::load_content;
///
/// let bytes = load_content("page.html", 10_000).unwrap();
/// assert!(bytes.len() <= 10_000);
/// ```
pub fn load_content<P: AsRef<Path>>(path: P, capacity: usize) -> Result<Vec<u8>> {
    let path_ref = path.as_ref();
    let path_str = path_ref.to_string_lossy().to_string();

    if !path_ref.exists() {
        return Err(IoError::FileNotFound { path: path_str }.into());
    }

    let file = File::open(path_ref).map_err(|e| IoError::ReadFailed {
        path: path_str.clone(),
        reason: e.to_string(),
    })?;

    let size = file
        .metadata()
        .map_err(|e| IoError::ReadFailed {
            path: path_str.clone(),
            reason: e.to_string(),
        })?
        .len();

    if size >= MMAP_THRESHOLD {
        // Safety: read-only mapping of a file we just opened.
        let mmap = unsafe {
            Mmap::map(&file).map_err(|e| IoError::MmapFailed {
                path: path_str,
                reason: e.to_string(),
            })?
        };
        let end = capacity.min(mmap.len());
        Ok(mmap[..end].to_vec())
    } else {
        let mut bytes = Vec::new();
        let mut file = file;
        file.read_to_end(&mut bytes).map_err(|e| IoError::ReadFailed {
            path: path_str,
            reason: e.to_string(),
        })?;
        bytes.truncate(capacity);
        Ok(bytes)
    }
}

/// Writes each chunk of a partition to its own numbered file.
///
/// # Arguments
///
/// * `out_dir` - Directory to write chunk files to (created if missing).
/// * `content` - The content the chunks index into.
/// * `chunks` - Chunk descriptors in index order.
/// * `prefix` - Filename prefix (e.g. "chunk").
///
/// # Returns
///
/// Paths of the written files, in chunk order.
///
/// # Errors
///
/// Returns an error if directory creation or a file write fails.
pub fn write_chunks<'a, P, I>(
    out_dir: P,
    content: &ContentBuffer,
    chunks: I,
    prefix: &str,
) -> Result<Vec<String>>
where
    P: AsRef<Path>,
    I: Iterator<Item = &'a Chunk>,
{
    let out_path = out_dir.as_ref();
    let out_str = out_path.to_string_lossy().to_string();

    if !out_path.exists() {
        std::fs::create_dir_all(out_path).map_err(|e| IoError::DirectoryFailed {
            path: out_str.clone(),
            reason: e.to_string(),
        })?;
    }

    let mut paths = Vec::new();

    for chunk in chunks {
        let filename = format!("{prefix}_{:04}.bin", chunk.index);
        let file_path = out_path.join(&filename);
        let file_str = file_path.to_string_lossy().to_string();
        let bytes = content.slice(chunk.offset, chunk.end()).unwrap_or(&[]);

        std::fs::write(&file_path, bytes).map_err(|e| IoError::WriteFailed {
            path: file_str.clone(),
            reason: e.to_string(),
        })?;

        paths.push(file_str);
    }

    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paging::PartitionTable;
    use tempfile::TempDir;

    #[test]
    fn test_load_small_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("page.html");
        std::fs::write(&file_path, b"<html>hi</html>").unwrap();

        let bytes = load_content(&file_path, 10_000).unwrap();
        assert_eq!(bytes, b"<html>hi</html>");
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = load_content("/nonexistent/path/page.html", 10_000);
        assert!(result.is_err());
    }

    #[test]
    fn test_load_caps_at_capacity() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("big.bin");
        std::fs::write(&file_path, vec![0xCD; 12_000]).unwrap();

        let bytes = load_content(&file_path, 10_000).unwrap();
        assert_eq!(bytes.len(), 10_000);
    }

    #[test]
    fn test_load_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("empty.bin");
        std::fs::write(&file_path, b"").unwrap();

        let bytes = load_content(&file_path, 10_000).unwrap();
        assert!(bytes.is_empty());
    }

    #[test]
    fn test_load_large_file_mmap_path() {
        // File above the mmap threshold; only the capped prefix comes back.
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("large.bin");
        std::fs::write(&file_path, vec![0x42; 1024 * 1024 + 512]).unwrap();

        let bytes = load_content(&file_path, 10_000).unwrap();
        assert_eq!(bytes.len(), 10_000);
        assert!(bytes.iter().all(|&b| b == 0x42));
    }

    #[test]
    fn test_load_binary_content() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("data.bin");
        std::fs::write(&file_path, b"binary\x00data\xff").unwrap();

        let bytes = load_content(&file_path, 10_000).unwrap();
        assert_eq!(bytes, b"binary\x00data\xff");
    }

    #[test]
    fn test_write_chunks() {
        let temp_dir = TempDir::new().unwrap();
        let out_dir = temp_dir.path().join("chunks");

        let content = ContentBuffer::new(b"hello world, again!".to_vec(), 10_000);
        let table = PartitionTable::build(&content, 8).unwrap();
        let paths = write_chunks(&out_dir, &content, table.iter(), "chunk").unwrap();

        assert_eq!(paths.len(), 3);
        assert!(paths[0].contains("chunk_0000.bin"));
        assert_eq!(std::fs::read(&paths[0]).unwrap(), b"hello wo");
        assert_eq!(std::fs::read(&paths[2]).unwrap(), b"in!");
    }

    #[test]
    fn test_write_chunks_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let out_dir = temp_dir.path().join("fresh");
        assert!(!out_dir.exists());

        let content = ContentBuffer::new(vec![1; 30], 10_000);
        let table = PartitionTable::build(&content, 20).unwrap();
        let paths = write_chunks(&out_dir, &content, table.iter(), "part").unwrap();

        assert!(out_dir.exists());
        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn test_write_chunks_empty_table() {
        let temp_dir = TempDir::new().unwrap();
        let out_dir = temp_dir.path().join("none");

        let content = ContentBuffer::new(Vec::new(), 10_000);
        let table = PartitionTable::build(&content, 20).unwrap();
        let paths = write_chunks(&out_dir, &content, table.iter(), "part").unwrap();

        assert!(paths.is_empty());
    }
}
