//! Extent Writer
//!
//! Write-side lifecycle for one extent: accumulate uncompressed values,
//! then compress and write the whole extent — trailer, recorded logical
//! size, compressed payload — contiguously at the end of the file, so
//! the reader always finds the payload right after the trailer.
//!
//! Extents of different columns interleave in the file, so an extent's
//! position is unknown until it is flushed. `flush` therefore writes the
//! trailer with the chain terminator, and `finish` backpatches the
//! forward link once the successor extent's position is known.

use std::fs::File;
use std::io::{Seek, SeekFrom, Write};

use crate::codec::Codec;
use crate::error::Result;
use crate::format::{ExtentTrailer, LAST_EXTENT};

/// Writer for a single extent of one column
pub struct ExtentWriter {
    /// Column name, carried for diagnostics
    column_name: String,
    codec: Codec,
    /// Uncompressed accumulation buffer, capped at `max_len`
    buf: Vec<u8>,
    max_len: usize,
    /// File offset of the trailer, known once flushed
    trailer_offset: u64,
    /// Compressed payload length, known once flushed
    physical_size: u64,
    flushed: bool,
}

impl ExtentWriter {
    /// Allocate an empty accumulation buffer. No file space is touched
    /// until [`flush`](Self::flush).
    pub fn prepare(column_name: &str, codec: Codec, max_extent_len: usize) -> Self {
        Self {
            column_name: column_name.to_string(),
            codec,
            buf: Vec::with_capacity(max_extent_len),
            max_len: max_extent_len,
            trailer_offset: 0,
            physical_size: 0,
            flushed: false,
        }
    }

    /// Offset of this extent's trailer; meaningful once flushed. A
    /// column's first extent records this in its descriptor, and the
    /// previous extent's trailer links to it.
    pub fn trailer_offset(&self) -> u64 {
        debug_assert!(self.flushed, "trailer offset unknown before flush");
        self.trailer_offset
    }

    /// True iff the buffer has room for `value` plus its NUL delimiter.
    pub fn has_room(&self, value: &[u8]) -> bool {
        self.buf.len() + value.len() + 1 <= self.max_len
    }

    /// Append `value` followed by a NUL delimiter.
    ///
    /// The caller must have checked [`has_room`](Self::has_room) first;
    /// violating that is a programming error, not a runtime condition.
    pub fn write_value(&mut self, value: &[u8]) {
        debug_assert!(self.has_room(value), "write_value called without room");
        self.buf.extend_from_slice(value);
        self.buf.push(0);
    }

    /// Compress the accumulation buffer and write the whole extent at
    /// the end of the file: the trailer (physical size plus the chain
    /// terminator), the recorded logical size, and the compressed bytes.
    ///
    /// Returns the physical (compressed) size. Incompressible data is
    /// kept as-is with a warning.
    pub fn flush(&mut self, file: &mut File) -> Result<u64> {
        let compressed = self.codec.compress(&self.buf)?;

        if !self.buf.is_empty() && compressed.len() >= self.buf.len() {
            tracing::warn!(
                "column '{}' contains incompressible data ({} -> {} bytes)",
                self.column_name,
                self.buf.len(),
                compressed.len()
            );
        }

        let logical_size = self.buf.len() as u64;
        self.physical_size = compressed.len() as u64;
        self.trailer_offset = file.seek(SeekFrom::End(0))?;

        // A freshly flushed extent is the current last of its chain;
        // finish relinks it if a successor follows.
        ExtentTrailer {
            physical_size: self.physical_size,
            next_extent: LAST_EXTENT,
        }
        .write_to(file)?;
        file.write_all(&logical_size.to_le_bytes())?;
        file.write_all(&compressed)?;

        self.buf.clear();
        self.flushed = true;

        Ok(self.physical_size)
    }

    /// Backpatch the flushed trailer with the forward link: the trailer
    /// offset of the column's next extent, or
    /// [`crate::format::LAST_EXTENT`] for a column's last extent.
    pub fn finish(&mut self, file: &mut File, next_extent: u64) -> Result<()> {
        debug_assert!(self.flushed, "finish called before flush");

        let end = file.stream_position()?;

        file.seek(SeekFrom::Start(self.trailer_offset))?;
        ExtentTrailer {
            physical_size: self.physical_size,
            next_extent,
        }
        .write_to(file)?;

        file.seek(SeekFrom::Start(end))?;
        Ok(())
    }
}
