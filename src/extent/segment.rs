//! Segment
//!
//! Per-column value iterator over an extent chain. Holds at most one
//! extent's decompressed payload at a time; when the current extent is
//! exhausted it transparently maps and decompresses the next one, until
//! the chain terminates.

use std::fs::File;
use std::ops::Range;

use crate::codec::{find_null, Codec};
use crate::error::{ColstoreError, Result};
use crate::extent::ExtentPayload;
use crate::format::LAST_EXTENT;
use crate::table::Column;

/// Forward-only reader over one column's extent chain
pub struct Segment {
    file: File,
    codec: Codec,
    /// Decompressed payload of the current extent
    buf: Vec<u8>,
    /// Scan cursor into `buf`
    pos: usize,
    /// Trailer offset of the most recently mapped extent (cycle guard)
    last_offset: u64,
    /// Trailer offset of the next extent, or [`LAST_EXTENT`]
    next_extent: u64,
}

impl Segment {
    /// Open a segment at the column's first extent. The extent itself is
    /// mapped lazily on the first [`next_value`](Self::next_value) call.
    pub fn open(column: &Column, file: &File, codec: Codec) -> Result<Self> {
        Ok(Self {
            file: file.try_clone()?,
            codec,
            buf: Vec::new(),
            pos: 0,
            last_offset: 0,
            next_extent: column.first_extent,
        })
    }

    /// Return the range of the next NUL-delimited value, advancing the
    /// cursor past the delimiter; `None` once the chain is exhausted.
    ///
    /// The range indexes into the current extent's payload (see
    /// [`value`](Self::value)) and is invalidated by the next call.
    pub fn next_value(&mut self) -> Result<Option<Range<usize>>> {
        loop {
            if self.pos < self.buf.len() {
                return match find_null(&self.buf, self.pos) {
                    Some(end) => {
                        let range = self.pos..end;
                        self.pos = end + 1;
                        Ok(Some(range))
                    }
                    None => Err(ColstoreError::Format(format!(
                        "unterminated value at extent offset {}",
                        self.last_offset
                    ))),
                };
            }

            if self.next_extent == LAST_EXTENT {
                return Ok(None);
            }

            self.load_next()?;
        }
    }

    /// Resolve a range returned by [`next_value`](Self::next_value).
    pub fn value(&self, range: Range<usize>) -> &[u8] {
        &self.buf[range]
    }

    /// Map and decompress the next extent in the chain, discarding the
    /// current payload.
    fn load_next(&mut self) -> Result<()> {
        let offset = self.next_extent;

        // Chains are strictly forward; a link at or before the current
        // extent would make the chain cyclic.
        if offset <= self.last_offset {
            return Err(ColstoreError::Format(format!(
                "extent chain revisits offset {} (current extent at {})",
                offset, self.last_offset
            )));
        }

        let extent = ExtentPayload::map(&mut self.file, offset, self.codec)?;

        self.buf = extent.data;
        self.pos = 0;
        self.last_offset = offset;
        self.next_extent = extent.next_extent;

        Ok(())
    }
}
