//! Extent Reader
//!
//! Maps and decompresses a single extent. The mapped window covers
//! exactly the extent's payload range (memmap2 handles page-alignment
//! padding internally) and is released before this function returns, on
//! the error paths included.

use std::fs::File;
use std::io::{Seek, SeekFrom};

use memmap2::MmapOptions;

use crate::codec::Codec;
use crate::error::{ColstoreError, Result};
use crate::format::{ExtentTrailer, EXTENT_TRAILER_SIZE, LAST_EXTENT};

/// A decompressed extent payload plus its forward link
pub struct ExtentPayload {
    /// Decompressed, NUL-delimited values
    pub data: Vec<u8>,
    /// Trailer offset of the next extent, or [`LAST_EXTENT`]
    pub next_extent: u64,
}

impl ExtentPayload {
    /// Read the trailer at `offset`, map a window over the compressed
    /// payload, and decompress it into a buffer sized to the recorded
    /// logical size.
    pub fn map(file: &mut File, offset: u64, codec: Codec) -> Result<Self> {
        file.seek(SeekFrom::Start(offset))?;
        let trailer = ExtentTrailer::read_from(file)?;

        if trailer.next_extent != LAST_EXTENT && trailer.next_extent <= offset {
            return Err(ColstoreError::Format(format!(
                "extent chain at offset {} links backward to {}",
                offset, trailer.next_extent
            )));
        }

        // Payload: logical size (8 bytes) + physical_size compressed bytes
        let payload_offset = offset + EXTENT_TRAILER_SIZE;
        let file_len = file.metadata()?.len();
        if trailer
            .physical_size
            .checked_add(payload_offset + 8)
            .map_or(true, |end| end > file_len)
        {
            return Err(ColstoreError::Format(format!(
                "extent at offset {} overruns the file ({} payload bytes, file is {} bytes)",
                offset, trailer.physical_size, file_len
            )));
        }

        let window_len = (8 + trailer.physical_size) as usize;
        let window = unsafe {
            MmapOptions::new()
                .offset(payload_offset)
                .len(window_len)
                .map(&*file)?
        };

        let logical_size = u64::from_le_bytes(window[..8].try_into().unwrap());
        let data = codec.decompress(&window[8..], logical_size)?;

        drop(window);

        Ok(Self {
            data,
            next_extent: trailer.next_extent,
        })
    }
}
