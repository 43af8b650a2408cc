//! Codec Module
//!
//! Pluggable compression for extent payloads, plus the null-byte scanner
//! that splits a decompressed payload into delimited values.
//!
//! A codec is selected per column at creation time and carried with the
//! column; there is no global codec state. The on-disk format does not
//! record the codec, so reader and writer must agree on it through
//! [`crate::Config`].

use std::fmt;
use std::str::FromStr;

use crate::error::{ColstoreError, Result};

// =============================================================================
// Codec
// =============================================================================

/// Compression codec applied to extent payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Codec {
    /// LZ4 block compression via `lz4_flex`
    #[default]
    Lz4,
    /// Snappy raw compression via `snap`
    Snappy,
    /// Zstandard via `zstd` (level 1)
    Zstd,
}

impl Codec {
    /// Compress `input` into a freshly allocated buffer.
    ///
    /// Encoder failures (including output-buffer allocation inside the
    /// codec) surface as [`ColstoreError::Compression`], distinct from
    /// I/O errors.
    pub fn compress(&self, input: &[u8]) -> Result<Vec<u8>> {
        match self {
            Codec::Lz4 => Ok(lz4_flex::block::compress(input)),
            Codec::Snappy => snap::raw::Encoder::new()
                .compress_vec(input)
                .map_err(|e| ColstoreError::Compression(format!("snappy compress: {}", e))),
            Codec::Zstd => zstd::bulk::compress(input, 1)
                .map_err(|e| ColstoreError::Compression(format!("zstd compress: {}", e))),
        }
    }

    /// Decompress `input` into a buffer of exactly `logical_size` bytes.
    ///
    /// A decompressed length different from `logical_size` is a format
    /// error, not a warning.
    pub fn decompress(&self, input: &[u8], logical_size: u64) -> Result<Vec<u8>> {
        let expected = logical_size as usize;
        let output = match self {
            Codec::Lz4 => lz4_flex::block::decompress(input, expected)
                .map_err(|e| ColstoreError::Compression(format!("lz4 decompress: {}", e)))?,
            Codec::Snappy => snap::raw::Decoder::new()
                .decompress_vec(input)
                .map_err(|e| ColstoreError::Compression(format!("snappy decompress: {}", e)))?,
            Codec::Zstd => zstd::bulk::decompress(input, expected)
                .map_err(|e| ColstoreError::Compression(format!("zstd decompress: {}", e)))?,
        };

        if output.len() != expected {
            return Err(ColstoreError::LogicalSizeMismatch {
                expected: logical_size,
                actual: output.len() as u64,
            });
        }

        Ok(output)
    }

    /// Canonical name, as accepted by [`Codec::from_str`]
    pub fn name(&self) -> &'static str {
        match self {
            Codec::Lz4 => "lz4",
            Codec::Snappy => "snappy",
            Codec::Zstd => "zstd",
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Codec {
    type Err = ColstoreError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "lz4" => Ok(Codec::Lz4),
            "snappy" => Ok(Codec::Snappy),
            "zstd" => Ok(Codec::Zstd),
            other => Err(ColstoreError::Config(format!("unknown codec '{}'", other))),
        }
    }
}

// =============================================================================
// Null-Byte Scanner
// =============================================================================

const ZERO_PROBE_LO: u64 = 0x0101_0101_0101_0101;
const ZERO_PROBE_HI: u64 = 0x8080_8080_8080_8080;

/// True if any byte of `word` is zero.
#[inline]
fn has_zero_byte(word: u64) -> bool {
    word.wrapping_sub(ZERO_PROBE_LO) & !word & ZERO_PROBE_HI != 0
}

/// Find the next NUL byte in `buf` at or after `from`.
///
/// Probes a word at a time, then narrows with a byte scan. Semantics are
/// identical to a byte-by-byte search.
pub fn find_null(buf: &[u8], from: usize) -> Option<usize> {
    let mut pos = from;

    while pos + 8 <= buf.len() {
        let word = u64::from_le_bytes(buf[pos..pos + 8].try_into().unwrap());
        if has_zero_byte(word) {
            break;
        }
        pos += 8;
    }

    while pos < buf.len() {
        if buf[pos] == 0 {
            return Some(pos);
        }
        pos += 1;
    }

    None
}
