//! On-Disk Format Module
//!
//! Byte layout of colstore files. Pure data-format knowledge; no I/O policy.
//!
//! ## File Layout
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │ File Header (24 bytes)                                       │
//! │   Magic: "COLSTOR1" (8) | Reserved (8) | TableIndexOff (8)   │
//! ├──────────────────────────────────────────────────────────────┤
//! │ Table Index Block                                            │
//! │   NrTables: u64 (8) | Next: u64 (8)                          │
//! │   ┌────────────────────────────────────────────────────────┐ │
//! │   │ Table Descriptor (56 bytes)                            │ │
//! │   │   Name (32) | TableId (8) | NrColumns (8) | Next (8)   │ │
//! │   │   ┌──────────────────────────────────────────────────┐ │ │
//! │   │   │ Column Descriptor (56 bytes)                     │ │ │
//! │   │   │   Name (32) | ColumnId (8) | Type (8) | Off (8)  │ │ │
//! │   │   └──────────────────────────────────────────────────┘ │ │
//! │   │   ... one per column ...                               │ │
//! │   └────────────────────────────────────────────────────────┘ │
//! │   ... one per table ...                                      │
//! ├──────────────────────────────────────────────────────────────┤
//! │ Extent                                                       │
//! │   PhysicalSize: u64 (8) | NextExtent: u64 (8)                │
//! │   LogicalSize: u64 (8)                                       │
//! │   Compressed payload (PhysicalSize bytes)                    │
//! │   ... chained per column via NextExtent ...                  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! All integers are little-endian u64. Index chains terminate with
//! [`END_OF_CHAIN`]; extent chains terminate with [`LAST_EXTENT`]. Both
//! sentinels sit at the top of the u64 range and can never be mistaken
//! for a legitimate file offset.

use std::io::{Read, Write};

use crate::error::{ColstoreError, Result};

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes identifying a colstore file
pub const MAGIC: &[u8; 8] = b"COLSTOR1";

/// Terminator for table and column index chains
pub const END_OF_CHAIN: u64 = u64::MAX;

/// Terminator for a column's extent chain
pub const LAST_EXTENT: u64 = u64::MAX - 1;

/// Fixed width of table and column name fields
pub const NAME_LEN: usize = 32;

/// File header size: Magic (8) + Reserved (8) + TableIndexOff (8)
pub const FILE_HEADER_SIZE: u64 = 24;

/// Index block header size: Count (8) + Next (8)
pub const INDEX_HEADER_SIZE: u64 = 16;

/// Table descriptor size: Name (32) + TableId (8) + embedded column index (16)
pub const TABLE_DESC_SIZE: u64 = 56;

/// Column descriptor size: Name (32) + ColumnId (8) + Type (8) + FirstExtent (8)
pub const COLUMN_DESC_SIZE: u64 = 56;

/// Extent trailer size: PhysicalSize (8) + NextExtent (8)
pub const EXTENT_TRAILER_SIZE: u64 = 16;

// =============================================================================
// Name Field Helpers
// =============================================================================

/// Encode a name into a fixed-width, NUL-padded field; over-long names
/// are truncated.
pub fn encode_name(name: &str) -> [u8; NAME_LEN] {
    let mut field = [0u8; NAME_LEN];
    let bytes = name.as_bytes();
    let len = bytes.len().min(NAME_LEN);
    field[..len].copy_from_slice(&bytes[..len]);
    field
}

/// Decode a fixed-width name field, stopping at the first NUL.
pub fn decode_name(field: &[u8; NAME_LEN]) -> String {
    let end = field.iter().position(|&b| b == 0).unwrap_or(NAME_LEN);
    String::from_utf8_lossy(&field[..end]).into_owned()
}

fn read_u64(reader: &mut impl Read) -> Result<u64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

// =============================================================================
// File Header
// =============================================================================

/// Fixed header at the start of every colstore file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileHeader {
    /// Offset of a secondary index region; reserved, written as zero
    /// and ignored on read
    pub reserved_index_offset: u64,
    /// Offset of the first table index block
    pub table_index_offset: u64,
}

impl FileHeader {
    pub fn write_to(&self, writer: &mut impl Write) -> Result<()> {
        writer.write_all(MAGIC)?;
        writer.write_all(&self.reserved_index_offset.to_le_bytes())?;
        writer.write_all(&self.table_index_offset.to_le_bytes())?;
        Ok(())
    }

    pub fn read_from(reader: &mut impl Read) -> Result<Self> {
        let mut magic = [0u8; 8];
        reader.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(ColstoreError::Format(format!(
                "invalid magic: expected {:?}, got {:?}",
                MAGIC, magic
            )));
        }
        let reserved_index_offset = read_u64(reader)?;
        let table_index_offset = read_u64(reader)?;
        Ok(Self {
            reserved_index_offset,
            table_index_offset,
        })
    }
}

// =============================================================================
// Index Chain Blocks
// =============================================================================

/// Header of a table or column index block: entry count plus the offset
/// of the next block in the chain (or [`END_OF_CHAIN`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexHeader {
    pub count: u64,
    pub next: u64,
}

impl IndexHeader {
    pub fn write_to(&self, writer: &mut impl Write) -> Result<()> {
        writer.write_all(&self.count.to_le_bytes())?;
        writer.write_all(&self.next.to_le_bytes())?;
        Ok(())
    }

    pub fn read_from(reader: &mut impl Read) -> Result<Self> {
        let count = read_u64(reader)?;
        let next = read_u64(reader)?;
        Ok(Self { count, next })
    }
}

// =============================================================================
// Table Descriptor
// =============================================================================

/// Fixed-width table descriptor with the embedded column index header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDesc {
    pub name: [u8; NAME_LEN],
    pub table_id: u64,
    pub column_index: IndexHeader,
}

impl TableDesc {
    pub fn write_to(&self, writer: &mut impl Write) -> Result<()> {
        writer.write_all(&self.name)?;
        writer.write_all(&self.table_id.to_le_bytes())?;
        self.column_index.write_to(writer)
    }

    pub fn read_from(reader: &mut impl Read) -> Result<Self> {
        let mut name = [0u8; NAME_LEN];
        reader.read_exact(&mut name)?;
        let table_id = read_u64(reader)?;
        let column_index = IndexHeader::read_from(reader)?;
        Ok(Self {
            name,
            table_id,
            column_index,
        })
    }
}

// =============================================================================
// Column Descriptor
// =============================================================================

/// Fixed-width column descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDesc {
    pub name: [u8; NAME_LEN],
    pub column_id: u64,
    pub column_type: u64,
    /// Offset of the trailer of the column's first extent
    pub first_extent: u64,
}

impl ColumnDesc {
    pub fn write_to(&self, writer: &mut impl Write) -> Result<()> {
        writer.write_all(&self.name)?;
        writer.write_all(&self.column_id.to_le_bytes())?;
        writer.write_all(&self.column_type.to_le_bytes())?;
        writer.write_all(&self.first_extent.to_le_bytes())?;
        Ok(())
    }

    pub fn read_from(reader: &mut impl Read) -> Result<Self> {
        let mut name = [0u8; NAME_LEN];
        reader.read_exact(&mut name)?;
        let column_id = read_u64(reader)?;
        let column_type = read_u64(reader)?;
        let first_extent = read_u64(reader)?;
        Ok(Self {
            name,
            column_id,
            column_type,
            first_extent,
        })
    }
}

// =============================================================================
// Extent Trailer
// =============================================================================

/// Trailer written immediately before each extent's payload: the
/// recorded logical (decompressed) size as a u64, then `physical_size`
/// compressed bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtentTrailer {
    /// Compressed payload length in bytes
    pub physical_size: u64,
    /// Offset of the next extent's trailer, or [`LAST_EXTENT`]
    pub next_extent: u64,
}

impl ExtentTrailer {
    pub fn write_to(&self, writer: &mut impl Write) -> Result<()> {
        writer.write_all(&self.physical_size.to_le_bytes())?;
        writer.write_all(&self.next_extent.to_le_bytes())?;
        Ok(())
    }

    pub fn read_from(reader: &mut impl Read) -> Result<Self> {
        let physical_size = read_u64(reader)?;
        let next_extent = read_u64(reader)?;
        Ok(Self {
            physical_size,
            next_extent,
        })
    }
}
