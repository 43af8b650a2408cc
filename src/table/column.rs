//! Column model

use std::io::{Read, Write};

use crate::error::{ColstoreError, Result};
use crate::format::{decode_name, encode_name, ColumnDesc, LAST_EXTENT};

/// Type tag of a column's values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColumnType {
    /// Uninterpreted byte strings without embedded NULs
    #[default]
    String,
}

impl ColumnType {
    pub fn tag(&self) -> u64 {
        match self {
            ColumnType::String => 1,
        }
    }

    pub fn from_tag(tag: u64) -> Result<Self> {
        match tag {
            1 => Ok(ColumnType::String),
            other => Err(ColstoreError::Format(format!(
                "unknown column type tag {}",
                other
            ))),
        }
    }
}

/// A single column of a table
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub column_id: u64,
    pub column_type: ColumnType,
    /// Trailer offset of the column's first extent; [`LAST_EXTENT`]
    /// until import assigns it
    pub first_extent: u64,
}

impl Column {
    pub fn new(name: impl Into<String>, column_id: u64, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            column_id,
            column_type,
            first_extent: LAST_EXTENT,
        }
    }

    pub(crate) fn read_from(reader: &mut impl Read) -> Result<Self> {
        let desc = ColumnDesc::read_from(reader)?;
        Ok(Self {
            name: decode_name(&desc.name),
            column_id: desc.column_id,
            column_type: ColumnType::from_tag(desc.column_type)?,
            first_extent: desc.first_extent,
        })
    }

    pub(crate) fn write_to(&self, writer: &mut impl Write) -> Result<()> {
        ColumnDesc {
            name: encode_name(&self.name),
            column_id: self.column_id,
            column_type: self.column_type.tag(),
            first_extent: self.first_extent,
        }
        .write_to(writer)
    }
}
