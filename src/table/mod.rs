//! Table Module
//!
//! In-memory table and column model, built from or serialized to the
//! on-disk index chains.
//!
//! A table descriptor embeds its column-index header; the table's column
//! descriptors follow it immediately. Writing reserves descriptor space,
//! writes the columns, then backpatches the table descriptor once the
//! final column count is known.

mod column;

pub use column::{Column, ColumnType};

use std::io::{Read, Seek, SeekFrom, Write};

use crate::error::{ColstoreError, Result};
use crate::format::{encode_name, IndexHeader, TableDesc, END_OF_CHAIN, TABLE_DESC_SIZE};

/// A named table: an ordered set of columns
#[derive(Debug, Clone)]
pub struct Table {
    pub name: String,
    pub table_id: u64,
    pub columns: Vec<Column>,
}

impl Table {
    pub fn new(name: impl Into<String>, table_id: u64) -> Self {
        Self {
            name: name.into(),
            table_id,
            columns: Vec::new(),
        }
    }

    pub fn add_column(&mut self, column: Column) {
        self.columns.push(column);
    }

    /// Look up a column by its numeric identifier.
    ///
    /// Column identity is the id, never the positional index; sources
    /// iterated independently need not agree on column order.
    pub fn column_by_id(&self, column_id: u64) -> Option<&Column> {
        self.columns.iter().find(|c| c.column_id == column_id)
    }

    pub fn nr_columns(&self) -> u64 {
        self.columns.len() as u64
    }

    /// Read a table descriptor and its column-index chain.
    pub(crate) fn read_from(file: &mut (impl Read + Seek)) -> Result<Self> {
        let block_offset = file.stream_position()?;
        let desc = TableDesc::read_from(file)?;

        let mut table = Table::new(
            crate::format::decode_name(&desc.name),
            desc.table_id,
        );

        // First block of columns follows the descriptor inline; further
        // blocks, if any, are chained through the embedded index header.
        let mut count = desc.column_index.count;
        let mut next = desc.column_index.next;
        let mut last_offset = block_offset;

        loop {
            for _ in 0..count {
                table.add_column(Column::read_from(file)?);
            }

            if next == END_OF_CHAIN {
                break;
            }
            if next <= last_offset {
                return Err(ColstoreError::Format(format!(
                    "column index chain revisits offset {}",
                    next
                )));
            }

            last_offset = next;
            file.seek(SeekFrom::Start(next))?;
            let header = IndexHeader::read_from(file)?;
            count = header.count;
            next = header.next;
        }

        Ok(table)
    }

    /// Write the table descriptor and its columns with the
    /// reserve-space/backpatch pattern: seek past the descriptor, write
    /// the column payload, then seek back and fill in the descriptor.
    pub(crate) fn write_to(&self, file: &mut (impl Write + Seek)) -> Result<()> {
        let start = file.seek(SeekFrom::Current(TABLE_DESC_SIZE as i64))?;

        for column in &self.columns {
            column.write_to(file)?;
        }

        let end = file.stream_position()?;
        let payload = end - start;

        file.seek(SeekFrom::Start(start - TABLE_DESC_SIZE))?;
        TableDesc {
            name: encode_name(&self.name),
            table_id: self.table_id,
            column_index: IndexHeader {
                count: self.nr_columns(),
                next: END_OF_CHAIN,
            },
        }
        .write_to(file)?;

        file.seek(SeekFrom::Current(payload as i64))?;
        Ok(())
    }
}
