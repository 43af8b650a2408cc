//! Catalog
//!
//! File-level view of a colstore file: the file header plus every table
//! reachable through the table-index chain.
//!
//! The catalog is written twice during import: once up front with
//! placeholder extent offsets so the descriptor region is reserved, and
//! once after the extents are on disk to backpatch the columns'
//! first-extent offsets. Both passes produce a byte-identical layout, so
//! the rewrite lands exactly over the reserved region.

use std::fs::File;
use std::io::{Seek, SeekFrom};

use crate::error::{ColstoreError, Result};
use crate::format::{FileHeader, IndexHeader, END_OF_CHAIN, FILE_HEADER_SIZE};
use crate::table::Table;

/// All tables of one colstore file
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    pub tables: Vec<Table>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_table(&mut self, table: Table) {
        self.tables.push(table);
    }

    pub fn nr_tables(&self) -> u64 {
        self.tables.len() as u64
    }

    /// Read the file header and walk the table-index chain.
    pub fn read(file: &mut File) -> Result<Self> {
        file.seek(SeekFrom::Start(0))?;
        let header = FileHeader::read_from(file)?;

        let mut catalog = Catalog::new();
        let mut offset = header.table_index_offset;
        let mut last_offset = 0u64;

        while offset != END_OF_CHAIN {
            if offset <= last_offset {
                return Err(ColstoreError::Format(format!(
                    "table index chain revisits offset {}",
                    offset
                )));
            }
            last_offset = offset;

            file.seek(SeekFrom::Start(offset))?;
            let block = IndexHeader::read_from(file)?;

            for _ in 0..block.count {
                catalog.add_table(Table::read_from(file)?);
            }

            offset = block.next;
        }

        tracing::debug!(
            "read catalog: {} table(s), {} column(s) total",
            catalog.nr_tables(),
            catalog
                .tables
                .iter()
                .map(|t| t.columns.len())
                .sum::<usize>()
        );

        Ok(catalog)
    }

    /// Write the file header, the table-index block, and every table
    /// descriptor from the start of the file.
    pub fn write(&self, file: &mut File) -> Result<()> {
        file.seek(SeekFrom::Start(0))?;

        FileHeader {
            reserved_index_offset: 0,
            table_index_offset: FILE_HEADER_SIZE,
        }
        .write_to(file)?;

        IndexHeader {
            count: self.nr_tables(),
            next: END_OF_CHAIN,
        }
        .write_to(file)?;

        for table in &self.tables {
            table.write_to(file)?;
        }

        Ok(())
    }
}
