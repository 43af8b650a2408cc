//! Export
//!
//! Streams a table's columns back out as separated-value records.
//!
//! Output is staged in a bounded reusable buffer and flushed whenever
//! the next piece would not fit, amortizing write syscalls over a batch
//! of values.

use std::fs::File;
use std::io::Write;
use std::ops::Range;
use std::path::Path;

use bytes::BytesMut;

use crate::catalog::Catalog;
use crate::codec::Codec;
use crate::config::Config;
use crate::error::{ColstoreError, Result};
use crate::extent::Segment;
use crate::pipeline::RowSource;
use crate::table::{Column, Table};

// =============================================================================
// Output Buffer
// =============================================================================

/// Bounded reusable staging buffer for export output
struct OutputBuffer {
    buf: BytesMut,
    capacity: usize,
}

impl OutputBuffer {
    fn new(capacity: usize) -> Self {
        Self {
            buf: BytesMut::with_capacity(capacity),
            capacity,
        }
    }

    /// Stage `bytes`, flushing first if they would not fit. Pieces larger
    /// than the whole buffer are written through directly.
    fn append(&mut self, output: &mut impl Write, bytes: &[u8]) -> Result<()> {
        if self.buf.len() + bytes.len() > self.capacity {
            self.flush(output)?;
        }
        if bytes.len() > self.capacity {
            output.write_all(bytes)?;
        } else {
            self.buf.extend_from_slice(bytes);
        }
        Ok(())
    }

    fn flush(&mut self, output: &mut impl Write) -> Result<()> {
        if !self.buf.is_empty() {
            output.write_all(&self.buf)?;
            self.buf.clear();
        }
        Ok(())
    }
}

// =============================================================================
// Storage-Internal Row Source
// =============================================================================

/// Row source reading extent chains back into rows, one [`Segment`] per
/// column. The row stream ends when the first column's chain is
/// exhausted; a shorter chain in any other column surfaces as a missing
/// value, which the pipeline treats as premature end of data.
pub struct TableRowSource<'a> {
    table: &'a Table,
    file: &'a File,
    codec: Codec,
    segments: Vec<Segment>,
    current: Vec<Option<Range<usize>>>,
}

impl<'a> TableRowSource<'a> {
    pub fn new(table: &'a Table, file: &'a File, codec: Codec) -> Self {
        Self {
            table,
            file,
            codec,
            segments: Vec::new(),
            current: Vec::new(),
        }
    }
}

impl RowSource for TableRowSource<'_> {
    fn begin(&mut self) -> Result<()> {
        self.segments = self
            .table
            .columns
            .iter()
            .map(|column| Segment::open(column, self.file, self.codec))
            .collect::<Result<Vec<_>>>()?;
        self.current = vec![None; self.table.columns.len()];
        Ok(())
    }

    fn next_row(&mut self) -> Result<bool> {
        for (ndx, segment) in self.segments.iter_mut().enumerate() {
            self.current[ndx] = segment.next_value()?;
        }
        Ok(self.current.first().is_some_and(|v| v.is_some()))
    }

    fn value_for(&self, column: &Column) -> Option<&[u8]> {
        let ndx = self
            .table
            .columns
            .iter()
            .position(|c| c.column_id == column.column_id)?;
        let range = self.current[ndx].clone()?;
        Some(self.segments[ndx].value(range))
    }

    fn end(&mut self) -> Result<()> {
        self.segments.clear();
        self.current.clear();
        Ok(())
    }
}

// =============================================================================
// Export
// =============================================================================

/// Export every row of `source` for `table`'s columns: one header record
/// of column names, then one record per row, fields separated by the
/// configured separators.
pub fn export_values(
    table: &Table,
    source: &mut dyn RowSource,
    output: &mut File,
    config: &Config,
) -> Result<()> {
    let mut buffer = OutputBuffer::new(config.output_buffer_size);

    // Header record
    for (ndx, column) in table.columns.iter().enumerate() {
        buffer.append(output, column.name.as_bytes())?;
        let sep = if ndx == table.columns.len() - 1 {
            config.record_separator
        } else {
            config.field_separator
        };
        buffer.append(output, &[sep])?;
    }

    source.begin()?;

    let mut nr_rows = 0u64;
    while source.next_row()? {
        nr_rows += 1;
        for (ndx, column) in table.columns.iter().enumerate() {
            let value = source.value_for(column).ok_or_else(|| {
                ColstoreError::PrematureEndOfData(format!(
                    "row {} has no value for column '{}'",
                    nr_rows, column.name
                ))
            })?;

            buffer.append(output, value)?;
            let sep = if ndx == table.columns.len() - 1 {
                config.record_separator
            } else {
                config.field_separator
            };
            buffer.append(output, &[sep])?;
        }
    }

    source.end()?;

    buffer.flush(output)?;

    tracing::info!("exported {} row(s) from table '{}'", nr_rows, table.name);

    Ok(())
}

/// Export the single table of the colstore file at `input_path` into a
/// freshly created file at `output_path`, durably synced before success.
///
/// Fails with [`ColstoreError::TableCount`] unless the file contains
/// exactly one table; the guard runs before any row is emitted.
pub fn export(input_path: &Path, output_path: &Path, config: &Config) -> Result<()> {
    let mut input = File::open(input_path)?;
    let mut output = File::create(output_path)?;

    let catalog = Catalog::read(&mut input)?;
    if catalog.nr_tables() != 1 {
        return Err(ColstoreError::TableCount {
            found: catalog.nr_tables(),
        });
    }

    let table = &catalog.tables[0];
    let mut source = TableRowSource::new(table, &input, config.codec);
    export_values(table, &mut source, &mut output, config)?;

    output.sync_all()?;
    Ok(())
}
