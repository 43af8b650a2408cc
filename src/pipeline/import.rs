//! Import
//!
//! Drives a row source into per-column extent chains.
//!
//! Per column, the extent lifecycle runs Idle → Preparing → Accumulating
//! ⇄ Flushing → Finished. Column extents interleave in the file, so a
//! full extent is flushed wherever the end of the file happens to be,
//! and its predecessor in the chain is finished with a forward link only
//! then, once the new extent's position is known. The final extent of
//! every column is flushed and finished with the chain terminator, even
//! when partially filled.

use std::fs::{File, OpenOptions};
use std::path::Path;

use crate::config::Config;
use crate::catalog::Catalog;
use crate::error::{ColstoreError, Result};
use crate::extent::ExtentWriter;
use crate::format::LAST_EXTENT;
use crate::pipeline::RowSource;
use crate::table::Table;

/// Import every row of `source` into `table`'s columns, appending extents
/// at the end of the file as they fill up.
///
/// Records each column's first-extent offset in the column; the caller
/// is responsible for re-serializing the descriptors afterwards.
pub fn import_values(
    table: &mut Table,
    file: &mut File,
    source: &mut dyn RowSource,
    config: &Config,
) -> Result<()> {
    // Prepare one extent per column
    let mut writers: Vec<ExtentWriter> = table
        .columns
        .iter()
        .map(|column| ExtentWriter::prepare(&column.name, config.codec, config.max_extent_len))
        .collect();
    // Flushed predecessor awaiting its forward link, per column
    let mut pending: Vec<Option<ExtentWriter>> = table.columns.iter().map(|_| None).collect();
    // First-extent offsets, discovered at each column's first flush
    let mut first_extents = vec![LAST_EXTENT; table.columns.len()];

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

            if !writers[ndx].has_room(value) {
                // Flush the full extent at the end of the file and link
                // its predecessor in the chain, now that the position of
                // its successor is known.
                writers[ndx].flush(file)?;
                let offset = writers[ndx].trailer_offset();
                match pending[ndx].take() {
                    Some(mut prev) => prev.finish(file, offset)?,
                    None => first_extents[ndx] = offset,
                }

                let fresh = ExtentWriter::prepare(&column.name, config.codec, config.max_extent_len);
                pending[ndx] = Some(std::mem::replace(&mut writers[ndx], fresh));

                if !writers[ndx].has_room(value) {
                    return Err(ColstoreError::Format(format!(
                        "value of {} bytes in column '{}' exceeds the extent capacity of {}",
                        value.len(),
                        column.name,
                        config.max_extent_len
                    )));
                }
            }
            writers[ndx].write_value(value);
        }
    }

    source.end()?;

    // Flush each column's last extent, link its predecessor, and finish
    // it with the chain terminator.
    for (ndx, writer) in writers.iter_mut().enumerate() {
        writer.flush(file)?;
        let offset = writer.trailer_offset();
        match pending[ndx].take() {
            Some(mut prev) => prev.finish(file, offset)?,
            None => first_extents[ndx] = offset,
        }
        writer.finish(file, LAST_EXTENT)?;
    }

    for (column, offset) in table.columns.iter_mut().zip(first_extents) {
        column.first_extent = offset;
    }

    tracing::info!(
        "imported {} row(s) into table '{}' ({} column(s))",
        nr_rows,
        table.name,
        table.columns.len()
    );

    Ok(())
}

/// Create `path`, import `source` into `table`, and durably sync.
///
/// The catalog is written twice: once up front to reserve the descriptor
/// region, once after import to backpatch the first-extent offsets.
pub fn import(
    path: &Path,
    table: Table,
    source: &mut dyn RowSource,
    config: &Config,
) -> Result<Catalog> {
    let mut file = OpenOptions::new()
        .create(true)
        .read(true)
        .write(true)
        .truncate(true)
        .open(path)?;

    let mut catalog = Catalog::new();
    catalog.add_table(table);

    catalog.write(&mut file)?;

    import_values(&mut catalog.tables[0], &mut file, source, config)?;

    catalog.write(&mut file)?;
    file.sync_all()?;

    Ok(catalog)
}
