//! Import/Export Pipeline
//!
//! Moves data between row-oriented sources/sinks and the column-oriented
//! extent store. Both directions run against the same [`RowSource`]
//! contract, whether the rows come from storage itself (export) or from
//! an external producer such as a delimited-text parser (import).
//!
//! ```text
//! import:  RowSource ──rows──▶ per-column ExtentWriter chains
//! export:  per-column Segments ──rows──▶ separated-value sink
//! ```

mod export;
mod import;

pub use export::{export, export_values, TableRowSource};
pub use import::{import, import_values};

use crate::error::Result;
use crate::table::Column;

/// Row iterator contract shared by all row sources and sinks.
///
/// `begin` / `next_row` / `end` drive iteration; `value_for` fetches the
/// current row's value for a column, matched by numeric column id.
/// `None` from `value_for` while a row is current means the source has
/// no value for that column — the pipeline treats this as premature end
/// of data.
pub trait RowSource {
    /// Acquire per-iteration resources.
    fn begin(&mut self) -> Result<()>;

    /// Advance to the next row; `false` once the source is exhausted.
    fn next_row(&mut self) -> Result<bool>;

    /// The current row's value for `column`, or `None` if absent.
    fn value_for(&self, column: &Column) -> Option<&[u8]>;

    /// Release per-iteration resources.
    fn end(&mut self) -> Result<()>;
}
