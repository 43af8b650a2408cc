//! # colstore
//!
//! A columnar, append-oriented storage engine:
//! - Tabular data persisted as per-column byte streams
//! - Streams split into compressed chunks ("extents") chained on disk
//! - Pluggable compression codecs (LZ4, Snappy, Zstandard)
//! - Bulk import (rows -> column extents) and export (extents -> rows)
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                  Import/Export Pipeline                     │
//! │              (generic RowSource contract)                   │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │   Catalog   │          │   Extent    │
//!   │ Table/Column│          │   Manager   │
//!   └──────┬──────┘          └──────┬──────┘
//!          │                        │
//!          │                 ┌──────┴──────┐
//!          │                 ▼             ▼
//!          │          ┌───────────┐ ┌───────────┐
//!          │          │   Codec   │ │   mmap    │
//!          │          │ (3 kinds) │ │  windows  │
//!          ▼          └─────┬─────┘ └─────┬─────┘
//!   ┌─────────────────────────────────────────┐
//!   │              Disk Format                │
//!   │   (chained indexes + extent chains)     │
//!   └─────────────────────────────────────────┘
//! ```
//!
//! Single-threaded, synchronous, blocking I/O throughout: one operation
//! owns the file for its whole duration, and at most one extent per
//! column is mapped at any time.

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod format;
pub mod codec;
pub mod extent;
pub mod table;
pub mod catalog;
pub mod pipeline;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{ColstoreError, Result};
pub use config::Config;
pub use codec::Codec;
pub use catalog::Catalog;
pub use table::{Column, ColumnType, Table};
pub use pipeline::RowSource;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of colstore
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
