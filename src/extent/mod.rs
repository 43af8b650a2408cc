//! Extent Module
//!
//! An extent is the unit of compressed storage for one column: a chunk of
//! NUL-delimited values, compressed as one contiguous on-disk block with a
//! trailer recording its compressed size and a link to the next extent.
//!
//! ## Write Lifecycle
//! ```text
//! prepare ──▶ accumulate (write_value) ──▶ flush ──▶ finish
//!    │                                                  │
//!    └───────────── next extent of the column ◀─────────┘
//! ```
//! `prepare` allocates the accumulation buffer; `flush` writes trailer,
//! recorded logical size, and compressed payload contiguously at the end
//! of the file; `finish` seeks back and patches the trailer's forward
//! link once the successor extent's position is known.
//!
//! ## Read Lifecycle
//! One extent at a time per column: map a bounded window over the
//! compressed payload, decompress into a buffer sized to the recorded
//! logical size, release the window, iterate values, then chain to the
//! next extent.

mod reader;
mod segment;
mod writer;

pub use reader::ExtentPayload;
pub use segment::Segment;
pub use writer::ExtentWriter;
