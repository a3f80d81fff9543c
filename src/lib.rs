//! Text extraction from legacy Microsoft Excel binary workbooks.
//!
//! This crate decodes the BIFF record stream found in the `Workbook`
//! sub-stream of pre-XML Excel files (`.xls`, `.xla`) and emits the
//! spreadsheet's textual content (shared strings and numeric cell values)
//! in record-encounter order, one line per item. The output is meant for
//! search indexing, not for reconstructing the spreadsheet: cell
//! coordinates, formatting and formulas are not recovered.
//!
//! The enclosing OLE2 compound-file container is not handled here. Callers
//! extract the workbook sub-stream with their container reader of choice
//! and hand in the raw bytes (or a reader that yields them).
//!
//! # Example
//!
//! ```
//! // A minimal workbook stream: one numeric cell record
//! let mut stream = Vec::new();
//! stream.extend_from_slice(&[0x03, 0x02, 0x0E, 0x00]); // Number header, 14-byte payload
//! stream.extend_from_slice(&[0u8; 6]); // row, column, format index
//! stream.extend_from_slice(&3.5f64.to_le_bytes());
//!
//! let text = xls_text::extract_text(&stream, "report.xls")?;
//! assert_eq!(text, "3.5");
//! # Ok::<(), xls_text::ParseError>(())
//! ```
//!
//! Malformed input is never silently truncated into partial text: any
//! corruption aborts the parse with an error naming the source document.
//! Long-running extractions can be abandoned cooperatively through
//! [`extract_text_with_cancel`].

/// Little-endian read helpers for record payloads
mod binary;

/// Codepage decoding for workbook strings
mod codepage;

/// Bounded sequential reader over the sub-stream bytes
mod cursor;

/// Error types for text extraction
mod error;

/// Record framing and continuation reassembly
mod records;

/// Shared string table resolution
mod sst;

/// Record dispatch and the extraction orchestrator
mod extract;

pub use error::{Error, ParseError, Result};
pub use extract::{
    extract_text, extract_text_from_reader, extract_text_with_cancel, TextExtractor,
};
pub use records::{LogicalRecord, RecordHeader, RecordIter, RecordKind, CONTINUE, NUMBER, SST};
pub use sst::SharedStringTable;
