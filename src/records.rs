//! BIFF record framing.
//!
//! The workbook sub-stream is a sequence of variable-length records, each
//! introduced by a 4-byte header (type tag + declared payload length, both
//! little-endian). Records larger than a single physical record's size
//! limit spill into `Continue` records; the framer folds those back into
//! the preceding logical record so later stages only ever see fully
//! reassembled payloads.

use crate::cursor::StreamCursor;
use crate::error::{Error, Result};

/// Cell holding an IEEE 754 double (`Number`)
pub const NUMBER: u16 = 0x0203;
/// Shared String Table
pub const SST: u16 = 0x00FC;
/// Overflow payload for the preceding record
pub const CONTINUE: u16 = 0x003C;

/// Size of a record header: type tag + declared payload length.
pub(crate) const HEADER_LEN: usize = 4;

/// Record header (4 bytes: type + length).
#[derive(Debug, Clone, Copy)]
pub struct RecordHeader {
    pub record_type: u16,
    pub data_len: u16,
}

impl RecordHeader {
    fn parse(bytes: &[u8]) -> Self {
        RecordHeader {
            record_type: u16::from_le_bytes([bytes[0], bytes[1]]),
            data_len: u16::from_le_bytes([bytes[2], bytes[3]]),
        }
    }
}

/// The routing classes text extraction distinguishes.
///
/// The format defines hundreds of record types; everything that carries no
/// extractable text is `Other`. Supporting another text-bearing record
/// means adding a variant here and a handler in the dispatcher, not
/// touching the framing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// Numeric cell value
    Number,
    /// Shared string table
    SharedStrings,
    /// Ignored by text extraction
    Other,
}

/// One semantic record, with continuation payloads already folded in.
#[derive(Debug, Clone)]
pub struct LogicalRecord {
    /// Type tag from the introducing header
    pub record_type: u16,
    /// Reassembled payload
    pub data: Vec<u8>,
}

impl LogicalRecord {
    /// Routing class for the dispatcher.
    pub fn kind(&self) -> RecordKind {
        match self.record_type {
            NUMBER => RecordKind::Number,
            SST => RecordKind::SharedStrings,
            _ => RecordKind::Other,
        }
    }
}

/// Iterator over the logical records of a workbook sub-stream.
///
/// Lazy, finite, and non-restartable. A tail shorter than one header is
/// sector padding and ends the sequence cleanly; a payload cut short by
/// the end of the stream is an error.
#[derive(Debug)]
pub struct RecordIter<'a> {
    cursor: StreamCursor<'a>,
}

impl<'a> RecordIter<'a> {
    pub fn new(stream: &'a [u8]) -> Self {
        RecordIter {
            cursor: StreamCursor::new(stream),
        }
    }

    /// Type tag of the next physical record, if a full header remains.
    fn peek_type(&self) -> Option<u16> {
        self.cursor
            .peek(HEADER_LEN)
            .map(|header| u16::from_le_bytes([header[0], header[1]]))
    }

    fn read_header(&mut self) -> Result<RecordHeader> {
        Ok(RecordHeader::parse(
            self.cursor.read(HEADER_LEN, "record header")?,
        ))
    }

    fn read_payload(&mut self, header: RecordHeader) -> Result<&'a [u8]> {
        let declared = header.data_len as usize;
        if self.cursor.remaining() < declared {
            return Err(Error::TruncatedRecord {
                record_type: header.record_type,
                declared,
                remaining: self.cursor.remaining(),
            });
        }
        self.cursor.read(declared, "record payload")
    }

    fn read_logical(&mut self) -> Result<LogicalRecord> {
        let header = self.read_header()?;
        let mut data = self.read_payload(header)?.to_vec();

        // Fold any run of Continue records into this one.
        while self.peek_type() == Some(CONTINUE) {
            let continuation = self.read_header()?;
            data.extend_from_slice(self.read_payload(continuation)?);
        }

        Ok(LogicalRecord {
            record_type: header.record_type,
            data,
        })
    }
}

impl Iterator for RecordIter<'_> {
    type Item = Result<LogicalRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor.remaining() < HEADER_LEN {
            return None;
        }
        Some(self.read_logical())
    }
}
