//! Text extraction from a workbook sub-stream.
//!
//! Drives the record framer over the stream, routes each logical record to
//! the decoder that knows its payload layout, and collects the textual
//! content in record-encounter order. Numeric cells and shared strings are
//! the only text-bearing records recovered; everything else passes through
//! as a record boundary only.

use std::io::Read;

use crate::binary;
use crate::error::{Error, ParseError, Result};
use crate::records::{LogicalRecord, RecordIter, RecordKind, NUMBER};
use crate::sst::SharedStringTable;

/// Offset of the IEEE 754 value inside a `Number` payload; row, column and
/// format index come first.
const NUMBER_VALUE_OFFSET: usize = 6;
/// Fixed payload size of a `Number` record.
const NUMBER_PAYLOAD_LEN: usize = 14;

/// Ordered, append-only buffer of extracted text.
///
/// One line terminator is appended per logical record regardless of
/// content, plus one per shared string. Downstream consumers rely on the
/// per-record cadence, so it is part of the output contract.
#[derive(Debug, Default)]
struct TextAccumulator {
    buf: String,
}

impl TextAccumulator {
    /// Append text without a terminator.
    fn push_text(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    /// Append one text line with its terminator.
    fn push_line(&mut self, text: &str) {
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    /// Terminator marking a record boundary.
    fn push_break(&mut self) {
        self.buf.push('\n');
    }

    #[cfg(test)]
    fn as_str(&self) -> &str {
        &self.buf
    }

    /// Final output: the accumulated lines, trimmed.
    fn finish(self) -> String {
        self.buf.trim().to_owned()
    }
}

/// Orchestrator states. Any stream or format error moves to `Failed` and
/// aborts with no partial output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    Ready,
    Streaming,
    Done,
    Failed,
}

/// One-shot text extraction over a workbook sub-stream.
///
/// Owns the cursor, the shared string table and the text buffer for the
/// duration of a single parse; nothing is shared across invocations.
pub struct TextExtractor<'a> {
    records: RecordIter<'a>,
    strings: SharedStringTable,
    text: TextAccumulator,
    state: ParseState,
}

impl<'a> TextExtractor<'a> {
    pub fn new(stream: &'a [u8]) -> Self {
        TextExtractor {
            records: RecordIter::new(stream),
            strings: SharedStringTable::new(),
            text: TextAccumulator::default(),
            state: ParseState::Ready,
        }
    }

    /// Run to completion and return the trimmed text.
    pub fn run(self) -> Result<String> {
        self.run_with_cancel(|| false)
    }

    /// Run to completion, polling `cancel` between logical records.
    ///
    /// A `true` from `cancel` aborts with [`Error::Cancelled`]; no partial
    /// text is returned.
    pub fn run_with_cancel(mut self, mut cancel: impl FnMut() -> bool) -> Result<String> {
        self.stream(&mut cancel)?;
        Ok(self.text.finish())
    }

    fn stream(&mut self, cancel: &mut dyn FnMut() -> bool) -> Result<()> {
        debug_assert_eq!(self.state, ParseState::Ready);
        self.state = ParseState::Streaming;
        loop {
            if cancel() {
                self.state = ParseState::Failed;
                return Err(Error::Cancelled);
            }
            let record = match self.records.next() {
                None => break,
                Some(Ok(record)) => record,
                Some(Err(e)) => {
                    self.state = ParseState::Failed;
                    return Err(e);
                }
            };
            if let Err(e) = self.dispatch(&record) {
                self.state = ParseState::Failed;
                return Err(e);
            }
        }
        self.state = ParseState::Done;
        Ok(())
    }

    fn dispatch(&mut self, record: &LogicalRecord) -> Result<()> {
        match record.kind() {
            RecordKind::Number => {
                let value = decode_number(&record.data)?;
                let mut formatted = ryu::Buffer::new();
                self.text.push_text(formatted.format(value));
            }
            RecordKind::SharedStrings => {
                let appended = self.strings.absorb(&record.data)?;
                let first = self.strings.len() - appended;
                for index in first..self.strings.len() {
                    let entry = self.strings.lookup(index)?;
                    self.text.push_line(entry);
                }
            }
            RecordKind::Other => {}
        }
        // One terminator per record boundary, no-ops included
        self.text.push_break();
        Ok(())
    }
}

fn decode_number(payload: &[u8]) -> Result<f64> {
    binary::read_f64_le(payload, NUMBER_VALUE_OFFSET).ok_or(Error::TruncatedRecord {
        record_type: NUMBER,
        declared: NUMBER_PAYLOAD_LEN,
        remaining: payload.len(),
    })
}

/// Extract the textual content of a workbook sub-stream.
///
/// `stream` is the workbook's record stream as extracted from the OLE2
/// container by the caller; `location` identifies the source document in
/// error reports.
pub fn extract_text(stream: &[u8], location: &str) -> std::result::Result<String, ParseError> {
    TextExtractor::new(stream)
        .run()
        .map_err(|kind| ParseError::new(location, kind))
}

/// Like [`extract_text`], polling `cancel` between logical records so a
/// caller can abandon a slow or unwanted document.
pub fn extract_text_with_cancel(
    stream: &[u8],
    location: &str,
    cancel: impl FnMut() -> bool,
) -> std::result::Result<String, ParseError> {
    TextExtractor::new(stream)
        .run_with_cancel(cancel)
        .map_err(|kind| ParseError::new(location, kind))
}

/// Drain `reader` and extract the textual content of the drained stream.
///
/// The reader is consumed up front and dropped on every exit path,
/// including failure.
pub fn extract_text_from_reader<R: Read>(
    mut reader: R,
    location: &str,
) -> std::result::Result<String, ParseError> {
    let mut stream = Vec::new();
    if let Err(e) = reader.read_to_end(&mut stream) {
        return Err(ParseError::new(location, Error::Io(e)));
    }
    drop(reader);
    extract_text(&stream, location)
}
