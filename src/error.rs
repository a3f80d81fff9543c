//! Error types for workbook text extraction.

use thiserror::Error;

/// Result type alias for record stream operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while decoding a workbook record stream.
///
/// The first three kinds are unrecoverable for the current document: a
/// corrupted record stream gives no reliable resynchronization point, so
/// extraction aborts with no partial output.
#[derive(Error, Debug)]
pub enum Error {
    /// The byte source ended before an expected header or payload could be
    /// fully read.
    #[error("stream truncated reading {context}: needed {needed} bytes, {remaining} remain")]
    TruncatedStream {
        /// What was being read when the stream ran out
        context: &'static str,
        /// Bytes the read required
        needed: usize,
        /// Bytes actually left
        remaining: usize,
    },

    /// A record's declared payload length extends past the available bytes.
    #[error("record 0x{record_type:04X} payload truncated: {declared} bytes declared, {remaining} available")]
    TruncatedRecord {
        /// Type tag of the offending record
        record_type: u16,
        /// Payload length the record declares
        declared: usize,
        /// Bytes actually available
        remaining: usize,
    },

    /// A shared string table entry is inconsistent with the remaining
    /// payload, or a string index points past the end of the table.
    #[error("malformed shared string table: {0}")]
    MalformedStringTable(String),

    /// Caller-requested interruption observed between logical records.
    #[error("extraction cancelled by caller")]
    Cancelled,

    /// I/O failure while draining a streamed byte source.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this is a caller-requested cancellation rather than bad
    /// input. Callers use this to avoid logging a cancelled crawl as a
    /// corrupt document.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Error::Cancelled)
    }
}

/// Failure of one whole extraction call, carrying the source identifier
/// supplied by the caller for diagnostics.
#[derive(Error, Debug)]
#[error("failed to extract text from '{location}': {kind}")]
pub struct ParseError {
    location: String,
    #[source]
    kind: Error,
}

impl ParseError {
    pub(crate) fn new(location: &str, kind: Error) -> Self {
        ParseError {
            location: location.to_owned(),
            kind,
        }
    }

    /// The source locator the caller passed in.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// The underlying record stream error.
    pub fn kind(&self) -> &Error {
        &self.kind
    }

    /// See [`Error::is_cancelled`].
    pub fn is_cancelled(&self) -> bool {
        self.kind.is_cancelled()
    }
}
