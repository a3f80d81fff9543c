//! Sequential bounded reader over the workbook sub-stream bytes.

use crate::error::{Error, Result};

/// Cursor over the raw sub-stream.
///
/// Reads are bounded: asking for more bytes than remain fails with
/// [`Error::TruncatedStream`] instead of short-reading. The only side
/// effect of a successful read is position advancement.
#[derive(Debug)]
pub(crate) struct StreamCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> StreamCursor<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        StreamCursor { data, pos: 0 }
    }

    /// Current offset from the start of the sub-stream.
    #[inline]
    pub(crate) fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    #[inline]
    pub(crate) fn remaining(&self) -> usize {
        self.data.len() - self.position()
    }

    /// Read the next `n` bytes and advance past them.
    ///
    /// `context` names what the bytes were expected to be, for diagnostics.
    pub(crate) fn read(&mut self, n: usize, context: &'static str) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(Error::TruncatedStream {
                context,
                needed: n,
                remaining: self.remaining(),
            });
        }
        let bytes = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(bytes)
    }

    /// Look at the next `n` bytes without advancing, or `None` if fewer
    /// than `n` remain.
    pub(crate) fn peek(&self, n: usize) -> Option<&'a [u8]> {
        self.data.get(self.pos..self.pos.checked_add(n)?)
    }
}
