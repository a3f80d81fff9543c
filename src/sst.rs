//! Shared String Table resolution.
//!
//! An SST record carries the workbook's deduplicated strings: an 8-byte
//! count header (total references, then unique strings) followed by one
//! length-prefixed entry per unique string. Entries may carry rich-text
//! runs and an extension block alongside the character data; both are
//! skipped. The resolver operates on the fully reassembled payload, so a
//! string split across a continuation boundary arrives contiguous.

use crate::binary;
use crate::codepage;
use crate::error::{Error, Result};

// Option flags on each string entry
const FLAG_WIDE: u8 = 0x01;
const FLAG_EXTENDED: u8 = 0x04;
const FLAG_RICH: u8 = 0x08;

/// Ordered table of the workbook's unique strings.
///
/// Append-only and populated once per document; index order is insertion
/// order.
#[derive(Debug, Default)]
pub struct SharedStringTable {
    strings: Vec<String>,
}

impl SharedStringTable {
    pub fn new() -> Self {
        SharedStringTable::default()
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Entry `index`, in insertion order.
    ///
    /// An out-of-range index is a format error, not a silent empty result:
    /// any record referencing it points outside the table the document
    /// itself declared.
    pub fn lookup(&self, index: usize) -> Result<&str> {
        self.strings.get(index).map(String::as_str).ok_or_else(|| {
            Error::MalformedStringTable(format!(
                "string index {index} out of range (table has {} entries)",
                self.strings.len()
            ))
        })
    }

    /// Absorb one reassembled SST record payload, appending its unique
    /// strings to the table. Returns how many strings were appended.
    pub fn absorb(&mut self, payload: &[u8]) -> Result<usize> {
        // cstTotal (reference count, unused here) then cstUnique
        let unique = binary::read_u32_le(payload, 4).ok_or_else(|| {
            Error::MalformedStringTable(format!(
                "record shorter than the 8-byte count header ({} bytes)",
                payload.len()
            ))
        })? as usize;

        let before = self.strings.len();
        let mut offset = 8;
        for index in 0..unique {
            let (string, consumed) = parse_entry(payload, offset, index)?;
            self.strings.push(string);
            offset += consumed;
        }
        // Trailing bytes after the last declared entry are tolerated.
        Ok(self.strings.len() - before)
    }
}

/// Parse the entry starting at `offset`; returns the decoded string and
/// the number of payload bytes the entry occupies.
fn parse_entry(payload: &[u8], offset: usize, index: usize) -> Result<(String, usize)> {
    let overrun = |what: &str| {
        Error::MalformedStringTable(format!("entry {index}: {what} extends past the record payload"))
    };

    let cch = binary::read_u16_le(payload, offset).ok_or_else(|| overrun("length prefix"))? as usize;
    let flags = *payload.get(offset + 2).ok_or_else(|| overrun("option flags"))?;
    let mut pos = offset + 3;

    let mut run_bytes = 0usize;
    if flags & FLAG_RICH != 0 {
        run_bytes = binary::read_u16_le(payload, pos).ok_or_else(|| overrun("rich-text run count"))?
            as usize
            * 4;
        pos += 2;
    }
    let mut ext_bytes = 0usize;
    if flags & FLAG_EXTENDED != 0 {
        ext_bytes =
            binary::read_u32_le(payload, pos).ok_or_else(|| overrun("extension length"))? as usize;
        pos += 4;
    }

    let wide = flags & FLAG_WIDE != 0;
    let char_bytes = if wide { cch * 2 } else { cch };
    let chars = payload
        .get(pos..pos + char_bytes)
        .ok_or_else(|| overrun("character data"))?;
    let string = if wide {
        codepage::decode_wide(chars)
    } else {
        codepage::decode_narrow(chars)
    };
    pos += char_bytes;

    // Rich-text runs and the extension block trail the character data.
    let trailer = run_bytes
        .checked_add(ext_bytes)
        .and_then(|t| pos.checked_add(t))
        .ok_or_else(|| overrun("formatting trailer"))?;
    if trailer > payload.len() {
        return Err(overrun("formatting trailer"));
    }

    Ok((string, trailer - offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_payload(entries: &[&[u8]]) -> Vec<u8> {
        let mut payload = Vec::new();
        payload.extend_from_slice(&(entries.len() as u32).to_le_bytes()); // cstTotal
        payload.extend_from_slice(&(entries.len() as u32).to_le_bytes()); // cstUnique
        for entry in entries {
            payload.extend_from_slice(entry);
        }
        payload
    }

    fn narrow_entry(text: &str) -> Vec<u8> {
        let mut entry = Vec::new();
        entry.extend_from_slice(&(text.len() as u16).to_le_bytes());
        entry.push(0x00);
        entry.extend_from_slice(text.as_bytes());
        entry
    }

    fn wide_entry(text: &str) -> Vec<u8> {
        let units: Vec<u16> = text.encode_utf16().collect();
        let mut entry = Vec::new();
        entry.extend_from_slice(&(units.len() as u16).to_le_bytes());
        entry.push(FLAG_WIDE);
        for unit in units {
            entry.extend_from_slice(&unit.to_le_bytes());
        }
        entry
    }

    #[test]
    fn absorbs_narrow_entries_in_order() {
        let payload = table_payload(&[&narrow_entry("Hello"), &narrow_entry("World")]);
        let mut table = SharedStringTable::new();
        assert_eq!(table.absorb(&payload).unwrap(), 2);
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup(0).unwrap(), "Hello");
        assert_eq!(table.lookup(1).unwrap(), "World");
    }

    #[test]
    fn absorbs_wide_entries() {
        let payload = table_payload(&[&wide_entry("héllo"), &narrow_entry("plain")]);
        let mut table = SharedStringTable::new();
        table.absorb(&payload).unwrap();
        assert_eq!(table.lookup(0).unwrap(), "héllo");
        assert_eq!(table.lookup(1).unwrap(), "plain");
    }

    #[test]
    fn skips_rich_text_runs() {
        let mut entry = Vec::new();
        entry.extend_from_slice(&3u16.to_le_bytes()); // cch
        entry.push(FLAG_RICH);
        entry.extend_from_slice(&2u16.to_le_bytes()); // cRun
        entry.extend_from_slice(b"abc");
        entry.extend_from_slice(&[0u8; 8]); // two 4-byte runs
        let payload = table_payload(&[&entry, &narrow_entry("next")]);

        let mut table = SharedStringTable::new();
        table.absorb(&payload).unwrap();
        assert_eq!(table.lookup(0).unwrap(), "abc");
        assert_eq!(table.lookup(1).unwrap(), "next");
    }

    #[test]
    fn skips_extension_block() {
        let mut entry = Vec::new();
        entry.extend_from_slice(&2u16.to_le_bytes());
        entry.push(FLAG_EXTENDED);
        entry.extend_from_slice(&5u32.to_le_bytes()); // cbExtRst
        entry.extend_from_slice(b"ok");
        entry.extend_from_slice(&[0u8; 5]);
        let payload = table_payload(&[&entry, &narrow_entry("after")]);

        let mut table = SharedStringTable::new();
        table.absorb(&payload).unwrap();
        assert_eq!(table.lookup(0).unwrap(), "ok");
        assert_eq!(table.lookup(1).unwrap(), "after");
    }

    #[test]
    fn table_accumulates_across_records() {
        let mut table = SharedStringTable::new();
        table
            .absorb(&table_payload(&[&narrow_entry("one")]))
            .unwrap();
        table
            .absorb(&table_payload(&[&narrow_entry("two")]))
            .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.lookup(1).unwrap(), "two");
    }

    #[test]
    fn short_count_header_is_malformed() {
        let mut table = SharedStringTable::new();
        let err = table.absorb(&[0u8; 7]).unwrap_err();
        assert!(matches!(err, Error::MalformedStringTable(_)));
    }

    #[test]
    fn missing_entry_is_malformed() {
        // Declares two unique strings but carries only one
        let mut payload = table_payload(&[&narrow_entry("only")]);
        payload[4] = 2;
        let mut table = SharedStringTable::new();
        let err = table.absorb(&payload).unwrap_err();
        assert!(matches!(err, Error::MalformedStringTable(_)));
    }

    #[test]
    fn entry_length_past_payload_is_malformed() {
        let mut entry = narrow_entry("hi");
        entry[0] = 200; // cch says 200 characters, payload has 2
        let payload = table_payload(&[&entry]);
        let mut table = SharedStringTable::new();
        let err = table.absorb(&payload).unwrap_err();
        match err {
            Error::MalformedStringTable(message) => {
                assert!(message.contains("entry 0"));
                assert!(message.contains("character data"));
            }
            other => panic!("expected MalformedStringTable, got {other:?}"),
        }
    }

    #[test]
    fn rich_run_trailer_past_payload_is_malformed() {
        let mut entry = Vec::new();
        entry.extend_from_slice(&1u16.to_le_bytes());
        entry.push(FLAG_RICH);
        entry.extend_from_slice(&50u16.to_le_bytes()); // 200 run bytes, absent
        entry.extend_from_slice(b"x");
        let payload = table_payload(&[&entry]);
        let mut table = SharedStringTable::new();
        assert!(matches!(
            table.absorb(&payload),
            Err(Error::MalformedStringTable(_))
        ));
    }

    #[test]
    fn lookup_out_of_range_is_a_format_error() {
        let table = SharedStringTable::new();
        let err = table.lookup(0).unwrap_err();
        assert!(matches!(err, Error::MalformedStringTable(_)));

        let mut table = SharedStringTable::new();
        table
            .absorb(&table_payload(&[&narrow_entry("x")]))
            .unwrap();
        assert!(table.lookup(0).is_ok());
        assert!(table.lookup(1).is_err());
    }

    #[test]
    fn empty_string_entry_is_valid() {
        let payload = table_payload(&[&narrow_entry(""), &narrow_entry("tail")]);
        let mut table = SharedStringTable::new();
        table.absorb(&payload).unwrap();
        assert_eq!(table.lookup(0).unwrap(), "");
        assert_eq!(table.lookup(1).unwrap(), "tail");
    }
}
