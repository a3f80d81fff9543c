//! Codepage decoding for workbook strings.
//!
//! BIFF8 stores each string either as single-byte text in the workbook's
//! codepage or as UTF-16LE, selected by a per-string flag. Both paths
//! normalize to UTF-8.

use encoding_rs::{UTF_16LE, WINDOWS_1252};

/// Decode single-byte ("compressed") string bytes.
///
/// Windows-1252 is the default workbook codepage for Western-script
/// documents and a superset of Latin-1, which is what the low bytes of
/// compressed BIFF8 strings carry.
pub(crate) fn decode_narrow(bytes: &[u8]) -> String {
    WINDOWS_1252.decode_without_bom_handling(bytes).0.into_owned()
}

/// Decode UTF-16LE string bytes.
///
/// Invalid code units are replaced rather than treated as fatal; only
/// length inconsistencies are format errors, decided by the caller.
pub(crate) fn decode_wide(bytes: &[u8]) -> String {
    UTF_16LE.decode_without_bom_handling(bytes).0.into_owned()
}
