//! Little-endian read helpers for record payloads.

use zerocopy::{FromBytes, F64, LE, U16, U32};

/// Read a little-endian u16 from a byte slice at the given offset.
#[inline]
pub(crate) fn read_u16_le(data: &[u8], offset: usize) -> Option<u16> {
    let end = offset.checked_add(2)?;
    U16::<LE>::read_from_bytes(data.get(offset..end)?)
        .ok()
        .map(|v| v.get())
}

/// Read a little-endian u32 from a byte slice at the given offset.
#[inline]
pub(crate) fn read_u32_le(data: &[u8], offset: usize) -> Option<u32> {
    let end = offset.checked_add(4)?;
    U32::<LE>::read_from_bytes(data.get(offset..end)?)
        .ok()
        .map(|v| v.get())
}

/// Read a little-endian f64 from a byte slice at the given offset.
#[inline]
pub(crate) fn read_f64_le(data: &[u8], offset: usize) -> Option<f64> {
    let end = offset.checked_add(8)?;
    F64::<LE>::read_from_bytes(data.get(offset..end)?)
        .ok()
        .map(|v| v.get())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_u16_le() {
        let data = [0x34, 0x12, 0x78, 0x56];
        assert_eq!(read_u16_le(&data, 0), Some(0x1234));
        assert_eq!(read_u16_le(&data, 2), Some(0x5678));
        assert_eq!(read_u16_le(&data, 3), None);
    }

    #[test]
    fn test_read_u32_le() {
        let data = [0x78, 0x56, 0x34, 0x12];
        assert_eq!(read_u32_le(&data, 0), Some(0x12345678));
        assert_eq!(read_u32_le(&data, 1), None);
    }

    #[test]
    fn test_read_f64_le() {
        let data = 3.5f64.to_le_bytes();
        assert_eq!(read_f64_le(&data, 0), Some(3.5));
        assert_eq!(read_f64_le(&data, 1), None);
    }

    #[test]
    fn test_offset_overflow() {
        let data = [0u8; 16];
        assert_eq!(read_u16_le(&data, usize::MAX), None);
        assert_eq!(read_u32_le(&data, usize::MAX - 1), None);
    }
}
