//! Little-endian field reads over borrowed slices.
//!
//! Every read is bounds-checked and yields `None` past the end of the slice,
//! so layout code never indexes out of range.

#[inline]
pub fn le_u32(b: &[u8], at: usize) -> Option<u32> {
    b.get(at..at.checked_add(4)?)
        .and_then(|s| s.try_into().ok())
        .map(u32::from_le_bytes)
}

#[inline]
pub fn le_u64(b: &[u8], at: usize) -> Option<u64> {
    b.get(at..at.checked_add(8)?)
        .and_then(|s| s.try_into().ok())
        .map(u64::from_le_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_little_endian() {
        let b = [0x78, 0x56, 0x34, 0x12, 0, 0, 0, 0, 0xff];
        assert_eq!(le_u32(&b, 0), Some(0x1234_5678));
        assert_eq!(le_u64(&b, 0), Some(0x1234_5678));
        assert_eq!(le_u32(&b, 5), Some(0xff00_0000));
    }

    #[test]
    fn past_end_is_none() {
        let b = [0u8; 6];
        assert_eq!(le_u32(&b, 3), None);
        assert_eq!(le_u64(&b, 0), None);
        assert_eq!(le_u32(&b, usize::MAX), None);
    }
}
