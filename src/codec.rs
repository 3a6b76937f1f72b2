#![doc = r#"
Fixed-width big-endian integer encoding

Every multi-byte number in a Standard MIDI File is stored big-endian
(most significant byte first) in a field of fixed width:

```text
chunk length     4 bytes
format           2 bytes
track count      2 bytes
tempo            3 bytes
```

[`encode_big_endian`] is the one routine all of those fields go through.
"#]

use alloc::vec::Vec;
use thiserror::Error;

/// The value handed to [`encode_big_endian`] needs more bytes than the field has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{value} does not fit in {width} byte(s)")]
pub struct ByteWidthError {
    /// The value that was being encoded
    pub value: u64,
    /// The width of the field in bytes
    pub width: usize,
}

/// Encode `value` into exactly `width` bytes, most significant byte first.
///
/// The result is zero-padded on the left.
///
/// # Example
/// ```rust
/// # use smf_tracks::codec::encode_big_endian;
/// assert_eq!(encode_big_endian(500_000, 3).unwrap(), vec![0x07, 0xA1, 0x20]);
/// assert_eq!(encode_big_endian(6, 4).unwrap(), vec![0, 0, 0, 6]);
/// assert!(encode_big_endian(0x1_0000, 2).is_err());
/// ```
pub fn encode_big_endian(value: u64, width: usize) -> Result<Vec<u8>, ByteWidthError> {
    if !fits_in(value, width) {
        return Err(ByteWidthError { value, width });
    }
    let be = value.to_be_bytes();
    let mut out = Vec::with_capacity(width);
    // widths above 8 only ever add leading zeroes
    out.resize(width.saturating_sub(be.len()), 0);
    out.extend_from_slice(&be[be.len() - width.min(be.len())..]);
    Ok(out)
}

/// Returns true if `value` can be represented in `width` bytes.
pub const fn fits_in(value: u64, width: usize) -> bool {
    if width >= 8 {
        return true;
    }
    value >> (width * 8) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn pads_on_the_left() {
        assert_eq!(encode_big_endian(1, 2).unwrap(), vec![0x00, 0x01]);
        assert_eq!(encode_big_endian(0, 4).unwrap(), vec![0, 0, 0, 0]);
        assert_eq!(encode_big_endian(0xFF, 1).unwrap(), vec![0xFF]);
    }

    #[test]
    fn field_edges() {
        assert_eq!(encode_big_endian(65_535, 2).unwrap(), vec![0xFF, 0xFF]);
        assert_eq!(
            encode_big_endian(65_536, 2),
            Err(ByteWidthError {
                value: 65_536,
                width: 2
            })
        );
        assert_eq!(
            encode_big_endian(0xFF_FFFF, 3).unwrap(),
            vec![0xFF, 0xFF, 0xFF]
        );
        assert!(encode_big_endian(0x100_0000, 3).is_err());
    }

    #[test]
    fn zero_width_only_holds_zero() {
        assert_eq!(encode_big_endian(0, 0).unwrap(), Vec::<u8>::new());
        assert!(encode_big_endian(1, 0).is_err());
    }

    #[test]
    fn wide_fields() {
        assert_eq!(
            encode_big_endian(u64::MAX, 10).unwrap(),
            vec![0, 0, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF]
        );
    }
}
