use crate::{
    codec::{ByteWidthError, encode_big_endian},
    prelude::*,
};

/// Tag of the header chunk
pub const HEADER_TAG: &[u8; 4] = b"MThd";

/// Length of the header chunk's payload
pub const HEADER_LENGTH: u32 = 6;

/// Byte offset of the track count field: after the tag, length and format.
pub const TRACK_COUNT_OFFSET: u64 = 4 + 4 + 2;

/// Total size of a header chunk on disk
pub const HEADER_CHUNK_SIZE: usize = 14;

#[doc = r#"
The header chunk of a format 1 file this crate writes.

```text
MThd | 00 00 00 06 | 00 01 | track count | division
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SmfHeader {
    track_count: u16,
    timing: TicksPerQuarterNote,
}

impl SmfHeader {
    /// Create a new header from a track count and timing
    pub const fn new(track_count: u16, timing: TicksPerQuarterNote) -> Self {
        Self {
            track_count,
            timing,
        }
    }

    /// Always [`FormatType::Simultaneous`]
    pub const fn format(&self) -> FormatType {
        FormatType::Simultaneous
    }

    /// Number of track chunks the file declares, conductor included
    pub const fn track_count(&self) -> u16 {
        self.track_count
    }

    /// Get the timing props
    pub const fn timing(&self) -> &TicksPerQuarterNote {
        &self.timing
    }

    /// Encode the complete 14-byte header chunk.
    pub fn to_bytes(&self) -> Result<[u8; HEADER_CHUNK_SIZE], ByteWidthError> {
        let mut out = [0; HEADER_CHUNK_SIZE];
        out[0..4].copy_from_slice(HEADER_TAG);
        out[4..8].copy_from_slice(&encode_big_endian(HEADER_LENGTH as u64, 4)?);
        out[8..10].copy_from_slice(&self.format().to_be_bytes());
        out[10..12].copy_from_slice(&encode_track_count(self.track_count as usize)?);
        out[12..14].copy_from_slice(&self.timing.to_be_bytes());
        Ok(out)
    }
}

/// Encode a value for the 2-byte track count field.
pub fn encode_track_count(count: usize) -> Result<[u8; 2], ByteWidthError> {
    let bytes = encode_big_endian(count as u64, 2)?;
    Ok([bytes[0], bytes[1]])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn header_bytes() {
        let header = SmfHeader::new(6, TicksPerQuarterNote::new(480).unwrap());
        assert_eq!(
            header.to_bytes().unwrap(),
            [b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 1, 0, 6, 0x01, 0xE0]
        );
    }

    #[test]
    fn track_count_field() {
        assert_eq!(encode_track_count(0xFFFF).unwrap(), [0xFF, 0xFF]);
        assert!(encode_track_count(0x1_0000).is_err());
        assert_eq!(TRACK_COUNT_OFFSET, 10);
    }
}
