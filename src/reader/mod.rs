#![doc = r#"
Reads the header chunk of an existing MIDI file

Only the first 12 bytes are looked at:

```text
offset  size  field
0       4     "MThd"
4       4     header length, must be 6
8       2     format, must be 1
10      2     track count
```

The time division that follows is deliberately left unread; tracks
appended to an existing file take no timing assumptions from it. Track
chunks are never read.

# Example
```rust
# use smf_tracks::reader::read_track_count;
let bytes = [b'M', b'T', b'h', b'd', 0, 0, 0, 6, 0, 1, 0, 4, 0x01, 0xE0];
assert_eq!(read_track_count(&bytes[..]).unwrap(), 4);
```
"#]

mod error;
pub use error::*;

use crate::file::{HEADER_LENGTH, HEADER_TAG, builder::FormatType};
use std::{fs::File, io::Read, path::Path};

/// Reads fixed-width big-endian fields from a byte source, tracking how far it got.
pub struct Reader<R> {
    inner: R,
    position: usize,
}

impl<R: Read> Reader<R> {
    /// Wrap a source positioned at the start of a MIDI file.
    pub const fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Number of bytes consumed so far.
    pub const fn buffer_position(&self) -> usize {
        self.position
    }

    /// Read exactly `N` bytes.
    pub fn read_exact_size<const N: usize>(&mut self) -> ReadResult<[u8; N]> {
        let mut buf = [0; N];
        self.inner
            .read_exact(&mut buf)
            .map_err(|e| ReaderError::io(self.position, e))?;
        self.position += N;
        Ok(buf)
    }

    /// Read the `MThd` tag, length and format fields, then the track count.
    ///
    /// Fails on the first field that is not what a format 1 file carries.
    pub fn read_track_count(&mut self) -> ReadResult<u16> {
        let start = self.position;
        let tag: [u8; 4] = self.read_exact_size()?;
        if &tag != HEADER_TAG {
            tracing::debug!(tag = ?tag, "invalid header tag");
            return Err(ReaderError::format(start, FormatError::Tag(tag)));
        }

        let start = self.position;
        let length = u32::from_be_bytes(self.read_exact_size()?);
        if length != HEADER_LENGTH {
            tracing::debug!(length, "invalid header length");
            return Err(ReaderError::format(start, FormatError::HeaderLength(length)));
        }

        let start = self.position;
        let format = u16::from_be_bytes(self.read_exact_size()?);
        match FormatType::try_from(format) {
            Ok(FormatType::Simultaneous) => {}
            Ok(other) => {
                tracing::debug!(format, "unsupported midi format");
                return Err(ReaderError::format(
                    start,
                    FormatError::UnsupportedFormat(other),
                ));
            }
            Err(_) => {
                return Err(ReaderError::format(start, FormatError::UnknownFormat(format)));
            }
        }

        Ok(u16::from_be_bytes(self.read_exact_size()?))
    }
}

/// Read the track count from the header at the start of `source`.
pub fn read_track_count<R: Read>(source: R) -> ReadResult<u16> {
    Reader::new(source).read_track_count()
}

/// Open the file at `path` and read the track count from its header.
///
/// The file is opened read-only and closed before this returns.
pub fn read_track_count_at(path: impl AsRef<Path>) -> ReadResult<u16> {
    let path = path.as_ref();
    tracing::debug!(path = %path.display(), "reading midi header");
    let file = File::open(path).map_err(|e| ReaderError::io(0, e))?;
    let count = read_track_count(file)?;
    tracing::debug!(path = %path.display(), count, "finished reading midi header");
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn header(tag: &[u8; 4], length: u32, format: u16, tracks: u16) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(tag);
        bytes.extend_from_slice(&length.to_be_bytes());
        bytes.extend_from_slice(&format.to_be_bytes());
        bytes.extend_from_slice(&tracks.to_be_bytes());
        bytes.extend_from_slice(&[0x03, 0xC0]);
        bytes
    }

    #[test]
    fn reads_count() {
        let bytes = header(b"MThd", 6, 1, 0x0102);
        assert_eq!(read_track_count(bytes.as_slice()).unwrap(), 0x0102);
    }

    #[test]
    fn ignores_division_and_tracks() {
        let mut bytes = header(b"MThd", 6, 1, 3);
        // smpte division and garbage after the header are never inspected
        bytes[12] = 0xE8;
        bytes.extend_from_slice(b"not a track");
        assert_eq!(read_track_count(bytes.as_slice()).unwrap(), 3);
    }

    #[test]
    fn wrong_tag() {
        let bytes = header(b"MThx", 6, 1, 1);
        let err = read_track_count(bytes.as_slice()).unwrap_err();
        assert_eq!(err.format_error(), Some(&FormatError::Tag(*b"MThx")));
        assert_eq!(err.position(), 0);
    }

    #[test]
    fn wrong_length() {
        let bytes = header(b"MThd", 8, 1, 1);
        let err = read_track_count(bytes.as_slice()).unwrap_err();
        assert_eq!(err.format_error(), Some(&FormatError::HeaderLength(8)));
        assert_eq!(err.position(), 4);
    }

    #[test]
    fn other_formats() {
        let err = read_track_count(header(b"MThd", 6, 0, 1).as_slice()).unwrap_err();
        assert_eq!(
            err.format_error(),
            Some(&FormatError::UnsupportedFormat(FormatType::SingleMultiChannel))
        );
        let err = read_track_count(header(b"MThd", 6, 2, 1).as_slice()).unwrap_err();
        assert_eq!(
            err.format_error(),
            Some(&FormatError::UnsupportedFormat(
                FormatType::SequentiallyIndependent
            ))
        );
        let err = read_track_count(header(b"MThd", 6, 7, 1).as_slice()).unwrap_err();
        assert_eq!(err.format_error(), Some(&FormatError::UnknownFormat(7)));
        assert_eq!(err.position(), 8);
    }

    #[test]
    fn truncated() {
        let bytes = header(b"MThd", 6, 1, 1);
        let err = read_track_count(&bytes[..11]).unwrap_err();
        assert!(err.is_out_of_bounds());
        assert_eq!(err.position(), 10);
    }
}
