mod format;
pub use format::*;

pub mod chunk;

use crate::{
    ComposeError,
    allocator::ChannelAssignment,
    codec::ByteWidthError,
    error::check_capacity,
    file::{SmfHeader, TRACK_COUNT_OFFSET, encode_track_count},
    prelude::*,
    reader::Reader,
};
use alloc::vec::Vec;
use std::io::{Read, Seek, SeekFrom, Write};

/// What [`SmfBuilder::write_new_file`] produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewFileSummary {
    /// Tracks declared in the header, conductor included
    pub track_count: u16,
    /// Bytes written, header included
    pub bytes_written: u64,
}

/// What [`SmfBuilder::patch_and_append`] did to an existing file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PatchSummary {
    /// Tracks the header declared before patching
    pub previous_track_count: u16,
    /// Tracks the header declares now
    pub track_count: u16,
    /// Bytes appended after the existing data
    pub bytes_appended: u64,
}

#[doc = r#"
Collects generated track chunks and writes them out, either as a brand new
format 1 file or onto the end of an existing one.

All chunks are encoded up front, so nothing is written until every track
is ready.

# Example
```rust
# use smf_tracks::prelude::*;
let mut builder = SmfBuilder::default();
builder.push_chunk(TrackChunk::empty_track(Channel::One).unwrap());

let mut file = Vec::new();
let summary = builder
    .write_new_file(
        &mut file,
        TicksPerQuarterNote::new(480).unwrap(),
        Tempo::from_bpm(120).unwrap(),
    )
    .unwrap();
assert_eq!(summary.track_count, 2);
assert_eq!(read_track_count(file.as_slice()).unwrap(), 2);
```
"#]
#[derive(Debug, Default, Clone)]
pub struct SmfBuilder {
    tracks: Vec<u8>,
    track_count: usize,
}

impl SmfBuilder {
    /// Add one encoded chunk
    pub fn push_chunk(&mut self, chunk: TrackChunk) {
        self.tracks.extend_from_slice(chunk.as_bytes());
        self.track_count += 1;
    }

    /// Encode and add one empty track per assigned channel, in order
    pub fn push_assignment(&mut self, assignment: &ChannelAssignment) -> Result<(), ByteWidthError> {
        for channel in assignment.iter() {
            self.push_chunk(TrackChunk::empty_track(channel)?);
        }
        Ok(())
    }

    /// Number of chunks added so far
    pub fn track_count(&self) -> usize {
        self.track_count
    }

    /// Every added chunk, concatenated
    pub fn track_bytes(&self) -> &[u8] {
        &self.tracks
    }

    /// Write a complete format 1 file: header, conductor track, then every added chunk.
    ///
    /// Fails with [`ConfigError::Capacity`](crate::ConfigError::Capacity) before
    /// writing anything if the conductor plus the added tracks exceed 65535.
    pub fn write_new_file<W: Write>(
        &self,
        mut writer: W,
        timing: TicksPerQuarterNote,
        tempo: Tempo,
    ) -> Result<NewFileSummary, ComposeError> {
        let track_count = check_capacity(self.track_count + 1)?;
        let header = SmfHeader::new(track_count, timing).to_bytes()?;
        let conductor = TrackChunk::conductor(tempo)?;

        writer.write_all(&header)?;
        writer.write_all(conductor.as_bytes())?;
        writer.write_all(&self.tracks)?;
        writer.flush()?;

        let bytes_written = (header.len() + conductor.len() + self.tracks.len()) as u64;
        tracing::debug!(track_count, bytes_written, "wrote new midi file");
        Ok(NewFileSummary {
            track_count,
            bytes_written,
        })
    }

    /// Raise the track count of an existing format 1 file and append every added chunk.
    ///
    /// The header is read first and nothing is written if it is malformed,
    /// not format 1, or the new total would exceed 65535. Then exactly two
    /// bytes at offset 10 are overwritten and the chunks are written at the
    /// end of the file. No existing track is read or rewritten.
    ///
    /// The two writes are not atomic. If the second fails, the header
    /// declares tracks the file does not contain.
    pub fn patch_and_append<F: Read + Write + Seek>(
        &self,
        mut file: F,
    ) -> Result<PatchSummary, ComposeError> {
        file.seek(SeekFrom::Start(0))?;
        let previous_track_count = Reader::new(&mut file).read_track_count()?;
        let track_count = check_capacity(previous_track_count as usize + self.track_count)?;

        if self.track_count == 0 {
            tracing::debug!(previous_track_count, "nothing to append");
            return Ok(PatchSummary {
                previous_track_count,
                track_count,
                bytes_appended: 0,
            });
        }

        file.seek(SeekFrom::Start(TRACK_COUNT_OFFSET))?;
        file.write_all(&encode_track_count(track_count as usize)?)?;

        let appended = file
            .seek(SeekFrom::End(0))
            .and_then(|_| file.write_all(&self.tracks))
            .and_then(|()| file.flush());
        if let Err(error) = appended {
            tracing::warn!(
                previous_track_count,
                track_count,
                %error,
                "header patched but tracks were not appended"
            );
            return Err(error.into());
        }

        let bytes_appended = self.tracks.len() as u64;
        tracing::debug!(
            previous_track_count,
            track_count,
            bytes_appended,
            "patched existing midi file"
        );
        Ok(PatchSummary {
            previous_track_count,
            track_count,
            bytes_appended,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn new_file(tracks: &[Channel]) -> Vec<u8> {
        let mut builder = SmfBuilder::default();
        for channel in tracks {
            builder.push_chunk(TrackChunk::empty_track(*channel).unwrap());
        }
        let mut out = Vec::new();
        builder
            .write_new_file(
                &mut out,
                TicksPerQuarterNote::new(960).unwrap(),
                Tempo::from_bpm(138).unwrap(),
            )
            .unwrap();
        out
    }

    #[test]
    fn new_file_layout() {
        let bytes = new_file(&[Channel::Two]);
        assert_eq!(&bytes[..14], b"MThd\x00\x00\x00\x06\x00\x01\x00\x02\x03\xC0");
        assert_eq!(&bytes[14..18], b"MTrk");
        assert_eq!(bytes.len(), 14 + 19 + 19);
    }

    #[test]
    fn patch_then_append() {
        let original = new_file(&[Channel::One]);
        let mut builder = SmfBuilder::default();
        builder.push_chunk(TrackChunk::empty_track(Channel::Sixteen).unwrap());
        builder.push_chunk(TrackChunk::empty_track(Channel::Ten).unwrap());

        let mut file = Cursor::new(original.clone());
        let summary = builder.patch_and_append(&mut file).unwrap();
        assert_eq!(
            summary,
            PatchSummary {
                previous_track_count: 2,
                track_count: 4,
                bytes_appended: 19 + 25,
            }
        );

        let patched = file.into_inner();
        assert_eq!(&patched[10..12], [0x00u8, 0x04]);
        assert_eq!(&patched[..10], &original[..10]);
        assert_eq!(&patched[12..original.len()], &original[12..]);
        assert_eq!(&patched[original.len()..], builder.track_bytes());
    }

    #[test]
    fn nothing_to_append() {
        let original = new_file(&[]);
        let mut file = Cursor::new(original.clone());
        let summary = SmfBuilder::default().patch_and_append(&mut file).unwrap();
        assert_eq!(summary.track_count, 1);
        assert_eq!(file.into_inner(), original);
    }

    #[test]
    fn bad_header_is_left_alone() {
        let mut original = new_file(&[Channel::One]);
        original[3] = b'x';
        let mut builder = SmfBuilder::default();
        builder.push_chunk(TrackChunk::empty_track(Channel::One).unwrap());

        let mut file = Cursor::new(original.clone());
        let err = builder.patch_and_append(&mut file).unwrap_err();
        assert!(err.is_format());
        assert_eq!(file.into_inner(), original);
    }

    #[test]
    fn over_capacity_is_left_alone() {
        let mut original = new_file(&[]);
        original[10] = 0xFF;
        original[11] = 0xFF;
        let mut builder = SmfBuilder::default();
        builder.push_chunk(TrackChunk::empty_track(Channel::One).unwrap());

        let mut file = Cursor::new(original.clone());
        let err = builder.patch_and_append(&mut file).unwrap_err();
        assert!(matches!(
            err,
            ComposeError::Config(crate::ConfigError::Capacity { requested: 65_536 })
        ));
        assert_eq!(file.into_inner(), original);
    }

    /// Accepts the 2-byte header patch, refuses anything larger.
    struct FullDisk(Cursor<Vec<u8>>);

    impl Read for FullDisk {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            self.0.read(buf)
        }
    }

    impl Write for FullDisk {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if buf.len() > 2 {
                return Err(std::io::Error::other("no space left"));
            }
            self.0.write(buf)
        }
        fn flush(&mut self) -> std::io::Result<()> {
            self.0.flush()
        }
    }

    impl Seek for FullDisk {
        fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
            self.0.seek(pos)
        }
    }

    #[test]
    fn failed_append_leaves_patched_header() {
        let original = new_file(&[]);
        let mut builder = SmfBuilder::default();
        builder.push_chunk(TrackChunk::empty_track(Channel::One).unwrap());

        let mut file = FullDisk(Cursor::new(original.clone()));
        let err = builder.patch_and_append(&mut file).unwrap_err();
        assert!(err.is_io());

        let left = file.0.into_inner();
        assert_eq!(left.len(), original.len());
        assert_eq!(&left[10..12], [0x00u8, 0x02]);
    }
}
