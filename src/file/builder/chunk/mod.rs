#![doc = r#"
Track chunk encoding

A track chunk is a 4-character tag, a 32-bit big-endian length, and the
encoded events:

```text
"MTrk" | length (4 bytes, big-endian) | events...
```

The length always counts the event bytes actually encoded; it is measured
after encoding, never assumed.

## Generated tracks

Every generated track is an empty, named slot on one channel:

```text
00 FF 03 00          track name ""  ("Rhythm" on channel 10)
00 Cn 00             program change, channel n, program 0 (Acoustic Grand Piano)
00 FF 2F 00          end of track
```

## Conductor track

The first track of a new format 1 file carries the tempo:

```text
00 FF 51 03 tt tt tt set tempo, microseconds per quarter note
00 FF 2F 00          end of track
```
"#]

use crate::{
    codec::{ByteWidthError, encode_big_endian},
    prelude::*,
};
use alloc::vec::Vec;

/// Tag of a track chunk
pub const TRACK_TAG: &[u8; 4] = b"MTrk";

/// Size of a chunk's tag plus its length field
pub const CHUNK_FRAMING: usize = 8;

/// Name given to tracks placed on the drum channel.
pub const DRUM_TRACK_NAME: &str = "Rhythm";

/// The program every generated track selects, General MIDI's Acoustic Grand Piano.
pub const PLACEHOLDER_PROGRAM: u8 = 0;

#[doc = r#"
The complete bytes of one `MTrk` chunk, framing included.

# Example
```rust
# use smf_tracks::prelude::*;
let chunk = TrackChunk::empty_track(Channel::One).unwrap();
assert_eq!(
    chunk.as_bytes(),
    [
        b'M', b'T', b'r', b'k', 0, 0, 0, 11,
        0x00, 0xFF, 0x03, 0x00,
        0x00, 0xC0, 0x00,
        0x00, 0xFF, 0x2F, 0x00,
    ]
);
```
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackChunk(Vec<u8>);

impl TrackChunk {
    /// Encode `events` and frame them as a track chunk.
    pub fn from_events<'a>(
        events: impl IntoIterator<Item = TrackEvent<'a>>,
    ) -> Result<Self, ByteWidthError> {
        let mut data = Vec::new();
        for event in events {
            event.write_to(&mut data);
        }
        let length = encode_big_endian(data.len() as u64, 4)?;

        let mut bytes = Vec::with_capacity(CHUNK_FRAMING + data.len());
        bytes.extend_from_slice(TRACK_TAG);
        bytes.extend_from_slice(&length);
        bytes.extend_from_slice(&data);
        Ok(Self(bytes))
    }

    /// An empty, named placeholder track on `channel`.
    pub fn empty_track(channel: Channel) -> Result<Self, ByteWidthError> {
        let name = if channel.is_drums() { DRUM_TRACK_NAME } else { "" };
        Self::from_events([
            TrackEvent::immediate(MetaMessage::TrackName(name.into())),
            TrackEvent::immediate(ChannelMessage::ProgramChange {
                channel,
                program: PLACEHOLDER_PROGRAM,
            }),
            TrackEvent::immediate(MetaMessage::EndOfTrack),
        ])
    }

    /// The conductor track of a new file: a tempo and nothing else.
    pub fn conductor(tempo: Tempo) -> Result<Self, ByteWidthError> {
        Self::from_events([
            TrackEvent::immediate(MetaMessage::Tempo(tempo)),
            TrackEvent::immediate(MetaMessage::EndOfTrack),
        ])
    }

    /// The chunk's bytes, tag and length included
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Consume the chunk, returning its bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Size on disk, tag and length included
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// A chunk always has framing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The value of the length field: bytes of event data after the framing
    pub fn data_len(&self) -> u32 {
        let mut len = [0; 4];
        len.copy_from_slice(&self.0[4..CHUNK_FRAMING]);
        u32::from_be_bytes(len)
    }
}

impl AsRef<[u8]> for TrackChunk {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
