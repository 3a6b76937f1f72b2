#![doc = r#"
The events generated tracks are made of

Every event this crate writes sits at delta-time 0: generated tracks are
empty slots, so nothing in them is offset from the start of the song.

```text
|--------------|
| Track Event  |  delta-time + one of:
|--------------|
   /        \
|---------|  |-----------------|
| Channel |  | Meta            |
| Message |  | (FF type len..) |
|---------|  |-----------------|
```
"#]

pub mod channel;

use crate::{micros::Tempo, prelude::*};
use alloc::{borrow::Cow, vec::Vec};

#[doc = r#"
Meta events, identified by the `FF` status byte.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaMessage<'a> {
    /// `FF 03 len text`
    TrackName(Cow<'a, str>),
    /// `FF 51 03 tttttt`
    Tempo(Tempo),
    /// `FF 2F 00`
    EndOfTrack,
}

impl MetaMessage<'_> {
    /// Appends `FF`, the type byte, the length and the payload.
    ///
    /// Payloads shorter than 128 bytes keep the length a single byte.
    pub fn write_to(&self, buf: &mut Vec<u8>) {
        buf.push(0xFF);
        match self {
            Self::TrackName(name) => {
                buf.push(0x03);
                write_vlq(name.len() as u32, buf);
                buf.extend_from_slice(name.as_bytes());
            }
            Self::Tempo(tempo) => {
                buf.push(0x51);
                buf.push(0x03);
                buf.extend_from_slice(&tempo.to_bytes());
            }
            Self::EndOfTrack => {
                buf.push(0x2F);
                buf.push(0x00);
            }
        }
    }
}

/// An event within a track chunk
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackMessage<'a> {
    /// A channel message
    Channel(ChannelMessage),
    /// A meta event
    Meta(MetaMessage<'a>),
}

impl From<ChannelMessage> for TrackMessage<'_> {
    fn from(value: ChannelMessage) -> Self {
        Self::Channel(value)
    }
}

impl<'a> From<MetaMessage<'a>> for TrackMessage<'a> {
    fn from(value: MetaMessage<'a>) -> Self {
        Self::Meta(value)
    }
}

#[doc = r#"
A message paired with the delta-time, in ticks, since the previous event.
"#]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackEvent<'a> {
    delta_ticks: u32,
    message: TrackMessage<'a>,
}

impl<'a> TrackEvent<'a> {
    /// An event at delta-time 0
    pub fn immediate(message: impl Into<TrackMessage<'a>>) -> Self {
        Self {
            delta_ticks: 0,
            message: message.into(),
        }
    }

    /// Ticks since the previous event
    pub const fn delta_ticks(&self) -> u32 {
        self.delta_ticks
    }

    /// The message itself
    pub const fn message(&self) -> &TrackMessage<'a> {
        &self.message
    }

    /// Appends the delta-time and message bytes.
    pub fn write_to(&self, buf: &mut Vec<u8>) {
        write_vlq(self.delta_ticks, buf);
        match &self.message {
            TrackMessage::Channel(c) => c.write_to(buf),
            TrackMessage::Meta(m) => m.write_to(buf),
        }
    }
}

/// Writes a variable-length quantity: 7 bits per byte, high bit set on all but the last.
fn write_vlq(value: u32, buf: &mut Vec<u8>) {
    let mut groups = [0u8; 5];
    let mut len = 0;
    let mut rest = value;
    loop {
        groups[len] = (rest & 0x7F) as u8;
        len += 1;
        rest >>= 7;
        if rest == 0 {
            break;
        }
    }
    for i in (0..len).rev() {
        let continuation = if i == 0 { 0 } else { 0x80 };
        buf.push(groups[i] | continuation);
    }
}
