#![doc = r#"
MIDI channels and the ranges tracks are allocated from

Channels are numbered 1-16 everywhere in this crate, the way sequencers
show them. Only when an event is encoded does a channel become its 0-15
wire nibble (see [`Channel::to_nibble`]).
"#]

mod range;
pub use range::*;

use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
One of the 16 MIDI channels, 1-indexed.

# Example
```rust
# use smf_tracks::prelude::*;
let channel = Channel::try_from(10u8).unwrap();
assert_eq!(channel, Channel::DRUMS);
assert_eq!(channel.to_nibble(), 9);
assert!(Channel::try_from(17u8).is_err());
```
"#]
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, TryFromPrimitive, IntoPrimitive,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Channel {
    One = 1,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Eleven,
    Twelve,
    Thirteen,
    Fourteen,
    Fifteen,
    Sixteen,
}

impl Channel {
    /// Channel 10, reserved for percussion by General MIDI.
    pub const DRUMS: Self = Self::Ten;

    /// All 16 channels in ascending order
    pub const ALL: [Self; 16] = [
        Self::One,
        Self::Two,
        Self::Three,
        Self::Four,
        Self::Five,
        Self::Six,
        Self::Seven,
        Self::Eight,
        Self::Nine,
        Self::Ten,
        Self::Eleven,
        Self::Twelve,
        Self::Thirteen,
        Self::Fourteen,
        Self::Fifteen,
        Self::Sixteen,
    ];

    /// The 1-indexed channel number
    #[inline]
    pub fn number(self) -> u8 {
        self.into()
    }

    /// The channel as it appears in the low nibble of a status byte (0-15).
    #[inline]
    pub fn to_nibble(self) -> u8 {
        self.number() - 1
    }

    /// True for channel 10
    #[inline]
    pub fn is_drums(self) -> bool {
        self == Self::DRUMS
    }
}

impl core::fmt::Display for Channel {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[doc = r#"
The channel messages a generated track carries
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelMessage {
    /// `Cn pp`: select program `pp` on channel `n`
    ProgramChange {
        /// Channel the program is selected on
        channel: Channel,
        /// General MIDI program, 0-127
        program: u8,
    },
}

impl ChannelMessage {
    /// Appends the status and data bytes of this message.
    pub fn write_to(&self, buf: &mut alloc::vec::Vec<u8>) {
        match *self {
            Self::ProgramChange { channel, program } => {
                buf.push(0xC0 | channel.to_nibble());
                buf.push(program & 0x7F);
            }
        }
    }
}
