use crate::ConfigError;

/// The header division for files this crate creates.
///
/// The division field can also describe SMPTE frames (high bit set). New
/// files always use metric ticks; existing files keep whatever division they
/// already have, since it is never read or rewritten.
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u16", into = "u16")
)]
pub struct TicksPerQuarterNote {
    pub(crate) inner: [u8; 2],
}

impl TicksPerQuarterNote {
    /// The largest metric division; anything above sets the SMPTE bit.
    pub const MAX: u16 = 0x7FFF;

    /// The tickrate per quarter note defines what a "quarter note" means.
    ///
    /// Must be 1-32767.
    pub const fn new(tpqn: u16) -> Result<Self, ConfigError> {
        if tpqn == 0 || tpqn > Self::MAX {
            return Err(ConfigError::TicksPerQuarterNote(tpqn));
        }
        Ok(Self {
            inner: tpqn.to_be_bytes(),
        })
    }

    /// Returns the ticks per quarter note for the file.
    pub const fn ticks_per_quarter_note(&self) -> u16 {
        let v = u16::from_be_bytes(self.inner);
        v & 0x7FFF
    }

    /// The 2 bytes of the header's division field
    pub const fn to_be_bytes(&self) -> [u8; 2] {
        self.inner
    }
}

impl TryFrom<u16> for TicksPerQuarterNote {
    type Error = ConfigError;
    fn try_from(tpqn: u16) -> Result<Self, Self::Error> {
        Self::new(tpqn)
    }
}

impl From<TicksPerQuarterNote> for u16 {
    fn from(value: TicksPerQuarterNote) -> Self {
        value.ticks_per_quarter_note()
    }
}

/// Encode a metric time division field: 2 bytes, big-endian, high bit clear.
///
/// ```rust
/// # use smf_tracks::file::encode_time_division;
/// assert_eq!(encode_time_division(960).unwrap(), [0x03, 0xC0]);
/// assert!(encode_time_division(0x8000).is_err());
/// ```
pub fn encode_time_division(ticks_per_quarter_note: u16) -> Result<[u8; 2], ConfigError> {
    TicksPerQuarterNote::new(ticks_per_quarter_note).map(|t| t.to_be_bytes())
}
