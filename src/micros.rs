use crate::ConfigError;

/// Microseconds in one minute.
pub const MICROS_PER_MINUTE: u32 = 60_000_000;

/// The largest value a 3-byte tempo field can carry.
pub const MAX_MICROS_PER_QUARTER_NOTE: u32 = 0xFF_FFFF;

#[doc = r#"
Tempo, expressed as microseconds per quarter note.

This is the value carried by the `FF 51 03` set-tempo meta event of the
conductor track.

# Example
```rust
# use smf_tracks::prelude::*;
let tempo = Tempo::from_bpm(120).unwrap();
assert_eq!(tempo.micros_per_quarter_note(), 500_000);
assert_eq!(tempo.to_bytes(), [0x07, 0xA1, 0x20]);
```
"#]
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "u32", into = "u32")
)]
pub struct Tempo(u32);

impl Tempo {
    /// 120 beats per minute
    pub const DEFAULT: Self = Self(500_000);

    /// Convert beats per minute into microseconds per quarter note.
    ///
    /// Uses integer division. Fails if `bpm` is zero or so slow that the
    /// result does not fit in the 3-byte tempo field.
    pub fn from_bpm(bpm: u32) -> Result<Self, ConfigError> {
        if bpm == 0 {
            return Err(ConfigError::BeatsPerMinute(bpm));
        }
        Self::new(MICROS_PER_MINUTE / bpm).map_err(|_| ConfigError::BeatsPerMinute(bpm))
    }

    /// Create a tempo from a raw microseconds per quarter note value.
    pub fn new(micros_per_quarter_note: u32) -> Result<Self, ConfigError> {
        if micros_per_quarter_note > MAX_MICROS_PER_QUARTER_NOTE {
            return Err(ConfigError::Tempo(micros_per_quarter_note));
        }
        Ok(Self(micros_per_quarter_note))
    }

    /// Returns the microseconds per quarter note
    #[inline]
    pub const fn micros_per_quarter_note(&self) -> u32 {
        self.0
    }

    /// Returns the 3 big-endian bytes of the set-tempo meta event payload.
    pub fn to_bytes(&self) -> [u8; 3] {
        let [_, a, b, c] = self.0.to_be_bytes();
        [a, b, c]
    }
}

impl TryFrom<u32> for Tempo {
    type Error = ConfigError;
    fn try_from(micros_per_quarter_note: u32) -> Result<Self, Self::Error> {
        Self::new(micros_per_quarter_note)
    }
}

impl From<Tempo> for u32 {
    fn from(value: Tempo) -> Self {
        value.0
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bpm_to_tempo() {
        assert_eq!(Tempo::from_bpm(120).unwrap().micros_per_quarter_note(), 500_000);
        assert_eq!(Tempo::from_bpm(138).unwrap().micros_per_quarter_note(), 434_782);
        assert_eq!(Tempo::from_bpm(60).unwrap().micros_per_quarter_note(), 1_000_000);
    }

    #[test]
    fn tempo_bytes() {
        let tempo = Tempo::from_bpm(120).unwrap();
        assert_eq!(tempo.to_bytes(), [0x07, 0xA1, 0x20]);
        assert_eq!(
            crate::codec::encode_big_endian(tempo.micros_per_quarter_note() as u64, 3).unwrap(),
            tempo.to_bytes().to_vec()
        );
    }

    #[test]
    fn slowest_representable() {
        // 60_000_000 / 4 = 15_000_000 fits, 60_000_000 / 3 = 20_000_000 does not
        assert!(Tempo::from_bpm(4).is_ok());
        assert_eq!(Tempo::from_bpm(3), Err(ConfigError::BeatsPerMinute(3)));
        assert_eq!(Tempo::from_bpm(0), Err(ConfigError::BeatsPerMinute(0)));
    }

    #[test]
    fn raw_tempo_is_checked() {
        assert_eq!(Tempo::try_from(0xFF_FFFF_u32).map(u32::from), Ok(0xFF_FFFF));
        assert_eq!(
            Tempo::try_from(0x100_0000_u32),
            Err(ConfigError::Tempo(0x100_0000))
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserialize_goes_through_new() {
        let tempo: Tempo = serde_json::from_str("500000").unwrap();
        assert_eq!(tempo, Tempo::DEFAULT);
        assert_eq!(serde_json::to_string(&tempo).unwrap(), "500000");
        assert!(serde_json::from_str::<Tempo>("16777216").is_err());
    }
}
