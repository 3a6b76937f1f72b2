use super::Channel;
use alloc::string::String;
use core::{fmt, str::FromStr};
use thiserror::Error;

/// Why a channel range was rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChannelRangeError {
    /// Nothing to parse
    #[error("range cannot be empty")]
    Empty,
    /// Not of the form `<min>-<max>`
    #[error("range must be in the format of <min>-<max>")]
    Syntax,
    /// The lower bound is not a number
    #[error("min is not a number")]
    MinNotANumber,
    /// The upper bound is not a number
    #[error("max is not a number")]
    MaxNotANumber,
    /// Channels start at 1
    #[error("min cannot be less than 1 (got {0})")]
    MinBelowOne(u32),
    /// There are only 16 channels
    #[error("max cannot be greater than 16 (got {0})")]
    MaxAboveSixteen(u32),
    /// `min > max`
    #[error("min cannot be greater than max ({min} > {max})")]
    Inverted {
        /// lower bound
        min: u32,
        /// upper bound
        max: u32,
    },
}

#[doc = r#"
An inclusive range of channels, `min..=max`, both 1-indexed.

Always satisfies `1 <= min <= max <= 16`.

# Example
```rust
# use smf_tracks::prelude::*;
let melody: ChannelRange = "1-15".parse().unwrap();
assert_eq!(melody, ChannelRange::MELODY);
assert!(melody.contains(Channel::Ten));
assert!("9-3".parse::<ChannelRange>().is_err());
```
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "String", into = "String")
)]
pub struct ChannelRange {
    min: Channel,
    max: Channel,
}

impl ChannelRange {
    /// Channels 1 through 15, the default range for melody tracks
    pub const MELODY: Self = Self {
        min: Channel::One,
        max: Channel::Fifteen,
    };
    /// Channel 16 alone, the default range for art tracks
    pub const ART: Self = Self {
        min: Channel::Sixteen,
        max: Channel::Sixteen,
    };
    /// Every channel
    pub const ALL: Self = Self {
        min: Channel::One,
        max: Channel::Sixteen,
    };

    /// Create a range from 1-indexed channel numbers.
    pub fn new(min: u8, max: u8) -> Result<Self, ChannelRangeError> {
        Self::from_numbers(min as u32, max as u32)
    }

    /// Create a range from two channels
    pub fn from_channels(min: Channel, max: Channel) -> Result<Self, ChannelRangeError> {
        if min > max {
            return Err(ChannelRangeError::Inverted {
                min: min.number() as u32,
                max: max.number() as u32,
            });
        }
        Ok(Self { min, max })
    }

    /// A range holding exactly one channel
    pub const fn single(channel: Channel) -> Self {
        Self {
            min: channel,
            max: channel,
        }
    }

    fn from_numbers(min: u32, max: u32) -> Result<Self, ChannelRangeError> {
        if max > 16 {
            return Err(ChannelRangeError::MaxAboveSixteen(max));
        }
        if min < 1 {
            return Err(ChannelRangeError::MinBelowOne(min));
        }
        if min > max {
            return Err(ChannelRangeError::Inverted { min, max });
        }
        let channel = |n: u32| Channel::try_from(n as u8).map_err(|_| ChannelRangeError::Syntax);
        Ok(Self {
            min: channel(min)?,
            max: channel(max)?,
        })
    }

    /// Lowest channel in the range
    pub const fn min(&self) -> Channel {
        self.min
    }

    /// Highest channel in the range
    pub const fn max(&self) -> Channel {
        self.max
    }

    /// True if `channel` lies within `min..=max`
    pub fn contains(&self, channel: Channel) -> bool {
        (self.min..=self.max).contains(&channel)
    }

    /// The channels of the range in ascending order
    pub fn channels(&self) -> impl Iterator<Item = Channel> + Clone + use<> {
        let (min, max) = (self.min, self.max);
        Channel::ALL
            .into_iter()
            .filter(move |c| (min..=max).contains(c))
    }

    /// Number of channels in the range
    pub fn len(&self) -> usize {
        (self.max.number() - self.min.number()) as usize + 1
    }

    /// A range always holds at least one channel.
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// True if the drum channel is the only channel in the range
    pub fn is_drums_only(&self) -> bool {
        self.min.is_drums() && self.max.is_drums()
    }
}

impl FromStr for ChannelRange {
    type Err = ChannelRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ChannelRangeError::Empty);
        }
        let mut split = s.split('-');
        let (Some(min), Some(max), None) = (split.next(), split.next(), split.next()) else {
            return Err(ChannelRangeError::Syntax);
        };
        let min = min
            .trim()
            .parse::<u32>()
            .map_err(|_| ChannelRangeError::MinNotANumber)?;
        let max = max
            .trim()
            .parse::<u32>()
            .map_err(|_| ChannelRangeError::MaxNotANumber)?;
        Self::from_numbers(min, max)
    }
}

impl TryFrom<String> for ChannelRange {
    type Error = ChannelRangeError;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChannelRange> for String {
    fn from(value: ChannelRange) -> Self {
        alloc::format!("{value}")
    }
}

impl fmt::Display for ChannelRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_ranges() {
        assert_eq!("1-15".parse::<ChannelRange>().unwrap(), ChannelRange::MELODY);
        assert_eq!("16-16".parse::<ChannelRange>().unwrap(), ChannelRange::ART);
        assert_eq!(
            " 3 - 5 ".parse::<ChannelRange>().unwrap(),
            ChannelRange::new(3, 5).unwrap()
        );
    }

    #[test]
    fn parse_failures() {
        use ChannelRangeError::*;
        let parse = |s: &str| s.parse::<ChannelRange>().unwrap_err();
        assert_eq!(parse(""), Empty);
        assert_eq!(parse("5"), Syntax);
        assert_eq!(parse("1-2-3"), Syntax);
        assert_eq!(parse("a-3"), MinNotANumber);
        assert_eq!(parse("3-b"), MaxNotANumber);
        assert_eq!(parse("0-3"), MinBelowOne(0));
        assert_eq!(parse("1-17"), MaxAboveSixteen(17));
        assert_eq!(parse("9-3"), Inverted { min: 9, max: 3 });
    }

    #[test]
    fn display_round_trips() {
        let range = ChannelRange::new(4, 12).unwrap();
        assert_eq!(range.to_string(), "4-12");
        assert_eq!(String::from(range).parse::<ChannelRange>().unwrap(), range);
    }

    #[test]
    fn membership() {
        let range = ChannelRange::new(9, 11).unwrap();
        assert_eq!(range.len(), 3);
        assert!(range.contains(Channel::Ten));
        assert!(!range.contains(Channel::Twelve));
        assert!(ChannelRange::single(Channel::Ten).is_drums_only());
        assert!(!range.is_drums_only());
        assert!(ChannelRange::from_channels(Channel::Five, Channel::Two).is_err());
        assert_eq!(
            range.channels().collect::<Vec<_>>(),
            [Channel::Nine, Channel::Ten, Channel::Eleven]
        );
    }
}
