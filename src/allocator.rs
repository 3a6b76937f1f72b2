#![doc = r#"
Channel allocation

Turns "give me N tracks from channels `min..=max`" into the concrete,
ordered list of channels those tracks are created on.

Channels are handed out in ascending order starting at `min`, wrapping
back to `min` after `max`. When drums are disallowed, channel 10 is
skipped wherever it falls, and the skipped slot does not count toward N:
exactly N usable channels always come out.

# Example
```rust
# use smf_tracks::prelude::*;
let request = TrackRequest::new(TrackKind::Melody, 5, ChannelRange::new(8, 11).unwrap(), false)
    .unwrap();
let channels: Vec<u8> = allocate(&request, &mut Quiet).iter().map(|c| c.number()).collect();
assert_eq!(channels, [8, 9, 11, 8, 9]);
```
"#]

use crate::{ConfigError, prelude::*};
use alloc::{format, vec::Vec};
use core::fmt;

/// Which category a generated track belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TrackKind {
    /// Regular tracks, spread over the melody channel range
    Melody,
    /// Decorative tracks, by default all on channel 16
    Art,
}

impl TrackKind {
    /// The single letter used to tag progress lines
    pub const fn tag(&self) -> char {
        match self {
            Self::Melody => 'M',
            Self::Art => 'A',
        }
    }
}

impl fmt::Display for TrackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Melody => f.write_str("melody"),
            Self::Art => f.write_str("art"),
        }
    }
}

#[doc = r#"
A validated request for `count` tracks of one [`TrackKind`].

Construction rejects the one configuration the allocator could never
satisfy: a range holding only channel 10 while drums are disallowed.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackRequest {
    kind: TrackKind,
    count: usize,
    range: ChannelRange,
    allow_drums: bool,
}

impl TrackRequest {
    /// Create a new request
    pub fn new(
        kind: TrackKind,
        count: usize,
        range: ChannelRange,
        allow_drums: bool,
    ) -> Result<Self, ConfigError> {
        if count > 0 && !allow_drums && range.is_drums_only() {
            return Err(ConfigError::DrumOnlyRange { kind });
        }
        Ok(Self {
            kind,
            count,
            range,
            allow_drums,
        })
    }

    /// The category of the requested tracks
    pub const fn kind(&self) -> TrackKind {
        self.kind
    }
    /// Number of usable tracks requested
    pub const fn count(&self) -> usize {
        self.count
    }
    /// Channels the tracks may be placed on
    pub const fn range(&self) -> ChannelRange {
        self.range
    }
    /// Whether channel 10 may be used
    pub const fn allow_drums(&self) -> bool {
        self.allow_drums
    }
}

/// The channels chosen for one [`TrackRequest`], one per track, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelAssignment {
    kind: TrackKind,
    channels: Vec<Channel>,
}

impl ChannelAssignment {
    /// The category the channels were allocated for
    pub const fn kind(&self) -> TrackKind {
        self.kind
    }
    /// The channels in track order
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }
    /// Iterate over the channels in track order
    pub fn iter(&self) -> impl Iterator<Item = Channel> + '_ {
        self.channels.iter().copied()
    }
    /// Number of tracks
    pub fn len(&self) -> usize {
        self.channels.len()
    }
    /// True if no tracks were requested
    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }
}

/// Allocate the channels for `request`, reporting each assignment to `progress`.
pub fn allocate(request: &TrackRequest, progress: &mut impl Progress) -> ChannelAssignment {
    let kind = request.kind();
    let mut channels = Vec::with_capacity(request.count());
    let mut remaining = request.count();

    if remaining > 0 {
        tracing::debug!(%kind, count = remaining, range = %request.range(), "allocating channels");
        progress.report(&format!(
            "allocating {remaining} {kind} track(s) on channels {}",
            request.range()
        ));
    }

    // `TrackRequest::new` guarantees the cycle holds a usable channel
    for channel in request.range().channels().cycle() {
        if remaining == 0 {
            break;
        }
        if channel.is_drums() && !request.allow_drums() {
            tracing::trace!(%kind, "skipping drum channel");
            progress.report(&format!("[{}] skipping drum channel", kind.tag()));
            continue;
        }
        channels.push(channel);
        remaining -= 1;
        tracing::trace!(%kind, track = channels.len(), %channel, "assigned channel");
        progress.report(&format!(
            "[{}-{}] adding {kind} track on channel {channel}",
            kind.tag(),
            channels.len()
        ));
    }

    ChannelAssignment { kind, channels }
}
