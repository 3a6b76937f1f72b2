use crate::{
    allocator::TrackKind,
    codec::ByteWidthError,
    message::channel::ChannelRangeError,
    reader::{ReaderError, ReaderErrorKind},
};
use thiserror::Error;

/// The highest track count the 2-byte header field can declare.
pub const MAX_TRACK_COUNT: usize = u16::MAX as usize;

#[doc = r#"
A configuration was rejected.

Every variant is raised before any file is opened, so a configuration
error never leaves anything half written.
"#]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A channel range could not be built
    #[error("channel range: {0}")]
    Range(#[from] ChannelRangeError),
    /// Drums are disallowed but channel 10 is the only channel in the range
    #[error("{kind} tracks can only use channel 10, which is excluded while drums are disallowed")]
    DrumOnlyRange {
        /// The category whose range is degenerate
        kind: TrackKind,
    },
    /// The resulting file would declare more tracks than the header can hold
    #[error("track count is too high ({requested} > {max})", max = MAX_TRACK_COUNT)]
    Capacity {
        /// The total the operation would have produced
        requested: usize,
    },
    /// The time division must be between 1 and 0x7FFF (high bit selects SMPTE)
    #[error("ticks per quarter note must be between 1 and 32767, got {0}")]
    TicksPerQuarterNote(u16),
    /// Zero, or too slow for the 3-byte tempo field
    #[error("beats per minute {0} cannot be expressed as a MIDI tempo")]
    BeatsPerMinute(u32),
    /// Microseconds per quarter note above 0xFFFFFF
    #[error("tempo of {0}us per quarter note does not fit in 3 bytes")]
    Tempo(u32),
    /// No output path was given
    #[error("output path cannot be empty")]
    EmptyOutputPath,
}

#[doc = r#"
Anything that can stop a composition.

Nothing is retried. Whatever failed is handed straight back to the caller.
"#]
#[derive(Debug, Error)]
pub enum ComposeError {
    /// The configuration or the requested totals were rejected
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    /// The existing file's header could not be read or is not format 1
    #[error("existing file header: {0}")]
    Header(#[from] ReaderError),
    /// A value did not fit the field it is encoded into
    #[error("encoding: {0}")]
    Encode(#[from] ByteWidthError),
    /// Opening, writing, seeking or copying failed
    #[error("i/o: {0}")]
    Io(#[from] std::io::Error),
}

impl ComposeError {
    /// True if this was rejected before touching the disk
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }

    /// True if the existing file's header was malformed or unsupported
    pub fn is_format(&self) -> bool {
        match self {
            Self::Header(e) => matches!(
                e.error_kind(),
                ReaderErrorKind::Format(_) | ReaderErrorKind::OutOfBounds
            ),
            _ => false,
        }
    }

    /// True if the operating system reported a failure
    pub fn is_io(&self) -> bool {
        match self {
            Self::Io(_) => true,
            Self::Header(e) => matches!(e.error_kind(), ReaderErrorKind::Io(_)),
            _ => false,
        }
    }
}

/// Fails with [`ConfigError::Capacity`] if `total` cannot be declared in the header.
pub fn check_capacity(total: usize) -> Result<u16, ConfigError> {
    u16::try_from(total).map_err(|_| ConfigError::Capacity { requested: total })
}
