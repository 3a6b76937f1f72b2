#![doc = r#"
Composer configuration

[`ComposerConfigBuilder`] holds raw, unchecked options and mirrors what a
front-end collects. [`ComposerConfigBuilder::build`] validates them once
into an immutable [`ComposerConfig`], which is all the composer ever sees.

# Example
```rust
# use smf_tracks::prelude::*;
let config = ComposerConfig::builder()
    .melody_tracks(3)
    .art_tracks(2)
    .ticks_per_quarter_note(480)
    .beats_per_minute(120)
    .output_path("song.mid")
    .build()
    .unwrap();
assert_eq!(config.requested_track_count(), 5);

let err = ComposerConfig::builder()
    .melody_channels(ChannelRange::single(Channel::Ten))
    .allow_drums(false)
    .build()
    .unwrap_err();
assert!(matches!(err, ConfigError::DrumOnlyRange { kind: TrackKind::Melody }));
```
"#]

use crate::{
    ConfigError,
    allocator::{TrackKind, TrackRequest},
    prelude::*,
};
use std::path::{Path, PathBuf};

/// Melody tracks created when nothing else is asked for
pub const DEFAULT_MELODY_TRACKS: usize = 8;
/// Art tracks created when nothing else is asked for
pub const DEFAULT_ART_TRACKS: usize = 8;
/// Time division of new files when nothing else is asked for
pub const DEFAULT_TICKS_PER_QUARTER_NOTE: u16 = 960;
/// Tempo of new files when nothing else is asked for
pub const DEFAULT_BEATS_PER_MINUTE: u32 = 138;
/// Where files are written when nothing else is asked for
pub const DEFAULT_OUTPUT_PATH: &str = "output.mid";

/// Unvalidated composer options.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct ComposerConfigBuilder {
    /// Number of melody tracks to add
    pub melody_track_count: usize,
    /// Number of art tracks to add
    pub art_track_count: usize,
    /// Channels melody tracks are spread over
    pub melody_channel_range: ChannelRange,
    /// Channels art tracks are spread over
    pub art_channel_range: ChannelRange,
    /// Whether channel 10 may be allocated
    pub allow_drums: bool,
    /// Time division of a new file
    pub ticks_per_quarter_note: u16,
    /// Tempo of a new file's conductor track
    pub beats_per_minute: u32,
    /// Where the result is written
    pub output_path: PathBuf,
    /// An existing file to extend instead of starting from scratch
    pub input_path: Option<PathBuf>,
}

impl Default for ComposerConfigBuilder {
    fn default() -> Self {
        Self {
            melody_track_count: DEFAULT_MELODY_TRACKS,
            art_track_count: DEFAULT_ART_TRACKS,
            melody_channel_range: ChannelRange::MELODY,
            art_channel_range: ChannelRange::ART,
            allow_drums: false,
            ticks_per_quarter_note: DEFAULT_TICKS_PER_QUARTER_NOTE,
            beats_per_minute: DEFAULT_BEATS_PER_MINUTE,
            output_path: PathBuf::from(DEFAULT_OUTPUT_PATH),
            input_path: None,
        }
    }
}

impl ComposerConfigBuilder {
    /// Set the number of melody tracks
    pub fn melody_tracks(mut self, count: usize) -> Self {
        self.melody_track_count = count;
        self
    }
    /// Set the number of art tracks
    pub fn art_tracks(mut self, count: usize) -> Self {
        self.art_track_count = count;
        self
    }
    /// Set the melody channel range
    pub fn melody_channels(mut self, range: ChannelRange) -> Self {
        self.melody_channel_range = range;
        self
    }
    /// Set the art channel range
    pub fn art_channels(mut self, range: ChannelRange) -> Self {
        self.art_channel_range = range;
        self
    }
    /// Allow or exclude channel 10
    pub fn allow_drums(mut self, allow: bool) -> Self {
        self.allow_drums = allow;
        self
    }
    /// Set the time division of a new file
    pub fn ticks_per_quarter_note(mut self, ticks: u16) -> Self {
        self.ticks_per_quarter_note = ticks;
        self
    }
    /// Set the tempo of a new file
    pub fn beats_per_minute(mut self, bpm: u32) -> Self {
        self.beats_per_minute = bpm;
        self
    }
    /// Set the destination
    pub fn output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = path.into();
        self
    }
    /// Extend an existing file rather than creating a new one
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Validate every option.
    ///
    /// Timing is checked even though only new files use it, so a config
    /// does not become invalid depending on what exists on disk.
    pub fn build(self) -> Result<ComposerConfig, ConfigError> {
        if self.output_path.as_os_str().is_empty() {
            return Err(ConfigError::EmptyOutputPath);
        }
        let melody = TrackRequest::new(
            TrackKind::Melody,
            self.melody_track_count,
            self.melody_channel_range,
            self.allow_drums,
        )?;
        let art = TrackRequest::new(
            TrackKind::Art,
            self.art_track_count,
            self.art_channel_range,
            self.allow_drums,
        )?;
        let timing = TicksPerQuarterNote::new(self.ticks_per_quarter_note)?;
        let tempo = Tempo::from_bpm(self.beats_per_minute)?;

        Ok(ComposerConfig {
            melody,
            art,
            timing,
            tempo,
            beats_per_minute: self.beats_per_minute,
            output_path: self.output_path,
            input_path: self.input_path.filter(|p| !p.as_os_str().is_empty()),
        })
    }
}

/// A validated, immutable composer configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposerConfig {
    melody: TrackRequest,
    art: TrackRequest,
    timing: TicksPerQuarterNote,
    tempo: Tempo,
    beats_per_minute: u32,
    output_path: PathBuf,
    input_path: Option<PathBuf>,
}

impl ComposerConfig {
    /// Start from the defaults
    pub fn builder() -> ComposerConfigBuilder {
        ComposerConfigBuilder::default()
    }

    /// The melody track request
    pub const fn melody(&self) -> &TrackRequest {
        &self.melody
    }
    /// The art track request
    pub const fn art(&self) -> &TrackRequest {
        &self.art
    }
    /// Both requests, melody first
    pub const fn requests(&self) -> [&TrackRequest; 2] {
        [&self.melody, &self.art]
    }
    /// Melody plus art tracks, conductor not included
    pub const fn requested_track_count(&self) -> usize {
        self.melody.count().saturating_add(self.art.count())
    }
    /// Time division used for a new file
    pub const fn timing(&self) -> TicksPerQuarterNote {
        self.timing
    }
    /// Tempo of a new file's conductor track
    pub const fn tempo(&self) -> Tempo {
        self.tempo
    }
    /// The tempo as given, in beats per minute
    pub const fn beats_per_minute(&self) -> u32 {
        self.beats_per_minute
    }
    /// Where the result is written
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
    /// The file to extend, if one was given
    pub fn input_path(&self) -> Option<&Path> {
        self.input_path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::channel::ChannelRangeError;

    #[test]
    fn defaults() {
        let config = ComposerConfig::builder().build().unwrap();
        assert_eq!(config.melody().count(), 8);
        assert_eq!(config.art().range(), ChannelRange::ART);
        assert!(!config.melody().allow_drums());
        assert_eq!(config.timing().ticks_per_quarter_note(), 960);
        assert_eq!(config.tempo().micros_per_quarter_note(), 60_000_000 / 138);
        assert_eq!(config.output_path(), Path::new("output.mid"));
        assert_eq!(config.input_path(), None);
    }

    #[test]
    fn rejects_bad_options() {
        let build = |b: ComposerConfigBuilder| b.build().unwrap_err();
        assert_eq!(
            build(ComposerConfig::builder().ticks_per_quarter_note(0)),
            ConfigError::TicksPerQuarterNote(0)
        );
        assert_eq!(
            build(ComposerConfig::builder().beats_per_minute(0)),
            ConfigError::BeatsPerMinute(0)
        );
        assert_eq!(
            build(ComposerConfig::builder().output_path("")),
            ConfigError::EmptyOutputPath
        );
        assert_eq!(
            build(ComposerConfig::builder().art_channels(ChannelRange::single(Channel::Ten))),
            ConfigError::DrumOnlyRange {
                kind: TrackKind::Art
            }
        );
    }

    #[test]
    fn drum_only_range_fine_when_unused() {
        let config = ComposerConfig::builder()
            .art_tracks(0)
            .art_channels(ChannelRange::single(Channel::Ten))
            .build();
        assert!(config.is_ok());
    }

    #[test]
    fn range_errors_convert() {
        let err: ConfigError = "3-1".parse::<ChannelRange>().unwrap_err().into();
        assert_eq!(
            err,
            ConfigError::Range(ChannelRangeError::Inverted { min: 3, max: 1 })
        );
    }

    #[test]
    fn empty_input_path_is_none() {
        let config = ComposerConfig::builder().input_path("").build().unwrap();
        assert_eq!(config.input_path(), None);
    }
}
