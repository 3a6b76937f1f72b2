#![warn(missing_docs)]
#![doc = r#"
Assemble Standard MIDI Files full of empty, ready-to-fill tracks.

`smf-tracks` writes format 1 MIDI files whose tracks are deliberately
empty: each one is a named slot on a MIDI channel with a placeholder
instrument, waiting for someone to put notes in it. It can start a file
from scratch or grow an existing one in place.

# Overview

```text
ComposerConfig ──► allocate ──► TrackChunk::empty_track ──► SmfBuilder
                   (channels)   (one MTrk per channel)        │
                                                              ├─ write_new_file
                                                              └─ patch_and_append
```

- [`allocator`] decides which channel every track goes on, skipping the
  drum channel when asked to.
- [`file::builder::chunk`] encodes each track as a complete `MTrk` chunk.
- [`reader`] validates an existing file's header and reads its track count.
- [`file`] puts it together on disk.

# Example
```rust,no_run
use smf_tracks::prelude::*;

let config = ComposerConfig::builder()
    .melody_tracks(12)
    .art_tracks(4)
    .beats_per_minute(120)
    .output_path("empty.mid")
    .build()?;

let report = compose(&config, &mut |line: &str| println!("{line}"))?;
assert_eq!(report.track_count, 17);
# Ok::<(), smf_tracks::ComposeError>(())
```
"#]

extern crate alloc;

pub mod allocator;
pub mod codec;
pub mod config;
mod error;
pub use error::*;
pub mod file;
pub mod message;
mod micros;
pub use micros::*;
pub mod progress;
pub mod reader;

#[doc = r#"
Common re-exports when working with `smf-tracks`
"#]
pub mod prelude {
    pub use crate::{
        ComposeError, ConfigError, Tempo,
        allocator::{ChannelAssignment, TrackKind, TrackRequest, allocate},
        config::{ComposerConfig, ComposerConfigBuilder},
        file::{
            ComposeMode, ComposeReport, SmfHeader, TicksPerQuarterNote,
            builder::{FormatType, SmfBuilder, chunk::TrackChunk},
            compose,
        },
        message::{
            MetaMessage, TrackEvent, TrackMessage,
            channel::{Channel, ChannelMessage, ChannelRange},
        },
        progress::{Progress, Quiet},
        reader::{read_track_count, read_track_count_at},
    };
}
