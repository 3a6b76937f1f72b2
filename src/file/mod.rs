#![doc = r#"
Composing MIDI files on disk

[`compose`] is the whole pipeline: allocate channels for the melody and
art requests, encode one empty track per channel, then either

- **create** the output as a new format 1 file (header, conductor track
  with the configured tempo, generated tracks), or
- **extend** an existing format 1 file: read its track count, overwrite the
  two-byte count in its header, and append the generated tracks.

Which one happens is decided by [`ComposeMode::for_config`]: an input path
that exists selects extension. It has to be a readable format 1 file; a
directory or anything else fails when its header is read.

When the output path differs from the input, the input is copied to a
temporary file next to the output, the copy is extended, and only then is
it moved over the output. The input is never written, even when the output
path is a link to it.

# Partial writes

Extending a file takes two writes, the header patch and the append. They
are not atomic: if the append fails the header already counts the tracks
that never arrived. This is not repaired or detected later; a file left
that way has to be restored by the caller.
"#]

/// Contains the [`SmfBuilder`](builder::SmfBuilder), track chunk encoding
/// and the format types.
pub mod builder;

mod header;
pub use header::*;

mod timing;
pub use timing::*;

use crate::{
    ComposeError, allocator::allocate, config::ComposerConfig, error::check_capacity, prelude::*,
    reader::read_track_count_at,
};
use alloc::format;
use builder::PatchSummary;
use std::{
    fs::{self, File, OpenOptions},
    io::{self, BufWriter},
    path::{Path, PathBuf},
    time::{Duration, Instant},
};
use tempfile::NamedTempFile;

/// What [`compose`] is going to do with the disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComposeMode {
    /// Create or truncate `output` and write a complete file
    New {
        /// Destination
        output: PathBuf,
    },
    /// Patch and append to an existing file.
    ///
    /// When `input` and `output` differ, `input` is validated and copied to
    /// a temporary file beside `output`; the copy is extended and then moved
    /// over `output`.
    Append {
        /// The existing file
        input: PathBuf,
        /// Where the extended file ends up
        output: PathBuf,
    },
}

impl ComposeMode {
    /// Append when the configured input path exists, otherwise write a new file.
    ///
    /// Fails if it cannot be determined whether the input exists.
    pub fn for_config(config: &ComposerConfig) -> io::Result<Self> {
        let output = config.output_path().to_path_buf();
        Ok(match config.input_path() {
            Some(input) if input.try_exists()? => Self::Append {
                input: input.to_path_buf(),
                output,
            },
            _ => Self::New { output },
        })
    }

    /// The file that ends up holding the result
    pub fn output(&self) -> &Path {
        match self {
            Self::New { output } | Self::Append { output, .. } => output,
        }
    }

    /// True for [`ComposeMode::Append`]
    pub const fn is_append(&self) -> bool {
        matches!(self, Self::Append { .. })
    }
}

/// Describes a finished composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeReport {
    /// What was done
    pub mode: ComposeMode,
    /// Header track count before extending; `None` for new files
    pub previous_track_count: Option<u16>,
    /// Header track count now on disk
    pub track_count: u16,
    /// Generated tracks written, conductor not included
    pub tracks_added: usize,
    /// Bytes written to the output (header and conductor included for new files)
    pub bytes_written: u64,
    /// Wall time from start to finish
    pub elapsed: Duration,
}

/// Allocate, encode and write, as configured.
///
/// Configuration and capacity problems are reported before any file is
/// created or opened for writing. Progress text goes to `progress`.
pub fn compose(
    config: &ComposerConfig,
    progress: &mut impl Progress,
) -> Result<ComposeReport, ComposeError> {
    let started = Instant::now();
    let mode = ComposeMode::for_config(config)?;
    let requested = config.requested_track_count();

    // the conductor only counts for new files; existing counts are checked once read
    match &mode {
        ComposeMode::New { .. } => check_capacity(requested.saturating_add(1))?,
        ComposeMode::Append { .. } => check_capacity(requested)?,
    };

    tracing::info!(
        output = %mode.output().display(),
        melody = config.melody().count(),
        art = config.art().count(),
        append = mode.is_append(),
        "composing midi file"
    );
    progress.report(&format!("writing to midi path: {}", mode.output().display()));

    let mut builder = SmfBuilder::default();
    for request in config.requests() {
        let assignment = allocate(request, progress);
        builder.push_assignment(&assignment)?;
    }

    let (previous_track_count, track_count, bytes_written) = match &mode {
        ComposeMode::New { output } => {
            progress.report(&format!("creating new midi file: {}", output.display()));
            let file = File::create(output)?;
            let summary =
                builder.write_new_file(BufWriter::new(file), config.timing(), config.tempo())?;
            (None, summary.track_count, summary.bytes_written)
        }
        ComposeMode::Append { input, output } => {
            progress.report(&format!(
                "midi file exists, appending to midi file: {}",
                input.display()
            ));
            let summary = if input == output {
                let file = OpenOptions::new().read(true).write(true).open(output)?;
                builder.patch_and_append(file)?
            } else {
                patch_copy(&builder, input, output)?
            };
            progress.report(&format!("track count: {}", summary.previous_track_count));
            (
                Some(summary.previous_track_count),
                summary.track_count,
                summary.bytes_appended,
            )
        }
    };

    let elapsed = started.elapsed();
    tracing::info!(track_count, bytes_written, ?elapsed, "finished composing");
    progress.report(&format!(
        "wrote {} track(s) to {} ({} total)",
        builder.track_count(),
        mode.output().display(),
        track_count
    ));
    progress.report(&format!("took {elapsed:?}"));

    Ok(ComposeReport {
        mode,
        previous_track_count,
        track_count,
        tracks_added: builder.track_count(),
        bytes_written,
        elapsed,
    })
}

/// Extend a copy of `input` and move it over `output`, leaving `input` unwritten.
fn patch_copy(
    builder: &SmfBuilder,
    input: &Path,
    output: &Path,
) -> Result<PatchSummary, ComposeError> {
    // reject the input before the copy exists
    let existing = read_track_count_at(input)?;
    check_capacity(existing as usize + builder.track_count())?;

    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut source = File::open(input)?;
    let mut copy = NamedTempFile::new_in(dir)?;
    tracing::debug!(from = %input.display(), to = %copy.path().display(), "copying input");
    io::copy(&mut source, copy.as_file_mut())?;
    fs::set_permissions(copy.path(), source.metadata()?.permissions())?;

    let summary = builder.patch_and_append(copy.as_file_mut())?;
    copy.persist(output).map_err(|e| e.error)?;
    tracing::debug!(output = %output.display(), "replaced output with extended copy");
    Ok(summary)
}
