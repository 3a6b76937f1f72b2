use crate::file::builder::FormatType;
use thiserror::Error;

#[doc = r#"
The header of an existing file is not one this crate will patch.
"#]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// The first four bytes were not `MThd`
    #[error("MIDI file does not start with a header chunk (found tag {0:02X?})")]
    Tag([u8; 4]),
    /// The header chunk length was not 6
    #[error("MIDI header length is {0}, expected 6")]
    HeaderLength(u32),
    /// The file is a valid format, just not format 1
    #[error("MIDI format {0:?} is not supported, only format 1 (simultaneous tracks) is")]
    UnsupportedFormat(FormatType),
    /// The format field is not 0, 1 or 2
    #[error("MIDI format {0} is not a known format")]
    UnknownFormat(u16),
}

#[doc = r#"
A set of errors that can occur while reading the header of an existing file
"#]
#[derive(Debug, Error)]
#[error("Reading at Position {position}, {kind}")]
pub struct ReaderError {
    position: usize,
    pub(crate) kind: ReaderErrorKind,
}

/// A kind of error that a reader can produce
#[derive(Debug, Error)]
pub enum ReaderErrorKind {
    /// The header is malformed or unsupported
    #[error("Format {0}")]
    Format(#[from] FormatError),
    /// The file ended before the header did.
    #[error("Read out of bounds!")]
    OutOfBounds,
    /// The underlying source failed
    #[error("I/O {0}")]
    Io(#[from] std::io::Error),
}

impl ReaderError {
    /// Create a reader error from a position and kind
    pub const fn new(position: usize, kind: ReaderErrorKind) -> Self {
        Self { position, kind }
    }
    /// True if out of bounds or unexpected end of file
    pub const fn is_out_of_bounds(&self) -> bool {
        matches!(self.kind, ReaderErrorKind::OutOfBounds)
    }
    /// Returns the format violation, if that is what this is
    pub const fn format_error(&self) -> Option<&FormatError> {
        match &self.kind {
            ReaderErrorKind::Format(e) => Some(e),
            _ => None,
        }
    }
    /// Returns the error kind of the reader.
    pub fn error_kind(&self) -> &ReaderErrorKind {
        &self.kind
    }
    /// Returns the position where the read error occurred.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Create a new format error
    pub const fn format(position: usize, error: FormatError) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::Format(error),
        }
    }

    /// Create a new out of bounds error
    pub const fn oob(position: usize) -> Self {
        Self {
            position,
            kind: ReaderErrorKind::OutOfBounds,
        }
    }

    pub(crate) fn io(position: usize, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::UnexpectedEof {
            return Self::oob(position);
        }
        Self {
            position,
            kind: ReaderErrorKind::Io(error),
        }
    }
}

/// The Read Result type (see [`ReaderError`])
pub type ReadResult<T> = Result<T, ReaderError>;
