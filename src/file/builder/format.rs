use num_enum::{IntoPrimitive, TryFromPrimitive};

#[doc = r#"
The three layouts a Standard MIDI File can declare in its header.

Only [`FormatType::Simultaneous`] (format 1) is produced or patched: a
conductor track carrying tempo, followed by tracks that all play at once.
The others are recognised so they can be named when they are rejected.
"#]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, TryFromPrimitive, IntoPrimitive)]
#[repr(u16)]
pub enum FormatType {
    /// Format 0
    SingleMultiChannel = 0,
    /// Format 1
    Simultaneous = 1,
    /// Format 2
    SequentiallyIndependent = 2,
}

impl FormatType {
    /// Returns the 2 big-endian bytes stored in the header.
    pub fn to_be_bytes(self) -> [u8; 2] {
        u16::from(self).to_be_bytes()
    }
}
