pub type Result<T> = std::result::Result<T, DatError>;

#[derive(Debug, thiserror::Error)]
pub enum DatError {
    #[error("Upstream IO Error: {0}")]
    IO(#[from] std::io::Error),

    #[error("Invalid DAT file magic: expected {expected:#010X}, found {found:#010X}")]
    InvalidMagic { expected: u32, found: u32 },

    #[error("Archive truncated reading {section}: need {needed} bytes at offset {offset}, {available} available")]
    Truncated {
        section: String,
        offset: u64,
        needed: u64,
        available: u64,
    },

    #[error("Invalid file name `{name}`: {rule}")]
    InvalidName { name: String, rule: NameRule },

    #[error("Archive would exceed the 32-bit offset range: {size} bytes")]
    ArchiveTooLarge { size: u64 },
}

/// The naming constraint a rejected file name violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameRule {
    /// No `.` separator, so no extension can be split off.
    MissingExtension,
    /// Base name must be 1 to 8 bytes.
    BaseLength,
    /// Extension must be exactly 3 bytes.
    ExtensionLength,
    /// Base name contains an additional `.` (multi-part extension).
    ExtraDot,
    /// Contains a byte outside 7-bit ASCII.
    NonAscii,
    /// Contains an embedded NUL byte.
    Nul,
    /// Contains a path separator.
    PathSeparator,
}

impl std::fmt::Display for NameRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let msg = match self {
            NameRule::MissingExtension => "missing extension",
            NameRule::BaseLength => "base name must be 1-8 characters",
            NameRule::ExtensionLength => "extension must be exactly 3 characters",
            NameRule::ExtraDot => "multiple extensions are not allowed",
            NameRule::NonAscii => "name must be valid ASCII",
            NameRule::Nul => "name contains a NUL byte",
            NameRule::PathSeparator => "name contains a path separator",
        };
        f.write_str(msg)
    }
}
