//! Error types for ckv

use std::path::PathBuf;

/// Result type for ckv operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading, querying or rewriting a ckv file.
///
/// Every variant is fatal to the operation that produced it. Variants raised
/// by the parser carry the 1-based line number of the offending line.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to open file {}", .path.display())]
    FileOpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid output stream")]
    InvalidOutputStream {
        #[source]
        source: std::io::Error,
    },

    /// `line` is `None` when the character came from a value being set
    /// rather than from the file.
    #[error("Invalid character {}", .ch.escape_debug())]
    InvalidCharacter { ch: char, line: Option<usize> },

    #[error("Found '=' without a key")]
    EqualToWithoutAKey { line: usize },

    #[error("Key should be followed by a '='")]
    MissingEqualTo { line: usize },

    #[error("Trailing characters after '='")]
    TrailingCharsAfterEqualTo { line: usize },

    #[error("Tab found with no preceding key")]
    ValueWithoutAKey { line: usize },

    #[error("\"{key}\": key not found")]
    KeyNotFound { key: String },

    #[error("\"{key}\": No value found for key.")]
    NoValueFoundForKey { key: String },
}

/// Fieldless discriminant of [`Error`], handy for matching and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    FileOpenFailed,
    InvalidOutputStream,
    InvalidCharacter,
    EqualToWithoutAKey,
    MissingEqualTo,
    TrailingCharsAfterEqualTo,
    ValueWithoutAKey,
    KeyNotFound,
    NoValueFoundForKey,
}

impl Error {
    pub fn file_open(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileOpenFailed {
            path: path.into(),
            source,
        }
    }

    pub fn output(source: std::io::Error) -> Self {
        Self::InvalidOutputStream { source }
    }

    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    pub fn no_value(key: impl Into<String>) -> Self {
        Self::NoValueFoundForKey { key: key.into() }
    }

    /// The source line this error points at, if it is tied to one.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::InvalidCharacter { line, .. } => *line,
            Self::EqualToWithoutAKey { line }
            | Self::MissingEqualTo { line }
            | Self::TrailingCharsAfterEqualTo { line }
            | Self::ValueWithoutAKey { line } => Some(*line),
            Self::FileOpenFailed { .. }
            | Self::InvalidOutputStream { .. }
            | Self::KeyNotFound { .. }
            | Self::NoValueFoundForKey { .. } => None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::FileOpenFailed { .. } => ErrorKind::FileOpenFailed,
            Self::InvalidOutputStream { .. } => ErrorKind::InvalidOutputStream,
            Self::InvalidCharacter { .. } => ErrorKind::InvalidCharacter,
            Self::EqualToWithoutAKey { .. } => ErrorKind::EqualToWithoutAKey,
            Self::MissingEqualTo { .. } => ErrorKind::MissingEqualTo,
            Self::TrailingCharsAfterEqualTo { .. } => ErrorKind::TrailingCharsAfterEqualTo,
            Self::ValueWithoutAKey { .. } => ErrorKind::ValueWithoutAKey,
            Self::KeyNotFound { .. } => ErrorKind::KeyNotFound,
            Self::NoValueFoundForKey { .. } => ErrorKind::NoValueFoundForKey,
        }
    }
}
