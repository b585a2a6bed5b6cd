//! Error types for DDS decoding.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when decoding a DDS file.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input path does not exist.
    #[error("file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The stream does not start with the `DDS ` magic.
    #[error("invalid DDS magic: expected 'DDS ', got {0:?}")]
    InvalidFormat(Vec<u8>),

    /// The header is malformed.
    #[error("invalid DDS header: {0}")]
    InvalidHeader(String),

    /// Pixel format is not one of DXT1, DXT5, RGB24 or RGBA32.
    #[error("unsupported pixel format: {0}")]
    UnsupportedFormat(String),

    /// The payload offset lies beyond the end of the stream.
    #[error("truncated payload: data starts at byte {offset} but the stream is {length} bytes long")]
    TruncatedPayload { offset: u64, length: u64 },

    /// Settings file could not be parsed.
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),

    /// A texture name pattern failed to compile.
    #[error("invalid texture pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Broad category of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FileNotFound,
    InvalidFormat,
    InvalidHeader,
    UnsupportedFormat,
    TruncatedPayload,
    Io,
    Settings,
}

impl Error {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::FileNotFound(_) => ErrorKind::FileNotFound,
            Error::InvalidFormat(_) => ErrorKind::InvalidFormat,
            Error::InvalidHeader(_) => ErrorKind::InvalidHeader,
            Error::UnsupportedFormat(_) => ErrorKind::UnsupportedFormat,
            Error::TruncatedPayload { .. } => ErrorKind::TruncatedPayload,
            Error::Io(_) => ErrorKind::Io,
            Error::Settings(_) | Error::Pattern(_) => ErrorKind::Settings,
        }
    }
}

/// Result type for DDS operations.
pub type Result<T> = std::result::Result<T, Error>;
