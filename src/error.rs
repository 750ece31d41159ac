//! Error types for `bethstrings`

use std::path::PathBuf;

use thiserror::Error;

/// The error type for `bethstrings` operations.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum Error {
    // ==================== Argument Errors ====================
    /// The file extension is not one of `.strings`, `.dlstrings` or `.ilstrings`.
    #[error("invalid string table extension: {0:?} (expected .strings, .dlstrings or .ilstrings)")]
    InvalidExtension(String),

    /// The encoding label is not recognized.
    #[error("unknown encoding: {0:?} (expected UTF-8, Windows-1250, Windows-1251 or Windows-1252)")]
    UnknownEncoding(String),

    /// The string id is already present in the table.
    #[error("string id {0} already exists in the table")]
    DuplicateId(u32),

    /// No string with the given id exists in the table.
    #[error("string id {0} not found in the table")]
    IdNotFound(u32),

    // ==================== Memory Errors ====================
    /// An allocation sized from file-declared counts failed.
    #[error("out of memory: {0}")]
    OutOfMemory(#[from] std::collections::TryReserveError),

    // ==================== File Read Errors ====================
    /// Reading the file from disk failed.
    #[error("failed to read {path}: {source}")]
    FileReadFailed {
        /// The path that could not be read.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    /// The buffer ends before the declared directory or data block does.
    #[error("truncated string table: need {needed} bytes, have {available}")]
    TruncatedFile {
        /// Bytes required by the declared sizes.
        needed: usize,
        /// Bytes actually present.
        available: usize,
    },

    /// A referenced string has no null terminator inside the data block.
    #[error("missing null terminator for string at data offset {offset}")]
    MissingTerminator {
        /// Offset into the data block where the payload starts.
        offset: usize,
    },

    /// The data block does not parse as a dense sequence of framed strings.
    #[error("misaligned data block: entry at offset {offset} overruns block of {data_size} bytes")]
    MisalignedData {
        /// Offset of the entry that overran.
        offset: usize,
        /// Declared data block length.
        data_size: usize,
    },

    // ==================== File Write Errors ====================
    /// Writing the file to disk failed.
    #[error("failed to write {path}: {source}")]
    FileWriteFailed {
        /// The path that could not be written.
        path: PathBuf,
        /// The underlying IO error.
        source: std::io::Error,
    },

    // ==================== Encoding Errors ====================
    /// Bytes are neither valid UTF-8 nor valid in the fallback code page.
    #[error("string bytes are not valid UTF-8 or {encoding}")]
    DecodeFailed {
        /// The fallback encoding that was tried.
        encoding: &'static str,
    },

    /// Text contains characters the target code page cannot represent.
    #[error("string {text:?} cannot be encoded in {encoding}")]
    UnencodableText {
        /// The text that failed to encode.
        text: String,
        /// The target encoding.
        encoding: &'static str,
    },
}

/// Coarse error categories, one per failure class a caller may branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Bad or missing id, duplicate id, unrecognized extension or encoding.
    InvalidArgument,
    /// A file-sized allocation failed.
    OutOfMemory,
    /// Truncated or malformed input buffer, or disk read failure.
    FileReadFailure,
    /// Disk write failure.
    FileWriteFailure,
    /// Undecodable bytes on read or unrepresentable text on write.
    EncodingError,
}

impl Error {
    /// The category this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidExtension(_)
            | Error::UnknownEncoding(_)
            | Error::DuplicateId(_)
            | Error::IdNotFound(_) => ErrorKind::InvalidArgument,
            Error::OutOfMemory(_) => ErrorKind::OutOfMemory,
            Error::FileReadFailed { .. }
            | Error::TruncatedFile { .. }
            | Error::MissingTerminator { .. }
            | Error::MisalignedData { .. } => ErrorKind::FileReadFailure,
            Error::FileWriteFailed { .. } => ErrorKind::FileWriteFailure,
            Error::DecodeFailed { .. } | Error::UnencodableText { .. } => ErrorKind::EncodingError,
        }
    }
}

/// A specialized Result type for `bethstrings` operations.
pub type Result<T> = std::result::Result<T, Error>;
