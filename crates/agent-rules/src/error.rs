//! Error types for conversion operations.

use std::path::PathBuf;

/// Errors that can occur while converting files.
///
/// Parsing itself never fails: malformed frontmatter and missing markers
/// degrade to empty values. Only the file-system side of a conversion
/// produces errors.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// The path is invalid or has no usable file name.
    #[error("invalid path: {0}")]
    InvalidPath(PathBuf),

    /// An input file could not be read.
    #[error("failed to read {path}: {source}")]
    ReadFile {
        /// The file that was being read.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// An output file could not be written.
    #[error("failed to write {path}: {source}")]
    WriteFile {
        /// The file that was being written.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// An I/O error occurred.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// A specialized Result type for conversion operations.
pub type Result<T> = std::result::Result<T, Error>;
