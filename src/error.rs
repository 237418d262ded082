/*!
 * Global error handling for git2md
 *
 * Per-file problems never surface here: they are recovered locally and
 * rendered as skip markers. This type covers the fatal failures only —
 * source resolution and output writing.
 */

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::git::GitError;

/// Global error type for conversion runs
#[derive(Error, Debug)]
pub enum ConvertError {
    /// Source resolution errors (invalid URL, clone failure, invalid path)
    #[error(transparent)]
    Git(#[from] GitError),

    /// Output file could not be created or written
    #[error("Failed to write output {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File system errors
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Specialized Result type for conversion operations
pub type Result<T> = std::result::Result<T, ConvertError>;
