/*!
 * Error types for repository resolution
 */

use thiserror::Error;

/// Errors that can occur while resolving a repository source
#[derive(Error, Debug)]
pub enum GitError {
    /// Invalid Git URL format
    #[error("Invalid Git URL: {0}")]
    InvalidUrl(String),

    /// Error cloning a Git repository
    #[error("Failed to clone repository: {0}")]
    CloneError(git2::Error),

    /// Local source path does not exist or is not a directory
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// IO error during Git operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Specialized Result type for Git operations
pub type GitResult<T> = Result<T, GitError>;
