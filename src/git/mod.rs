/*!
 * Repository source resolution
 *
 * Resolves a source string (remote URL or local path) to a local directory,
 * cloning remote repositories into a scoped temporary directory that is
 * removed when the resolved handle is dropped.
 */

mod error;
mod progress;
mod url;

// Re-export public items
pub use error::{GitError, GitResult};
pub use progress::{CloneProgress, ProgressReporter};
pub use url::{is_git_url, parse_git_url, RepoUrl};

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use git2::{build::RepoBuilder, FetchOptions, RemoteCallbacks};
use tempfile::TempDir;

/// A resolved repository location
///
/// For remote sources this owns the temporary clone directory; dropping the
/// value removes the clone even when later pipeline stages fail.
#[derive(Debug)]
pub struct ResolvedRepo {
    path: PathBuf,
    name: String,
    temp: Option<TempDir>,
}

impl ResolvedRepo {
    /// Local directory containing the working tree
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Repository name, used for headings and the default output filename
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this repository was cloned into a temporary directory
    pub fn is_temporary(&self) -> bool {
        self.temp.is_some()
    }

    /// Delete any temporary clone, surfacing removal errors
    ///
    /// Dropping the value performs the same cleanup best-effort.
    pub fn release(mut self) -> io::Result<()> {
        match self.temp.take() {
            Some(temp) => temp.close(),
            None => Ok(()),
        }
    }
}

/// Resolve a source string to a local directory
///
/// Remote URLs are shallow-cloned; local paths are validated to exist and be
/// directories. Plain directories that are not Git working trees are accepted.
pub fn resolve<P: ProgressReporter + ?Sized>(
    source: &str,
    progress: Option<&P>,
) -> GitResult<ResolvedRepo> {
    if is_git_url(source) {
        clone_repository(source, progress)
    } else {
        resolve_local(source)
    }
}

/// Derive the repository name from a source string without resolving it
///
/// Used to compute the default output filename before any clone happens.
pub fn repo_name(source: &str) -> String {
    if let Ok(repo) = parse_git_url(source) {
        return repo.name;
    }

    Path::new(source)
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_else(|| "repository".to_string())
}

/// Shallow-clone a remote repository into a fresh temporary directory
fn clone_repository<P: ProgressReporter + ?Sized>(
    url: &str,
    progress: Option<&P>,
) -> GitResult<ResolvedRepo> {
    let info = parse_git_url(url)?;

    let temp = tempfile::Builder::new()
        .prefix("git2md-")
        .tempdir()
        .map_err(GitError::IoError)?;
    let clone_path = temp.path().join(&info.name);

    let mut fetch_options = FetchOptions::new();
    fetch_options.depth(1);

    if let Some(reporter) = progress {
        let mut callbacks = RemoteCallbacks::new();
        callbacks.transfer_progress(|stats| {
            reporter.report(&CloneProgress {
                total_objects: stats.total_objects(),
                received_objects: stats.received_objects(),
                received_bytes: stats.received_bytes(),
            });
            true
        });
        fetch_options.remote_callbacks(callbacks);
    }

    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch_options);

    // The TempDir is dropped (and deleted) on the error path
    builder
        .clone(&info.url, &clone_path)
        .map_err(GitError::CloneError)?;

    Ok(ResolvedRepo {
        path: clone_path,
        name: info.name,
        temp: Some(temp),
    })
}

/// Validate a local source path
fn resolve_local(source: &str) -> GitResult<ResolvedRepo> {
    let path = Path::new(source);

    if !path.exists() {
        return Err(GitError::InvalidPath(format!(
            "Path does not exist: {}",
            source
        )));
    }

    if !path.is_dir() {
        return Err(GitError::InvalidPath(format!(
            "Path is not a directory: {}",
            source
        )));
    }

    let path = fs::canonicalize(path)?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "repository".to_string());

    Ok(ResolvedRepo {
        path,
        name,
        temp: None,
    })
}
