/*!
 * Core types and data structures for the git2md application
 */

use std::path::PathBuf;

/// A file selected by discovery
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredFile {
    /// Absolute path on disk
    pub path: PathBuf,
    /// Path relative to the repository root
    pub relative: PathBuf,
}

impl DiscoveredFile {
    /// File basename
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string()
    }
}

/// Why a file's content was replaced by a skip marker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Binary content detected in the leading bytes
    Binary,
    /// File size exceeds the configured limit
    TooLarge(u64),
    /// File could not be opened or read
    Unreadable(String),
    /// PDF text extraction failed
    PdfExtraction(String),
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SkipReason::Binary => write!(f, "binary file"),
            SkipReason::TooLarge(size) => write!(f, "file too large ({} bytes)", size),
            SkipReason::Unreadable(e) => write!(f, "unreadable file: {}", e),
            SkipReason::PdfExtraction(e) => write!(f, "PDF extraction failed: {}", e),
        }
    }
}

/// Outcome of reading one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileBody {
    /// Decoded text content
    Text(String),
    /// Content replaced by a skip marker
    Skipped(SkipReason),
}

/// A discovered file together with its content and rendering metadata
#[derive(Debug, Clone)]
pub struct FileContent {
    /// The discovered file
    pub file: DiscoveredFile,
    /// Language identifier for the fenced code block (empty if unknown)
    pub language: String,
    /// Decoded content or skip marker
    pub body: FileBody,
    /// Whether the content came from PDF extraction
    pub is_pdf: bool,
}

/// Result of one conversion run
#[derive(Debug, Clone)]
pub struct Conversion {
    /// The complete rendered Markdown document
    pub markdown: String,
    /// Chunked output when splitting was enabled
    pub chunks: Option<Vec<String>>,
    /// Files written to disk (empty when writing to stdout)
    pub written: Vec<PathBuf>,
}
