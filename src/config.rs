/*!
 * Configuration handling for git2md
 */

use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

use crate::error::{ConvertError, Result};

/// Default character budget per output file when splitting
pub const DEFAULT_MAX_CHARS: usize = 100_000;

/// Command-line arguments for git2md
#[derive(Parser, Debug, Clone)]
#[clap(
    name = "git2md",
    version = env!("CARGO_PKG_VERSION"),
    about = "Convert a Git repository into a single Markdown document for LLM context",
    long_about = "Converts a Git repository (remote URL or local path) into a single Markdown \
document: a directory tree summary followed by the contents of each text-bearing file, fenced \
and labeled for LLM consumption."
)]
pub struct Args {
    /// Git repository URL or local path to convert
    pub source: Option<String>,

    /// Output file path (default: <repo_name>.md in the current directory)
    #[clap(short, long)]
    pub output: Option<PathBuf>,

    /// Include PDF files using text extraction (requires the `pdf` feature)
    #[clap(long)]
    pub include_pdf: bool,

    /// Exclude the directory tree from output
    #[clap(long)]
    pub no_tree: bool,

    /// Include a table of contents
    #[clap(long)]
    pub include_toc: bool,

    /// Maximum depth for the directory tree display
    #[clap(long, value_name = "DEPTH")]
    pub max_depth: Option<usize>,

    /// Maximum file size in bytes to include (larger files become skip markers)
    #[clap(long, value_name = "BYTES")]
    pub max_file_size: Option<u64>,

    /// Additional file extensions to include (e.g. jsx tsx)
    #[clap(long, num_args = 1.., value_delimiter = ',')]
    pub extensions: Vec<String>,

    /// Additional directory names to exclude
    #[clap(long, num_args = 1.., value_delimiter = ',')]
    pub exclude_dirs: Vec<String>,

    /// Split output into multiple files based on character limit
    #[clap(long)]
    pub split: bool,

    /// Maximum characters per output file when using --split
    #[clap(long, default_value_t = DEFAULT_MAX_CHARS, value_name = "CHARS")]
    pub max_chars: usize,

    /// Write output to stdout instead of a file
    #[clap(long)]
    pub stdout: bool,

    /// Check whether PDF support is available and exit
    #[clap(long)]
    pub check_pdf: bool,

    /// Enable verbose output on stderr
    #[clap(short, long)]
    pub verbose: bool,

    /// Generate shell completions
    #[clap(long = "generate", value_enum, value_name = "SHELL")]
    pub generate: Option<Shell>,
}

/// Application configuration, read-only for the duration of one conversion
#[derive(Clone, Debug)]
pub struct Config {
    /// Whether to include PDF files
    pub include_pdf: bool,

    /// Whether to include the directory tree section
    pub include_tree: bool,

    /// Whether to include a table of contents
    pub include_toc: bool,

    /// Maximum depth for the directory tree display
    pub max_tree_depth: Option<usize>,

    /// Maximum file size in bytes to include
    pub max_file_size: Option<u64>,

    /// Additional extensions merged into the allow-list (normalized, no dot)
    pub custom_extensions: Vec<String>,

    /// Additional directory names merged into the exclusion set
    pub exclude_dirs: Vec<String>,

    /// Whether to split output by character budget
    pub split: bool,

    /// Maximum characters per output file when splitting
    pub max_chars: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            include_pdf: false,
            include_tree: true,
            include_toc: false,
            max_tree_depth: None,
            max_file_size: None,
            custom_extensions: Vec::new(),
            exclude_dirs: Vec::new(),
            split: false,
            max_chars: DEFAULT_MAX_CHARS,
        }
    }
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args(args: &Args) -> Self {
        Self {
            include_pdf: args.include_pdf,
            include_tree: !args.no_tree,
            include_toc: args.include_toc,
            max_tree_depth: args.max_depth,
            max_file_size: args.max_file_size,
            custom_extensions: args
                .extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
            exclude_dirs: args.exclude_dirs.clone(),
            split: args.split,
            max_chars: args.max_chars,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_chars == 0 {
            return Err(ConvertError::Config(
                "--max-chars must be greater than zero".to_string(),
            ));
        }

        if self.max_tree_depth == Some(0) {
            return Err(ConvertError::Config(
                "--max-depth must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}
