/*!
 * git2md - Convert a Git repository into a single Markdown document
 *
 * This library turns a repository working tree (local path or remote URL)
 * into Markdown suitable as context for Large Language Models: a directory
 * tree diagram followed by each text-bearing file's contents in fenced,
 * labeled code blocks.
 */

pub mod config;
pub mod converter;
pub mod discovery;
pub mod error;
pub mod git;
pub mod markdown;
pub mod pdf;
pub mod reader;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export main components for easier access
pub use config::{Args, Config};
pub use converter::Converter;
pub use discovery::Discovery;
pub use error::{ConvertError, Result};
pub use markdown::MarkdownGenerator;
pub use reader::TextReader;
pub use types::{Conversion, DiscoveredFile, FileBody, FileContent, SkipReason};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
