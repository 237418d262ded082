/*!
 * Markdown rendering and output splitting
 *
 * Renders the document as a sequence of segments (header, then one per file
 * section) joined by blank lines. Splitting packs whole segments into
 * chunks, so a fenced code block is never cut and concatenating the chunks
 * reproduces the unsplit render exactly.
 */

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};
use crate::types::{FileBody, FileContent};

/// Separator between document segments
const SEGMENT_SEP: &str = "\n\n";

/// Generates Markdown output from repository contents
pub struct MarkdownGenerator {
    repo_name: String,
    include_tree: bool,
    include_toc: bool,
    tree: String,
    files: Vec<FileContent>,
}

impl MarkdownGenerator {
    /// Create a generator for a repository
    pub fn new(repo_name: &str, include_tree: bool, include_toc: bool) -> Self {
        Self {
            repo_name: repo_name.to_string(),
            include_tree,
            include_toc,
            tree: String::new(),
            files: Vec::new(),
        }
    }

    /// Set the directory tree diagram
    pub fn set_tree(&mut self, tree: String) {
        self.tree = tree;
    }

    /// Add a file section, in discovery order
    pub fn add_file(&mut self, file: FileContent) {
        self.files.push(file);
    }

    /// Generate the complete Markdown document
    pub fn generate(&self) -> String {
        self.segments().join(SEGMENT_SEP)
    }

    /// Generate the document split into chunks of at most `max_chars`
    ///
    /// Whole segments are packed greedily; a single segment larger than
    /// `max_chars` forms its own oversized chunk rather than being cut.
    /// Joining the chunks with the segment separator reproduces
    /// [`generate`](Self::generate) byte for byte.
    pub fn generate_chunked(&self, max_chars: usize) -> Vec<String> {
        let mut chunks: Vec<String> = Vec::new();
        let mut current = String::new();

        for segment in self.segments() {
            if current.is_empty() {
                current = segment;
                continue;
            }

            if current.len() + SEGMENT_SEP.len() + segment.len() > max_chars {
                chunks.push(std::mem::take(&mut current));
                current = segment;
            } else {
                current.push_str(SEGMENT_SEP);
                current.push_str(&segment);
            }
        }

        if !current.is_empty() {
            chunks.push(current);
        }

        chunks
    }

    /// Write the full document to a single file
    pub fn write_document(&self, path: &Path) -> Result<Vec<PathBuf>> {
        write_output(path, &self.generate())?;
        Ok(vec![path.to_path_buf()])
    }

    /// Write chunked output as numbered part files
    ///
    /// A single chunk keeps the original filename; multiple chunks are named
    /// `<stem>_part<N><ext>`. If any part fails to write, parts already
    /// written are removed so no partial set remains.
    pub fn write_chunks(&self, path: &Path, max_chars: usize) -> Result<Vec<PathBuf>> {
        let chunks = self.generate_chunked(max_chars);

        if chunks.len() <= 1 {
            let content = chunks.into_iter().next().unwrap_or_default();
            write_output(path, &content)?;
            return Ok(vec![path.to_path_buf()]);
        }

        let stem = path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        let ext = path
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();
        let parent = path.parent().unwrap_or_else(|| Path::new(""));

        let mut written: Vec<PathBuf> = Vec::new();
        for (i, chunk) in chunks.iter().enumerate() {
            let part_path = parent.join(format!("{}_part{}{}", stem, i + 1, ext));
            if let Err(e) = write_output(&part_path, chunk) {
                for done in &written {
                    let _ = fs::remove_file(done);
                }
                return Err(e);
            }
            written.push(part_path);
        }

        Ok(written)
    }

    /// Document segments: header first, then one per file section
    fn segments(&self) -> Vec<String> {
        let mut segments = vec![self.header()];
        segments.extend(self.files.iter().map(|f| self.format_file(f)));
        segments
    }

    /// Title, optional tree, optional TOC and the file-contents marker
    fn header(&self) -> String {
        let mut parts = vec![format!("# Repository: {}", self.repo_name)];

        if self.include_tree && !self.tree.is_empty() {
            parts.push(format!(
                "## Repository Structure\n\n```\n{}\n```",
                self.tree
            ));
        }

        if self.include_toc {
            parts.push(self.toc());
        }

        parts.push("## File Contents".to_string());
        parts.join(SEGMENT_SEP)
    }

    /// Table of contents with anchors derived from the section headings
    fn toc(&self) -> String {
        let mut lines = vec!["## Table of Contents".to_string(), String::new()];

        for file in &self.files {
            // Anchor must normalize the same text the heading uses
            let anchor = anchor(&self.heading_text(file));
            lines.push(format!(
                "- [{}](#{})",
                file.file.relative.to_string_lossy(),
                anchor
            ));
        }

        lines.join("\n")
    }

    /// Heading text for a file section
    fn heading_text(&self, file: &FileContent) -> String {
        file.file.name()
    }

    /// Format a single file section
    fn format_file(&self, file: &FileContent) -> String {
        let mut lines = vec![
            format!("### {}", self.heading_text(file)),
            format!("**Path:** `{}`", file.file.relative.to_string_lossy()),
        ];

        if file.is_pdf {
            lines.push("**Type:** PDF (extracted text)".to_string());
        }

        lines.push(String::new());

        match &file.body {
            FileBody::Text(content) => {
                lines.push(format!("```{}", file.language));
                lines.push(content.clone());
                lines.push("```".to_string());
            }
            FileBody::Skipped(reason) => {
                lines.push(format!("[Skipped: {}]", reason));
            }
        }

        lines.join("\n")
    }
}

/// Create a Markdown anchor from heading text
///
/// Lowercases, maps non-alphanumeric runs to single hyphens and trims them.
pub fn anchor(text: &str) -> String {
    let mut anchor = String::with_capacity(text.len());
    let mut last_hyphen = false;

    for c in text.to_lowercase().chars() {
        if c.is_alphanumeric() {
            anchor.push(c);
            last_hyphen = false;
        } else if !last_hyphen {
            anchor.push('-');
            last_hyphen = true;
        }
    }

    anchor.trim_matches('-').to_string()
}

/// Write one output file, creating parent directories as needed
fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| ConvertError::Write {
                path: path.to_path_buf(),
                source: e,
            })?;
        }
    }

    fs::write(path, content).map_err(|e| ConvertError::Write {
        path: path.to_path_buf(),
        source: e,
    })
}
