/*!
 * Conversion orchestration
 *
 * Ties source resolution, discovery, reading and rendering into one
 * `convert` call. The pipeline is sequential; the only managed resource is
 * the temporary clone directory, released on every exit path.
 */

use std::path::Path;

use crate::config::Config;
use crate::discovery::Discovery;
use crate::error::Result;
use crate::git::{self, ProgressReporter, ResolvedRepo};
use crate::markdown::MarkdownGenerator;
use crate::pdf;
use crate::reader::{language_for, TextReader};
use crate::types::{Conversion, FileBody, FileContent, SkipReason};

/// Orchestrates one repository-to-Markdown conversion
pub struct Converter {
    config: Config,
    progress: Option<Box<dyn ProgressReporter>>,
}

impl Converter {
    /// Create a converter with a configuration
    pub fn new(config: Config) -> Self {
        Self {
            config,
            progress: None,
        }
    }

    /// Attach a progress reporter for clone operations
    pub fn with_progress<P: ProgressReporter + 'static>(mut self, reporter: P) -> Self {
        self.progress = Some(Box::new(reporter));
        self
    }

    /// Convert a repository source to Markdown
    ///
    /// When `output` is given the result is written there (as numbered part
    /// files when splitting is enabled); otherwise the caller receives the
    /// in-memory value only. Fatal errors abort the run after the temporary
    /// clone, if any, has been removed.
    pub fn convert(&self, source: &str, output: Option<&Path>) -> Result<Conversion> {
        let repo = git::resolve(source, self.progress.as_deref())?;

        // The temp clone is dropped with `repo` on every error path below
        let result = self.convert_resolved(&repo, output);
        let released = repo.release();

        let conversion = result?;
        released?;
        Ok(conversion)
    }

    fn convert_resolved(&self, repo: &ResolvedRepo, output: Option<&Path>) -> Result<Conversion> {
        let discovery = Discovery::new(repo.path(), &self.config);
        let files = discovery.discover_files();

        let mut generator = MarkdownGenerator::new(
            repo.name(),
            self.config.include_tree,
            self.config.include_toc,
        );
        if self.config.include_tree {
            generator.set_tree(discovery.generate_tree(self.config.max_tree_depth));
        }

        let reader = TextReader::new(self.config.max_file_size);

        for file in files {
            let is_pdf = self.config.include_pdf
                && file
                    .path
                    .extension()
                    .map(|e| e.eq_ignore_ascii_case("pdf"))
                    .unwrap_or(false);

            let content = if is_pdf {
                let body = match pdf::extract(&file.path) {
                    Ok(text) => FileBody::Text(text),
                    Err(e) => FileBody::Skipped(SkipReason::PdfExtraction(e.to_string())),
                };
                FileContent {
                    file,
                    // Extracted PDF text reads as prose
                    language: "markdown".to_string(),
                    body,
                    is_pdf: true,
                }
            } else {
                let language = language_for(&file.path);
                FileContent {
                    body: reader.read(&file.path),
                    file,
                    language,
                    is_pdf: false,
                }
            };

            generator.add_file(content);
        }

        let markdown = generator.generate();
        let chunks = self
            .config
            .split
            .then(|| generator.generate_chunked(self.config.max_chars));

        let written = match output {
            Some(path) if self.config.split => generator.write_chunks(path, self.config.max_chars)?,
            Some(path) => generator.write_document(path)?,
            None => Vec::new(),
        };

        Ok(Conversion {
            markdown,
            chunks,
            written,
        })
    }
}
