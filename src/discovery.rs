/*!
 * File discovery and tree generation
 *
 * Walks a repository root applying the extension allow-list and directory
 * exclusion set, producing the ordered file list (README first) and the
 * plain-text tree diagram rendered into the Markdown output.
 */

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use glob_match::glob_match;
use once_cell::sync::Lazy;
use walkdir::WalkDir;

use crate::config::Config;
use crate::types::DiscoveredFile;

/// Extensions recognized as text-bearing (lowercase, without the dot)
pub static TEXT_EXTENSIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        // Programming languages
        "py", "pyw", "pyi", "js", "mjs", "cjs", "ts", "tsx", "mts", "jsx", "java", "c", "h",
        "cpp", "hpp", "cc", "hh", "cs", "go", "rs", "rb", "php", "swift", "kt", "kts", "scala",
        "r", "lua", "pl", "pm", "sh", "bash", "zsh", "fish", "ps1", "psm1", "bat", "cmd",
        // Web
        "html", "htm", "xhtml", "css", "scss", "sass", "less", "vue", "svelte",
        // Data & config
        "json", "jsonl", "json5", "yaml", "yml", "toml", "xml", "xsl", "xslt", "ini", "cfg",
        "conf", "env", "properties", "prettierrc", "eslintrc",
        // Documentation
        "md", "markdown", "mdx", "rst", "txt", "text", "adoc", "asciidoc",
        // Build & CI
        "dockerfile", "makefile", "cmake", "gradle", "tf", "tfvars",
        // Other
        "sql", "graphql", "gql", "proto", "csv", "tsv", "editorconfig",
    ]
    .into_iter()
    .collect()
});

/// Extension-less filenames recognized as text-bearing (exact basename match)
pub static INCLUDE_FILENAMES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "Dockerfile",
        "Makefile",
        "Jenkinsfile",
        "Vagrantfile",
        "Procfile",
        "Gemfile",
        "Rakefile",
        "LICENSE",
        "CHANGELOG",
        "CONTRIBUTING",
        "AUTHORS",
        "CODEOWNERS",
        "README",
        ".gitignore",
        ".gitattributes",
        ".dockerignore",
        ".editorconfig",
        ".prettierrc",
        ".eslintrc",
        ".nvmrc",
        ".python-version",
        ".ruby-version",
        ".node-version",
    ]
    .into_iter()
    .collect()
});

/// Directory names always excluded from the walk (wildcards allowed)
pub static EXCLUDE_DIRS: Lazy<Vec<&'static str>> = Lazy::new(|| {
    vec![
        // Version control
        ".git",
        ".svn",
        ".hg",
        ".bzr",
        // Python
        "__pycache__",
        ".pytest_cache",
        ".mypy_cache",
        ".tox",
        ".nox",
        ".eggs",
        "*.egg-info",
        ".venv",
        "venv",
        "env",
        ".env",
        // JavaScript
        "node_modules",
        "bower_components",
        ".next",
        ".nuxt",
        // Build output
        "dist",
        "build",
        "target",
        // IDEs & editors
        ".idea",
        ".vscode",
        ".vs",
        "*.xcodeproj",
        "*.xcworkspace",
        // Caches & coverage
        ".gradle",
        ".cache",
        ".parcel-cache",
        "coverage",
        ".nyc_output",
        "htmlcov",
    ]
});

/// Discovers and filters files under a repository root
pub struct Discovery {
    root: PathBuf,
    extensions: HashSet<String>,
    exclude_dirs: Vec<String>,
}

impl Discovery {
    /// Create a discovery instance for a root directory
    ///
    /// Merges the built-in tables with the configured custom extensions and
    /// exclusion names. The `.pdf` extension joins the allow-list only when
    /// PDF handling is enabled.
    pub fn new(root: &Path, config: &Config) -> Self {
        let mut extensions: HashSet<String> =
            TEXT_EXTENSIONS.iter().map(|e| e.to_string()).collect();
        extensions.extend(config.custom_extensions.iter().cloned());
        if config.include_pdf {
            extensions.insert("pdf".to_string());
        }

        let mut exclude_dirs: Vec<String> = EXCLUDE_DIRS.iter().map(|d| d.to_string()).collect();
        exclude_dirs.extend(config.exclude_dirs.iter().cloned());

        Self {
            root: root.to_path_buf(),
            extensions,
            exclude_dirs,
        }
    }

    /// Check if a directory name matches the exclusion set
    pub fn should_exclude_dir(&self, dir_name: &str) -> bool {
        self.exclude_dirs.iter().any(|pattern| {
            if pattern.contains('*') {
                glob_match(pattern, dir_name)
            } else {
                pattern == dir_name
            }
        })
    }

    /// Check if a file is selected by the extension or basename allow-lists
    pub fn is_included_file(&self, path: &Path) -> bool {
        let name = path.file_name().unwrap_or_default().to_string_lossy();

        if INCLUDE_FILENAMES.contains(name.as_ref()) {
            return true;
        }

        match path.extension() {
            Some(ext) => self
                .extensions
                .contains(ext.to_string_lossy().to_lowercase().as_str()),
            None => false,
        }
    }

    /// Whether a file shows up in the tree diagram
    fn is_visible(&self, path: &Path, at_root: bool) -> bool {
        if at_root && is_readme_name(path) {
            return true;
        }
        self.is_included_file(path)
    }

    /// Discover all selected files under the root
    ///
    /// Excluded directories are pruned before descent. The result is ordered:
    /// the root-level README first (`README.md` preferred over other variants),
    /// then the remaining files in lowercase path-lexical order. An empty or
    /// fully-excluded tree yields an empty list.
    pub fn discover_files(&self) -> Vec<DiscoveredFile> {
        let mut files: Vec<DiscoveredFile> = Vec::new();
        let mut readme: Option<DiscoveredFile> = None;

        let walker = WalkDir::new(&self.root).into_iter().filter_entry(|e| {
            e.depth() == 0
                || !e.file_type().is_dir()
                || !self.should_exclude_dir(&e.file_name().to_string_lossy())
        });

        for entry in walker.filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let relative = match path.strip_prefix(&self.root) {
                Ok(rel) => rel.to_path_buf(),
                Err(_) => continue,
            };

            let discovered = DiscoveredFile {
                path: path.to_path_buf(),
                relative,
            };

            // Root-level README variants are always included; the preferred
            // one sorts first in the final list
            if entry.depth() == 1 && is_readme_name(path) {
                let name = discovered.name().to_lowercase();
                match &readme {
                    None => readme = Some(discovered),
                    Some(current) if name == "readme.md" => {
                        files.push(current.clone());
                        readme = Some(discovered);
                    }
                    Some(_) => files.push(discovered),
                }
            } else if self.is_included_file(path) {
                files.push(discovered);
            }
        }

        files.sort_by_key(|f| f.relative.to_string_lossy().to_lowercase());

        if let Some(readme) = readme {
            files.insert(0, readme);
        }

        files
    }

    /// Generate a plain-text tree diagram of the repository structure
    ///
    /// Directories sort before files, both in lowercase name order. Excluded
    /// directories are pruned before descent; only files the discovery would
    /// select are shown. Depth limiting happens during construction: levels
    /// past `max_depth` collapse into a single `...` entry so sibling
    /// ordering stays correct at the boundary.
    pub fn generate_tree(&self, max_depth: Option<usize>) -> String {
        let root_name = self
            .root
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        let mut lines = vec![format!("{}/", root_name)];
        self.build_tree(&self.root, "", &mut lines, 0, max_depth);
        lines.join("\n")
    }

    fn build_tree(
        &self,
        directory: &Path,
        prefix: &str,
        lines: &mut Vec<String>,
        depth: usize,
        max_depth: Option<usize>,
    ) {
        let mut entries: Vec<(String, PathBuf, bool)> = match fs::read_dir(directory) {
            Ok(iter) => iter
                .filter_map(|e| e.ok())
                .map(|e| {
                    let is_dir = e.path().is_dir();
                    (e.file_name().to_string_lossy().to_string(), e.path(), is_dir)
                })
                .filter(|(name, path, is_dir)| {
                    if *is_dir {
                        !self.should_exclude_dir(name)
                    } else {
                        self.is_visible(path, depth == 0)
                    }
                })
                .collect(),
            Err(_) => return,
        };

        if entries.is_empty() {
            return;
        }

        if let Some(max) = max_depth {
            if depth >= max {
                lines.push(format!("{}└── ...", prefix));
                return;
            }
        }

        entries.sort_by_key(|(name, _, is_dir)| (!is_dir, name.to_lowercase()));

        let count = entries.len();
        for (i, (name, path, is_dir)) in entries.into_iter().enumerate() {
            let is_last = i == count - 1;
            let connector = if is_last { "└── " } else { "├── " };

            if is_dir {
                lines.push(format!("{}{}{}/", prefix, connector, name));
                let extension = if is_last { "    " } else { "│   " };
                self.build_tree(
                    &path,
                    &format!("{}{}", prefix, extension),
                    lines,
                    depth + 1,
                    max_depth,
                );
            } else {
                lines.push(format!("{}{}{}", prefix, connector, name));
            }
        }
    }
}

/// Check if a path's basename is a README variant
fn is_readme_name(path: &Path) -> bool {
    path.file_name()
        .unwrap_or_default()
        .to_string_lossy()
        .to_lowercase()
        .starts_with("readme")
}
