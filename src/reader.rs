/*!
 * Text file reading with binary detection and lossy decoding
 */

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::Read;
use std::path::Path;

use once_cell::sync::Lazy;

use crate::types::{FileBody, SkipReason};

/// Number of leading bytes sampled for binary detection
const BINARY_SAMPLE_SIZE: usize = 8192;

/// Minimum printable ratio for a non-UTF-8 sample to still count as text
const MIN_PRINTABLE_RATIO: f32 = 0.7;

/// Language identifiers for fenced code blocks, keyed by lowercase extension
static LANGUAGE_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("py", "python"),
        ("pyw", "python"),
        ("pyi", "python"),
        ("js", "javascript"),
        ("mjs", "javascript"),
        ("cjs", "javascript"),
        ("jsx", "jsx"),
        ("ts", "typescript"),
        ("tsx", "tsx"),
        ("mts", "typescript"),
        ("html", "html"),
        ("htm", "html"),
        ("xhtml", "html"),
        ("css", "css"),
        ("scss", "scss"),
        ("sass", "sass"),
        ("less", "less"),
        ("vue", "vue"),
        ("svelte", "svelte"),
        ("json", "json"),
        ("jsonl", "json"),
        ("json5", "json5"),
        ("yaml", "yaml"),
        ("yml", "yaml"),
        ("toml", "toml"),
        ("xml", "xml"),
        ("xsl", "xml"),
        ("xslt", "xml"),
        ("sh", "bash"),
        ("bash", "bash"),
        ("zsh", "zsh"),
        ("fish", "fish"),
        ("ps1", "powershell"),
        ("psm1", "powershell"),
        ("bat", "batch"),
        ("cmd", "batch"),
        ("java", "java"),
        ("c", "c"),
        ("h", "c"),
        ("cpp", "cpp"),
        ("hpp", "cpp"),
        ("cc", "cpp"),
        ("hh", "cpp"),
        ("cs", "csharp"),
        ("go", "go"),
        ("rs", "rust"),
        ("rb", "ruby"),
        ("php", "php"),
        ("swift", "swift"),
        ("kt", "kotlin"),
        ("kts", "kotlin"),
        ("scala", "scala"),
        ("r", "r"),
        ("lua", "lua"),
        ("pl", "perl"),
        ("pm", "perl"),
        ("md", "markdown"),
        ("markdown", "markdown"),
        ("mdx", "mdx"),
        ("rst", "rst"),
        ("txt", "text"),
        ("text", "text"),
        ("adoc", "asciidoc"),
        ("asciidoc", "asciidoc"),
        ("ini", "ini"),
        ("cfg", "ini"),
        ("conf", "ini"),
        ("env", "dotenv"),
        ("properties", "properties"),
        ("dockerfile", "dockerfile"),
        ("makefile", "makefile"),
        ("cmake", "cmake"),
        ("gradle", "gradle"),
        ("tf", "terraform"),
        ("tfvars", "terraform"),
        ("sql", "sql"),
        ("graphql", "graphql"),
        ("gql", "graphql"),
        ("proto", "protobuf"),
        ("csv", "csv"),
        ("tsv", "tsv"),
    ]
    .into_iter()
    .collect()
});

/// Language identifiers for recognized extension-less filenames
static FILENAME_LANGUAGE_MAP: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("Dockerfile", "dockerfile"),
        ("Makefile", "makefile"),
        ("Jenkinsfile", "groovy"),
        ("Vagrantfile", "ruby"),
        ("Procfile", "yaml"),
        ("Gemfile", "ruby"),
        ("Rakefile", "ruby"),
        (".gitignore", "gitignore"),
        (".gitattributes", "gitattributes"),
        (".dockerignore", "dockerignore"),
        (".editorconfig", "editorconfig"),
    ]
    .into_iter()
    .collect()
});

/// Reads text files, enforcing size limits and detecting binary content
pub struct TextReader {
    max_file_size: Option<u64>,
}

impl TextReader {
    /// Create a reader with an optional per-file size limit
    pub fn new(max_file_size: Option<u64>) -> Self {
        Self { max_file_size }
    }

    /// Read a file's content as text
    ///
    /// Oversized and binary files become skip markers without reading the
    /// full content. Decoding never fails: invalid UTF-8 falls back to a
    /// lossy decode with replacement characters.
    pub fn read(&self, path: &Path) -> FileBody {
        let metadata = match fs::metadata(path) {
            Ok(m) => m,
            Err(e) => return FileBody::Skipped(SkipReason::Unreadable(e.to_string())),
        };

        if let Some(max) = self.max_file_size {
            if metadata.len() > max {
                return FileBody::Skipped(SkipReason::TooLarge(metadata.len()));
            }
        }

        let mut file = match File::open(path) {
            Ok(f) => f,
            Err(e) => return FileBody::Skipped(SkipReason::Unreadable(e.to_string())),
        };

        let sample_len = BINARY_SAMPLE_SIZE.min(metadata.len() as usize);
        let mut sample = vec![0u8; sample_len];
        let mut read = 0;
        while read < sample_len {
            match file.read(&mut sample[read..]) {
                Ok(0) => break,
                Ok(n) => read += n,
                Err(e) => return FileBody::Skipped(SkipReason::Unreadable(e.to_string())),
            }
        }
        sample.truncate(read);

        if is_binary(&sample) {
            return FileBody::Skipped(SkipReason::Binary);
        }

        let mut bytes = sample;
        if let Err(e) = file.read_to_end(&mut bytes) {
            return FileBody::Skipped(SkipReason::Unreadable(e.to_string()));
        }

        let text = match String::from_utf8(bytes) {
            Ok(text) => text,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        };

        FileBody::Text(text)
    }
}

/// Heuristic binary check on a leading-byte sample
///
/// A NUL byte anywhere in the sample, or invalid UTF-8 combined with a low
/// printable ratio, marks the file as binary.
pub fn is_binary(sample: &[u8]) -> bool {
    if sample.is_empty() {
        return false;
    }

    if sample.contains(&0) {
        return true;
    }

    if std::str::from_utf8(sample).is_ok() {
        return false;
    }

    let printable = sample
        .iter()
        .filter(|&&b| (32..=126).contains(&b) || b == b'\t' || b == b'\n' || b == b'\r')
        .count();

    (printable as f32 / sample.len() as f32) < MIN_PRINTABLE_RATIO
}

/// Language identifier for syntax highlighting, derived from the file name
///
/// Exact basename matches win over extensions; unrecognized files get an
/// empty tag (plain fenced block).
pub fn language_for(path: &Path) -> String {
    let name = path.file_name().unwrap_or_default().to_string_lossy();

    if let Some(lang) = FILENAME_LANGUAGE_MAP.get(name.as_ref()) {
        return lang.to_string();
    }

    if let Some(ext) = path.extension() {
        if let Some(lang) = LANGUAGE_MAP.get(ext.to_string_lossy().to_lowercase().as_str()) {
            return lang.to_string();
        }
    }

    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn test_binary_detection_null_byte() {
        assert!(is_binary(b"hello\x00world"));
        assert!(!is_binary(b"hello world"));
        assert!(!is_binary(b""));
    }

    #[test]
    fn test_binary_detection_printable_ratio() {
        // Invalid UTF-8 with mostly control bytes
        let mut junk = vec![0x80u8, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07];
        junk.extend_from_slice(&[0x1b; 8]);
        assert!(is_binary(&junk));

        // Latin-1 text: invalid UTF-8 but overwhelmingly printable
        let latin1 = b"caf\xe9 au lait, tr\xe8s bien, encore du texte lisible";
        assert!(!is_binary(latin1));
    }

    #[test]
    fn test_read_text_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("a.txt");
        std::fs::write(&path, "line one\nline two\n").unwrap();

        let reader = TextReader::new(None);
        assert_eq!(
            reader.read(&path),
            FileBody::Text("line one\nline two\n".to_string())
        );
    }

    #[test]
    fn test_read_respects_size_limit() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("big.txt");
        std::fs::write(&path, "twenty bytes exactly").unwrap();

        let reader = TextReader::new(Some(10));
        assert_eq!(
            reader.read(&path),
            FileBody::Skipped(SkipReason::TooLarge(20))
        );

        let reader = TextReader::new(Some(1024));
        assert!(matches!(reader.read(&path), FileBody::Text(_)));
    }

    #[test]
    fn test_read_binary_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("blob.bin");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[0u8, 1, 2, 3, 159, 146, 150]).unwrap();

        let reader = TextReader::new(None);
        assert_eq!(reader.read(&path), FileBody::Skipped(SkipReason::Binary));
    }

    #[test]
    fn test_read_invalid_utf8_is_lossy_not_fatal() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("latin1.txt");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"caf\xe9 au lait, du texte presque entierement lisible")
            .unwrap();

        let reader = TextReader::new(None);
        match reader.read(&path) {
            FileBody::Text(text) => assert!(text.contains('\u{FFFD}')),
            other => panic!("expected lossy text, got {:?}", other),
        }
    }

    #[test]
    fn test_read_missing_file() {
        let reader = TextReader::new(None);
        assert!(matches!(
            reader.read(Path::new("/nonexistent/git2md/file.txt")),
            FileBody::Skipped(SkipReason::Unreadable(_))
        ));
    }

    #[test]
    fn test_language_for() {
        assert_eq!(language_for(&PathBuf::from("a.py")), "python");
        assert_eq!(language_for(&PathBuf::from("a.RS")), "rust");
        assert_eq!(language_for(&PathBuf::from("Makefile")), "makefile");
        assert_eq!(language_for(&PathBuf::from(".gitignore")), "gitignore");
        assert_eq!(language_for(&PathBuf::from("a.unknownext")), "");
    }
}
