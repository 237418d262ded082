/*!
 * End-to-end tests for git2md conversion
 */

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tempfile::{tempdir, TempDir};

use crate::config::Config;
use crate::converter::Converter;
use crate::error::ConvertError;
use crate::git::GitError;

fn write_file(root: &Path, rel: &str, content: &[u8]) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    let mut file = File::create(path).unwrap();
    file.write_all(content).unwrap();
}

// A small repository with a README, source code and excluded junk
fn setup_test_repo() -> TempDir {
    let temp = tempdir().unwrap();
    write_file(temp.path(), "README.md", b"# Hi");
    write_file(temp.path(), "src/a.py", b"print(1)");
    write_file(temp.path(), "node_modules/x.js", b"var x;");
    temp
}

fn convert(config: Config, source: &Path, output: Option<&Path>) -> crate::types::Conversion {
    Converter::new(config)
        .convert(source.to_str().unwrap(), output)
        .unwrap()
}

#[test]
fn test_basic_conversion() {
    let repo = setup_test_repo();
    let conversion = convert(Config::default(), repo.path(), None);
    let md = &conversion.markdown;

    // Tree lists included files only
    assert!(md.contains("## Repository Structure"));
    assert!(md.contains("README.md"));
    assert!(md.contains("a.py"));
    assert!(!md.contains("node_modules"));
    assert!(!md.contains("x.js"));

    // README section comes before the source section
    let readme_pos = md.find("### README.md").unwrap();
    let source_pos = md.find("### a.py").unwrap();
    assert!(readme_pos < source_pos);

    assert!(md.contains("**Path:** `src/a.py`"));
    assert!(md.contains("```python\nprint(1)\n```"));
}

#[test]
fn test_conversion_is_idempotent() {
    let repo = setup_test_repo();

    let first = convert(Config::default(), repo.path(), None);
    let second = convert(Config::default(), repo.path(), None);

    assert_eq!(first.markdown, second.markdown);
}

#[test]
fn test_oversized_file_in_tree_with_skip_marker() {
    let repo = tempdir().unwrap();
    write_file(repo.path(), "small.txt", b"tiny");
    write_file(repo.path(), "big.txt", b"twenty bytes exactly");

    let mut config = Config::default();
    config.max_file_size = Some(10);
    let md = convert(config, repo.path(), None).markdown;

    // The oversized file stays discoverable: tree entry plus skip marker
    let tree_end = md.find("## File Contents").unwrap();
    assert!(md[..tree_end].contains("big.txt"));
    assert!(md.contains("### big.txt"));
    assert!(md.contains("[Skipped: file too large (20 bytes)]"));

    // The small file keeps its code block
    assert!(md.contains("```text\ntiny\n```"));
}

#[test]
fn test_binary_file_is_skipped() {
    let repo = tempdir().unwrap();
    write_file(repo.path(), "data.csv", b"a,b\x00\x01\x02");
    write_file(repo.path(), "ok.txt", b"fine");

    let md = convert(Config::default(), repo.path(), None).markdown;

    assert!(md.contains("### data.csv"));
    assert!(md.contains("[Skipped: binary file]"));
    assert!(md.contains("```text\nfine\n```"));
}

#[test]
fn test_toc_generation() {
    let repo = setup_test_repo();

    let mut config = Config::default();
    config.include_toc = true;
    let md = convert(config, repo.path(), None).markdown;

    assert!(md.contains("## Table of Contents"));
    assert!(md.contains("- [README.md](#readme-md)"));
    assert!(md.contains("- [src/a.py](#a-py)"));
}

#[test]
fn test_no_tree() {
    let repo = setup_test_repo();

    let mut config = Config::default();
    config.include_tree = false;
    let md = convert(config, repo.path(), None).markdown;

    assert!(!md.contains("## Repository Structure"));
    assert!(md.contains("### README.md"));
}

#[test]
fn test_custom_exclude_dirs() {
    let repo = setup_test_repo();

    let mut config = Config::default();
    config.exclude_dirs = vec!["src".to_string()];
    let md = convert(config, repo.path(), None).markdown;

    assert!(md.contains("### README.md"));
    assert!(!md.contains("a.py"));
}

#[test]
fn test_write_single_output_file() {
    let repo = setup_test_repo();
    let out_dir = tempdir().unwrap();
    let out = out_dir.path().join("repo.md");

    let conversion = convert(Config::default(), repo.path(), Some(&out));

    assert_eq!(conversion.written, vec![out.clone()]);
    let on_disk = fs::read_to_string(&out).unwrap();
    assert_eq!(on_disk, conversion.markdown);
}

#[test]
fn test_split_output() {
    let repo = tempdir().unwrap();
    for i in 0..5 {
        write_file(
            repo.path(),
            &format!("file{}.txt", i),
            "content line\n".repeat(20).as_bytes(),
        );
    }
    let out_dir = tempdir().unwrap();
    let out = out_dir.path().join("repo.md");

    let mut config = Config::default();
    config.split = true;
    config.max_chars = 400;
    let conversion = convert(config, repo.path(), Some(&out));

    let chunks = conversion.chunks.as_ref().unwrap();
    assert!(chunks.len() > 1);
    assert_eq!(conversion.written.len(), chunks.len());

    // Concatenating chunks reproduces the unsplit render
    assert_eq!(chunks.join("\n\n"), conversion.markdown);

    // Part files on disk hold exactly the chunks, with numbered names
    for (i, path) in conversion.written.iter().enumerate() {
        assert!(path
            .file_name()
            .unwrap()
            .to_string_lossy()
            .contains(&format!("_part{}", i + 1)));
        assert_eq!(fs::read_to_string(path).unwrap(), chunks[i]);
    }

    // No chunk splits a fenced block, and only whole-section chunks exceed
    // the budget (here none should)
    for chunk in chunks {
        assert_eq!(chunk.matches("```").count() % 2, 0);
    }
}

#[test]
fn test_split_with_binary_file_keeps_properties() {
    let repo = tempdir().unwrap();
    for i in 0..3 {
        write_file(
            repo.path(),
            &format!("file{}.txt", i),
            "content line\n".repeat(20).as_bytes(),
        );
    }
    write_file(repo.path(), "blob.csv", b"a,b\x00\x01\x02");

    let mut config = Config::default();
    config.split = true;
    config.max_chars = 400;
    let conversion = convert(config, repo.path(), None);

    let md = &conversion.markdown;
    assert!(md.contains("### blob.csv"));
    assert!(md.contains("[Skipped: binary file]"));

    let chunks = conversion.chunks.as_ref().unwrap();
    assert!(chunks.len() > 1);
    assert_eq!(chunks.join("\n\n"), conversion.markdown);
    for chunk in chunks {
        assert!(chunk.len() <= 400, "chunk of {} chars", chunk.len());
        assert_eq!(chunk.matches("```").count() % 2, 0);
    }
}

#[test]
fn test_invalid_source_path_is_fatal() {
    let converter = Converter::new(Config::default());
    let err = converter
        .convert("/nonexistent/git2md/repo", None)
        .unwrap_err();

    assert!(matches!(
        err,
        ConvertError::Git(GitError::InvalidPath(_))
    ));
}

#[test]
fn test_source_file_rejected() {
    let repo = tempdir().unwrap();
    write_file(repo.path(), "file.txt", b"content");

    let converter = Converter::new(Config::default());
    let err = converter
        .convert(repo.path().join("file.txt").to_str().unwrap(), None)
        .unwrap_err();

    assert!(matches!(
        err,
        ConvertError::Git(GitError::InvalidPath(_))
    ));
}

#[test]
fn test_empty_directory_converts_cleanly() {
    let repo = tempdir().unwrap();
    let conversion = convert(Config::default(), repo.path(), None);

    assert!(conversion.markdown.contains("# Repository:"));
    assert!(conversion.markdown.contains("## File Contents"));
}

#[test]
fn test_repo_title_uses_directory_name() {
    let parent = tempdir().unwrap();
    let repo = parent.path().join("myproject");
    fs::create_dir(&repo).unwrap();
    write_file(&repo, "a.txt", b"text");

    let md = convert(Config::default(), &repo, None).markdown;
    assert!(md.starts_with("# Repository: myproject"));
}

#[test]
fn test_max_tree_depth() {
    let repo = tempdir().unwrap();
    write_file(repo.path(), "top.txt", b"top");
    write_file(repo.path(), "a/b/deep.txt", b"deep");

    let mut config = Config::default();
    config.max_tree_depth = Some(1);
    let md = convert(config, repo.path(), None).markdown;

    let tree_start = md.find("## Repository Structure").unwrap();
    let tree_end = md.find("## File Contents").unwrap();
    let tree = &md[tree_start..tree_end];

    assert!(tree.contains("top.txt"));
    assert!(tree.contains("a/"));
    assert!(tree.contains("..."));
    assert!(!tree.contains("deep.txt"));

    // Depth limiting applies to the tree only; the file is still converted
    assert!(md.contains("### deep.txt"));
}
