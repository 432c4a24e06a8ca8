// ============================================================
// Layer 4 - Text Corpus Loader
// ============================================================
// Loads every file with the configured extension (default `txt`)
// from one directory, one Document per file.
//
// Ordering: entries are sorted by file name, so the result is stable
// for a given filesystem state regardless of read_dir order.
//
// Failure policy:
//   - missing directory   → warning, empty corpus
//   - unreadable file     → error (or warning + skip when
//                           `skip_unreadable` is set)
//   - non-UTF-8 contents  → same as unreadable

use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::domain::document::Document;
use crate::domain::traits::DocumentSource;

/// Loads all text files with a given extension from a directory.
#[derive(Debug, Clone)]
pub struct TextCorpusLoader {
    dir:             PathBuf,
    extension:       String,
    skip_unreadable: bool,
}

impl TextCorpusLoader {
    /// Create a loader for `*.txt` files in `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir:             dir.into(),
            extension:       "txt".to_string(),
            skip_unreadable: false,
        }
    }

    /// Match a different file extension (without the leading dot).
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Log and skip files that cannot be read instead of failing.
    pub fn with_skip_unreadable(mut self, skip: bool) -> Self {
        self.skip_unreadable = skip;
        self
    }

    /// Paths of the matching files, sorted by file name.
    pub fn matching_paths(&self) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();

        for entry in fs::read_dir(&self.dir)
            .with_context(|| format!("Cannot read directory '{}'", self.dir.display()))?
        {
            let path = entry?.path();
            if path.is_file()
                && path.extension().and_then(|e| e.to_str()) == Some(self.extension.as_str())
            {
                paths.push(path);
            }
        }

        paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(paths)
    }
}

impl DocumentSource for TextCorpusLoader {
    fn load_all(&self) -> Result<Vec<Document>> {
        if !self.dir.exists() {
            tracing::warn!(
                "Corpus directory '{}' does not exist, returning empty corpus",
                self.dir.display()
            );
            return Ok(Vec::new());
        }

        let mut docs = Vec::new();

        for path in self.matching_paths()? {
            match load_single_text(&path) {
                Ok(doc) => {
                    tracing::debug!("Loaded: {} ({} chars)", doc.source, doc.text.chars().count());
                    docs.push(doc);
                }
                Err(e) if self.skip_unreadable => {
                    tracing::warn!("Skipping '{}': {:#}", path.display(), e);
                }
                Err(e) => return Err(e),
            }
        }

        tracing::info!(
            "Loaded {} .{} documents from '{}'",
            docs.len(),
            self.extension,
            self.dir.display()
        );
        Ok(docs)
    }
}

/// Read one file as UTF-8 and wrap it in a Document named after the file.
fn load_single_text(path: &Path) -> Result<Document> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Cannot read '{}' as UTF-8 text", path.display()))?;

    let source = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();

    Ok(Document::new(source, text))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &[u8]) {
        fs::write(dir.path().join(name), contents).unwrap();
    }

    #[test]
    fn test_loads_only_txt_files_sorted_by_name() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.txt", b"second");
        write(&dir, "a.txt", b"first");
        write(&dir, "c.txt", b"third");
        write(&dir, "notes.md", b"ignored");
        write(&dir, "data.txt.bak", b"ignored");
        fs::create_dir(dir.path().join("nested.txt")).unwrap();

        let docs = TextCorpusLoader::new(dir.path()).load_all().unwrap();

        let sources: Vec<&str> = docs.iter().map(|d| d.source.as_str()).collect();
        assert_eq!(sources, vec!["a.txt", "b.txt", "c.txt"]);
        let texts: Vec<&str> = docs.iter().map(|d| d.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn test_order_is_stable_across_calls() {
        let dir = TempDir::new().unwrap();
        for name in ["z.txt", "m.txt", "a.txt", "k.txt"] {
            write(&dir, name, name.as_bytes());
        }
        let loader = TextCorpusLoader::new(dir.path());
        assert_eq!(loader.load_all().unwrap(), loader.load_all().unwrap());
    }

    #[test]
    fn test_missing_directory_gives_empty_corpus() {
        let dir  = TempDir::new().unwrap();
        let docs = TextCorpusLoader::new(dir.path().join("absent")).load_all().unwrap();
        assert!(docs.is_empty());
    }

    #[test]
    fn test_invalid_utf8_is_an_error_by_default() {
        let dir = TempDir::new().unwrap();
        write(&dir, "bad.txt", &[0xff, 0xfe, 0xfd]);
        assert!(TextCorpusLoader::new(dir.path()).load_all().is_err());
    }

    #[test]
    fn test_invalid_utf8_is_skipped_when_requested() {
        let dir = TempDir::new().unwrap();
        write(&dir, "bad.txt", &[0xff, 0xfe, 0xfd]);
        write(&dir, "good.txt", "小说".as_bytes());

        let docs = TextCorpusLoader::new(dir.path())
            .with_skip_unreadable(true)
            .load_all()
            .unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].text, "小说");
    }

    #[test]
    fn test_custom_extension() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.txt", b"text");
        write(&dir, "b.md", b"markdown");

        let docs = TextCorpusLoader::new(dir.path())
            .with_extension("md")
            .load_all()
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].source, "b.md");
    }
}
