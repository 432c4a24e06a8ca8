// ============================================================
// Layer 3 - Document Domain Type
// ============================================================
// A single text file loaded from the corpus directory.
// Plain data: a source name for traceability plus the raw text.

use serde::{Deserialize, Serialize};

/// A raw document loaded from disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// The file name the text came from
    pub source: String,

    /// The full file contents, untouched
    pub text: String,
}

impl Document {
    /// Create a new Document with a source name and text content.
    ///
    /// Example:
    ///   let doc = Document::new("chapter1.txt", "It was a dark night...");
    pub fn new(source: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            text:   text.into(),
        }
    }
}
