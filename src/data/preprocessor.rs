// ============================================================
// Layer 4 - Text Normalizer
// ============================================================
// Splits raw text into lowercase word tokens before the
// vocabulary sees it.
//
// Steps (applied in order):
//   1. Lowercase the whole string
//   2. Replace every filter character with a space
//   3. Optionally isolate CJK ideographs as single-character tokens
//   4. Split on whitespace, dropping empty pieces
//
// The default filter set is ASCII punctuation plus tab and newline.
// Full-width punctuation such as '，' is NOT filtered, so without
// `split_cjk` a run of Chinese text stays one token.

use serde::{Deserialize, Serialize};

/// Characters replaced by a space before splitting.
pub const DEFAULT_FILTERS: &str = "!\"#$%&()*+,-./:;<=>?@[\\]^_`{|}~\t\n";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextNormalizer {
    filters:   String,
    lowercase: bool,
    split_cjk: bool,
}

impl TextNormalizer {
    pub fn new() -> Self {
        Self {
            filters:   DEFAULT_FILTERS.to_string(),
            lowercase: true,
            split_cjk: false,
        }
    }

    pub fn with_filters(mut self, filters: impl Into<String>) -> Self {
        self.filters = filters.into();
        self
    }

    pub fn with_lowercase(mut self, lowercase: bool) -> Self {
        self.lowercase = lowercase;
        self
    }

    /// Emit every CJK ideograph as its own token.
    pub fn with_split_cjk(mut self, split_cjk: bool) -> Self {
        self.split_cjk = split_cjk;
        self
    }

    /// Tokenize `text` into owned word tokens.
    pub fn tokens(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };

        let mut spaced = String::with_capacity(text.len());
        for c in text.chars() {
            if self.filters.contains(c) {
                spaced.push(' ');
            } else if self.split_cjk && is_cjk_ideograph(c) {
                spaced.push(' ');
                spaced.push(c);
                spaced.push(' ');
            } else {
                spaced.push(c);
            }
        }

        spaced.split_whitespace().map(str::to_string).collect()
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// CJK Unified Ideographs, Extension A and the Compatibility block.
fn is_cjk_ideograph(c: char) -> bool {
    matches!(
        c,
        '\u{4E00}'..='\u{9FFF}' | '\u{3400}'..='\u{4DBF}' | '\u{F900}'..='\u{FAFF}'
    )
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_splits() {
        let n = TextNormalizer::new();
        assert_eq!(n.tokens("The Cat  sat"), vec!["the", "cat", "sat"]);
    }

    #[test]
    fn test_filters_ascii_punctuation() {
        let n = TextNormalizer::new();
        assert_eq!(
            n.tokens("Hello, world! (again)\tand\nagain."),
            vec!["hello", "world", "again", "and", "again"]
        );
    }

    #[test]
    fn test_keeps_apostrophes() {
        // The apostrophe is not part of the filter set
        let n = TextNormalizer::new();
        assert_eq!(n.tokens("don't stop"), vec!["don't", "stop"]);
    }

    #[test]
    fn test_chinese_run_is_one_token_by_default() {
        let n = TextNormalizer::new();
        assert_eq!(
            n.tokens("小说里面包括哪些情节，请总结"),
            vec!["小说里面包括哪些情节，请总结"]
        );
    }

    #[test]
    fn test_split_cjk_isolates_ideographs() {
        let n = TextNormalizer::new().with_split_cjk(true);
        assert_eq!(n.tokens("小说，ok"), vec!["小", "说", "，ok"]);
    }

    #[test]
    fn test_empty_and_punctuation_only() {
        let n = TextNormalizer::new();
        assert!(n.tokens("").is_empty());
        assert!(n.tokens("!!! ...").is_empty());
    }

    #[test]
    fn test_case_preserved_when_lowercase_disabled() {
        let n = TextNormalizer::new().with_lowercase(false);
        assert_eq!(n.tokens("Rust"), vec!["Rust"]);
    }
}
