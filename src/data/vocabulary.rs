// ============================================================
// Layer 4 - Vocabulary
// ============================================================
// Frequency-ranked token → index mapping, fitted once on the
// training corpus.
//
// Index layout:
//   0               reserved for padding, never assigned to a token
//   1               the OOV token, when one is configured
//   1.. / 2..       corpus tokens, most frequent first; ties keep
//                   the order in which tokens were first seen
//
// Only indices below `max_words` are emitted by `encode`. Tokens
// ranked beyond the cap, and tokens never seen during fitting, are
// dropped, or mapped to the OOV index when one is configured.

use std::collections::HashMap;

use crate::data::preprocessor::TextNormalizer;

/// Index reserved for the padding filler.
pub const PAD_INDEX: u32 = 0;

#[derive(Debug, Clone)]
pub struct Vocabulary {
    normalizer: TextNormalizer,
    /// token → index, for every token seen during fitting
    word_index: HashMap<String, u32>,
    /// index → token; slot 0 is the empty padding entry
    index_word: Vec<String>,
    /// token → occurrence count
    counts:     HashMap<String, usize>,
    max_words:  usize,
    oov_index:  Option<u32>,
}

impl Vocabulary {
    /// Count tokens over `texts` and rank them.
    pub fn fit<S: AsRef<str>>(
        texts:      &[S],
        normalizer: TextNormalizer,
        max_words:  usize,
        oov_token:  Option<&str>,
    ) -> Self {
        // Insertion order is tracked so ties rank by first occurrence.
        let mut counts: HashMap<String, usize> = HashMap::new();
        let mut first_seen: Vec<String>        = Vec::new();

        for text in texts {
            for token in normalizer.tokens(text.as_ref()) {
                let count = counts.entry(token.clone()).or_insert_with(|| {
                    first_seen.push(token.clone());
                    0
                });
                *count += 1;
            }
        }

        // Stable sort keeps first-seen order among equal counts
        let mut ranked = first_seen;
        ranked.sort_by(|a, b| counts[b].cmp(&counts[a]));

        let mut index_word = vec![String::new()];
        let mut oov_index  = None;
        if let Some(oov) = oov_token {
            oov_index = Some(index_word.len() as u32);
            index_word.push(oov.to_string());
            ranked.retain(|t| t != oov);
        }
        index_word.extend(ranked);

        let word_index = index_word
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, w)| (w.clone(), i as u32))
            .collect();

        tracing::debug!(
            "Vocabulary fitted: {} distinct tokens, {} usable (max_words={})",
            index_word.len() - 1,
            index_word.len().min(max_words).saturating_sub(1),
            max_words
        );

        Self { normalizer, word_index, index_word, counts, max_words, oov_index }
    }

    /// Map `text` to token indices, in token order.
    pub fn encode(&self, text: &str) -> Vec<u32> {
        self.normalizer
            .tokens(text)
            .iter()
            .filter_map(|token| match self.word_index.get(token) {
                Some(&i) if (i as usize) < self.max_words => Some(i),
                _ => self.oov_index,
            })
            .collect()
    }

    /// Map indices back to tokens. Padding and unknown indices are skipped.
    pub fn decode(&self, ids: &[u32]) -> Vec<&str> {
        ids.iter()
            .filter(|&&id| id != PAD_INDEX)
            .filter_map(|&id| self.token(id))
            .collect()
    }

    /// The token stored at `index`, if any.
    pub fn token(&self, index: u32) -> Option<&str> {
        if index == PAD_INDEX {
            return None;
        }
        self.index_word.get(index as usize).map(String::as_str)
    }

    /// The index of `token`, ignoring the `max_words` cap.
    pub fn index_of(&self, token: &str) -> Option<u32> {
        self.word_index.get(token).copied()
    }

    /// How often `token` appeared while fitting.
    pub fn count(&self, token: &str) -> usize {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Number of distinct tokens seen while fitting (OOV token included).
    pub fn len(&self) -> usize {
        self.index_word.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Exclusive upper bound on emitted indices; the embedding table size.
    pub fn max_words(&self) -> usize {
        self.max_words
    }

    pub fn oov_index(&self) -> Option<u32> {
        self.oov_index
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn fit(texts: &[&str], max_words: usize) -> Vocabulary {
        Vocabulary::fit(texts, TextNormalizer::new(), max_words, None)
    }

    #[test]
    fn test_ranks_by_frequency_then_first_occurrence() {
        let v = fit(&["b a c a", "c a d"], 100);
        // a:3, c:2, b:1, d:1 (b seen before d)
        assert_eq!(v.index_of("a"), Some(1));
        assert_eq!(v.index_of("c"), Some(2));
        assert_eq!(v.index_of("b"), Some(3));
        assert_eq!(v.index_of("d"), Some(4));
        assert_eq!(v.count("a"), 3);
        assert_eq!(v.len(), 4);
    }

    #[test]
    fn test_padding_index_is_never_assigned() {
        let v = fit(&["x y z"], 100);
        assert_eq!(v.token(PAD_INDEX), None);
        assert!(v.encode("x y z").iter().all(|&i| i != PAD_INDEX));
    }

    #[test]
    fn test_max_words_caps_emitted_indices() {
        let v = fit(&["a a a b b c"], 3);
        // a=1, b=2 kept; c=3 is not < 3 and is dropped
        assert_eq!(v.encode("a b c"), vec![1, 2]);
    }

    #[test]
    fn test_unknown_tokens_are_dropped() {
        let v = fit(&["known words only"], 100);
        assert_eq!(v.encode("known unknown words"), vec![1, 2]);
    }

    #[test]
    fn test_oov_token_takes_index_one() {
        let v = Vocabulary::fit(&["a a b"], TextNormalizer::new(), 100, Some("<oov>"));
        assert_eq!(v.oov_index(), Some(1));
        assert_eq!(v.index_of("a"), Some(2));
        assert_eq!(v.encode("a zzz b"), vec![2, 1, 3]);
    }

    #[test]
    fn test_oov_token_also_replaces_capped_tokens() {
        let v = Vocabulary::fit(&["a a b c"], TextNormalizer::new(), 3, Some("<oov>"));
        // oov=1, a=2 kept; b=3 and c=4 exceed the cap
        assert_eq!(v.encode("a b c"), vec![2, 1, 1]);
    }

    #[test]
    fn test_round_trip_within_vocabulary() {
        let corpus = ["the quick brown fox jumps over the lazy dog"];
        let v      = fit(&corpus, 1000);
        let text   = "The lazy dog jumps over the quick fox";
        let ids    = v.encode(text);
        assert_eq!(
            v.decode(&ids),
            vec!["the", "lazy", "dog", "jumps", "over", "the", "quick", "fox"]
        );
    }

    #[test]
    fn test_decode_skips_padding_and_unknown_indices() {
        let v = fit(&["one two"], 100);
        assert_eq!(v.decode(&[1, 0, 2, 99, 0]), vec!["one", "two"]);
    }

    #[test]
    fn test_empty_corpus() {
        let v = fit(&[], 10);
        assert!(v.is_empty());
        assert!(v.encode("anything").is_empty());
    }
}
