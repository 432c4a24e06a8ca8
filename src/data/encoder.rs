// ============================================================
// Layer 4 - Feature Encoders
// ============================================================
// The two FeatureEncoder strategies:
//
//   TextEncoder   text → vocabulary ids → padded to max_len
//   StateEncoder  PendulumState → [theta, omega], no normalisation

use crate::data::padding::{pad_sequence, Truncation};
use crate::data::vocabulary::Vocabulary;
use crate::domain::sample::PendulumState;
use crate::domain::traits::FeatureEncoder;

/// Encodes text through a fitted vocabulary into fixed-length id rows.
#[derive(Debug, Clone)]
pub struct TextEncoder {
    vocabulary: Vocabulary,
    max_len:    usize,
    truncation: Truncation,
}

impl TextEncoder {
    pub fn new(vocabulary: Vocabulary, max_len: usize, truncation: Truncation) -> Self {
        Self { vocabulary, max_len, truncation }
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// The padded id sequence for `text`.
    pub fn token_ids(&self, text: &str) -> Vec<u32> {
        pad_sequence(&self.vocabulary.encode(text), self.max_len, self.truncation)
    }
}

impl FeatureEncoder for TextEncoder {
    type Raw = str;

    fn width(&self) -> usize {
        self.max_len
    }

    fn encode(&self, raw: &str) -> Vec<f32> {
        self.token_ids(raw).into_iter().map(|id| id as f32).collect()
    }
}

/// Concatenates the two state fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateEncoder;

impl FeatureEncoder for StateEncoder {
    type Raw = PendulumState;

    fn width(&self) -> usize {
        2
    }

    fn encode(&self, raw: &PendulumState) -> Vec<f32> {
        vec![raw.theta, raw.omega]
    }
}
