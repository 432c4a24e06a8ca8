// ============================================================
// Layer 3 - Core Traits (Abstractions)
// ============================================================
// The two seams of the pipeline:
//
//   DocumentSource  - where raw text comes from
//   FeatureEncoder  - how a raw sample becomes a fixed-width vector
//
// The application layer only talks to these traits, so the text and
// pendulum variants share one Load → Encode → Train → Evaluate flow.

use anyhow::Result;

use crate::domain::document::Document;

// ─── DocumentSource ───────────────────────────────────────────────────────────
/// Any component that can load documents from a source.
///
/// Implementations:
///   - TextCorpusLoader → every `*.txt` file of a directory
pub trait DocumentSource {
    /// Load all available documents, in a stable order.
    fn load_all(&self) -> Result<Vec<Document>>;
}

// ─── FeatureEncoder ───────────────────────────────────────────────────────────
/// Turns one raw sample into a feature vector of constant width.
///
/// Implementations:
///   - TextEncoder  → vocabulary indices, padded to max_sequence_length
///   - StateEncoder → [theta, omega]
pub trait FeatureEncoder {
    /// The raw sample type this encoder accepts
    type Raw: ?Sized;

    /// Length of every vector returned by `encode`
    fn width(&self) -> usize;

    fn encode(&self, raw: &Self::Raw) -> Vec<f32>;

    /// Encode a whole slice, preserving order.
    fn encode_all<R>(&self, raws: &[R]) -> Vec<Vec<f32>>
    where
        R: std::borrow::Borrow<Self::Raw>,
    {
        raws.iter().map(|r| self.encode(r.borrow())).collect()
    }
}
