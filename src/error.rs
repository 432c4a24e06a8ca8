// ============================================================
// Pipeline Errors
// ============================================================
// Typed failures raised by the data, ml and application layers.
// The CLI wraps them in anyhow::Error; tests downcast to match
// on the variant.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PipelineError {
    /// Nothing left to fit: the corpus was empty, or the
    /// validation split consumed every sample.
    #[error("cannot train on an empty dataset ({stage})")]
    EmptyDataset {
        /// Where the emptiness was detected
        stage: &'static str,
    },

    /// A sample's feature vector does not match the network input width.
    #[error("feature width mismatch: network expects {expected}, sample {index} has {actual}")]
    FeatureWidth {
        expected: usize,
        actual:   usize,
        index:    usize,
    },

    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The label scheme cannot produce targets for this kind of sample.
    #[error("label scheme '{scheme}' is not applicable to {variant} samples")]
    LabelScheme {
        scheme:  String,
        variant: String,
    },
}
