// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything from raw inputs to tensor batches.
//
// Text variants:
//
//   .txt files
//       │
//       ▼
//   TextCorpusLoader  → reads every matching file, one Document each
//       │
//       ▼
//   TextNormalizer    → filters, lowercases, splits into tokens
//       │
//       ▼
//   Vocabulary        → frequency-ranked word → index table
//       │
//       ▼
//   TextEncoder       → index sequence, padded/truncated to max_len
//
// Pendulum variant:
//
//   PendulumGenerator → uniform (θ, ω) states
//       │
//       ▼
//   StateEncoder      → [θ, ω] feature rows
//
// Both paths end in the same place:
//
//   LabelScheme       → one target per sample
//   split_train_val   → tail held out for validation
//   EncodedDataset    → Burn Dataset
//   FeatureBatcher    → Burn Batcher, [N, width] inputs + [N, 1] targets
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads text files from a corpus directory
pub mod loader;

/// Text filtering and word splitting
pub mod preprocessor;

/// Word index fitted on the corpus
pub mod vocabulary;

/// Fixed-length sequence padding and truncation
pub mod padding;

/// Random pendulum state generation
pub mod pendulum;

/// Text and state feature encoders
pub mod encoder;

/// Target label schemes
pub mod labels;

/// Implements Burn's Dataset trait for encoded samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Splits samples into train/validation sets
pub mod splitter;
