// ============================================================
// Layer 3 - Domain Layer
// ============================================================
// Plain Rust structs and traits that name the concepts of the
// pipeline. No Burn types, no file I/O.

// A text file loaded from disk
pub mod document;

// Pendulum states and encoded samples
pub mod sample;

// DocumentSource and FeatureEncoder
pub mod traits;
