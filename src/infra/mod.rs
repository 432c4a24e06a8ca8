// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File outputs that more than one layer relies on:
//
//   metrics.rs — per-epoch metrics, logged and optionally
//                appended to a CSV file
//
//   plot.rs    — scatter plot PNG of pendulum predictions
//
// Reference: Rust Book §12 (I/O and File Handling)

/// Training metrics CSV logger
pub mod metrics;

/// PNG scatter plots
pub mod plot;
