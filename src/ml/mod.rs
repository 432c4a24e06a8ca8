// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// The network definitions, the training loop and inference.
//
//   model.rs      — NetworkConfig → Network for the three
//                   topologies (recurrent, pooled, dense),
//                   and the Objective that picks the loss
//
//   trainer.rs    — Adam over shuffled mini-batches, with
//                   a held-out tail for validation metrics
//
//   inferencer.rs — Predictor on the inner backend
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)

/// Network topologies and objectives
pub mod model;

/// Training loop with validation metrics
pub mod trainer;

/// Prediction on a trained network
pub mod inferencer;
