// ============================================================
// Layer 3 - Sample Domain Types
// ============================================================
// The numeric sample kinds that flow through the pipeline:
//
//   PendulumState  - one (angle, angular velocity) pair
//   EncodedSample  - a fixed-width feature vector plus its target
//
// No Burn types here; tensors are built in the data layer.

use serde::{Deserialize, Serialize};

/// One simulated pendulum state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PendulumState {
    /// Angle in radians, within [-π, π]
    pub theta: f32,

    /// Angular velocity, within [-1, 1]
    pub omega: f32,
}

impl PendulumState {
    pub fn new(theta: f32, omega: f32) -> Self {
        Self { theta, omega }
    }
}

/// A sample after feature encoding: every sample of a run has the
/// same `features.len()`, equal to the network's input width.
///
/// Token ids are carried as `f32`. Vocabulary indices are capped
/// well below 2^24, so the conversion is exact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedSample {
    pub features: Vec<f32>,
    pub target:   f32,
}

impl EncodedSample {
    pub fn new(features: Vec<f32>, target: f32) -> Self {
        Self { features, target }
    }

    pub fn width(&self) -> usize {
        self.features.len()
    }
}
