// ============================================================
// Layer 4 - Pendulum State Generator
// ============================================================
// Synthetic data for the pendulum regressor: independent uniform
// draws of angle θ ∈ [-π, π] and angular velocity ω ∈ [-1, 1].

use burn::prelude::*;
use rand::Rng;
use std::f32::consts::PI;

use crate::domain::sample::PendulumState;

pub const THETA_RANGE: (f32, f32) = (-PI, PI);
pub const OMEGA_RANGE: (f32, f32) = (-1.0, 1.0);

/// Draws pendulum states from a caller-owned RNG.
pub struct PendulumGenerator<'a, R: Rng> {
    rng: &'a mut R,
}

impl<'a, R: Rng> PendulumGenerator<'a, R> {
    pub fn new(rng: &'a mut R) -> Self {
        Self { rng }
    }

    /// Draw exactly `num_samples` states.
    pub fn generate(&mut self, num_samples: usize) -> PendulumStates {
        let states = (0..num_samples)
            .map(|_| {
                PendulumState::new(
                    self.rng.gen_range(THETA_RANGE.0..=THETA_RANGE.1),
                    self.rng.gen_range(OMEGA_RANGE.0..=OMEGA_RANGE.1),
                )
            })
            .collect();

        PendulumStates { states }
    }
}

/// An ordered set of generated states.
#[derive(Debug, Clone, PartialEq)]
pub struct PendulumStates {
    states: Vec<PendulumState>,
}

impl PendulumStates {
    pub fn as_slice(&self) -> &[PendulumState] {
        &self.states
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn thetas(&self) -> Vec<f32> {
        self.states.iter().map(|s| s.theta).collect()
    }

    pub fn omegas(&self) -> Vec<f32> {
        self.states.iter().map(|s| s.omega).collect()
    }

    /// θ and ω as two column tensors, each of shape [n, 1].
    pub fn column_tensors<B: Backend>(&self, device: &B::Device) -> (Tensor<B, 2>, Tensor<B, 2>) {
        let n = self.states.len();
        let theta = Tensor::from_data(TensorData::new(self.thetas(), [n, 1]), device);
        let omega = Tensor::from_data(TensorData::new(self.omegas(), [n, 1]), device);
        (theta, omega)
    }
}
