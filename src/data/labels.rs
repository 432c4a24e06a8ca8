// ============================================================
// Layer 4 - Label Schemes
// ============================================================
// Where training targets come from. The text corpora carry no
// labels, so the text variants default to random 0/1 targets:
// a placeholder, not a supervised signal. A constant target and
// the pendulum's own angular velocity are the other schemes.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::sample::PendulumState;
use crate::error::PipelineError;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "scheme", content = "value")]
pub enum LabelScheme {
    /// Independent fair 0/1 draws, one per sample
    RandomBinary,
    /// The same value for every sample
    Constant(f32),
    /// The pendulum's ω (pendulum samples only)
    AngularVelocity,
}

impl LabelScheme {
    pub fn name(&self) -> &'static str {
        match self {
            LabelScheme::RandomBinary    => "random-binary",
            LabelScheme::Constant(_)     => "constant",
            LabelScheme::AngularVelocity => "angular-velocity",
        }
    }

    /// True when every produced target is exactly 0 or 1.
    pub fn is_binary(&self) -> bool {
        match self {
            LabelScheme::RandomBinary    => true,
            LabelScheme::Constant(v)     => *v == 0.0 || *v == 1.0,
            LabelScheme::AngularVelocity => false,
        }
    }

    /// Targets for `count` text samples.
    pub fn text_labels<R: Rng>(&self, count: usize, rng: &mut R) -> Result<Vec<f32>, PipelineError> {
        match self {
            LabelScheme::RandomBinary => {
                Ok((0..count).map(|_| rng.gen_range(0..2u8) as f32).collect())
            }
            LabelScheme::Constant(v) => Ok(vec![*v; count]),
            LabelScheme::AngularVelocity => Err(PipelineError::LabelScheme {
                scheme:  self.name().to_string(),
                variant: "text".to_string(),
            }),
        }
    }

    /// Targets for pendulum states, in order.
    pub fn pendulum_labels<R: Rng>(&self, states: &[PendulumState], rng: &mut R) -> Vec<f32> {
        match self {
            LabelScheme::RandomBinary    => (0..states.len()).map(|_| rng.gen_range(0..2u8) as f32).collect(),
            LabelScheme::Constant(v)     => vec![*v; states.len()],
            LabelScheme::AngularVelocity => states.iter().map(|s| s.omega).collect(),
        }
    }
}
