// ============================================================
// Layer 5 — Inferencer
// ============================================================
// Runs a trained network on the inner (non-autodiff) backend and
// returns one prediction per input row: a probability for
// classification networks, the regressed value otherwise.

use anyhow::{Context, Result};
use burn::{module::AutodiffModule, prelude::*, tensor::backend::AutodiffBackend};

use crate::data::batcher::FeatureBatcher;
use crate::error::PipelineError;
use crate::ml::model::{Network, Objective};

pub struct Predictor<B: Backend> {
    model:       Network<B>,
    objective:   Objective,
    input_width: usize,
    batcher:     FeatureBatcher<B>,
}

impl<B: Backend> Predictor<B> {
    pub fn new(model: Network<B>, objective: Objective, input_width: usize, device: B::Device) -> Self {
        Self { model, objective, input_width, batcher: FeatureBatcher::new(device) }
    }

    /// Drop the autodiff graph of a freshly trained network.
    pub fn from_trained<A>(model: &Network<A>, objective: Objective, input_width: usize, device: B::Device) -> Self
    where
        A: AutodiffBackend<InnerBackend = B>,
    {
        Self::new(model.valid(), objective, input_width, device)
    }

    pub fn predict(&self, rows: &[Vec<f32>]) -> Result<Vec<f32>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        if let Some(index) = rows.iter().position(|r| r.len() != self.input_width) {
            return Err(PipelineError::FeatureWidth {
                expected: self.input_width,
                actual:   rows[index].len(),
                index,
            }
            .into());
        }

        let output = self.objective.activate(self.model.forward(self.batcher.inputs(rows)));
        let values = output
            .into_data()
            .convert::<f32>()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("{e:?}"))
            .context("Reading predictions back from the device")?;

        tracing::debug!("Predicted {} rows", values.len());
        Ok(values)
    }
}
