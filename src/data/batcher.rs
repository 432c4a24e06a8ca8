// ============================================================
// Layer 4 - Feature Batcher
// ============================================================
// Implements Burn's Batcher trait: stacks N encoded samples into
//   inputs  [N, width]  (token ids or raw state values)
//   targets [N, 1]
//
// All samples of a batch share one width; the trainer checks this
// before any batch is built.

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
};

use crate::domain::sample::EncodedSample;

#[derive(Debug, Clone)]
pub struct FeatureBatch<B: Backend> {
    /// Shape [batch_size, width]
    pub inputs: Tensor<B, 2>,

    /// Shape [batch_size, 1]
    pub targets: Tensor<B, 2>,
}

#[derive(Clone, Debug)]
pub struct FeatureBatcher<B: Backend> {
    device: B::Device,
}

impl<B: Backend> FeatureBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    /// Stack bare feature rows without targets (inference input).
    pub fn inputs(&self, rows: &[Vec<f32>]) -> Tensor<B, 2> {
        let width = rows.first().map(Vec::len).unwrap_or(0);
        let flat: Vec<f32> = rows.iter().flat_map(|r| r.iter().copied()).collect();
        Tensor::from_data(TensorData::new(flat, [rows.len(), width]), &self.device)
    }
}

impl<B: Backend> Batcher<EncodedSample, FeatureBatch<B>> for FeatureBatcher<B> {
    fn batch(&self, items: Vec<EncodedSample>) -> FeatureBatch<B> {
        let batch_size = items.len();
        let width      = items.first().map(EncodedSample::width).unwrap_or(0);

        let flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.features.iter().copied())
            .collect();
        let targets: Vec<f32> = items.iter().map(|s| s.target).collect();

        let inputs = Tensor::from_data(TensorData::new(flat, [batch_size, width]), &self.device);
        let targets = Tensor::from_data(TensorData::new(targets, [batch_size, 1]), &self.device);

        FeatureBatch { inputs, targets }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    #[test]
    fn test_batch_shapes_and_values() {
        let batcher = FeatureBatcher::<NdArray>::new(Default::default());
        let batch   = batcher.batch(vec![
            EncodedSample::new(vec![1.0, 2.0, 0.0], 1.0),
            EncodedSample::new(vec![3.0, 0.0, 0.0], 0.0),
        ]);

        assert_eq!(batch.inputs.dims(), [2, 3]);
        assert_eq!(batch.targets.dims(), [2, 1]);

        let inputs: Vec<f32> = batch.inputs.into_data().to_vec().unwrap();
        assert_eq!(inputs, vec![1.0, 2.0, 0.0, 3.0, 0.0, 0.0]);
        let targets: Vec<f32> = batch.targets.into_data().to_vec().unwrap();
        assert_eq!(targets, vec![1.0, 0.0]);
    }

    #[test]
    fn test_inputs_without_targets() {
        let batcher = FeatureBatcher::<NdArray>::new(Default::default());
        let inputs  = batcher.inputs(&[vec![0.5, -0.5], vec![1.0, 2.0], vec![3.0, 4.0]]);
        assert_eq!(inputs.dims(), [3, 2]);
    }
}
