use burn::data::dataset::Dataset;

use crate::domain::sample::EncodedSample;

/// In-memory dataset of encoded samples, in their original order.
pub struct EncodedDataset {
    samples: Vec<EncodedSample>,
}

impl EncodedDataset {
    pub fn new(samples: Vec<EncodedSample>) -> Self { Self { samples } }

    pub fn sample_count(&self) -> usize { self.samples.len() }
}

impl Dataset<EncodedSample> for EncodedDataset {
    fn get(&self, index: usize) -> Option<EncodedSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
