use burn::{
    nn::{
        loss::{BinaryCrossEntropyLossConfig, MseLoss, Reduction},
        Embedding, EmbeddingConfig,
        Linear, LinearConfig,
        Lstm, LstmConfig,
    },
    prelude::*,
    tensor::activation::{relu, sigmoid},
};
use serde::{Deserialize, Serialize};

/// The layer stack a network is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Topology {
    /// embedding → LSTM(hidden) → dense(1)
    Recurrent,
    /// embedding → mean over positions → dense(hidden, relu) → dense(1)
    Pooled,
    /// dense(hidden, relu) → dense(hidden, relu) → dense(1)
    Dense,
}

/// What the network output means and how it is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Objective {
    /// Output is a logit; loss is binary cross-entropy; predictions are sigmoid(logit)
    BinaryCrossEntropy,
    /// Output is the value itself; loss is mean squared error
    MeanSquaredError,
}

impl Objective {
    /// Mean loss of a batch. `targets` has the same [batch, 1] shape as `output`.
    pub fn loss<B: Backend>(&self, output: Tensor<B, 2>, targets: Tensor<B, 2>) -> Tensor<B, 1> {
        match self {
            Objective::BinaryCrossEntropy => BinaryCrossEntropyLossConfig::new()
                .with_logits(true)
                .init::<B>(&output.device())
                .forward(output, targets.int()),
            Objective::MeanSquaredError => {
                MseLoss::new().forward(output, targets, Reduction::Mean)
            }
        }
    }

    /// Map raw network output to the reported prediction.
    pub fn activate<B: Backend>(&self, output: Tensor<B, 2>) -> Tensor<B, 2> {
        match self {
            Objective::BinaryCrossEntropy => sigmoid(output),
            Objective::MeanSquaredError   => output,
        }
    }

    pub fn is_classification(&self) -> bool {
        matches!(self, Objective::BinaryCrossEntropy)
    }
}

// NOTE: #[derive(Config)] already generates Clone and Serialize/Deserialize.
#[derive(Config, Debug)]
pub struct NetworkConfig {
    pub topology:    Topology,
    /// Features per sample: sequence length for text, 2 for pendulum states
    pub input_width: usize,
    /// Embedding table size; token ids must be below it
    #[config(default = 1000)]
    pub vocab_size:    usize,
    #[config(default = 100)]
    pub embedding_dim: usize,
    /// LSTM state width, or dense layer width
    #[config(default = 64)]
    pub hidden_width:  usize,
}

impl NetworkConfig {
    pub fn init<B: Backend>(&self, device: &B::Device) -> Network<B> {
        let embedding = || EmbeddingConfig::new(self.vocab_size, self.embedding_dim).init(device);

        match self.topology {
            Topology::Recurrent => Network {
                text:   Some(TextStem {
                    embedding: embedding(),
                    lstm:      Some(LstmConfig::new(self.embedding_dim, self.hidden_width, true).init(device)),
                }),
                hidden: Vec::new(),
                output: LinearConfig::new(self.hidden_width, 1).init(device),
            },
            Topology::Pooled => Network {
                text:   Some(TextStem { embedding: embedding(), lstm: None }),
                hidden: vec![LinearConfig::new(self.embedding_dim, self.hidden_width).init(device)],
                output: LinearConfig::new(self.hidden_width, 1).init(device),
            },
            Topology::Dense => Network {
                text:   None,
                hidden: vec![
                    LinearConfig::new(self.input_width, self.hidden_width).init(device),
                    LinearConfig::new(self.hidden_width, self.hidden_width).init(device),
                ],
                output: LinearConfig::new(self.hidden_width, 1).init(device),
            },
        }
    }
}

/// Token ids → one feature vector per sample.
#[derive(Module, Debug)]
pub struct TextStem<B: Backend> {
    pub embedding: Embedding<B>,
    /// Present: last LSTM output; absent: mean over positions
    pub lstm:      Option<Lstm<B>>,
}

impl<B: Backend> TextStem<B> {
    /// ids: [batch, seq_len] → [batch, features]
    pub fn forward(&self, ids: Tensor<B, 2, Int>) -> Tensor<B, 2> {
        let embedded = self.embedding.forward(ids); // [batch, seq_len, embedding_dim]

        match &self.lstm {
            Some(lstm) => {
                let (output, _) = lstm.forward(embedded, None);
                let [batch_size, seq_len, hidden] = output.dims();
                output
                    .slice([0..batch_size, seq_len - 1..seq_len, 0..hidden])
                    .reshape([batch_size, hidden])
            }
            None => {
                let [batch_size, _, dim] = embedded.dims();
                embedded.mean_dim(1).reshape([batch_size, dim])
            }
        }
    }
}

#[derive(Module, Debug)]
pub struct Network<B: Backend> {
    pub text:   Option<TextStem<B>>,
    /// Relu-activated dense layers, applied in order
    pub hidden: Vec<Linear<B>>,
    pub output: Linear<B>,
}

impl<B: Backend> Network<B> {
    /// inputs: [batch, input_width] → raw output [batch, 1]
    ///
    /// Text networks read the inputs as token ids.
    pub fn forward(&self, inputs: Tensor<B, 2>) -> Tensor<B, 2> {
        let mut x = match &self.text {
            Some(stem) => stem.forward(inputs.int()),
            None       => inputs,
        };
        for layer in &self.hidden {
            x = relu(layer.forward(x));
        }
        self.output.forward(x)
    }

    pub fn forward_loss(
        &self,
        inputs:    Tensor<B, 2>,
        targets:   Tensor<B, 2>,
        objective: Objective,
    ) -> (Tensor<B, 1>, Tensor<B, 2>) {
        let output = self.forward(inputs);
        let loss   = objective.loss(output.clone(), targets);
        (loss, output)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    type TestBackend = NdArray;

    fn ids(rows: &[&[i64]]) -> Tensor<TestBackend, 2> {
        let width = rows[0].len();
        let flat: Vec<f32> = rows.iter().flat_map(|r| r.iter().map(|&v| v as f32)).collect();
        Tensor::from_data(TensorData::new(flat, [rows.len(), width]), &Default::default())
    }

    #[test]
    fn test_recurrent_output_shape() {
        let net = NetworkConfig::new(Topology::Recurrent, 6)
            .with_vocab_size(20)
            .with_embedding_dim(8)
            .with_hidden_width(5)
            .init::<TestBackend>(&Default::default());

        let out = net.forward(ids(&[&[1, 2, 3, 0, 0, 0], &[4, 5, 0, 0, 0, 0]]));
        assert_eq!(out.dims(), [2, 1]);
    }

    #[test]
    fn test_pooled_output_shape() {
        let net = NetworkConfig::new(Topology::Pooled, 4)
            .with_vocab_size(10)
            .with_embedding_dim(6)
            .with_hidden_width(3)
            .init::<TestBackend>(&Default::default());

        let out = net.forward(ids(&[&[1, 2, 0, 0], &[3, 0, 0, 0], &[9, 9, 9, 9]]));
        assert_eq!(out.dims(), [3, 1]);
    }

    #[test]
    fn test_dense_output_shape() {
        let net = NetworkConfig::new(Topology::Dense, 2)
            .with_hidden_width(16)
            .init::<TestBackend>(&Default::default());

        let inputs = Tensor::<TestBackend, 2>::from_data(
            TensorData::new(vec![0.1f32, -0.2, 3.0, 0.5], [2, 2]),
            &Default::default(),
        );
        assert_eq!(net.forward(inputs).dims(), [2, 1]);
        assert!(net.text.is_none());
        assert_eq!(net.hidden.len(), 2);
    }

    #[test]
    fn test_sigmoid_predictions_are_probabilities() {
        let logits = Tensor::<TestBackend, 2>::from_data(
            TensorData::new(vec![-50.0f32, 0.0, 50.0], [3, 1]),
            &Default::default(),
        );
        let probs: Vec<f32> = Objective::BinaryCrossEntropy
            .activate(logits)
            .into_data()
            .to_vec()
            .unwrap();
        assert!(probs.iter().all(|p| (0.0..=1.0).contains(p)));
        assert!((probs[1] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_mse_loss_value() {
        let device  = Default::default();
        let output  = Tensor::<TestBackend, 2>::from_data(TensorData::new(vec![1.0f32, 3.0], [2, 1]), &device);
        let targets = Tensor::<TestBackend, 2>::from_data(TensorData::new(vec![0.0f32, 1.0], [2, 1]), &device);
        let loss: f32 = Objective::MeanSquaredError
            .loss(output, targets)
            .into_scalar()
            .elem();
        // ((1-0)^2 + (3-1)^2) / 2
        assert!((loss - 2.5).abs() < 1e-6);
    }

    #[test]
    fn test_bce_loss_is_positive() {
        let device  = Default::default();
        let output  = Tensor::<TestBackend, 2>::from_data(TensorData::new(vec![0.3f32, -1.2], [2, 1]), &device);
        let targets = Tensor::<TestBackend, 2>::from_data(TensorData::new(vec![1.0f32, 0.0], [2, 1]), &device);
        let loss: f32 = Objective::BinaryCrossEntropy
            .loss(output, targets)
            .into_scalar()
            .elem();
        assert!(loss > 0.0);
    }
}
