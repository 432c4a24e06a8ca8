// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Train + validation loop using Burn's DataLoader and Adam.
//
//   - Training runs on B (an AutodiffBackend) for gradients
//   - model.valid() returns the model on B::InnerBackend
//   - The validation batcher uses B::InnerBackend as well
//   - Validation samples are the tail of the input, never shuffled
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::data::{batcher::FeatureBatcher, dataset::EncodedDataset, splitter::split_train_val};
use crate::domain::sample::EncodedSample;
use crate::error::PipelineError;
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::model::{Network, NetworkConfig, Objective};

/// Optimisation hyperparameters for one run.
#[derive(Debug, Clone)]
pub struct TrainingSettings {
    pub epochs:           usize,
    pub batch_size:       usize,
    pub learning_rate:    f64,
    /// Fraction of samples held out from the end, in [0, 1)
    pub validation_split: f64,
    pub seed:             u64,
}

impl Default for TrainingSettings {
    fn default() -> Self {
        Self {
            epochs:           10,
            batch_size:       32,
            learning_rate:    1e-3,
            validation_split: 0.0,
            seed:             42,
        }
    }
}

/// The fitted network and one metrics row per epoch.
pub struct TrainingOutcome<B: AutodiffBackend> {
    pub model:   Network<B>,
    pub history: Vec<EpochMetrics>,
}

/// Running loss/accuracy totals over one pass.
#[derive(Default)]
struct PassTotals {
    loss_sum: f64,
    correct:  usize,
    samples:  usize,
}

impl PassTotals {
    fn add<B: Backend>(
        &mut self,
        loss:      f64,
        output:    Tensor<B, 2>,
        targets:   Tensor<B, 2>,
        objective: Objective,
    ) {
        let batch_len = targets.dims()[0];
        self.loss_sum += loss * batch_len as f64;
        self.samples  += batch_len;

        if objective.is_classification() {
            // logit > 0  ⇔  sigmoid(logit) > 0.5
            let logits: Vec<f32> = output.into_data().convert::<f32>().to_vec().unwrap_or_default();
            let labels: Vec<f32> = targets.into_data().convert::<f32>().to_vec().unwrap_or_default();
            self.correct += logits
                .iter()
                .zip(&labels)
                .filter(|&(&z, &y)| (if z > 0.0 { 1.0 } else { 0.0 }) == y)
                .count();
        }
    }

    fn mean_loss(&self) -> f64 {
        if self.samples > 0 { self.loss_sum / self.samples as f64 } else { f64::NAN }
    }

    fn accuracy(&self, objective: Objective) -> Option<f64> {
        (objective.is_classification() && self.samples > 0)
            .then(|| self.correct as f64 / self.samples as f64)
    }
}

/// Reject empty input and rows whose width differs from the network's.
pub fn check_samples(samples: &[EncodedSample], input_width: usize) -> Result<(), PipelineError> {
    if samples.is_empty() {
        return Err(PipelineError::EmptyDataset { stage: "encoded samples" });
    }
    match samples.iter().position(|s| s.width() != input_width) {
        Some(index) => Err(PipelineError::FeatureWidth {
            expected: input_width,
            actual:   samples[index].width(),
            index,
        }),
        None => Ok(()),
    }
}

pub fn train<B: AutodiffBackend>(
    network:   &NetworkConfig,
    objective: Objective,
    settings:  &TrainingSettings,
    samples:   Vec<EncodedSample>,
    metrics:   Option<&MetricsLogger>,
    device:    &B::Device,
) -> Result<TrainingOutcome<B>> {
    check_samples(&samples, network.input_width)?;

    let (train_samples, val_samples) = split_train_val(samples, settings.validation_split);
    if train_samples.is_empty() {
        return Err(PipelineError::EmptyDataset { stage: "training partition" }.into());
    }

    B::seed(settings.seed);

    // ── Build model ───────────────────────────────────────────────────────────
    let mut model: Network<B> = network.init(device);
    tracing::info!(
        "Model ready: {:?}, {} parameters",
        network.topology,
        model.num_params(),
    );

    let mut optim = AdamConfig::new().init();

    // ── Data loaders ──────────────────────────────────────────────────────────
    let train_dataset = EncodedDataset::new(train_samples);
    let val_dataset   = EncodedDataset::new(val_samples);
    tracing::info!(
        "Training on {} samples, validating on {}",
        train_dataset.sample_count(),
        val_dataset.sample_count(),
    );

    let val_loader = (val_dataset.sample_count() > 0).then(|| {
        DataLoaderBuilder::new(FeatureBatcher::<B::InnerBackend>::new(device.clone()))
            .batch_size(settings.batch_size)
            .build(val_dataset)
    });
    let train_loader = DataLoaderBuilder::new(FeatureBatcher::<B>::new(device.clone()))
        .batch_size(settings.batch_size)
        .shuffle(settings.seed)
        .build(train_dataset);

    // ── Epoch loop ────────────────────────────────────────────────────────────
    let mut history       = Vec::with_capacity(settings.epochs);
    let mut best_val_loss = f64::INFINITY;

    for epoch in 1..=settings.epochs {
        let mut train_totals = PassTotals::default();

        for batch in train_loader.iter() {
            let (loss, output) = model.forward_loss(batch.inputs, batch.targets.clone(), objective);
            let loss_val: f64  = loss.clone().into_scalar().elem::<f64>();
            train_totals.add(loss_val, output, batch.targets, objective);

            let grads = loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(settings.learning_rate, model, grads);
        }

        let mut row = EpochMetrics::new(epoch, train_totals.mean_loss());
        row.train_accuracy = train_totals.accuracy(objective);

        if let Some(loader) = &val_loader {
            let model_valid    = model.valid();
            let mut val_totals = PassTotals::default();

            for batch in loader.iter() {
                let (loss, output) = model_valid.forward_loss(batch.inputs, batch.targets.clone(), objective);
                val_totals.add(loss.into_scalar().elem::<f64>(), output, batch.targets, objective);
            }

            row.val_loss     = Some(val_totals.mean_loss());
            row.val_accuracy = val_totals.accuracy(objective);
        }

        tracing::info!("{}", row.summary(settings.epochs));
        if let (true, Some(v)) = (row.is_improvement(best_val_loss), row.val_loss) {
            tracing::debug!("val_loss improved: {:.4} → {:.4}", best_val_loss, v);
            best_val_loss = v;
        }
        if let Some(logger) = metrics {
            logger.log(&row)?;
        }
        history.push(row);
    }

    tracing::info!("Training complete!");
    Ok(TrainingOutcome { model, history })
}
