// ============================================================
// Layer 2 — Pipeline Runner
// ============================================================
// Runs one variant end to end:
//
//   Load → Encode → Build → Train → Evaluate
//
//   Text variants
//     Step 1: Load the .txt corpus          (Layer 4 - data)
//     Step 2: Fit the vocabulary, encode    (Layer 4 - data)
//     Step 3: Draw labels                   (Layer 4 - data)
//     Step 4: Train                         (Layer 5 - ml)
//     Step 5: Predict on the probe texts    (Layer 5 - ml)
//
//   Pendulum
//     Step 1: Generate training states      (Layer 4 - data)
//     Step 2: Encode as [θ, ω], label       (Layer 4 - data)
//     Step 3: Train                         (Layer 5 - ml)
//     Step 4: Predict on fresh test states  (Layer 5 - ml)
//     Step 5: MSE + scatter plot            (Layer 6 - infra)
//
// One RNG seeded from the config drives labels and state
// generation; the backend is seeded by the trainer.

use anyhow::Result;
use burn::{prelude::*, tensor::backend::AutodiffBackend};
use plotters::style::{BLUE, RED};
use rand::{rngs::StdRng, SeedableRng};
use std::path::PathBuf;

use crate::application::config::PipelineConfig;
use crate::data::{
    encoder::{StateEncoder, TextEncoder},
    loader::TextCorpusLoader,
    pendulum::PendulumGenerator,
    preprocessor::TextNormalizer,
    vocabulary::Vocabulary,
};
use crate::domain::{
    sample::EncodedSample,
    traits::{DocumentSource, FeatureEncoder},
};
use crate::error::PipelineError;
use crate::infra::{
    metrics::{EpochMetrics, MetricsLogger},
    plot::{write_scatter, ScatterSeries},
};
use crate::ml::{
    inferencer::Predictor,
    model::{NetworkConfig, Objective},
    trainer::{train, TrainingSettings},
};

/// One probe text and the model's probability for it.
#[derive(Debug, Clone, PartialEq)]
pub struct TextPrediction {
    pub text:        String,
    pub probability: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    Text {
        predictions: Vec<TextPrediction>,
    },
    Pendulum {
        /// Mean squared error of predicted vs actual ω
        mse:       f64,
        samples:   usize,
        plot_path: PathBuf,
    },
}

#[derive(Debug, Clone)]
pub struct PipelineReport {
    pub history:    Vec<EpochMetrics>,
    pub evaluation: Evaluation,
}

/// A token of the encoded text, as the vocabulary knows it.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenInfo {
    pub token: String,
    /// None for tokens never seen in the corpus
    pub index: Option<u32>,
    /// Occurrences in the corpus
    pub count: usize,
}

/// How one text is seen by the fitted vocabulary.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedText {
    pub tokens:          Vec<TokenInfo>,
    /// Vocabulary ids before padding; OOV tokens may be missing
    pub ids:             Vec<u32>,
    /// `ids` brought to max_sequence_length
    pub padded:          Vec<u32>,
    /// `padded` mapped back to words, padding skipped
    pub decoded:         Vec<String>,
    pub vocabulary_size: usize,
}

pub struct PipelineRunner {
    config: PipelineConfig,
}

impl PipelineRunner {
    /// Validates `config` up front; nothing is loaded yet.
    pub fn new(config: PipelineConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn run<B: AutodiffBackend>(&self, device: &B::Device) -> Result<PipelineReport> {
        tracing::info!("Running variant '{}'", self.config.variant.name());
        if self.config.variant.is_text() {
            self.run_text::<B>(device)
        } else {
            self.run_pendulum::<B>(device)
        }
    }

    /// Fit the vocabulary on the variant's corpus and encode `text` with it.
    pub fn encode_text(&self, text: &str) -> Result<EncodedText> {
        if !self.config.variant.is_text() {
            return Err(PipelineError::InvalidConfig(format!(
                "{} has no vocabulary",
                self.config.variant.name()
            ))
            .into());
        }
        let (_, encoder) = self.fit_text_encoder()?;
        let vocabulary   = encoder.vocabulary();

        let tokens = vocabulary
            .normalizer()
            .tokens(text)
            .into_iter()
            .map(|token| TokenInfo {
                index: vocabulary.index_of(&token),
                count: vocabulary.count(&token),
                token,
            })
            .collect();
        let padded  = encoder.token_ids(text);
        let decoded = vocabulary.decode(&padded).into_iter().map(str::to_string).collect();

        Ok(EncodedText {
            tokens,
            ids: vocabulary.encode(text),
            padded,
            decoded,
            vocabulary_size: vocabulary.len(),
        })
    }

    // ── Text variants ─────────────────────────────────────────────────────────

    /// Load the corpus and fit a TextEncoder on it.
    fn fit_text_encoder(&self) -> Result<(Vec<String>, TextEncoder)> {
        let cfg = &self.config;

        let loader = TextCorpusLoader::new(&cfg.data_dir)
            .with_extension(cfg.file_extension.clone())
            .with_skip_unreadable(cfg.skip_unreadable);
        let texts: Vec<String> = loader.load_all()?.into_iter().map(|d| d.text).collect();
        if texts.is_empty() {
            return Err(PipelineError::EmptyDataset { stage: "corpus" }.into());
        }

        let normalizer = TextNormalizer::new()
            .with_filters(cfg.filters.clone())
            .with_lowercase(cfg.lowercase)
            .with_split_cjk(cfg.split_cjk);
        let vocabulary = Vocabulary::fit(&texts, normalizer, cfg.max_words, cfg.oov_token.as_deref());
        if vocabulary.is_empty() {
            tracing::warn!("Corpus produced no tokens; every sequence will be padding");
        }
        tracing::info!(
            "Vocabulary: {} distinct tokens, ids capped below {}, OOV index {:?}",
            vocabulary.len(),
            vocabulary.max_words(),
            vocabulary.oov_index(),
        );

        let encoder = TextEncoder::new(vocabulary, cfg.max_sequence_length, cfg.truncation);
        Ok((texts, encoder))
    }

    fn run_text<B: AutodiffBackend>(&self, device: &B::Device) -> Result<PipelineReport> {
        let cfg = &self.config;

        // ── Steps 1-2: Load and encode ────────────────────────────────────────
        let (texts, encoder) = self.fit_text_encoder()?;
        let rows = encoder.encode_all(&texts);

        // ── Step 3: Labels ────────────────────────────────────────────────────
        let mut rng = StdRng::seed_from_u64(cfg.seed);
        let labels  = cfg.labels.text_labels(rows.len(), &mut rng)?;
        let samples = zip_samples(rows, labels);

        // ── Step 4: Train ─────────────────────────────────────────────────────
        let network = self.network_config().with_vocab_size(encoder.vocabulary().max_words());
        let outcome = train::<B>(
            &network,
            cfg.variant.objective(),
            &self.training_settings(),
            samples,
            self.metrics_logger()?.as_ref(),
            device,
        )?;

        // ── Step 5: Predict ───────────────────────────────────────────────────
        let predictor = Predictor::<B::InnerBackend>::from_trained(
            &outcome.model,
            cfg.variant.objective(),
            encoder.width(),
            device.clone(),
        );
        let probes = if cfg.probe_texts.is_empty() { &texts } else { &cfg.probe_texts };
        let probabilities = predictor.predict(&encoder.encode_all(probes))?;

        let predictions = probes
            .iter()
            .zip(probabilities)
            .map(|(text, probability)| TextPrediction { text: text.clone(), probability })
            .collect();

        Ok(PipelineReport { history: outcome.history, evaluation: Evaluation::Text { predictions } })
    }

    // ── Pendulum ──────────────────────────────────────────────────────────────

    fn run_pendulum<B: AutodiffBackend>(&self, device: &B::Device) -> Result<PipelineReport> {
        let cfg = &self.config;
        let mut rng = StdRng::seed_from_u64(cfg.seed);

        // ── Steps 1-2: Generate, encode, label ────────────────────────────────
        let train_states = PendulumGenerator::new(&mut rng).generate(cfg.num_samples);
        tracing::info!("Generated {} pendulum states", train_states.len());

        let rows    = StateEncoder.encode_all(train_states.as_slice());
        let labels  = cfg.labels.pendulum_labels(train_states.as_slice(), &mut rng);
        let samples = zip_samples(rows, labels);

        // ── Step 3: Train ─────────────────────────────────────────────────────
        let outcome = train::<B>(
            &self.network_config(),
            Objective::MeanSquaredError,
            &self.training_settings(),
            samples,
            self.metrics_logger()?.as_ref(),
            device,
        )?;

        // ── Step 4: Predict on fresh states ───────────────────────────────────
        let test_states = PendulumGenerator::new(&mut rng).generate(cfg.num_test_samples);
        let predictor   = Predictor::<B::InnerBackend>::from_trained(
            &outcome.model,
            Objective::MeanSquaredError,
            StateEncoder.width(),
            device.clone(),
        );
        let predicted = predictor.predict(&StateEncoder.encode_all(test_states.as_slice()))?;

        // ── Step 5: Score against ω and plot ──────────────────────────────────
        let (_, omega) = test_states.column_tensors::<B::InnerBackend>(device);
        let predicted_col = Tensor::<B::InnerBackend, 2>::from_data(
            TensorData::new(predicted.clone(), [predicted.len(), 1]),
            device,
        );
        let mse: f64 = Objective::MeanSquaredError
            .loss(predicted_col, omega)
            .into_scalar()
            .elem();
        tracing::info!("Test MSE over {} states: {:.6}", test_states.len(), mse);

        let thetas = test_states.thetas();
        write_scatter(
            &cfg.plot_path,
            &[
                ScatterSeries::new(&thetas, &predicted, RED),
                ScatterSeries::new(&thetas, &test_states.omegas(), BLUE),
            ],
        )?;

        Ok(PipelineReport {
            history:    outcome.history,
            evaluation: Evaluation::Pendulum {
                mse,
                samples:   test_states.len(),
                plot_path: cfg.plot_path.clone(),
            },
        })
    }

    // ── Shared helpers ────────────────────────────────────────────────────────

    fn network_config(&self) -> NetworkConfig {
        NetworkConfig::new(self.config.variant.topology(), self.config.input_width())
            .with_embedding_dim(self.config.embedding_dim)
            .with_hidden_width(self.config.hidden_width)
    }

    fn training_settings(&self) -> TrainingSettings {
        TrainingSettings {
            epochs:           self.config.epochs,
            batch_size:       self.config.batch_size,
            learning_rate:    self.config.learning_rate,
            validation_split: self.config.validation_split,
            seed:             self.config.seed,
        }
    }

    fn metrics_logger(&self) -> Result<Option<MetricsLogger>> {
        let logger = self.config.metrics_dir.as_ref().map(MetricsLogger::new).transpose()?;
        if let Some(l) = &logger {
            tracing::info!("Writing epoch metrics to '{}'", l.csv_path().display());
        }
        Ok(logger)
    }
}

fn zip_samples(rows: Vec<Vec<f32>>, labels: Vec<f32>) -> Vec<EncodedSample> {
    rows.into_iter()
        .zip(labels)
        .map(|(features, target)| EncodedSample::new(features, target))
        .collect()
}
