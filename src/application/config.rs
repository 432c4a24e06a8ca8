// ============================================================
// Layer 2 — Pipeline Configuration
// ============================================================
// Every knob of a run in one serialisable struct. Defaults
// depend on the variant:
//
//   field               text-lstm   text-pooled   pendulum
//   data_dir            out         txt           (unused)
//   embedding_dim       100         64            (unused)
//   validation_split    0.2         0.2           0.0
//   labels              random      random        angular-velocity
//   probe_texts         1 question  none          (unused)
//
// A JSON file only needs the fields it changes; the rest come
// from the defaults of the variant it names.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::data::{labels::LabelScheme, padding::Truncation, preprocessor::DEFAULT_FILTERS};
use crate::error::PipelineError;
use crate::ml::model::{Objective, Topology};

/// Token ids travel as f32, which is exact up to 2^24.
pub const MAX_VOCABULARY: usize = 1 << 24;

/// Default probe for text-lstm: a request to summarise the novel's plot.
pub const DEFAULT_PROBE: &str = "小说里面包括哪些情节，请总结";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    TextLstm,
    TextPooled,
    Pendulum,
}

impl Variant {
    pub fn name(&self) -> &'static str {
        match self {
            Variant::TextLstm   => "text-lstm",
            Variant::TextPooled => "text-pooled",
            Variant::Pendulum   => "pendulum",
        }
    }

    pub fn is_text(&self) -> bool {
        !matches!(self, Variant::Pendulum)
    }

    pub fn topology(&self) -> Topology {
        match self {
            Variant::TextLstm   => Topology::Recurrent,
            Variant::TextPooled => Topology::Pooled,
            Variant::Pendulum   => Topology::Dense,
        }
    }

    pub fn objective(&self) -> Objective {
        match self {
            Variant::Pendulum => Objective::MeanSquaredError,
            _                 => Objective::BinaryCrossEntropy,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub variant: Variant,

    // ── Text corpus ──────────────────────────────────────────────────────────
    pub data_dir:            PathBuf,
    pub file_extension:      String,
    pub skip_unreadable:     bool,
    pub max_words:           usize,
    pub max_sequence_length: usize,
    pub truncation:          Truncation,
    pub oov_token:           Option<String>,
    /// Characters replaced by spaces before splitting into words
    pub filters:             String,
    pub lowercase:           bool,
    pub split_cjk:           bool,

    // ── Pendulum ─────────────────────────────────────────────────────────────
    pub num_samples:      usize,
    pub num_test_samples: usize,

    // ── Model ────────────────────────────────────────────────────────────────
    pub embedding_dim: usize,
    pub hidden_width:  usize,

    // ── Training ─────────────────────────────────────────────────────────────
    pub epochs:           usize,
    pub batch_size:       usize,
    pub learning_rate:    f64,
    pub validation_split: f64,
    pub seed:             u64,
    pub labels:           LabelScheme,

    // ── Evaluation / outputs ─────────────────────────────────────────────────
    /// Texts to predict on after training; empty means the training texts
    pub probe_texts: Vec<String>,
    pub plot_path:   PathBuf,
    /// Directory for metrics.csv; None disables the CSV
    pub metrics_dir: Option<PathBuf>,
}

impl PipelineConfig {
    pub fn for_variant(variant: Variant) -> Self {
        let (data_dir, embedding_dim, validation_split, labels, probe_texts) = match variant {
            Variant::TextLstm => (
                "out", 100, 0.2, LabelScheme::RandomBinary, vec![DEFAULT_PROBE.to_string()],
            ),
            Variant::TextPooled => ("txt", 64, 0.2, LabelScheme::RandomBinary, Vec::new()),
            Variant::Pendulum   => ("data", 64, 0.0, LabelScheme::AngularVelocity, Vec::new()),
        };

        Self {
            variant,
            data_dir:            PathBuf::from(data_dir),
            file_extension:      "txt".to_string(),
            skip_unreadable:     false,
            max_words:           1000,
            max_sequence_length: 100,
            truncation:          Truncation::Post,
            oov_token:           None,
            filters:             DEFAULT_FILTERS.to_string(),
            lowercase:           true,
            split_cjk:           false,
            num_samples:         1000,
            num_test_samples:    100,
            embedding_dim,
            hidden_width:        64,
            epochs:              10,
            batch_size:          32,
            learning_rate:       1e-3,
            validation_split,
            seed:                42,
            labels,
            probe_texts,
            plot_path:           PathBuf::from("test_result.png"),
            metrics_dir:         None,
        }
    }

    /// Load a config from JSON. Missing fields take the defaults of the
    /// file's `variant` (text-lstm when absent).
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot read config '{}'", path.display()))?;
        Self::from_json_str(&text)
            .with_context(|| format!("Invalid config '{}'", path.display()))
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let overrides: serde_json::Value = serde_json::from_str(text)?;
        let serde_json::Value::Object(overrides) = overrides else {
            anyhow::bail!("config must be a JSON object");
        };

        let variant = match overrides.get("variant") {
            Some(v) => serde_json::from_value(v.clone())?,
            None    => Variant::TextLstm,
        };

        let mut merged = serde_json::to_value(Self::for_variant(variant))?;
        if let serde_json::Value::Object(fields) = &mut merged {
            fields.extend(overrides);
        }
        Ok(serde_json::from_value(merged)?)
    }

    /// Input width of the network for this variant.
    pub fn input_width(&self) -> usize {
        if self.variant.is_text() { self.max_sequence_length } else { 2 }
    }

    pub fn validate(&self) -> Result<(), PipelineError> {
        let positive = [
            ("max_words",           self.max_words),
            ("max_sequence_length", self.max_sequence_length),
            ("batch_size",          self.batch_size),
            ("epochs",              self.epochs),
            ("embedding_dim",       self.embedding_dim),
            ("hidden_width",        self.hidden_width),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, v)| *v == 0) {
            return Err(PipelineError::InvalidConfig(format!("{name} must be greater than 0")));
        }

        if !(0.0..1.0).contains(&self.validation_split) {
            return Err(PipelineError::InvalidConfig(format!(
                "validation_split must be in [0, 1), got {}",
                self.validation_split
            )));
        }
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(PipelineError::InvalidConfig(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if self.max_words > MAX_VOCABULARY {
            return Err(PipelineError::InvalidConfig(format!(
                "max_words must be at most {MAX_VOCABULARY}, got {}",
                self.max_words
            )));
        }

        if self.oov_token.is_some() && self.max_words < 2 {
            return Err(PipelineError::InvalidConfig(
                "max_words must leave room for the OOV index 1".to_string(),
            ));
        }
        if !self.variant.is_text() && self.num_test_samples == 0 {
            return Err(PipelineError::InvalidConfig(
                "num_test_samples must be greater than 0".to_string(),
            ));
        }
        if self.variant.is_text() && self.labels == LabelScheme::AngularVelocity {
            return Err(PipelineError::LabelScheme {
                scheme:  self.labels.name().to_string(),
                variant: self.variant.name().to_string(),
            });
        }
        if self.variant.objective().is_classification() && !self.labels.is_binary() {
            return Err(PipelineError::InvalidConfig(format!(
                "{} trains a binary classifier; labels must be 0 or 1",
                self.variant.name()
            )));
        }
        Ok(())
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::for_variant(Variant::TextLstm)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variant_defaults() {
        let lstm = PipelineConfig::for_variant(Variant::TextLstm);
        assert_eq!(lstm.data_dir, PathBuf::from("out"));
        assert_eq!(lstm.embedding_dim, 100);
        assert_eq!(lstm.probe_texts, vec![DEFAULT_PROBE.to_string()]);

        let pooled = PipelineConfig::for_variant(Variant::TextPooled);
        assert_eq!(pooled.data_dir, PathBuf::from("txt"));
        assert_eq!(pooled.embedding_dim, 64);
        assert!(pooled.probe_texts.is_empty());

        let pendulum = PipelineConfig::for_variant(Variant::Pendulum);
        assert_eq!(pendulum.validation_split, 0.0);
        assert_eq!(pendulum.num_samples, 1000);
        assert_eq!(pendulum.labels, LabelScheme::AngularVelocity);
        assert_eq!(pendulum.input_width(), 2);
    }

    #[test]
    fn test_defaults_are_valid() {
        for v in [Variant::TextLstm, Variant::TextPooled, Variant::Pendulum] {
            assert_eq!(PipelineConfig::for_variant(v).validate(), Ok(()), "{}", v.name());
        }
    }

    #[test]
    fn test_zero_batch_size_rejected() {
        let mut cfg = PipelineConfig::default();
        cfg.batch_size = 0;
        assert!(matches!(cfg.validate(), Err(PipelineError::InvalidConfig(m)) if m.contains("batch_size")));
    }

    #[test]
    fn test_validation_split_of_one_rejected() {
        let mut cfg = PipelineConfig::default();
        cfg.validation_split = 1.0;
        assert!(matches!(cfg.validate(), Err(PipelineError::InvalidConfig(_))));
    }

    #[test]
    fn test_oversized_vocabulary_rejected() {
        let mut cfg = PipelineConfig::default();
        cfg.max_words = MAX_VOCABULARY + 1;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn test_angular_velocity_rejected_for_text() {
        let mut cfg = PipelineConfig::for_variant(Variant::TextPooled);
        cfg.labels = LabelScheme::AngularVelocity;
        assert!(matches!(cfg.validate(), Err(PipelineError::LabelScheme { .. })));
    }

    #[test]
    fn test_fractional_constant_rejected_for_classifier() {
        let mut cfg = PipelineConfig::for_variant(Variant::TextLstm);
        cfg.labels = LabelScheme::Constant(0.5);
        assert!(cfg.validate().is_err());

        let mut cfg = PipelineConfig::for_variant(Variant::Pendulum);
        cfg.labels = LabelScheme::Constant(0.5);
        assert_eq!(cfg.validate(), Ok(()));
    }

    #[test]
    fn test_json_takes_defaults_of_named_variant() {
        let cfg = PipelineConfig::from_json_str(r#"{"variant":"pendulum","epochs":3}"#).unwrap();
        assert_eq!(cfg.variant, Variant::Pendulum);
        assert_eq!(cfg.epochs, 3);
        assert_eq!(cfg.labels, LabelScheme::AngularVelocity);
        assert_eq!(cfg.validation_split, 0.0);
    }

    #[test]
    fn test_json_file_round_trip() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.json");
        let mut cfg = PipelineConfig::for_variant(Variant::TextPooled);
        cfg.split_cjk   = true;
        cfg.metrics_dir = Some(PathBuf::from("metrics"));
        std::fs::write(&path, serde_json::to_string_pretty(&cfg).unwrap()).unwrap();

        assert_eq!(PipelineConfig::from_json_file(&path).unwrap(), cfg);
    }

    #[test]
    fn test_json_must_be_object() {
        assert!(PipelineConfig::from_json_str("[1, 2]").is_err());
    }
}
