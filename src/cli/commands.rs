// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the two subcommands, `run` and `encode`, and their
// flags. Every override flag is optional: when absent, the
// value comes from --config or from the variant's defaults.
//
// Reference: Rust Book §12 (Building a CLI Program)

use anyhow::{bail, Result};
use clap::{Args, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::application::config::{PipelineConfig, Variant};
use crate::data::{labels::LabelScheme, padding::Truncation};

/// The two top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train one variant and evaluate it
    Run(RunArgs),

    /// Show how a text is encoded by the vocabulary of a variant's corpus
    Encode(EncodeArgs),
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantArg {
    /// Embedding → LSTM classifier on out/*.txt
    TextLstm,
    /// Embedding → average pooling classifier on txt/*.txt
    TextPooled,
    /// Dense regressor on generated pendulum states
    Pendulum,
}

impl From<VariantArg> for Variant {
    fn from(v: VariantArg) -> Self {
        match v {
            VariantArg::TextLstm   => Variant::TextLstm,
            VariantArg::TextPooled => Variant::TextPooled,
            VariantArg::Pendulum   => Variant::Pendulum,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BackendArg {
    /// CPU
    #[default]
    Ndarray,
    /// GPU through wgpu
    Wgpu,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruncationArg {
    Pre,
    Post,
}

impl From<TruncationArg> for Truncation {
    fn from(t: TruncationArg) -> Self {
        match t {
            TruncationArg::Pre  => Truncation::Pre,
            TruncationArg::Post => Truncation::Post,
        }
    }
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelArg {
    RandomBinary,
    Zeros,
    Ones,
    AngularVelocity,
}

impl From<LabelArg> for LabelScheme {
    fn from(l: LabelArg) -> Self {
        match l {
            LabelArg::RandomBinary    => LabelScheme::RandomBinary,
            LabelArg::Zeros           => LabelScheme::Constant(0.0),
            LabelArg::Ones            => LabelScheme::Constant(1.0),
            LabelArg::AngularVelocity => LabelScheme::AngularVelocity,
        }
    }
}

/// Where the base configuration comes from.
#[derive(Args, Debug)]
pub struct ConfigSource {
    /// Pipeline variant; required unless --config names one
    #[arg(long, value_enum)]
    pub variant: Option<VariantArg>,

    /// JSON file with a full or partial PipelineConfig
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding the text corpus
    #[arg(long)]
    pub data_dir: Option<PathBuf>,
}

impl ConfigSource {
    /// Config file or variant defaults, with --data-dir applied.
    pub fn resolve(&self) -> Result<PipelineConfig> {
        let mut cfg = match (&self.config, self.variant) {
            (Some(path), variant) => {
                let cfg = PipelineConfig::from_json_file(path)?;
                if let Some(v) = variant {
                    if Variant::from(v) != cfg.variant {
                        bail!(
                            "--variant {} conflicts with variant '{}' in '{}'",
                            Variant::from(v).name(),
                            cfg.variant.name(),
                            path.display()
                        );
                    }
                }
                cfg
            }
            (None, Some(v)) => PipelineConfig::for_variant(v.into()),
            (None, None)    => bail!("either --variant or --config is required"),
        };

        if let Some(dir) = &self.data_dir {
            cfg.data_dir = dir.clone();
        }
        Ok(cfg)
    }
}

/// All arguments for the `run` command
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub source: ConfigSource,

    /// Tensor backend
    #[arg(long, value_enum, default_value_t = BackendArg::Ndarray)]
    pub backend: BackendArg,

    #[arg(long)]
    pub epochs: Option<usize>,

    #[arg(long)]
    pub batch_size: Option<usize>,

    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Fraction of samples held out from the end for validation
    #[arg(long)]
    pub validation_split: Option<f64>,

    #[arg(long)]
    pub seed: Option<u64>,

    /// Vocabulary cap; emitted ids are below this value
    #[arg(long)]
    pub max_words: Option<usize>,

    #[arg(long)]
    pub max_sequence_length: Option<usize>,

    #[arg(long, value_enum)]
    pub truncation: Option<TruncationArg>,

    /// Map unknown words to index 1 under this token instead of dropping them
    #[arg(long)]
    pub oov_token: Option<String>,

    /// Treat every CJK ideograph as its own word
    #[arg(long)]
    pub split_cjk: bool,

    /// Skip unreadable corpus files instead of failing
    #[arg(long)]
    pub skip_unreadable: bool,

    #[arg(long, value_enum)]
    pub labels: Option<LabelArg>,

    /// Pendulum training states
    #[arg(long)]
    pub num_samples: Option<usize>,

    /// Pendulum test states
    #[arg(long)]
    pub num_test_samples: Option<usize>,

    /// Text to classify after training (repeatable)
    #[arg(long = "probe")]
    pub probes: Vec<String>,

    /// Pendulum scatter plot output
    #[arg(long)]
    pub plot_path: Option<PathBuf>,

    /// Write per-epoch metrics.csv into this directory
    #[arg(long)]
    pub metrics_dir: Option<PathBuf>,
}

impl RunArgs {
    /// Base config with every given flag applied on top.
    pub fn to_config(&self) -> Result<PipelineConfig> {
        let mut cfg = self.source.resolve()?;

        if let Some(v) = self.epochs              { cfg.epochs = v; }
        if let Some(v) = self.batch_size          { cfg.batch_size = v; }
        if let Some(v) = self.learning_rate       { cfg.learning_rate = v; }
        if let Some(v) = self.validation_split    { cfg.validation_split = v; }
        if let Some(v) = self.seed                { cfg.seed = v; }
        if let Some(v) = self.max_words           { cfg.max_words = v; }
        if let Some(v) = self.max_sequence_length { cfg.max_sequence_length = v; }
        if let Some(v) = self.truncation          { cfg.truncation = v.into(); }
        if let Some(v) = self.labels              { cfg.labels = v.into(); }
        if let Some(v) = self.num_samples         { cfg.num_samples = v; }
        if let Some(v) = self.num_test_samples    { cfg.num_test_samples = v; }
        if let Some(v) = &self.oov_token          { cfg.oov_token = Some(v.clone()); }
        if let Some(v) = &self.plot_path          { cfg.plot_path = v.clone(); }
        if let Some(v) = &self.metrics_dir        { cfg.metrics_dir = Some(v.clone()); }
        if self.split_cjk       { cfg.split_cjk = true; }
        if self.skip_unreadable { cfg.skip_unreadable = true; }
        if !self.probes.is_empty() {
            cfg.probe_texts = self.probes.clone();
        }

        Ok(cfg)
    }
}

/// All arguments for the `encode` command
#[derive(Args, Debug)]
pub struct EncodeArgs {
    #[command(flatten)]
    pub source: ConfigSource,

    /// The text to encode
    #[arg(long)]
    pub text: String,

    /// Treat every CJK ideograph as its own word
    #[arg(long)]
    pub split_cjk: bool,
}

impl EncodeArgs {
    pub fn to_config(&self) -> Result<PipelineConfig> {
        let mut cfg = self.source.resolve()?;
        if self.split_cjk {
            cfg.split_cjk = true;
        }
        Ok(cfg)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use crate::cli::Cli;
    use super::*;
    use clap::Parser;

    fn run_args(argv: &[&str]) -> RunArgs {
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Run(args) => args,
            other => panic!("expected run, got {other:?}"),
        }
    }

    #[test]
    fn test_run_uses_variant_defaults() {
        let cfg = run_args(&["minitrain", "run", "--variant", "text-pooled"]).to_config().unwrap();
        assert_eq!(cfg, PipelineConfig::for_variant(Variant::TextPooled));
    }

    #[test]
    fn test_run_overrides() {
        let args = run_args(&[
            "minitrain", "run", "--variant", "pendulum",
            "--epochs", "3", "--num-samples", "50", "--labels", "zeros",
            "--backend", "wgpu",
        ]);
        assert_eq!(args.backend, BackendArg::Wgpu);

        let cfg = args.to_config().unwrap();
        assert_eq!(cfg.epochs, 3);
        assert_eq!(cfg.num_samples, 50);
        assert_eq!(cfg.labels, LabelScheme::Constant(0.0));
    }

    #[test]
    fn test_probes_are_repeatable() {
        let cfg = run_args(&["minitrain", "run", "--variant", "text-lstm", "--probe", "a", "--probe", "b"])
            .to_config()
            .unwrap();
        assert_eq!(cfg.probe_texts, vec!["a", "b"]);
    }

    #[test]
    fn test_variant_or_config_required() {
        assert!(run_args(&["minitrain", "run"]).to_config().is_err());
    }

    #[test]
    fn test_conflicting_variant_and_config() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        std::fs::write(&path, r#"{"variant":"pendulum"}"#).unwrap();

        let path = path.to_str().unwrap();
        assert!(run_args(&["minitrain", "run", "--config", path]).to_config().is_ok());
        assert!(run_args(&["minitrain", "run", "--config", path, "--variant", "text-lstm"])
            .to_config()
            .is_err());
    }

    #[test]
    fn test_encode_parses_text() {
        let cli = Cli::try_parse_from(["minitrain", "encode", "--variant", "text-lstm", "--text", "hello"]).unwrap();
        let Commands::Encode(args) = cli.command else { panic!("expected encode") };
        assert_eq!(args.text, "hello");
        assert_eq!(args.to_config().unwrap().variant, Variant::TextLstm);
    }
}
