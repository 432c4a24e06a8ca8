// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Records training metrics to a CSV file after each epoch.
//
// Metrics recorded per epoch:
//   - epoch:          the epoch number (1, 2, 3, ...)
//   - train_loss:     sample-weighted mean loss on the training set
//   - val_loss:       same on the validation set (empty without one)
//   - train_accuracy: fraction of thresholded predictions equal to the
//                     target (classification only)
//   - val_accuracy:   same on the validation set
//
// Output file: <metrics_dir>/metrics.csv
//
//   epoch,train_loss,val_loss,train_accuracy,val_accuracy
//   1,0.693100,0.694800,0.512500,0.450000
//   2,0.690200,0.695900,0.537500,0.450000
//
// Missing values are written as empty fields.

use anyhow::{Context, Result};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};
use serde::{Deserialize, Serialize};

const CSV_HEADER: &str = "epoch,train_loss,val_loss,train_accuracy,val_accuracy";

/// One row of metrics data for a single training epoch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    pub train_loss: f64,

    /// None when no samples were held out
    pub val_loss: Option<f64>,

    /// Classification only. Range: [0.0, 1.0]
    pub train_accuracy: Option<f64>,

    pub val_accuracy: Option<f64>,
}

impl EpochMetrics {
    pub fn new(epoch: usize, train_loss: f64) -> Self {
        Self {
            epoch,
            train_loss,
            val_loss:       None,
            train_accuracy: None,
            val_accuracy:   None,
        }
    }

    /// Returns true if this epoch improved over the previous best val_loss
    pub fn is_improvement(&self, best_val_loss: f64) -> bool {
        self.val_loss.is_some_and(|v| v < best_val_loss)
    }

    /// Single-line summary used in the training log.
    pub fn summary(&self, total_epochs: usize) -> String {
        let mut line = format!(
            "Epoch {:>3}/{} | loss={:.4}",
            self.epoch, total_epochs, self.train_loss,
        );
        if let Some(acc) = self.train_accuracy {
            line.push_str(&format!(" | accuracy={:.1}%", acc * 100.0));
        }
        if let Some(v) = self.val_loss {
            line.push_str(&format!(" | val_loss={:.4}", v));
        }
        if let Some(acc) = self.val_accuracy {
            line.push_str(&format!(" | val_accuracy={:.1}%", acc * 100.0));
        }
        line
    }

    fn csv_row(&self) -> String {
        let opt = |v: Option<f64>| v.map(|x| format!("{:.6}", x)).unwrap_or_default();
        format!(
            "{},{:.6},{},{},{}",
            self.epoch,
            self.train_loss,
            opt(self.val_loss),
            opt(self.train_accuracy),
            opt(self.val_accuracy),
        )
    }
}

/// Logs epoch metrics to a CSV file for later analysis.
pub struct MetricsLogger {
    /// Full path to the CSV file
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create a new MetricsLogger.
    /// Writes the CSV header if the file doesn't exist yet; later runs append.
    pub fn new(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();

        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create metrics dir '{}'", dir.display()))?;

        let csv_path = dir.join("metrics.csv");

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)
                .with_context(|| format!("Cannot create '{}'", csv_path.display()))?;
            writeln!(f, "{CSV_HEADER}")?;
            tracing::debug!("Created metrics CSV: '{}'", csv_path.display());
        }

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row in the CSV.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new()
            .append(true)
            .open(&self.csv_path)
            .with_context(|| format!("Cannot open '{}'", self.csv_path.display()))?;

        writeln!(f, "{}", m.csv_row())?;

        tracing::debug!(
            "Logged epoch {} metrics: train_loss={:.4}, val_loss={:?}",
            m.epoch,
            m.train_loss,
            m.val_loss,
        );

        Ok(())
    }

    /// Return the path to the metrics CSV file
    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_improvement() {
        let mut m = EpochMetrics::new(2, 2.5);
        assert!(!m.is_improvement(3.0));

        m.val_loss = Some(2.3);
        assert!(m.is_improvement(3.0));
        assert!(!m.is_improvement(2.0));
    }

    #[test]
    fn test_csv_header_then_rows() {
        let dir    = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(dir.path().join("runs")).unwrap();

        let mut first = EpochMetrics::new(1, 0.5);
        first.train_accuracy = Some(0.75);
        logger.log(&first).unwrap();
        logger.log(&EpochMetrics::new(2, 0.25)).unwrap();

        let text  = fs::read_to_string(logger.csv_path()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], CSV_HEADER);
        assert_eq!(lines[1], "1,0.500000,,0.750000,");
        assert_eq!(lines[2], "2,0.250000,,,");
    }

    #[test]
    fn test_reopening_appends_without_second_header() {
        let dir = tempfile::tempdir().unwrap();
        MetricsLogger::new(dir.path()).unwrap().log(&EpochMetrics::new(1, 1.0)).unwrap();
        MetricsLogger::new(dir.path()).unwrap().log(&EpochMetrics::new(1, 0.9)).unwrap();

        let text = fs::read_to_string(dir.path().join("metrics.csv")).unwrap();
        assert_eq!(text.matches("epoch,").count(), 1);
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_summary_mentions_validation_only_when_present() {
        let m = EpochMetrics::new(1, 0.1234);
        assert!(!m.summary(10).contains("val_loss"));

        let mut m = m;
        m.val_loss = Some(0.2);
        assert!(m.summary(10).contains("val_loss=0.2000"));
    }
}
