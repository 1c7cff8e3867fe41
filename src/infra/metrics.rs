// ============================================================
// Metrics Logger
// ============================================================
// Appends one CSV row per training epoch so runs can be plotted
// and compared afterwards.
//
// Output file: {models_dir}/metrics.csv
//
//   epoch,train_loss,train_psnr,val_loss,val_psnr
//   1,0.021400,16.696421,0.019850,17.022156
//   ...
//
// Loss is MSE on [0,1] pixels; PSNR is in decibels, higher is
// better. val_psnr diverging downwards from train_psnr is the
// overfitting signal to watch.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::{self, OpenOptions},
    io::Write,
    path::PathBuf,
};

/// One row of metrics for a single training epoch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpochMetrics {
    /// The epoch number (starts at 1)
    pub epoch: usize,

    /// Average MSE over all training batches
    pub train_loss: f64,

    /// Average PSNR (dB) over all training batches
    pub train_psnr: f64,

    /// Average MSE on the held-out validation set
    pub val_loss: f64,

    /// Average PSNR (dB) on the held-out validation set
    pub val_psnr: f64,
}

impl EpochMetrics {
    pub fn new(
        epoch: usize,
        train_loss: f64,
        train_psnr: f64,
        val_loss: f64,
        val_psnr: f64,
    ) -> Self {
        Self {
            epoch,
            train_loss,
            train_psnr,
            val_loss,
            val_psnr,
        }
    }

    /// True if this epoch beat the previous best validation PSNR.
    pub fn is_improvement(&self, best_val_psnr: f64) -> bool {
        self.val_psnr > best_val_psnr
    }
}

/// Appends epoch metrics to a CSV file.
pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Create the logger, writing the CSV header if the file is new
    /// so repeated runs append rather than clobber.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;

        let csv_path = dir.join("metrics.csv");
        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "epoch,train_loss,train_psnr,val_loss,val_psnr")?;
        }

        Ok(Self { csv_path })
    }

    /// Append one epoch's metrics as a new row.
    pub fn log(&self, m: &EpochMetrics) -> Result<()> {
        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;
        writeln!(
            f,
            "{},{:.6},{:.6},{:.6},{:.6}",
            m.epoch, m.train_loss, m.train_psnr, m.val_loss, m.val_psnr,
        )?;

        tracing::debug!(
            "logged epoch {}: train_psnr={:.2}dB val_psnr={:.2}dB",
            m.epoch,
            m.train_psnr,
            m.val_psnr,
        );
        Ok(())
    }

    pub fn csv_path(&self) -> &PathBuf {
        &self.csv_path
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_improvement() {
        let m = EpochMetrics::new(2, 0.02, 17.1, 0.021, 16.8);
        // Higher PSNR is better
        assert!(m.is_improvement(16.0));
        assert!(!m.is_improvement(17.5));
    }
}
