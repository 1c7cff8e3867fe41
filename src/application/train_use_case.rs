// ============================================================
// TrainUseCase
// ============================================================
// Runs the full training pipeline in order:
//
//   Step 1: Load images              (data)
//   Step 2: Cut patches, build seeds (data)
//   Step 3: Split train/validation   (data)
//   Step 4: Build datasets           (data)
//   Step 5: Build the enhancer       (ml, loads weights if present)
//   Step 6: Open the metrics log     (infra)
//   Step 7: Run the epoch loop       (ml)

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::PatchDataset, loader::ImageLoader, patcher::Patcher, splitter::split_train_val,
};
use crate::domain::traits::ImageSource;
use crate::infra::{metrics::MetricsLogger, weights::WeightStore};
use crate::ml::{enhancer::Enhancer, trainer::run_training};

/// Fraction of patches kept for training; the rest validate.
const TRAIN_FRACTION: f64 = 0.8;

// ─── Training Configuration ──────────────────────────────────────────────────
// All knobs for one training run. Serialisable so runs can be
// reproduced from a JSON blob if needed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub images_dir: String,
    pub models_dir: String,
    /// Upscale factor, encoded into the weights filename
    pub zoom: u32,
    /// Model type axis of the filename convention (e.g. "photo")
    pub kind: String,
    /// Model name axis of the filename convention (e.g. "default")
    pub model: String,
    /// Side length of hi-res training tiles
    pub batch_shape: usize,
    pub batch_size: usize,
    pub epochs: usize,
    pub lr: f64,
    /// Epochs between learning-rate decays
    pub lr_period: usize,
    /// Multiplier applied to the learning rate each period
    pub lr_decay: f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            images_dir: "data/images".to_string(),
            models_dir: "models".to_string(),
            zoom: 2,
            kind: "photo".to_string(),
            model: "default".to_string(),
            batch_shape: 192,
            batch_size: 15,
            epochs: 50,
            lr: 1e-3,
            lr_period: 25,
            lr_decay: 0.5,
        }
    }
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<()> {
        let cfg = &self.config;

        // ── Step 1: Load all images ───────────────────────────────────────────
        tracing::info!("loading images from '{}'", cfg.images_dir);
        let loader = ImageLoader::new(&cfg.images_dir);
        let images = loader.load_all()?;

        // ── Step 2: Cut hi-res tiles and their low-res seeds ──────────────────
        // seed side = batch_shape / zoom; the network learns seed → tile
        let patcher = Patcher::new(cfg.batch_shape, cfg.zoom as usize);
        let patches: Vec<_> = images.iter().flat_map(|img| patcher.patches(img)).collect();
        tracing::info!("cut {} training patches", patches.len());

        // ── Step 3: Train / validation split ──────────────────────────────────
        let (train_patches, val_patches) = split_train_val(patches, TRAIN_FRACTION);
        tracing::info!(
            "split: {} train, {} validation",
            train_patches.len(),
            val_patches.len()
        );

        // ── Step 4: Build datasets ────────────────────────────────────────────
        let train_dataset = PatchDataset::new(train_patches);
        let val_dataset = PatchDataset::new(val_patches);

        // ── Step 5: Build the enhancer ────────────────────────────────────────
        // Training mode: existing weights continue training, a missing
        // file means a fresh random initialization
        let store = WeightStore::new(&cfg.models_dir, cfg.zoom, cfg.kind.clone(), cfg.model.clone());
        let enhancer = Enhancer::new(store, true)?;

        // ── Step 6: Metrics log + run configuration ───────────────────────────
        // The config blob lets a run be reproduced or inspected later
        let metrics = MetricsLogger::new(&cfg.models_dir)?;
        let cfg_path = Path::new(&cfg.models_dir).join("train_config.json");
        fs::write(&cfg_path, serde_json::to_string_pretty(cfg)?)
            .with_context(|| format!("cannot write '{}'", cfg_path.display()))?;

        // ── Step 7: Epoch loop ────────────────────────────────────────────────
        run_training(cfg, train_dataset, val_dataset, enhancer, metrics)?;

        Ok(())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_json_round_trip() {
        let cfg = TrainConfig {
            zoom: 4,
            kind: "art".to_string(),
            epochs: 3,
            ..TrainConfig::default()
        };
        let json = serde_json::to_string_pretty(&cfg).unwrap();
        let back: TrainConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(back.zoom, 4);
        assert_eq!(back.kind, "art");
        assert_eq!(back.epochs, 3);
        assert_eq!(back.batch_shape, cfg.batch_shape);
        assert_eq!(back.lr, cfg.lr);
    }
}
