// ============================================================
// Training Loop
// ============================================================
// Epoch loop over burn's DataLoader, one Enhancer.fit per batch.
//
//   - training batches on TrainBackend (Autodiff<NdArray>)
//   - validation batches on InferBackend — no autodiff overhead
//   - learning rate multiplied by lr_decay every lr_period epochs
//   - weights saved after every epoch (one file per configuration,
//     overwritten in place)
//   - one metrics.csv row per epoch
//
// Reference: Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::data::dataloader::DataLoaderBuilder;
use indicatif::{ProgressBar, ProgressStyle};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::SrBatcher, dataset::PatchDataset};
use crate::infra::metrics::{EpochMetrics, MetricsLogger};
use crate::ml::enhancer::Enhancer;
use crate::ml::{Device, InferBackend, TrainBackend};

pub fn run_training(
    cfg: &TrainConfig,
    train_dataset: PatchDataset,
    val_dataset: PatchDataset,
    mut enhancer: Enhancer,
    metrics: MetricsLogger,
) -> Result<()> {
    let device = Device::default();

    let train_count = train_dataset.patch_count();
    if train_count == 0 {
        anyhow::bail!(
            "no training patches produced — check the images directory and --batch-shape"
        );
    }
    let batches_per_epoch = train_count.div_ceil(cfg.batch_size);

    let train_batcher = SrBatcher::<TrainBackend>::new(device.clone());
    let train_loader = DataLoaderBuilder::new(train_batcher)
        .batch_size(cfg.batch_size)
        .shuffle(42)
        .num_workers(1)
        .build(train_dataset);

    let val_batcher = SrBatcher::<InferBackend>::new(device.clone());
    let val_loader = DataLoaderBuilder::new(val_batcher)
        .batch_size(cfg.batch_size)
        .num_workers(1)
        .build(val_dataset);

    let mut lr = cfg.lr;
    enhancer.set_learning_rate(lr);

    for epoch in 1..=cfg.epochs {
        // ── Learning rate schedule ────────────────────────────────────────────
        if epoch > 1 && (epoch - 1) % cfg.lr_period == 0 {
            lr *= cfg.lr_decay;
            enhancer.set_learning_rate(lr);
            tracing::info!("epoch {}: learning rate decayed to {:e}", epoch, lr);
        }

        // ── Training phase ────────────────────────────────────────────────────
        let progress = ProgressBar::new(batches_per_epoch as u64);
        progress.set_style(
            ProgressStyle::with_template(
                "{prefix} [{bar:30}] {pos}/{len} batches",
            )?
            .progress_chars("=> "),
        );
        progress.set_prefix(format!("epoch {epoch}/{}", cfg.epochs));

        let mut train_loss_sum = 0.0f64;
        let mut train_psnr_sum = 0.0f64;
        let mut train_batches = 0usize;

        for batch in train_loader.iter() {
            let step = enhancer.fit(batch);
            train_loss_sum += step.loss;
            train_psnr_sum += step.psnr;
            train_batches += 1;
            progress.inc(1);
        }
        progress.finish_and_clear();

        let avg_train_loss = train_loss_sum / train_batches.max(1) as f64;
        let avg_train_psnr = train_psnr_sum / train_batches.max(1) as f64;

        // ── Validation phase ──────────────────────────────────────────────────
        let mut val_loss_sum = 0.0f64;
        let mut val_psnr_sum = 0.0f64;
        let mut val_batches = 0usize;

        for batch in val_loader.iter() {
            let step = enhancer.validate(batch);
            val_loss_sum += step.loss;
            val_psnr_sum += step.psnr;
            val_batches += 1;
        }

        let (avg_val_loss, avg_val_psnr) = if val_batches > 0 {
            (
                val_loss_sum / val_batches as f64,
                val_psnr_sum / val_batches as f64,
            )
        } else {
            (f64::NAN, f64::NAN)
        };

        println!(
            "Epoch {:>3}/{} | train_loss={:.6} | train_psnr={:.2}dB | val_loss={:.6} | val_psnr={:.2}dB",
            epoch, cfg.epochs, avg_train_loss, avg_train_psnr, avg_val_loss, avg_val_psnr,
        );

        metrics.log(&EpochMetrics::new(
            epoch,
            avg_train_loss,
            avg_train_psnr,
            avg_val_loss,
            avg_val_psnr,
        ))?;

        enhancer.save()?;
        tracing::debug!("weights saved after epoch {}", epoch);
    }

    tracing::info!("training complete");
    Ok(())
}
