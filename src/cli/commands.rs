// ============================================================
// CLI Commands and Arguments
// ============================================================
// Two subcommands: `train` and `enhance`, with the configuration
// axes (zoom / type / model) shared between them — they select
// which weights file a run reads and writes.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::application::train_use_case::TrainConfig;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Train the enlarger on a directory of images
    Train(TrainArgs),

    /// Enhance image files using trained weights
    Enhance(EnhanceArgs),
}

/// All arguments for the `train` command.
#[derive(Args, Debug)]
pub struct TrainArgs {
    /// Directory of training images (png/jpg)
    #[arg(long, default_value = "data/images")]
    pub images_dir: String,

    /// Directory where weight files live
    #[arg(long, default_value = "models")]
    pub models_dir: String,

    /// Upscale factor (filename axis; the topology does 2x per step)
    #[arg(long, default_value_t = 2)]
    pub zoom: u32,

    /// Model type, e.g. photo or art (filename axis)
    #[arg(long = "type", default_value = "photo")]
    pub kind: String,

    /// Model name (filename axis)
    #[arg(long, default_value = "default")]
    pub model: String,

    /// Side length of hi-res training tiles;
    /// the network sees batch-shape / zoom pixel seeds
    #[arg(long, default_value_t = 192)]
    pub batch_shape: usize,

    /// Patches per gradient step
    #[arg(long, default_value_t = 15)]
    pub batch_size: usize,

    /// Number of full passes over the training patches
    #[arg(long, default_value_t = 50)]
    pub epochs: usize,

    /// Initial Adam learning rate
    #[arg(long, default_value_t = 1e-3)]
    pub lr: f64,

    /// Epochs between learning-rate decays
    #[arg(long, default_value_t = 25)]
    pub lr_period: usize,

    /// Multiplier applied to the learning rate each period
    #[arg(long, default_value_t = 0.5)]
    pub lr_decay: f64,
}

/// CLI args → application config; the application layer never
/// sees clap types.
impl From<TrainArgs> for TrainConfig {
    fn from(a: TrainArgs) -> Self {
        TrainConfig {
            images_dir: a.images_dir,
            models_dir: a.models_dir,
            zoom: a.zoom,
            kind: a.kind,
            model: a.model,
            batch_shape: a.batch_shape,
            batch_size: a.batch_size,
            epochs: a.epochs,
            lr: a.lr,
            lr_period: a.lr_period,
            lr_decay: a.lr_decay,
        }
    }
}

/// All arguments for the `enhance` command.
#[derive(Args, Debug)]
pub struct EnhanceArgs {
    /// Image files to enhance
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Directory where weight files live
    #[arg(long, default_value = "models")]
    pub models_dir: String,

    /// Upscale factor (selects the weights file)
    #[arg(long, default_value_t = 2)]
    pub zoom: u32,

    /// Model type (selects the weights file)
    #[arg(long = "type", default_value = "photo")]
    pub kind: String,

    /// Model name (selects the weights file)
    #[arg(long, default_value = "default")]
    pub model: String,
}
