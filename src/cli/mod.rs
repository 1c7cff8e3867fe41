// ============================================================
// CLI / Presentation Layer
// ============================================================
// Entry point for all user interaction, parsed with clap.
// All business logic is delegated to the application layer.
//
// Two commands:
//   1. `train`   — trains the enlarger on a directory of images
//   2. `enhance` — loads weights and upscales image files

pub mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, EnhanceArgs, TrainArgs};

#[derive(Parser, Debug)]
#[command(
    name = "neural-enlarge",
    version,
    about = "Train and apply a convolutional 2x image enlarger."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Route the subcommand; the CLI layer only routes, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Train(args) => Self::run_train(args),
            Commands::Enhance(args) => Self::run_enhance(args),
        }
    }

    fn run_train(args: TrainArgs) -> Result<()> {
        use crate::application::train_use_case::TrainUseCase;

        tracing::info!("starting training on images in: {}", args.images_dir);

        let use_case = TrainUseCase::new(args.into());
        use_case.execute()?;

        println!("Training complete. Weights saved.");
        Ok(())
    }

    fn run_enhance(args: EnhanceArgs) -> Result<()> {
        use crate::application::enhance_use_case::EnhanceUseCase;

        let use_case =
            EnhanceUseCase::new(args.models_dir.clone(), args.zoom, args.kind, args.model)?;

        let outputs = use_case.enhance_files(&args.files)?;
        for path in outputs {
            println!("{}", path.display());
        }
        Ok(())
    }
}
