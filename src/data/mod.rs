// ============================================================
// Data Pipeline
// ============================================================
// Everything from image files on disk to framework-ready
// tensor batches.
//
// The pipeline flows in this order:
//
//   png / jpg files
//       │
//       ▼
//   ImageLoader       → decodes files into [0,1] HWC arrays
//       │
//       ▼
//   Patcher           → cuts hi-res tiles, downscales seeds
//       │
//       ▼
//   split_train_val   → shuffled 80/20 split
//       │
//       ▼
//   PatchDataset      → implements burn's Dataset trait
//       │
//       ▼
//   SrBatcher         → stacks patches into NCHW tensor pairs
//       │
//       ▼
//   DataLoader        → feeds batches to the training loop
//
// Each module is responsible for exactly one step.

/// Pixel array ↔ image crate conversions and file saving
pub mod images;

/// Decodes image files from a directory
pub mod loader;

/// Cuts training tiles and builds low-res seeds
pub mod patcher;

/// Implements burn's Dataset trait for training patches
pub mod dataset;

/// Implements burn's Batcher trait to create tensor batches
pub mod batcher;

/// Shuffles and splits data into train/validation sets
pub mod splitter;
