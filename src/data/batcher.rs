// ============================================================
// Super-Resolution Batcher
// ============================================================
// Implements burn's Batcher trait to convert a Vec<TrainingPatch>
// into framework-ready tensors.
//
//   Input:  N patches, targets [s,s,3] HWC, seeds [s/zoom,s/zoom,3]
//   Output: SrBatch with seeds   [N, 3, s/zoom, s/zoom]
//                        targets [N, 3, s, s]
//
// The HWC → CHW permutation happens here, once, on the way into
// the framework. All patches in a run share one tile size, so
// stacking is a flatten-then-reshape.

use burn::{data::dataloader::batcher::Batcher, prelude::*};

use crate::domain::image::RGB_CHANNELS;
use crate::domain::patch::TrainingPatch;

// ─── SrBatch ──────────────────────────────────────────────────────────────────
/// One batch of (seed, target) tensor pairs in NCHW layout.
#[derive(Debug, Clone)]
pub struct SrBatch<B: Backend> {
    /// Low-res network inputs — shape [batch, 3, s/zoom, s/zoom]
    pub seeds: Tensor<B, 4>,

    /// Hi-res ground truth — shape [batch, 3, s, s]
    pub targets: Tensor<B, 4>,
}

// ─── SrBatcher ────────────────────────────────────────────────────────────────
/// Holds the target device so tensors land on the right backend.
#[derive(Clone, Debug)]
pub struct SrBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> SrBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }

    /// Stack a slice of HWC arrays into one NCHW tensor.
    fn stack(&self, arrays: Vec<&ndarray::Array3<f32>>) -> Tensor<B, 4> {
        let batch = arrays.len();
        let shape = arrays[0].shape();
        let (height, width) = (shape[0], shape[1]);

        // Flatten each array in CHW order: the permuted view's iterator
        // walks channels outermost, which is exactly the tensor layout
        let flat: Vec<f32> = arrays
            .iter()
            .flat_map(|a| a.view().permuted_axes([2, 0, 1]).into_iter().copied().collect::<Vec<_>>())
            .collect();

        Tensor::<B, 1>::from_floats(flat.as_slice(), &self.device)
            .reshape([batch, RGB_CHANNELS, height, width])
    }
}

impl<B: Backend> Batcher<TrainingPatch, SrBatch<B>> for SrBatcher<B> {
    fn batch(&self, items: Vec<TrainingPatch>) -> SrBatch<B> {
        let seeds = self.stack(items.iter().map(|p| &p.seed).collect());
        let targets = self.stack(items.iter().map(|p| &p.target).collect());
        SrBatch { seeds, targets }
    }
}
