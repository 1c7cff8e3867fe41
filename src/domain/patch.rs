// ============================================================
// Training Patch Domain Type
// ============================================================
// One super-resolution training pair:
//
//   target — a hi-res tile cut from a source image,
//            shape [batch_shape, batch_shape, 3]
//   seed   — the same tile downscaled by the zoom factor,
//            shape [batch_shape/zoom, batch_shape/zoom, 3]
//
// The network learns seed → target. Both sides stay HWC here;
// the batcher permutes to NCHW when tensors are built.

use ndarray::Array3;

/// A (hi-res target, low-res seed) pair cut from one source image.
#[derive(Debug, Clone)]
pub struct TrainingPatch {
    pub target: Array3<f32>,
    pub seed: Array3<f32>,
}

impl TrainingPatch {
    pub fn new(target: Array3<f32>, seed: Array3<f32>) -> Self {
        Self { target, seed }
    }

    /// Side length of the hi-res target tile
    pub fn target_size(&self) -> usize {
        self.target.shape()[0]
    }

    /// Side length of the low-res seed tile
    pub fn seed_size(&self) -> usize {
        self.seed.shape()[0]
    }

    /// The upscale factor this pair encodes (target side / seed side)
    pub fn zoom(&self) -> usize {
        self.target_size() / self.seed_size().max(1)
    }
}
