// ============================================================
// Patcher
// ============================================================
// Cuts source images into fixed-size training tiles and builds
// the matching low-res seeds.
//
//   target — patch_size × patch_size tile cut from the image
//   seed   — the same tile box-averaged down by the zoom factor
//
// Tiles are cut on a non-overlapping grid; the ragged right and
// bottom edges of an image are dropped. An image smaller than
// patch_size on either side yields no patches.

use ndarray::{s, Array3};

use crate::domain::image::{SourceImage, RGB_CHANNELS};
use crate::domain::patch::TrainingPatch;

pub struct Patcher {
    /// Side length of the hi-res target tile (the `batch_shape` flag)
    patch_size: usize,
    /// Upscale factor — seed side = patch_size / zoom
    zoom: usize,
}

impl Patcher {
    /// # Panics
    /// Panics if zoom is 0 or patch_size is not a multiple of zoom,
    /// because the seed tile would not have a whole-pixel size.
    pub fn new(patch_size: usize, zoom: usize) -> Self {
        assert!(zoom > 0, "zoom must be at least 1");
        assert!(
            patch_size % zoom == 0,
            "patch_size ({}) must be a multiple of zoom ({})",
            patch_size,
            zoom
        );
        Self { patch_size, zoom }
    }

    /// Cut all full tiles out of one image.
    pub fn patches(&self, image: &SourceImage) -> Vec<TrainingPatch> {
        let (height, width) = image.dims();
        let size = self.patch_size;

        let mut out = Vec::new();
        let mut y = 0;
        while y + size <= height {
            let mut x = 0;
            while x + size <= width {
                let target = image
                    .pixels
                    .slice(s![y..y + size, x..x + size, ..])
                    .to_owned();
                let seed = downscale(&target, self.zoom);
                out.push(TrainingPatch::new(target, seed));
                x += size;
            }
            y += size;
        }
        out
    }

    /// How many tiles an image of the given size produces.
    pub fn num_patches(&self, height: usize, width: usize) -> usize {
        (height / self.patch_size) * (width / self.patch_size)
    }
}

/// Box-average downscale by an integer factor.
/// Each output pixel is the mean of a zoom × zoom block.
fn downscale(tile: &Array3<f32>, zoom: usize) -> Array3<f32> {
    let shape = tile.shape();
    let (oh, ow) = (shape[0] / zoom, shape[1] / zoom);
    let norm = (zoom * zoom) as f32;

    let mut out = Array3::<f32>::zeros((oh, ow, RGB_CHANNELS));
    for y in 0..oh {
        for x in 0..ow {
            for c in 0..RGB_CHANNELS {
                let mut sum = 0.0;
                for dy in 0..zoom {
                    for dx in 0..zoom {
                        sum += tile[[y * zoom + dy, x * zoom + dx, c]];
                    }
                }
                out[[y, x, c]] = sum / norm;
            }
        }
    }
    out
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn gray_image(height: usize, width: usize, value: f32) -> SourceImage {
        SourceImage::new(
            "test.png",
            Array3::from_elem((height, width, RGB_CHANNELS), value),
        )
    }

    #[test]
    fn test_grid_tiling() {
        let patcher = Patcher::new(8, 2);
        let patches = patcher.patches(&gray_image(16, 24, 0.5));
        // 2 rows × 3 columns of full tiles
        assert_eq!(patches.len(), 6);
        assert_eq!(patches[0].target.shape(), &[8, 8, 3]);
        assert_eq!(patches[0].seed.shape(), &[4, 4, 3]);
        assert_eq!(patches[0].zoom(), 2);
    }

    #[test]
    fn test_ragged_edges_are_dropped() {
        let patcher = Patcher::new(8, 2);
        // 15 is one short of two rows, 17 is one past two columns
        let patches = patcher.patches(&gray_image(15, 17, 0.0));
        assert_eq!(patches.len(), 2);
        assert_eq!(patcher.num_patches(15, 17), 2);
    }

    #[test]
    fn test_image_smaller_than_patch_yields_nothing() {
        let patcher = Patcher::new(32, 2);
        assert!(patcher.patches(&gray_image(16, 16, 0.0)).is_empty());
    }

    #[test]
    fn test_downscale_averages_blocks() {
        let mut tile = Array3::<f32>::zeros((2, 2, RGB_CHANNELS));
        tile[[0, 0, 0]] = 1.0;
        tile[[0, 1, 0]] = 1.0;
        // channel 0 block: [1, 1, 0, 0] → mean 0.5
        let seed = downscale(&tile, 2);
        assert_eq!(seed.shape(), &[1, 1, 3]);
        assert!((seed[[0, 0, 0]] - 0.5).abs() < 1e-6);
        assert_eq!(seed[[0, 0, 1]], 0.0);
    }

    #[test]
    #[should_panic]
    fn test_patch_size_must_divide_by_zoom() {
        let _ = Patcher::new(9, 2);
    }
}
