// ============================================================
// Source Image Domain Type
// ============================================================
// Represents one decoded image from disk: a source name kept for
// traceability plus the pixel data. By the time a SourceImage
// exists, the file format has already been decoded away.

use ndarray::Array3;

/// Number of channels in every image this crate handles.
pub const RGB_CHANNELS: usize = 3;

/// A decoded RGB image in HWC order, values in [0, 1].
#[derive(Debug, Clone)]
pub struct SourceImage {
    /// Filename the pixels came from — kept so training logs and
    /// skipped-file warnings can point back at the file
    pub source: String,

    /// Pixel data, shape [height, width, 3]
    pub pixels: Array3<f32>,
}

impl SourceImage {
    pub fn new(source: impl Into<String>, pixels: Array3<f32>) -> Self {
        Self {
            source: source.into(),
            pixels,
        }
    }

    /// (height, width) of the image
    pub fn dims(&self) -> (usize, usize) {
        let shape = self.pixels.shape();
        (shape[0], shape[1])
    }
}
