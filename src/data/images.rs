// ============================================================
// Pixel Conversions
// ============================================================
// The boundary between the `image` crate's u8 buffers and the
// [0,1] float HWC arrays used everywhere else in the crate.

use std::path::Path;

use image::{DynamicImage, ImageBuffer, Rgb};
use ndarray::Array3;

use crate::domain::image::RGB_CHANNELS;
use crate::error::{Error, Result};

/// Convert a decoded image to an HWC array with values in [0, 1].
pub fn image_to_array(img: &DynamicImage) -> Array3<f32> {
    let rgb = img.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);

    let mut out = Array3::<f32>::zeros((height, width, RGB_CHANNELS));
    for (x, y, pixel) in rgb.enumerate_pixels() {
        let (x, y) = (x as usize, y as usize);
        out[[y, x, 0]] = f32::from(pixel[0]) / 255.0;
        out[[y, x, 1]] = f32::from(pixel[1]) / 255.0;
        out[[y, x, 2]] = f32::from(pixel[2]) / 255.0;
    }
    out
}

/// Convert a [0,1] HWC array back to an 8-bit RGB image.
pub fn array_to_image(pixels: &Array3<f32>) -> ImageBuffer<Rgb<u8>, Vec<u8>> {
    let shape = pixels.shape();
    let (height, width) = (shape[0], shape[1]);

    let mut img = ImageBuffer::new(width as u32, height as u32);
    for y in 0..height {
        for x in 0..width {
            let r = denormalize(pixels[[y, x, 0]]);
            let g = denormalize(pixels[[y, x, 1]]);
            let b = denormalize(pixels[[y, x, 2]]);
            img.put_pixel(x as u32, y as u32, Rgb([r, g, b]));
        }
    }
    img
}

/// Save a [0,1] HWC array as an image file (format from extension).
pub fn save_array<P: AsRef<Path>>(pixels: &Array3<f32>, path: P) -> Result<()> {
    let path = path.as_ref();
    array_to_image(pixels)
        .save(path)
        .map_err(|source| Error::ImageSave {
            path: path.to_path_buf(),
            source,
        })
}

/// Map [0, 1] to [0, 255] with clamping.
#[inline]
fn denormalize(value: f32) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_denormalize() {
        assert_eq!(denormalize(0.0), 0);
        assert_eq!(denormalize(0.5), 128);
        assert_eq!(denormalize(1.0), 255);
    }

    #[test]
    fn test_denormalize_clamp() {
        // Network output is unbounded (final conv is linear),
        // so out-of-range values must clamp, not wrap
        assert_eq!(denormalize(-0.5), 0);
        assert_eq!(denormalize(1.5), 255);
    }

    #[test]
    fn test_array_shape_matches_image() {
        let img = DynamicImage::new_rgb8(20, 10);
        let arr = image_to_array(&img);
        // HWC: height first
        assert_eq!(arr.shape(), &[10, 20, 3]);
    }

    #[test]
    fn test_round_trip_preserves_pixels() {
        let mut img = ImageBuffer::new(4, 4);
        img.put_pixel(1, 2, Rgb([10u8, 120, 250]));
        let arr = image_to_array(&DynamicImage::ImageRgb8(img));
        let back = array_to_image(&arr);
        assert_eq!(back.get_pixel(1, 2), &Rgb([10u8, 120, 250]));
    }
}
