// ============================================================
// Image Loader
// ============================================================
// Loads every decodable image from a directory using the
// `image` crate. One bad file is logged and skipped rather
// than failing the whole run.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::data::images::image_to_array;
use crate::domain::image::SourceImage;
use crate::domain::traits::ImageSource;
use crate::error::Error;

/// File extensions treated as training images.
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// Loads all images from a given directory.
/// Implements the ImageSource trait from the domain layer.
pub struct ImageLoader {
    /// Path to the directory containing image files
    dir: String,
}

impl ImageLoader {
    pub fn new(dir: impl Into<String>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ImageSource for ImageLoader {
    fn load_all(&self) -> Result<Vec<SourceImage>> {
        let dir = Path::new(&self.dir);

        // Missing directory → empty corpus, not a crash
        if !dir.exists() {
            tracing::warn!(
                "image directory '{}' does not exist — returning empty corpus",
                self.dir
            );
            return Ok(Vec::new());
        }

        let mut images = Vec::new();

        for entry in fs::read_dir(dir)
            .with_context(|| format!("cannot read directory '{}'", self.dir))?
        {
            let entry = entry?;
            let path = entry.path();

            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| e.to_lowercase());
            let is_image = ext
                .as_deref()
                .map(|e| IMAGE_EXTENSIONS.contains(&e))
                .unwrap_or(false);
            if !is_image {
                continue;
            }

            match load_single(&path) {
                Ok(img) => {
                    let (h, w) = img.dims();
                    tracing::debug!("loaded: {} ({}x{})", img.source, w, h);
                    images.push(img);
                }
                // Warn and continue — don't fail on one bad file
                Err(e) => {
                    tracing::warn!("skipping '{}': {}", path.display(), e);
                }
            }
        }

        tracing::info!("loaded {} images", images.len());
        Ok(images)
    }
}

/// Decode a single file into a SourceImage.
fn load_single(path: &Path) -> Result<SourceImage> {
    let img = image::open(path).map_err(|source| Error::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;

    let source = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown")
        .to_string();

    Ok(SourceImage::new(source, image_to_array(&img)))
}
