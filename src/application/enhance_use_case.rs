// ============================================================
// EnhanceUseCase
// ============================================================
// The inference workflow: load image files, run them through the
// enlarger, write the reconstructions next to the inputs as
// `{stem}_ne{zoom}x.png`.
//
// Construction applies the strict weight policy: no weights file
// means a fatal MissingWeights error — enhancing with random
// weights would only produce noise.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use ndarray::Array3;

use crate::data::images::{image_to_array, save_array};
use crate::error::Error;
use crate::infra::weights::WeightStore;
use crate::ml::enhancer::Enhancer;

pub struct EnhanceUseCase {
    enhancer: Enhancer,
    zoom: u32,
}

impl EnhanceUseCase {
    /// Build the enlarger from saved weights. Fails with
    /// `Error::MissingWeights` (download URL included) if the
    /// conventional weights file is absent.
    pub fn new(
        models_dir: impl Into<PathBuf>,
        zoom: u32,
        kind: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self> {
        let store = WeightStore::new(models_dir, zoom, kind, model);
        let enhancer = Enhancer::new(store, false)?;
        Ok(Self { enhancer, zoom })
    }

    /// Enhance each file and return the written output paths.
    pub fn enhance_files(&self, files: &[PathBuf]) -> Result<Vec<PathBuf>> {
        let mut inputs: Vec<Array3<f32>> = Vec::with_capacity(files.len());
        for path in files {
            let img = image::open(path).map_err(|source| Error::ImageLoad {
                path: path.clone(),
                source,
            })?;
            inputs.push(image_to_array(&img));
        }

        let (_, reconstructions) = self.enhancer.predict(&inputs)?;

        let mut outputs = Vec::with_capacity(files.len());
        for (path, repro) in files.iter().zip(&reconstructions) {
            let out_path = output_path(path, self.zoom);
            save_array(repro, &out_path)
                .with_context(|| format!("cannot write '{}'", out_path.display()))?;
            tracing::info!("wrote {}", out_path.display());
            outputs.push(out_path);
        }

        Ok(outputs)
    }

}

/// `photo.jpg` → `photo_ne2x.png` in the same directory.
fn output_path(input: &Path, zoom: u32) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("output");
    input.with_file_name(format!("{}_ne{}x.png", stem, zoom))
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_weights_is_fatal_for_enhance() {
        let dir = std::env::temp_dir().join(format!(
            "neural-enlarge-enhance-test-{}",
            std::process::id()
        ));
        let err = match EnhanceUseCase::new(dir, 2, "photo", "default") {
            Ok(_) => panic!("expected the missing-weights error"),
            Err(e) => e,
        };
        let err = err.downcast_ref::<Error>().expect("library error");
        assert!(matches!(err, Error::MissingWeights { .. }));
    }

    #[test]
    fn test_output_naming() {
        let out = output_path(Path::new("shots/photo.jpg"), 2);
        assert_eq!(out, PathBuf::from("shots/photo_ne2x.png"));
    }
}
