// ============================================================
// Weight Store
// ============================================================
// Owns the weights filename convention and delegates the file
// format entirely to burn's CompactRecorder.
//
// Filename convention:
//
//   models/ne{zoom}x-{type}-{model}-{version}.mpk.gz
//
// The zoom factor, model type, and model name are configuration
// axes; the version is this crate's version, so weights trained
// by one release are never silently picked up by another. The
// recorder itself appends the .mpk.gz extension, so it is handed
// the bare stem.

use std::{fs, path::PathBuf};

use burn::{
    prelude::*,
    record::{HalfPrecisionSettings, NamedMpkGzFileRecorder, Recorder},
};

use crate::error::{Error, Result};
use crate::ml::model::EnlargeNet;

/// Extension appended by CompactRecorder.
const WEIGHTS_EXTENSION: &str = "mpk.gz";

/// Release page trained weights can be fetched from.
const DOWNLOAD_BASE: &str =
    "https://github.com/neural-enlarge/neural-enlarge/releases/download";

/// Locates, saves, and loads the single weights file for one
/// (zoom, type, model) configuration.
pub struct WeightStore {
    /// Directory holding weight files (the `models/` convention)
    dir: PathBuf,
    zoom: u32,
    kind: String,
    model: String,
}

impl WeightStore {
    pub fn new(
        dir: impl Into<PathBuf>,
        zoom: u32,
        kind: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            dir: dir.into(),
            zoom,
            kind: kind.into(),
            model: model.into(),
        }
    }

    fn version() -> &'static str {
        env!("CARGO_PKG_VERSION")
    }

    /// Filename stem without directory or extension,
    /// e.g. `ne2x-photo-default-0.1.0`.
    fn file_stem(&self) -> String {
        format!(
            "ne{}x-{}-{}-{}",
            self.zoom,
            self.kind,
            self.model,
            Self::version()
        )
    }

    /// Path handed to the recorder. The recorder calls
    /// `set_extension("mpk.gz")`, which would swallow the trailing
    /// `.0` of a bare version-suffixed stem, so the stem is handed
    /// over with a sacrificial `.mpk` extension for it to replace.
    fn record_path(&self) -> PathBuf {
        self.dir.join(format!("{}.mpk", self.file_stem()))
    }

    /// The conventional relative filename,
    /// e.g. `models/ne2x-photo-default-0.1.0.mpk.gz`.
    pub fn filename(&self) -> String {
        self.relative_path().display().to_string()
    }

    pub fn relative_path(&self) -> PathBuf {
        self.dir
            .join(format!("{}.{}", self.file_stem(), WEIGHTS_EXTENSION))
    }

    pub fn absolute_path(&self) -> Result<PathBuf> {
        let relative = self.relative_path();
        if relative.is_absolute() {
            return Ok(relative);
        }
        Ok(std::env::current_dir()?.join(relative))
    }

    /// Whether a weights file for this configuration is on disk.
    pub fn exists(&self) -> bool {
        self.relative_path().exists()
    }

    /// Where pre-trained weights for this configuration can be fetched.
    pub fn download_url(&self) -> String {
        let name = self
            .relative_path()
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.file_stem());
        format!("{}/v{}/{}", DOWNLOAD_BASE, Self::version(), name)
    }

    /// Write current network weights to the conventional file.
    pub fn save<B: Backend>(&self, model: &EnlargeNet<B>) -> Result<()> {
        fs::create_dir_all(&self.dir)?;

        NamedMpkGzFileRecorder::<HalfPrecisionSettings>::new()
            .record(model.clone().into_record(), self.record_path())
            .map_err(|e| Error::WeightSave {
                path: self.relative_path(),
                message: e.to_string(),
            })?;

        tracing::debug!("saved weights to {}", self.filename());
        Ok(())
    }

    /// Restore weights from the conventional file into `model`.
    pub fn load<B: Backend>(
        &self,
        model: EnlargeNet<B>,
        device: &B::Device,
    ) -> Result<EnlargeNet<B>> {
        let record = NamedMpkGzFileRecorder::<HalfPrecisionSettings>::new()
            .load(self.record_path(), device)
            .map_err(|e| Error::WeightLoad {
                path: self.relative_path(),
                message: e.to_string(),
            })?;

        Ok(model.load_record(record))
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::ml::model::EnlargeNetConfig;
    use crate::ml::InferBackend;

    fn store() -> WeightStore {
        WeightStore::new("models", 2, "photo", "default")
    }

    #[test]
    fn test_filename_convention_relative() {
        let expected = format!(
            "models/ne2x-photo-default-{}.mpk.gz",
            env!("CARGO_PKG_VERSION")
        );
        assert_eq!(store().filename(), expected);
        assert_eq!(store().relative_path(), PathBuf::from(expected));
    }

    #[test]
    fn test_filename_convention_absolute() {
        let absolute = store().absolute_path().unwrap();
        assert!(absolute.is_absolute());
        assert!(absolute.ends_with(store().relative_path()));
    }

    #[test]
    fn test_filename_encodes_all_axes() {
        let name = WeightStore::new("models", 4, "art", "deep").filename();
        assert!(name.starts_with("models/ne4x-art-deep-"));
        assert!(name.ends_with(".mpk.gz"));
    }

    #[test]
    fn test_download_url_names_the_file() {
        let url = store().download_url();
        assert!(url.starts_with(DOWNLOAD_BASE));
        assert!(url.contains(&format!("v{}", env!("CARGO_PKG_VERSION"))));
        assert!(url.ends_with(".mpk.gz"));
        // URL carries the bare filename, not the models/ prefix
        assert!(!url.contains("models/"));
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let dir = std::env::temp_dir().join(format!(
            "neural-enlarge-weights-test-{}",
            std::process::id()
        ));
        let store = WeightStore::new(&dir, 2, "photo", "default");

        let device = Default::default();
        let net = EnlargeNetConfig::new().init::<InferBackend>(&device);

        assert!(!store.exists());
        store.save(&net).unwrap();
        assert!(store.exists());
        // The file on disk carries the full conventional name,
        // version included — nothing may truncate it on the way out
        assert!(store.relative_path().exists());
        assert!(store
            .relative_path()
            .to_string_lossy()
            .ends_with(&format!("{}.mpk.gz", env!("CARGO_PKG_VERSION"))));

        let restored = EnlargeNetConfig::new().init::<InferBackend>(&device);
        store.load(restored, &device).unwrap();

        let _ = std::fs::remove_dir_all(&dir);
    }
}
