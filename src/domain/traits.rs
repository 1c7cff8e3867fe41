// ============================================================
// Core Traits (Abstractions)
// ============================================================
// The application layer programs against these traits instead of
// concrete types, so sources can be swapped without touching the
// orchestration code.

use crate::domain::image::SourceImage;
use anyhow::Result;

// ─── ImageSource ──────────────────────────────────────────────────────────────
/// Any component that can produce decoded images.
///
/// Implementations:
///   - ImageLoader → loads from a directory of png/jpg files
pub trait ImageSource {
    /// Load all available images from this source.
    fn load_all(&self) -> Result<Vec<SourceImage>>;
}
