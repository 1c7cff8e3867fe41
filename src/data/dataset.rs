use burn::data::dataset::Dataset;

use crate::domain::patch::TrainingPatch;

/// In-memory dataset of training patches, the form burn's
/// DataLoader can index into.
pub struct PatchDataset {
    patches: Vec<TrainingPatch>,
}

impl PatchDataset {
    pub fn new(patches: Vec<TrainingPatch>) -> Self {
        Self { patches }
    }

    pub fn patch_count(&self) -> usize {
        self.patches.len()
    }
}

impl Dataset<TrainingPatch> for PatchDataset {
    fn get(&self, index: usize) -> Option<TrainingPatch> {
        self.patches.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.patches.len()
    }
}
