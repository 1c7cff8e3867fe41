// ============================================================
// Enhancer — the model wrapper
// ============================================================
// Thin wrapper over the framework graph. Owns the network, the
// Adam optimizer, and the current learning rate, and applies the
// weight loading policy at construction:
//
//   weights file present            → build graph, load weights
//   absent and NOT training        → Error::MissingWeights, no graph
//   absent and training            → untrained graph
//
// Everything below fit/predict is the framework's: autodiff,
// the Adam update, and batched execution.

use ndarray::{s, Array3};

use burn::{
    module::AutodiffModule,
    optim::{adaptor::OptimizerAdaptor, Adam, AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::domain::image::RGB_CHANNELS;
use crate::data::batcher::SrBatch;
use crate::error::{Error, Result};
use crate::infra::weights::WeightStore;
use crate::ml::model::{EnlargeNet, EnlargeNetConfig};
use crate::ml::psnr::psnr_loss;
use crate::ml::{Device, InferBackend, TrainBackend};

/// Matches the original Adam configuration (lr 1e-3).
const DEFAULT_LEARNING_RATE: f64 = 1e-3;

/// Scalar results of one gradient step (or one validation pass).
#[derive(Debug, Clone, Copy)]
pub struct StepMetrics {
    /// MSE between reconstruction and target
    pub loss: f64,
    /// PSNR in decibels
    pub psnr: f64,
}

pub struct Enhancer {
    model: EnlargeNet<TrainBackend>,
    optim: OptimizerAdaptor<Adam<InferBackend>, EnlargeNet<TrainBackend>, TrainBackend>,
    store: WeightStore,
    device: Device,
    lr: f64,
}

impl Enhancer {
    /// Build the graph and apply the weight loading policy.
    ///
    /// With `train` false and no weights file this fails with
    /// `Error::MissingWeights` before any graph is built — the
    /// caller must stop.
    pub fn new(store: WeightStore, train: bool) -> Result<Self> {
        let device = Device::default();
        let config = EnlargeNetConfig::new();

        let model = if store.exists() {
            tracing::info!("importing weights from file {}", store.filename());
            let model = config.init::<TrainBackend>(&device);
            store.load(model, &device)?
        } else if train {
            tracing::info!(
                "no weights at {} — starting from random initialization",
                store.filename()
            );
            config.init(&device)
        } else {
            return Err(Error::MissingWeights {
                path: store.absolute_path()?,
                url: store.download_url(),
            });
        };

        let optim = AdamConfig::new().with_epsilon(1e-8).init();

        Ok(Self {
            model,
            optim,
            store,
            device,
            lr: DEFAULT_LEARNING_RATE,
        })
    }

    /// One single-batch gradient step: forward, MSE loss, backward,
    /// Adam update. Returns the scalar loss and PSNR for the step.
    /// Convergence tracking and checkpoint cadence belong to the caller.
    pub fn fit(&mut self, batch: SrBatch<TrainBackend>) -> StepMetrics {
        let output = self.model.forward(batch.seeds);

        let loss = (output.clone() - batch.targets.clone())
            .powf_scalar(2.0)
            .mean();
        let loss_val: f64 = loss.clone().into_scalar().elem();
        let psnr_db: f64 = psnr_loss(batch.targets, output).into_scalar().elem();

        let grads = loss.backward();
        let grads = GradientsParams::from_grads(grads, &self.model);
        self.model = self.optim.step(self.lr, self.model.clone(), grads);

        StepMetrics {
            loss: loss_val,
            psnr: psnr_db,
        }
    }

    /// Forward pass on the inner backend, no gradient bookkeeping.
    pub fn validate(&self, batch: SrBatch<InferBackend>) -> StepMetrics {
        let model = self.model.valid();
        let output = model.forward(batch.seeds);

        let loss: f64 = (output.clone() - batch.targets.clone())
            .powf_scalar(2.0)
            .mean()
            .into_scalar()
            .elem();
        let psnr_db: f64 = psnr_loss(batch.targets, output).into_scalar().elem();

        StepMetrics {
            loss,
            psnr: psnr_db,
        }
    }

    /// Apply the graph to each image individually — never batched
    /// across the list. Each HWC image is permuted to the framework's
    /// NCHW layout on the way in and back on the way out. Returns the
    /// originals and reconstructions as parallel lists.
    ///
    /// The pooled encoder stage needs even input sides; odd-sized
    /// images are edge-padded to even dimensions for the forward pass
    /// and the reconstruction is cropped back to twice the original.
    pub fn predict(
        &self,
        images: &[Array3<f32>],
    ) -> Result<(Vec<Array3<f32>>, Vec<Array3<f32>>)> {
        let model = self.model.valid();

        let mut originals = Vec::with_capacity(images.len());
        let mut reconstructions = Vec::with_capacity(images.len());

        for img in images {
            let shape = img.shape();
            if shape[2] != RGB_CHANNELS {
                return Err(Error::ShapeMismatch {
                    expected: format!("[h, w, {RGB_CHANNELS}]"),
                    actual: format!("{shape:?}"),
                });
            }
            let (height, width) = (shape[0], shape[1]);

            originals.push(img.clone());
            let padded = pad_to_even(img);
            let input = hwc_to_tensor::<InferBackend>(&padded, &self.device);
            let output = model.forward(input);
            let full = tensor_to_hwc(output)?;

            let repro = if full.shape()[0] != 2 * height || full.shape()[1] != 2 * width {
                full.slice(s![..2 * height, ..2 * width, ..]).to_owned()
            } else {
                full
            };
            reconstructions.push(repro);
        }

        Ok((originals, reconstructions))
    }

    /// Write current weights to the conventionally named file.
    pub fn save(&self) -> Result<()> {
        self.store.save(&self.model)
    }

    /// Learning rate used by subsequent `fit` steps. The framework
    /// takes the rate per step, so mutating this value is the whole
    /// of the "mutate the optimizer" contract.
    pub fn set_learning_rate(&mut self, lr: f64) {
        self.lr = lr;
    }

    pub fn learning_rate(&self) -> f64 {
        self.lr
    }
}

/// Pad an HWC image on the bottom/right to even sides, replicating
/// the last row and column so the padding doesn't darken the edge.
fn pad_to_even(img: &Array3<f32>) -> Array3<f32> {
    let shape = img.shape();
    let (height, width) = (shape[0], shape[1]);
    let (ph, pw) = (height + height % 2, width + width % 2);
    if ph == height && pw == width {
        return img.clone();
    }

    let mut out = Array3::<f32>::zeros((ph, pw, RGB_CHANNELS));
    out.slice_mut(s![..height, ..width, ..]).assign(img);
    if ph > height {
        let row = out.slice(s![height - 1, .., ..]).to_owned();
        out.slice_mut(s![height, .., ..]).assign(&row);
    }
    if pw > width {
        let col = out.slice(s![.., width - 1, ..]).to_owned();
        out.slice_mut(s![.., width, ..]).assign(&col);
    }
    out
}

/// [h, w, 3] HWC array → [1, 3, h, w] tensor.
fn hwc_to_tensor<B: Backend>(img: &Array3<f32>, device: &B::Device) -> Tensor<B, 4> {
    let shape = img.shape();
    let (height, width) = (shape[0], shape[1]);

    let flat: Vec<f32> = img
        .view()
        .permuted_axes([2, 0, 1])
        .iter()
        .copied()
        .collect();

    Tensor::<B, 1>::from_floats(flat.as_slice(), device).reshape([
        1,
        RGB_CHANNELS,
        height,
        width,
    ])
}

/// [1, c, h, w] tensor → [h, w, c] HWC array.
fn tensor_to_hwc<B: Backend>(tensor: Tensor<B, 4>) -> Result<Array3<f32>> {
    let [_, channels, height, width] = tensor.dims();

    let data: Vec<f32> = tensor.into_data().to_vec().map_err(|e| Error::ShapeMismatch {
        expected: format!("[1, {channels}, {height}, {width}]"),
        actual: format!("{e:?}"),
    })?;

    let chw = Array3::from_shape_vec((channels, height, width), data).map_err(|e| {
        Error::ShapeMismatch {
            expected: format!("[{channels}, {height}, {width}]"),
            actual: e.to_string(),
        }
    })?;

    Ok(chw.permuted_axes([1, 2, 0]).as_standard_layout().to_owned())
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::batcher::SrBatcher;
    use crate::domain::patch::TrainingPatch;
    use burn::data::dataloader::batcher::Batcher;

    fn temp_store(train_marker: &str) -> WeightStore {
        let dir = std::env::temp_dir().join(format!(
            "neural-enlarge-enhancer-test-{}-{}",
            train_marker,
            std::process::id()
        ));
        WeightStore::new(dir, 2, "photo", "default")
    }

    #[test]
    fn test_missing_weights_without_training_is_fatal() {
        let err = match Enhancer::new(temp_store("no-train"), false) {
            Ok(_) => panic!("expected the missing-weights error"),
            Err(e) => e,
        };
        match err {
            Error::MissingWeights { path, url } => {
                assert!(path.is_absolute());
                assert!(url.contains("releases/download"));
            }
            other => panic!("expected MissingWeights, got {other}"),
        }
    }

    #[test]
    fn test_missing_weights_with_training_builds_untrained_graph() {
        let enhancer = Enhancer::new(temp_store("train"), true)
            .expect("training mode must tolerate missing weights");
        // The untrained graph must still be usable
        let img = Array3::<f32>::from_elem((4, 4, 3), 0.5);
        let (originals, repro) = enhancer.predict(&[img]).unwrap();
        assert_eq!(originals.len(), 1);
        assert_eq!(repro.len(), 1);
    }

    #[test]
    fn test_predict_doubles_each_image() {
        let enhancer = Enhancer::new(temp_store("predict"), true).unwrap();
        let images = vec![
            Array3::<f32>::from_elem((4, 4, 3), 0.2),
            Array3::<f32>::from_elem((6, 6, 3), 0.8),
        ];
        let (originals, repro) = enhancer.predict(&images).unwrap();

        assert_eq!(originals.len(), repro.len());
        assert_eq!(originals[0].shape(), &[4, 4, 3]);
        assert_eq!(repro[0].shape(), &[8, 8, 3]);
        assert_eq!(repro[1].shape(), &[12, 12, 3]);
    }

    #[test]
    fn test_predict_handles_odd_sized_images() {
        let enhancer = Enhancer::new(temp_store("odd"), true).unwrap();
        let images = vec![
            Array3::<f32>::from_elem((5, 5, 3), 0.4),
            Array3::<f32>::from_elem((3, 6, 3), 0.6),
        ];
        let (_, repro) = enhancer.predict(&images).unwrap();

        // Output is exactly twice the original, padding cropped away
        assert_eq!(repro[0].shape(), &[10, 10, 3]);
        assert_eq!(repro[1].shape(), &[6, 12, 3]);
    }

    #[test]
    fn test_predict_rejects_wrong_channel_count() {
        let enhancer = Enhancer::new(temp_store("chan"), true).unwrap();
        let gray = Array3::<f32>::from_elem((4, 4, 1), 0.5);
        let err = match enhancer.predict(&[gray]) {
            Ok(_) => panic!("expected a shape error"),
            Err(e) => e,
        };
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }

    #[test]
    fn test_pad_to_even_replicates_edges() {
        let mut img = Array3::<f32>::zeros((3, 3, 3));
        img[[2, 2, 0]] = 0.9;
        let padded = pad_to_even(&img);
        assert_eq!(padded.shape(), &[4, 4, 3]);
        // Bottom row and right column repeat the last real pixel
        assert_eq!(padded[[3, 2, 0]], 0.9);
        assert_eq!(padded[[2, 3, 0]], 0.9);
        assert_eq!(padded[[3, 3, 0]], 0.9);
    }

    #[test]
    fn test_fit_returns_finite_metrics() {
        let mut enhancer = Enhancer::new(temp_store("fit"), true).unwrap();
        let patch = TrainingPatch::new(
            Array3::from_elem((8, 8, 3), 0.5),
            Array3::from_elem((4, 4, 3), 0.5),
        );
        let batcher = SrBatcher::<TrainBackend>::new(Default::default());
        let batch = batcher.batch(vec![patch]);

        let metrics = enhancer.fit(batch);
        assert!(metrics.loss.is_finite());
        assert!(metrics.loss >= 0.0);
        assert!(!metrics.psnr.is_nan());
    }

    #[test]
    fn test_set_learning_rate() {
        let mut enhancer = Enhancer::new(temp_store("lr"), true).unwrap();
        assert_eq!(enhancer.learning_rate(), 1e-3);
        enhancer.set_learning_rate(5e-4);
        assert_eq!(enhancer.learning_rate(), 5e-4);
    }
}
