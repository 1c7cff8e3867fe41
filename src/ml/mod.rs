// ============================================================
// ML / Model Layer (burn)
// ============================================================
// This layer contains ALL burn framework specific code.
// No other layer imports from burn directly except the data
// batcher/dataset, which implement burn's loading traits.
//
// What's in this layer:
//
//   model.rs    — the enlarger topology: a two-stage conv
//                 encoder/decoder with transposed-convolution
//                 upsamples, two additive skip connections, and
//                 a final 5x5 linear convolution to RGB
//
//   psnr.rs     — the Peak Signal-to-Noise Ratio metric, both as
//                 plain-array arithmetic and as a tensor graph op
//
//   enhancer.rs — the model wrapper: weight loading policy,
//                 single-batch fit, per-image predict, save,
//                 learning-rate control
//
//   trainer.rs  — the epoch loop driving fit over a DataLoader,
//                 with validation, lr decay, and metrics logging

/// Network topology assembly
pub mod model;

/// PSNR metric (array and tensor forms)
pub mod psnr;

/// Model wrapper: fit / predict / save / weight policy
pub mod enhancer;

/// Epoch training loop
pub mod trainer;

// CPU backend: the crate and its tests run without a GPU adapter.
pub type TrainBackend = burn::backend::Autodiff<burn::backend::NdArray>;
pub type InferBackend = burn::backend::NdArray;
pub type Device = burn::backend::ndarray::NdArrayDevice;
