// ============================================================
// Domain Layer
// ============================================================
// Plain data types shared by every other layer.
//
// Rules for this layer:
//   - NO burn framework types allowed here
//   - NO file I/O
//   - Only arrays, structs, and traits
//
// An image anywhere in this crate is an ndarray `Array3<f32>` in
// HWC (height, width, channel) order with values in [0, 1].
// The framework's NCHW layout exists only inside the ml layer.

// A decoded image loaded from disk
pub mod image;

// A (target tile, low-res seed) training pair
pub mod patch;

// Core abstractions implemented by the data layer
pub mod traits;
