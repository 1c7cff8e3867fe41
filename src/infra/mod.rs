// ============================================================
// Infrastructure Layer
// ============================================================
// Cross-cutting concerns that don't belong to any one layer:
//
//   weights.rs — the weights filename convention and the
//                save/load of network parameters through
//                burn's CompactRecorder (MessagePack + gzip)
//
//   metrics.rs — per-epoch training metrics appended to a
//                CSV file for later plotting

/// Weights filename convention, persistence, download URL
pub mod weights;

/// Training metrics CSV logger
pub mod metrics;
