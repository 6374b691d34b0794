// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File-backed concerns shared by training and inference:
//
//   artifacts.rs — Model weights, architecture, both
//                  vocabularies and the sequence length.
//                  Everything `translate` needs to rebuild
//                  the pipeline without retraining.
//
//   metrics.rs   — Per-epoch loss/accuracy history and the
//                  CSV log written next to the artifacts.
//
// Reference: Burn Book §5 (Checkpointing)

/// Saving and loading the inference artifacts
pub mod artifacts;

/// Training history and metrics CSV logger
pub mod metrics;
