// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// Burn-specific code lives here and in the data layer's
// dataset/batcher adapters.
//
//   model.rs      — Seq2SeqConfig + Seq2SeqModel: GRU-based
//                   sequence-to-sequence network in three
//                   topologies (plain, bidirectional,
//                   embedding + bidirectional)
//
//   trainer.rs    — Minibatch training loop with Adam,
//                   validation split and per-epoch history
//
//   decoder.rs    — Arg-max decoding of per-position
//                   distributions into text
//
//   translator.rs — Loads artifacts and translates sentences
//
// Reference: Burn Book §3 (Building Blocks), §5 (Training)
//            Cho et al. (2014) GRU

/// Recurrent sequence-to-sequence architecture
pub mod model;

/// Training loop with validation
pub mod trainer;

/// Logits → text
pub mod decoder;

/// Inference over persisted artifacts
pub mod translator;

/// Backend used for training from the command line.
pub type TrainBackend = burn::backend::Autodiff<burn::backend::Wgpu>;

/// Backend used for inference from the command line.
pub type InferBackend = burn::backend::Wgpu;
