// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between two text files on disk and tensor batches.
//
//   source.txt / target.txt
//       │
//       ▼
//   ParallelFileLoader → index-aligned sentences
//       │
//       ▼
//   Vocabulary         → token ↔ id, one per language
//       │
//       ▼
//   pad_sequences      → fixed-width [N, L] id tables
//       │
//       ▼
//   split_train_val    → training / held-out validation
//       │
//       ▼
//   TranslationDataset → Burn's Dataset trait
//       │
//       ▼
//   TranslationBatcher → [batch, L] Int tensors
//
// Reference: Burn Book §4 (Datasets and Dataloaders)

/// Reads line-aligned source/target files
pub mod loader;

/// Word-level vocabulary and tokenizer
pub mod vocabulary;

/// Post-padding / truncation to a fixed width
pub mod padder;

/// Word counts per language
pub mod stats;

/// Implements Burn's Dataset trait for translation samples
pub mod dataset;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;

/// Splits samples into train/validation sets
pub mod splitter;
