// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// Each use case wires the lower layers together for one CLI
// command:
//
//   train_use_case.rs     — corpus → vocabularies → padded ids
//                           → training → artifacts
//   translate_use_case.rs — artifacts → Translator → text
//   stats_use_case.rs     — corpus → per-language statistics
//
// No tensor code and no printing here. Layer 1 prints, Layer 5
// does the maths.
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The training workflow
pub mod train_use_case;

// Sentence translation from saved artifacts
pub mod translate_use_case;

// Corpus statistics report
pub mod stats_use_case;
