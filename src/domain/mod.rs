// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits that name the core
// concepts of the translator.
//
// Rules for this layer:
//   - NO Burn framework types
//   - NO file I/O
//   - Only plain data, the topology selector, typed errors
//     and the traits other layers implement

/// Index-aligned source/target sentences
pub mod corpus;

/// Typed pipeline failures
pub mod error;

/// Recurrent architecture selector
pub mod topology;

/// Abstraction over corpus sources
pub mod traits;
