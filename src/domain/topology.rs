// ============================================================
// Layer 3 — Network Topology
// ============================================================
// The three recurrent architectures the model builder knows.
// Everything that differs between them is answered here, so
// the ml layer has a single builder instead of one per variant.
//
//   Plain                   GRU(256) over the raw id as a scalar
//   Bidirectional           GRU(128) forward + GRU(128) backward
//   EmbeddingBidirectional  Embedding(256) → GRU(256) × 2 directions

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Topology {
    #[default]
    Plain,
    Bidirectional,
    EmbeddingBidirectional,
}

impl Topology {
    #[cfg(test)]
    pub const ALL: [Topology; 3] = [
        Topology::Plain,
        Topology::Bidirectional,
        Topology::EmbeddingBidirectional,
    ];

    /// Hidden units per recurrent direction.
    pub fn hidden_size(self) -> usize {
        match self {
            Topology::Plain => 256,
            Topology::Bidirectional => 128,
            Topology::EmbeddingBidirectional => 256,
        }
    }

    pub fn is_bidirectional(self) -> bool {
        !matches!(self, Topology::Plain)
    }

    pub fn uses_embedding(self) -> bool {
        matches!(self, Topology::EmbeddingBidirectional)
    }
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Topology::Plain => "plain",
            Topology::Bidirectional => "bidirectional",
            Topology::EmbeddingBidirectional => "embedding-bidirectional",
        };
        f.write_str(name)
    }
}
