// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The application layer reads corpora only through
// CorpusSource, so a test can hand it sentences held in memory
// instead of two files on disk.

use anyhow::Result;

use crate::domain::corpus::ParallelCorpus;

// ─── CorpusSource ─────────────────────────────────────────────────────────────
/// Anything that can produce a line-aligned parallel corpus.
///
/// Implementations:
///   - ParallelFileLoader → two plain-text files on disk
///   - InMemoryCorpus     → sentences already held in memory
pub trait CorpusSource {
    fn load(&self) -> Result<ParallelCorpus>;
}

/// A corpus that is already in memory. Used by tests and by
/// callers that build sentence lists programmatically.
pub struct InMemoryCorpus {
    source: Vec<String>,
    target: Vec<String>,
}

impl InMemoryCorpus {
    pub fn new<S: Into<String>>(pairs: impl IntoIterator<Item = (S, S)>) -> Self {
        let (source, target) = pairs
            .into_iter()
            .map(|(s, t)| (s.into(), t.into()))
            .unzip();
        Self { source, target }
    }
}

impl CorpusSource for InMemoryCorpus {
    fn load(&self) -> Result<ParallelCorpus> {
        Ok(ParallelCorpus::new(self.source.clone(), self.target.clone())?)
    }
}
