// ============================================================
// Layer 3 — Parallel Corpus Domain Type
// ============================================================
// Two index-aligned lists of sentences: line i of the source
// language translates to line i of the target language.
//
// Example (English → French):
//   source[0] = "new jersey is sometimes quiet during autumn ."
//   target[0] = "new jersey est parfois calme pendant l' automne ."
//
// The only way to build a ParallelCorpus is through `new`,
// which refuses lists of different lengths. Nothing hands out
// mutable access afterwards, so the alignment holds for the
// lifetime of the value.

use serde::{Deserialize, Serialize};

use crate::domain::error::PipelineError;

/// One aligned (source, target) sentence pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentencePair {
    pub source: String,
    pub target: String,
}

impl SentencePair {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallelCorpus {
    source: Vec<String>,
    target: Vec<String>,
}

impl ParallelCorpus {
    /// Build a corpus from already-split sentences.
    ///
    /// Fails with `MisalignedCorpus` if the two sides differ in
    /// length and with `EmptyCorpus` if both are empty.
    pub fn new(source: Vec<String>, target: Vec<String>) -> Result<Self, PipelineError> {
        if source.len() != target.len() {
            return Err(PipelineError::MisalignedCorpus {
                source_lines: source.len(),
                target_lines: target.len(),
            });
        }
        if source.is_empty() {
            return Err(PipelineError::EmptyCorpus);
        }
        Ok(Self { source, target })
    }

    pub fn len(&self) -> usize {
        self.source.len()
    }

    pub fn source_sentences(&self) -> &[String] {
        &self.source
    }

    pub fn target_sentences(&self) -> &[String] {
        &self.target
    }

    pub fn pair(&self, index: usize) -> Option<SentencePair> {
        Some(SentencePair::new(
            self.source.get(index)?.clone(),
            self.target.get(index)?.clone(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_rejects_misaligned_sides() {
        let err = ParallelCorpus::new(lines(&["a", "b"]), lines(&["x"])).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::MisalignedCorpus { source_lines: 2, target_lines: 1 }
        ));
    }

    #[test]
    fn test_rejects_empty() {
        let err = ParallelCorpus::new(Vec::new(), Vec::new()).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyCorpus));
    }

    #[test]
    fn test_pairs_keep_index_alignment() {
        let corpus = ParallelCorpus::new(
            lines(&["the cat .", "a dog ."]),
            lines(&["le chat .", "un chien ."]),
        )
        .unwrap();

        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.pair(0), Some(SentencePair::new("the cat .", "le chat .")));
        assert_eq!(corpus.pair(1), Some(SentencePair::new("a dog .", "un chien .")));
        assert_eq!(corpus.pair(2), None);
    }
}
