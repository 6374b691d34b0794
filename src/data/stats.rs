// ============================================================
// Layer 4 — Corpus Statistics
// ============================================================
// Word counts for one side of a corpus, reported by `stats`
// before anyone commits to a training run:
//
//   1823250 English words.
//   227 unique English words.
//   10 Most common words in the English dataset:
//   "is" "," "." "in" "it" "during" "the" "but" "and" "sometimes"

use crate::data::vocabulary::Vocabulary;

#[derive(Debug, Clone, PartialEq)]
pub struct CorpusStats {
    pub sentences:     usize,
    pub total_tokens:  u64,
    pub unique_tokens: usize,
    /// Longest sentence, in tokens.
    pub max_length:    usize,
    /// (token, count), most frequent first.
    pub most_common:   Vec<(String, u64)>,
}

impl CorpusStats {
    pub fn from_sentences<S: AsRef<str>>(sentences: &[S], top_k: usize) -> Self {
        let vocab = Vocabulary::build(sentences);
        let max_length = sentences
            .iter()
            .map(|s| s.as_ref().split_whitespace().count())
            .max()
            .unwrap_or(0);
        Self::from_vocabulary(&vocab, sentences.len(), max_length, top_k)
    }

    /// Vocabulary ids are already in frequency order, so the first
    /// `top_k` entries are the most common tokens.
    pub fn from_vocabulary(
        vocab:      &Vocabulary,
        sentences:  usize,
        max_length: usize,
        top_k:      usize,
    ) -> Self {
        Self {
            sentences,
            total_tokens: vocab.iter().map(|(_, _, c)| c).sum(),
            unique_tokens: vocab.len(),
            max_length,
            most_common: vocab
                .iter()
                .take(top_k)
                .map(|(_, t, c)| (t.to_string(), c))
                .collect(),
        }
    }

    /// Multi-line human-readable report.
    pub fn render(&self, language: &str) -> String {
        let common = self
            .most_common
            .iter()
            .map(|(t, _)| format!("\"{t}\""))
            .collect::<Vec<_>>()
            .join(" ");
        format!(
            "{} {language} sentences.\n\
             {} {language} words.\n\
             {} unique {language} words.\n\
             {} words in the longest {language} sentence.\n\
             {} most common words in the {language} dataset:\n{}",
            self.sentences,
            self.total_tokens,
            self.unique_tokens,
            self.max_length,
            self.most_common.len(),
            common,
        )
    }
}
