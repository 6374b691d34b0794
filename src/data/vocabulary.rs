// ============================================================
// Layer 4 — Vocabulary and Word-Level Tokenizer
// ============================================================
// Builds a token → id mapping from a list of sentences and
// converts sentences to id sequences and back.
//
// Tokens are whitespace-delimited: words and the punctuation
// marks that upstream normalisation has already surrounded with
// spaces ("april ." → ["april", "."]). No case folding happens
// here.
//
// Id assignment:
//   0            reserved for padding, never given to a token
//   1, 2, 3, …   tokens by descending frequency; equal counts
//                keep the order in which the tokens first appear
//
// Unknown tokens (encoding with a frozen vocabulary) are dropped
// and counted in Encoding::dropped.
//
// Reference: Rust Book §8 (Hash Maps)

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::error::PipelineError;

/// Id used for padding positions.
pub const PAD_ID: u32 = 0;

/// Text emitted for a padding position when decoding.
pub const PAD_MARKER: &str = "<PAD>";

/// Result of encoding one sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Encoding {
    pub ids:     Vec<u32>,
    /// Tokens that were not in the vocabulary and were skipped.
    pub dropped: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Vocabulary {
    index:  HashMap<String, u32>,
    /// tokens[id - 1]
    tokens: Vec<String>,
    /// counts[id - 1], occurrences in the corpus the vocabulary was built from
    counts: Vec<u64>,
}

/// On-disk shape of a vocabulary.
#[derive(Debug, Serialize, Deserialize)]
struct VocabularyRecord {
    word_index:  BTreeMap<String, u32>,
    #[serde(default)]
    word_counts: BTreeMap<String, u64>,
}

impl Vocabulary {
    /// Build a vocabulary from every token in `sentences`.
    pub fn build<S: AsRef<str>>(sentences: &[S]) -> Self {
        let mut first_seen: Vec<(String, u64)> = Vec::new();
        let mut position: HashMap<String, usize> = HashMap::new();

        for sentence in sentences {
            for token in sentence.as_ref().split_whitespace() {
                match position.get(token) {
                    Some(&i) => first_seen[i].1 += 1,
                    None => {
                        position.insert(token.to_string(), first_seen.len());
                        first_seen.push((token.to_string(), 1));
                    }
                }
            }
        }

        // sort_by is stable: equal counts keep first-appearance order
        first_seen.sort_by(|a, b| b.1.cmp(&a.1));

        let mut index = HashMap::with_capacity(first_seen.len());
        let mut tokens = Vec::with_capacity(first_seen.len());
        let mut counts = Vec::with_capacity(first_seen.len());
        for (i, (token, count)) in first_seen.into_iter().enumerate() {
            index.insert(token.clone(), i as u32 + 1);
            tokens.push(token);
            counts.push(count);
        }

        tracing::debug!("Built vocabulary with {} tokens", tokens.len());
        Self { index, tokens, counts }
    }

    /// Number of distinct tokens (excluding padding).
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Width of a one-hot over this vocabulary: tokens + the pad id.
    pub fn size(&self) -> usize {
        self.tokens.len() + 1
    }

    pub fn id(&self, token: &str) -> Option<u32> {
        self.index.get(token).copied()
    }

    /// Token for `id`; `None` for the pad id and out-of-range ids.
    pub fn token(&self, id: u32) -> Option<&str> {
        if id == PAD_ID {
            return None;
        }
        self.tokens.get(id as usize - 1).map(String::as_str)
    }

    pub fn count(&self, token: &str) -> Option<u64> {
        self.id(token).map(|id| self.counts[id as usize - 1])
    }

    /// Tokens in id order, paired with their corpus counts.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str, u64)> {
        self.tokens
            .iter()
            .zip(&self.counts)
            .enumerate()
            .map(|(i, (token, &count))| (i as u32 + 1, token.as_str(), count))
    }

    pub fn encode(&self, sentence: &str) -> Encoding {
        let mut ids = Vec::new();
        let mut dropped = 0;
        for token in sentence.split_whitespace() {
            match self.id(token) {
                Some(id) => ids.push(id),
                None => dropped += 1,
            }
        }
        Encoding { ids, dropped }
    }

    /// Encode every sentence, keeping one output row per input line.
    pub fn tokenize_all<S: AsRef<str>>(&self, sentences: &[S]) -> Vec<Vec<u32>> {
        let mut dropped = 0;
        let rows = sentences
            .iter()
            .map(|s| {
                let enc = self.encode(s.as_ref());
                dropped += enc.dropped;
                enc.ids
            })
            .collect();
        if dropped > 0 {
            tracing::warn!("Dropped {} out-of-vocabulary tokens while encoding", dropped);
        }
        rows
    }

    /// One token per id joined by single spaces; padding and
    /// unknown ids become `<PAD>`.
    pub fn decode_ids(&self, ids: &[u32]) -> String {
        ids.iter()
            .map(|&id| self.token(id).unwrap_or(PAD_MARKER))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Serialise to the vocabulary's own JSON document.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let record = VocabularyRecord {
            word_index:  self.iter().map(|(id, t, _)| (t.to_string(), id)).collect(),
            word_counts: self.iter().map(|(_, t, c)| (t.to_string(), c)).collect(),
        };
        serde_json::to_string(&record)
    }

    /// Parse a document written by `to_json`.
    ///
    /// Ids must be exactly 1..=n with no gaps or duplicates.
    pub fn from_json(json: &str) -> Result<Self, PipelineError> {
        let record: VocabularyRecord = serde_json::from_str(json)
            .map_err(|e| PipelineError::InvalidConfig(format!("vocabulary JSON: {e}")))?;

        let n = record.word_index.len();
        let mut tokens = vec![String::new(); n];
        let mut filled = vec![false; n];
        for (token, &id) in &record.word_index {
            let slot = id as usize;
            if id == PAD_ID || slot > n || filled[slot - 1] {
                return Err(PipelineError::InvalidConfig(format!(
                    "vocabulary id {id} for token '{token}' is not in 1..={n} or is duplicated"
                )));
            }
            tokens[slot - 1] = token.clone();
            filled[slot - 1] = true;
        }

        let counts = tokens
            .iter()
            .map(|t| record.word_counts.get(t).copied().unwrap_or(0))
            .collect();
        let index = record.word_index.into_iter().collect();
        Ok(Self { index, tokens, counts })
    }
}
