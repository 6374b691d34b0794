// ============================================================
// Layer 5 — Translator
// ============================================================
// The inference entry point: raw sentence in, translated
// sentence out.
//
//   encode with the source vocabulary (unknown words dropped)
//     → pad to the trained length
//     → model.predict  [1, L, target_vocab]
//     → arg-max decode with the target vocabulary

use anyhow::Result;
use burn::prelude::*;

use crate::data::{batcher::padded_to_tensor, padder::pad_sequences, vocabulary::Vocabulary};
use crate::infra::artifacts::{ArtifactStore, TranslationArtifacts};
use crate::ml::decoder::{logits_to_text, strip_padding};
use crate::ml::model::Seq2SeqModel;

/// Output of one translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Translation {
    /// Decoded text without pad markers.
    pub text:           String,
    /// One token per position, `<PAD>` included.
    pub raw:            String,
    /// Source words missing from the vocabulary.
    pub dropped_tokens: usize,
}

pub struct Translator<B: Backend> {
    model:        Seq2SeqModel<B>,
    source_vocab: Vocabulary,
    target_vocab: Vocabulary,
    max_length:   usize,
    device:       B::Device,
}

impl<B: Backend> Translator<B> {
    pub fn new(artifacts: TranslationArtifacts<B>, device: B::Device) -> Result<Self> {
        artifacts.model.check_width(artifacts.max_length)?;
        artifacts.model.check_shapes(&artifacts.config)?;
        Ok(Self {
            model:        artifacts.model,
            source_vocab: artifacts.source_vocab,
            target_vocab: artifacts.target_vocab,
            max_length:   artifacts.max_length,
            device,
        })
    }

    pub fn load(store: &ArtifactStore, device: B::Device) -> Result<Self> {
        let artifacts = store.load::<B>(&device)?;
        Self::new(artifacts, device)
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn translate(&self, sentence: &str) -> Result<Translation> {
        let encoding = self.source_vocab.encode(sentence);
        if encoding.dropped > 0 {
            tracing::debug!(
                "{} of the words in '{}' are not in the source vocabulary",
                encoding.dropped,
                sentence
            );
        }

        let padded = pad_sequences(&[encoding.ids], Some(self.max_length));
        self.model.check_width(padded.width())?;

        let input = padded_to_tensor::<B>(padded, &self.device);
        let probs = self.model.predict(input);
        let [_, len, vocab] = probs.dims();

        let raw  = logits_to_text(probs.reshape([len, vocab]), &self.target_vocab);
        let text = strip_padding(&raw);

        Ok(Translation { text, raw, dropped_tokens: encoding.dropped })
    }
}
