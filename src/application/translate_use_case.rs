// ============================================================
// Layer 2 — Translate Use Case
// ============================================================
// Rebuilds the trained pipeline from an artifact directory and
// translates sentences with it. Nothing is retrained; the
// vocabularies and sequence length come from disk.

use std::path::Path;

use anyhow::{Context, Result};
use burn::prelude::Backend;

use crate::infra::artifacts::ArtifactStore;
use crate::ml::{
    translator::{Translation, Translator},
    InferBackend,
};

pub struct TranslateUseCase<B: Backend = InferBackend> {
    translator: Translator<B>,
}

impl TranslateUseCase<InferBackend> {
    /// Load artifacts onto the default WGPU device.
    pub fn open(artifact_dir: impl AsRef<Path>) -> Result<Self> {
        let device = burn::backend::wgpu::WgpuDevice::default();
        tracing::info!("Using WGPU device: {:?}", device);
        Self::open_on(artifact_dir, device)
    }
}

impl<B: Backend> TranslateUseCase<B> {
    pub fn open_on(artifact_dir: impl AsRef<Path>, device: B::Device) -> Result<Self> {
        let dir   = artifact_dir.as_ref();
        let store = ArtifactStore::new(dir);
        let translator = Translator::load(&store, device)
            .with_context(|| format!("Cannot load artifacts from '{}'", dir.display()))?;
        tracing::info!(
            "Loaded translator from '{}' (sequence length {})",
            dir.display(),
            translator.max_length()
        );
        Ok(Self { translator })
    }

    pub fn translate(&self, sentence: &str) -> Result<Translation> {
        let translation = self.translator.translate(sentence)?;
        if translation.dropped_tokens > 0 {
            tracing::warn!(
                "{} word(s) were not seen during training and were skipped",
                translation.dropped_tokens
            );
        }
        Ok(translation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::vocabulary::Vocabulary;
    use crate::domain::error::PipelineError;
    use crate::domain::topology::Topology;
    use crate::ml::model::Seq2SeqConfig;
    use burn::backend::NdArray;

    type B = NdArray;

    #[test]
    fn test_missing_directory_reports_missing_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let err = TranslateUseCase::<B>::open_on(dir.path().join("nothing"), Default::default())
            .err()
            .unwrap();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::MissingArtifact(_))
        ));
    }

    #[test]
    fn test_translates_from_saved_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let source_vocab = Vocabulary::build(&["he likes grapes ."]);
        let target_vocab = Vocabulary::build(&["il aime les raisins ."]);
        let config = Seq2SeqConfig::new(Topology::Plain, source_vocab.size(), target_vocab.size(), 5, 8)
            .with_dense_size(16);
        let model = config.init::<B>(&Default::default());
        ArtifactStore::new(dir.path())
            .save(&model, &config, &source_vocab, &target_vocab, 5)
            .unwrap();

        let use_case = TranslateUseCase::<B>::open_on(dir.path(), Default::default()).unwrap();
        let t = use_case.translate("he likes mangoes .").unwrap();
        assert_eq!(t.dropped_tokens, 1);
        assert_eq!(t.raw.split(' ').count(), 5);
    }
}
