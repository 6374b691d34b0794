// ============================================================
// Layer 6 — Artifact Store
// ============================================================
// Saves and restores everything inference needs, so a trained
// translator can be reloaded without retraining.
//
// Directory layout:
//   artifacts/
//     model.mpk.gz         ← weights (named MessagePack, gzip, f32)
//     model_config.json    ← architecture the weights belong to
//     source_vocab.json    ← vocabulary JSON, stored as a JSON string
//     target_vocab.json    ← same shape as source_vocab.json
//     max_length.json      ← target sequence length, e.g. `21`
//     train_config.json    ← run settings, informational only
//     metrics.csv          ← written by MetricsLogger
//
// The vocabulary files hold the vocabulary's own JSON document
// encoded a second time as a JSON string value:
//   "{\"word_index\":{\".\":2,\"is\":1},\"word_counts\":{...}}"
//
// Weights are recorded at full precision so a reloaded model
// decodes exactly what the in-memory model decoded.
//
// Loading fails if any of the four inference artifacts is
// missing, unparsable, or disagrees with the others. That
// includes weights whose tensor shapes do not fit the stored
// vocabularies.
//
// Reference: Burn Book §5 (Records and Checkpointing)

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{FullPrecisionSettings, NamedMpkGzFileRecorder},
};
use serde::Serialize;
use std::{
    fs,
    path::PathBuf,
};

use crate::data::vocabulary::Vocabulary;
use crate::domain::error::PipelineError;
use crate::ml::model::{Seq2SeqConfig, Seq2SeqModel};

const MODEL_STEM:   &str = "model";
const MODEL_FILE:   &str = "model.mpk.gz";
const MODEL_CONFIG: &str = "model_config.json";
const SOURCE_VOCAB: &str = "source_vocab.json";
const TARGET_VOCAB: &str = "target_vocab.json";
const MAX_LENGTH:   &str = "max_length.json";
const TRAIN_CONFIG: &str = "train_config.json";

type WeightsRecorder = NamedMpkGzFileRecorder<FullPrecisionSettings>;

/// A reloaded inference pipeline.
pub struct TranslationArtifacts<B: Backend> {
    pub model:        Seq2SeqModel<B>,
    pub config:       Seq2SeqConfig,
    pub source_vocab: Vocabulary,
    pub target_vocab: Vocabulary,
    pub max_length:   usize,
}

pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Write the model, its architecture, both vocabularies and
    /// the sequence length.
    pub fn save<B: Backend>(
        &self,
        model:        &Seq2SeqModel<B>,
        config:       &Seq2SeqConfig,
        source_vocab: &Vocabulary,
        target_vocab: &Vocabulary,
        max_length:   usize,
    ) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create artifact directory '{}'", self.dir.display()))?;

        let weights = self.dir.join(MODEL_STEM);
        model
            .clone()
            .save_file(weights.clone(), &WeightsRecorder::new())
            .map_err(|e| anyhow::anyhow!("Failed to save model to '{}': {e:?}", weights.display()))?;

        self.write_json(MODEL_CONFIG, &serde_json::to_string_pretty(config)?)?;
        self.write_json(SOURCE_VOCAB, &serde_json::to_string(&source_vocab.to_json()?)?)?;
        self.write_json(TARGET_VOCAB, &serde_json::to_string(&target_vocab.to_json()?)?)?;
        self.write_json(MAX_LENGTH, &serde_json::to_string(&max_length)?)?;

        tracing::info!("Saved translation artifacts to '{}'", self.dir.display());
        Ok(())
    }

    /// Rebuild the inference pipeline on `device`.
    pub fn load<B: Backend>(&self, device: &B::Device) -> Result<TranslationArtifacts<B>> {
        let config: Seq2SeqConfig = self.read_parsed(MODEL_CONFIG, |s| serde_json::from_str(s))?;
        let source_vocab = self.read_parsed(SOURCE_VOCAB, parse_vocabulary)?;
        let target_vocab = self.read_parsed(TARGET_VOCAB, parse_vocabulary)?;
        let max_length: usize = self.read_parsed(MAX_LENGTH, |s| serde_json::from_str(s))?;

        config.validate()?;
        check("source vocabulary size", config.source_vocab_size, source_vocab.size())?;
        check("target vocabulary size", config.target_vocab_size, target_vocab.size())?;
        check("max length", config.max_length, max_length)?;

        let weights = self.require(MODEL_FILE)?;
        let model = config
            .init::<B>(device)
            .load_file(self.dir.join(MODEL_STEM), &WeightsRecorder::new(), device)
            .map_err(|e| PipelineError::corrupt(&weights, format!("{e:?}")))?;
        model.check_shapes(&config)?;

        tracing::info!(
            "Loaded {} model (source vocab {}, target vocab {}, length {})",
            config.topology,
            source_vocab.size(),
            target_vocab.size(),
            max_length,
        );

        Ok(TranslationArtifacts { model, config, source_vocab, target_vocab, max_length })
    }

    /// Record the settings of a training run next to its artifacts.
    pub fn save_train_config<T: Serialize>(&self, cfg: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Cannot create artifact directory '{}'", self.dir.display()))?;
        self.write_json(TRAIN_CONFIG, &serde_json::to_string_pretty(cfg)?)
    }

    fn write_json(&self, name: &str, json: &str) -> Result<()> {
        let path = self.dir.join(name);
        fs::write(&path, json)
            .with_context(|| format!("Cannot write '{}'", path.display()))?;
        tracing::debug!("Wrote '{}'", path.display());
        Ok(())
    }

    fn require(&self, name: &str) -> Result<PathBuf, PipelineError> {
        let path = self.dir.join(name);
        if path.is_file() {
            Ok(path)
        } else {
            Err(PipelineError::MissingArtifact(path))
        }
    }

    fn read_parsed<T, E: ToString>(
        &self,
        name:  &str,
        parse: impl FnOnce(&str) -> Result<T, E>,
    ) -> Result<T> {
        let path = self.require(name)?;
        let text = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read '{}'", path.display()))?;
        Ok(parse(&text).map_err(|e| PipelineError::corrupt(&path, e.to_string()))?)
    }
}

fn parse_vocabulary(text: &str) -> Result<Vocabulary, String> {
    let inner: String = serde_json::from_str(text).map_err(|e| e.to_string())?;
    Vocabulary::from_json(&inner).map_err(|e| e.to_string())
}

fn check(what: &'static str, expected: usize, actual: usize) -> Result<(), PipelineError> {
    if expected == actual {
        Ok(())
    } else {
        Err(PipelineError::shape(what, expected, actual))
    }
}
