// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Runs the training pipeline in order:
//
//   Step 1: Load the parallel corpus        (Layer 4 - data)
//   Step 2: Build both vocabularies         (Layer 4 - data)
//   Step 3: Tokenize and pad                (Layer 4 - data)
//   Step 4: Describe the model              (Layer 5 - ml)
//   Step 5: Save config, open metrics log   (Layer 6 - infra)
//   Step 6: Run training loop               (Layer 5 - ml)
//   Step 7: Save artifacts                  (Layer 6 - infra)
//   Step 8: Translate the first pair        (Layer 5 - ml)
//
// The target's longest sentence fixes the sequence length.
// Source rows are padded or truncated to that same length so
// the model emits one target token per source position.
//
// Reference: Burn Book §5 (Training)

use anyhow::Result;
use burn::tensor::backend::AutodiffBackend;
use serde::{Deserialize, Serialize};

use crate::data::{
    dataset::TranslationSample,
    loader::ParallelFileLoader,
    padder::{longest, pad_sequences},
    vocabulary::Vocabulary,
};
use crate::domain::{error::PipelineError, topology::Topology, traits::CorpusSource};
use crate::infra::{
    artifacts::{ArtifactStore, TranslationArtifacts},
    metrics::{MetricsLogger, TrainingHistory},
};
use crate::ml::{
    model::Seq2SeqConfig,
    trainer::{train, TrainerSettings},
    translator::Translator,
    TrainBackend,
};

// ─── Training Configuration ──────────────────────────────────────────────────
// Everything a `train` run was started with. Written to
// train_config.json next to the artifacts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub source_path:      String,
    pub target_path:      String,
    pub artifact_dir:     String,
    pub topology:         Topology,
    pub batch_size:       usize,
    pub epochs:           usize,
    pub lr:               f64,
    pub validation_split: f64,
    pub shuffle_seed:     Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            source_path:      "data/small_vocab_en".to_string(),
            target_path:      "data/small_vocab_fr".to_string(),
            artifact_dir:     "artifacts".to_string(),
            topology:         Topology::Plain,
            batch_size:       1024,
            epochs:           10,
            lr:               0.005,
            validation_split: 0.2,
            shuffle_seed:     None,
        }
    }
}

impl TrainConfig {
    fn trainer_settings(&self) -> TrainerSettings {
        TrainerSettings {
            batch_size:          self.batch_size,
            epochs:              self.epochs,
            learning_rate:       self.lr,
            validation_fraction: self.validation_split,
            shuffle_seed:        self.shuffle_seed,
        }
    }
}

/// Tokenized, padded training data plus the vocabularies that
/// produced it.
pub struct PreparedCorpus {
    pub source_vocab: Vocabulary,
    pub target_vocab: Vocabulary,
    pub max_length:   usize,
    pub samples:      Vec<TranslationSample>,
    /// First source/target pair, kept for the post-training check.
    pub first_pair:   (String, String),
}

/// Outcome of a finished `train` run.
#[derive(Debug)]
pub struct TrainReport {
    pub history:      TrainingHistory,
    pub artifact_dir: String,
    pub max_length:   usize,
    pub source_vocab: usize,
    pub target_vocab: usize,
    /// (source sentence, reference translation, model output)
    pub sample:       (String, String, String),
}

// ─── TrainUseCase ─────────────────────────────────────────────────────────────
pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    /// Train on the two configured files with the WGPU backend.
    pub fn execute(&self) -> Result<TrainReport> {
        let cfg    = &self.config;
        let loader = ParallelFileLoader::new(&cfg.source_path, &cfg.target_path);
        let device = burn::backend::wgpu::WgpuDevice::default();
        tracing::info!("Using WGPU device: {:?}", device);
        self.execute_on::<TrainBackend>(&loader, device)
    }

    /// Run the whole pipeline against any corpus source and backend.
    pub fn execute_on<B: AutodiffBackend>(
        &self,
        source: &dyn CorpusSource,
        device: B::Device,
    ) -> Result<TrainReport> {
        let cfg = &self.config;

        // ── Steps 1–3: Corpus → padded ids ───────────────────────────────────
        let prepared = prepare_corpus(source)?;
        tracing::info!(
            "Vocabularies: {} source tokens, {} target tokens, sequence length {}",
            prepared.source_vocab.len(),
            prepared.target_vocab.len(),
            prepared.max_length
        );

        // ── Step 4: Model description ────────────────────────────────────────
        let model_cfg = Seq2SeqConfig::for_topology(
            cfg.topology,
            prepared.source_vocab.size(),
            prepared.target_vocab.size(),
            prepared.max_length,
        );

        // ── Step 5: Persist run config, open the metrics log ─────────────────
        let store  = ArtifactStore::new(&cfg.artifact_dir);
        store.save_train_config(cfg)?;
        let logger = MetricsLogger::new(&cfg.artifact_dir)?;
        tracing::info!("Epoch metrics go to '{}'", logger.csv_path().display());

        // ── Step 6: Train ────────────────────────────────────────────────────
        let trained = train::<B>(
            &model_cfg,
            &cfg.trainer_settings(),
            prepared.samples,
            Some(&logger),
            device.clone(),
        )?;

        // ── Step 7: Save everything `translate` needs ────────────────────────
        store.save(
            &trained.model,
            &model_cfg,
            &prepared.source_vocab,
            &prepared.target_vocab,
            prepared.max_length,
        )?;

        // ── Step 8: Sanity check on the first pair ───────────────────────────
        let source_vocab = prepared.source_vocab.len();
        let target_vocab = prepared.target_vocab.len();
        let translator = Translator::new(
            TranslationArtifacts {
                model:        trained.model,
                config:       model_cfg,
                source_vocab: prepared.source_vocab,
                target_vocab: prepared.target_vocab,
                max_length:   prepared.max_length,
            },
            device,
        )?;

        let (sentence, reference) = prepared.first_pair;
        let output = translator.translate(&sentence)?;
        tracing::info!("Sample input:     {}", sentence);
        tracing::info!("Sample reference: {}", reference);
        tracing::info!("Sample output:    {}", output.raw);

        Ok(TrainReport {
            history:      trained.history,
            artifact_dir: cfg.artifact_dir.clone(),
            max_length:   prepared.max_length,
            source_vocab,
            target_vocab,
            sample:       (sentence, reference, output.raw),
        })
    }
}

/// Load a corpus, build both vocabularies and pad both sides to
/// the longest target sentence.
pub fn prepare_corpus(source: &dyn CorpusSource) -> Result<PreparedCorpus> {
    let corpus = source.load()?;
    let first_pair = corpus
        .pair(0)
        .map(|p| (p.source, p.target))
        .ok_or(PipelineError::EmptyCorpus)?;

    let source_vocab = Vocabulary::build(corpus.source_sentences());
    let target_vocab = Vocabulary::build(corpus.target_sentences());

    let target_ids = target_vocab.tokenize_all(corpus.target_sentences());
    let source_ids = source_vocab.tokenize_all(corpus.source_sentences());

    let max_length = longest(&target_ids);
    if max_length == 0 {
        return Err(PipelineError::InvalidConfig(
            "target sentences contain no tokens".into(),
        )
        .into());
    }

    let source_longest = longest(&source_ids);
    if source_longest > max_length {
        tracing::warn!(
            "Source sentences up to {} tokens will be truncated to {}",
            source_longest,
            max_length
        );
    }

    let target = pad_sequences(&target_ids, Some(max_length));
    let source = pad_sequences(&source_ids, Some(max_length));
    let samples = TranslationSample::from_batches(&source, &target)?;

    Ok(PreparedCorpus { source_vocab, target_vocab, max_length, samples, first_pair })
}
