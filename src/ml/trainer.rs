// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Train + validation loop using Burn's DataLoader and Adam.
//
//   - Training runs on an AutodiffBackend for gradients
//   - model.valid() drops to the inner backend for validation
//     (dropout off, no graph recorded)
//   - The validation batcher therefore uses the inner backend
//   - Validation samples never reach optim.step()
//
// Non-convergence is not an error: every epoch is reported and
// the run ends after the configured number of epochs.
//
// Reference: Burn Book §5, Kingma & Ba (2015) Adam

use anyhow::Result;
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
    tensor::backend::AutodiffBackend,
};

use crate::data::{
    batcher::TranslationBatcher,
    dataset::{TranslationDataset, TranslationSample},
    splitter::split_train_val,
};
use crate::domain::error::PipelineError;
use crate::infra::metrics::{EpochMetrics, MetricsLogger, TrainingHistory};
use crate::ml::model::{token_accuracy, Seq2SeqConfig, Seq2SeqModel};

/// Optimisation settings shared by all topologies.
#[derive(Debug, Clone)]
pub struct TrainerSettings {
    pub batch_size:          usize,
    pub epochs:              usize,
    pub learning_rate:       f64,
    pub validation_fraction: f64,
    /// Shuffle before the train/validation split and seed the
    /// per-epoch batch order. Without it the split is a suffix.
    pub shuffle_seed:        Option<u64>,
}

impl Default for TrainerSettings {
    fn default() -> Self {
        Self {
            batch_size:          1024,
            epochs:              10,
            learning_rate:       0.005,
            validation_fraction: 0.2,
            shuffle_seed:        None,
        }
    }
}

impl TrainerSettings {
    pub fn validate(&self) -> Result<(), PipelineError> {
        if self.batch_size == 0 {
            return Err(PipelineError::InvalidConfig("batch_size must be positive".into()));
        }
        if !(0.0..1.0).contains(&self.validation_fraction) {
            return Err(PipelineError::InvalidConfig(format!(
                "validation fraction {} is outside [0, 1)",
                self.validation_fraction
            )));
        }
        if self.learning_rate.is_nan() || self.learning_rate <= 0.0 {
            return Err(PipelineError::InvalidConfig("learning rate must be positive".into()));
        }
        Ok(())
    }
}

/// Result of a training run: the model on the inference backend
/// plus its history.
pub struct TrainedModel<B: Backend> {
    pub model:   Seq2SeqModel<B>,
    pub history: TrainingHistory,
}

pub fn train<B: AutodiffBackend>(
    model_cfg: &Seq2SeqConfig,
    settings:  &TrainerSettings,
    samples:   Vec<TranslationSample>,
    logger:    Option<&MetricsLogger>,
    device:    B::Device,
) -> Result<TrainedModel<B::InnerBackend>> {
    model_cfg.validate()?;
    settings.validate()?;
    for sample in &samples {
        if sample.source.len() != model_cfg.max_length {
            return Err(PipelineError::shape("source width", model_cfg.max_length, sample.source.len()).into());
        }
        if sample.target.len() != model_cfg.max_length {
            return Err(PipelineError::shape("target width", model_cfg.max_length, sample.target.len()).into());
        }
    }

    // ── Split ─────────────────────────────────────────────────────────────────
    let (train_samples, val_samples) =
        split_train_val(samples, settings.validation_fraction, settings.shuffle_seed);
    if train_samples.is_empty() {
        return Err(PipelineError::EmptyCorpus.into());
    }
    tracing::info!(
        "Split: {} train, {} validation",
        train_samples.len(),
        val_samples.len()
    );

    // ── Build model ───────────────────────────────────────────────────────────
    let mut model: Seq2SeqModel<B> = model_cfg.init(&device);
    tracing::info!(
        "Model ready: {} topology, {} parameters",
        model_cfg.topology,
        model.num_params()
    );

    // ── Adam optimiser ────────────────────────────────────────────────────────
    let mut optim = AdamConfig::new().with_epsilon(1e-7).init();

    // ── Data loaders ──────────────────────────────────────────────────────────
    let train_loader = DataLoaderBuilder::new(TranslationBatcher::<B>::new(device.clone()))
        .batch_size(settings.batch_size)
        .shuffle(settings.shuffle_seed.unwrap_or(42))
        .num_workers(1)
        .build(TranslationDataset::new(train_samples));

    let val_loader = (!val_samples.is_empty()).then(|| {
        DataLoaderBuilder::new(TranslationBatcher::<B::InnerBackend>::new(device.clone()))
            .batch_size(settings.batch_size)
            .num_workers(1)
            .build(TranslationDataset::new(val_samples))
    });

    let mut history = TrainingHistory::default();

    // ── Epoch loop ────────────────────────────────────────────────────────────
    for epoch in 1..=settings.epochs {

        // ── Training phase ────────────────────────────────────────────────────
        let mut train_loss_sum = 0.0f64;
        let mut train_batches  = 0usize;
        let mut train_correct  = 0usize;
        let mut train_total    = 0usize;

        for batch in train_loader.iter() {
            let output = model.forward_loss(batch.source, batch.target.clone());

            train_loss_sum += output.loss.clone().into_scalar().elem::<f64>();
            train_batches  += 1;

            let (correct, total) = token_accuracy(output.logits, batch.target);
            train_correct += correct;
            train_total   += total;

            let grads = output.loss.backward();
            let grads = GradientsParams::from_grads(grads, &model);
            model = optim.step(settings.learning_rate, model, grads);
        }

        // ── Validation phase ──────────────────────────────────────────────────
        let model_valid = model.valid();

        let mut val_loss_sum = 0.0f64;
        let mut val_batches  = 0usize;
        let mut val_correct  = 0usize;
        let mut val_total    = 0usize;

        for batch in val_loader.iter().flat_map(|loader| loader.iter()) {
            let output = model_valid.forward_loss(batch.source, batch.target.clone());
            val_loss_sum += output.loss.into_scalar().elem::<f64>();
            val_batches  += 1;

            let (correct, total) = token_accuracy(output.logits, batch.target);
            val_correct += correct;
            val_total   += total;
        }

        let metrics = EpochMetrics::new(
            epoch,
            mean(train_loss_sum, train_batches),
            ratio(train_correct, train_total),
            mean(val_loss_sum, val_batches),
            ratio(val_correct, val_total),
        );

        tracing::info!(
            "Epoch {:>3}/{} | loss={:.4} | acc={:.1}% | val_loss={:.4} | val_acc={:.1}%",
            epoch, settings.epochs,
            metrics.train_loss, metrics.train_acc * 100.0,
            metrics.val_loss, metrics.val_acc * 100.0,
        );

        if let Some(logger) = logger {
            logger.log(&metrics)?;
        }
        history.push(metrics);
    }

    tracing::info!("Training complete!");
    Ok(TrainedModel { model: model.valid(), history })
}

fn mean(sum: f64, count: usize) -> f64 {
    if count > 0 { sum / count as f64 } else { f64::NAN }
}

fn ratio(hits: usize, total: usize) -> f64 {
    if total > 0 { hits as f64 / total as f64 } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::padder::pad_sequences;
    use crate::data::vocabulary::Vocabulary;
    use crate::domain::topology::Topology;
    use burn::backend::{Autodiff, NdArray};

    type B = Autodiff<NdArray>;

    fn toy_samples() -> (Vec<TranslationSample>, usize, usize, usize) {
        let en = ["he saw a car .", "she saw a truck .", "he likes grapes .", "she likes pears ."];
        let fr = ["il a vu une voiture .", "elle a vu un camion .", "il aime les raisins .", "elle aime les poires ."];
        let src_vocab = Vocabulary::build(&en);
        let tgt_vocab = Vocabulary::build(&fr);
        let tgt = pad_sequences(&tgt_vocab.tokenize_all(&fr), None);
        let src = pad_sequences(&src_vocab.tokenize_all(&en), Some(tgt.width()));
        let samples = TranslationSample::from_batches(&src, &tgt).unwrap();
        (samples, src_vocab.size(), tgt_vocab.size(), tgt.width())
    }

    fn small_config(topology: Topology, src: usize, tgt: usize, len: usize) -> Seq2SeqConfig {
        Seq2SeqConfig::new(topology, src, tgt, len, 8)
            .with_embedding_dim(8)
            .with_dense_size(16)
    }

    #[test]
    fn test_one_epoch_records_history() {
        let (samples, src, tgt, len) = toy_samples();
        let settings = TrainerSettings {
            batch_size:          2,
            epochs:              2,
            validation_fraction: 0.25,
            ..Default::default()
        };

        let trained = train::<B>(
            &small_config(Topology::Plain, src, tgt, len),
            &settings,
            samples,
            None,
            Default::default(),
        )
        .unwrap();

        assert_eq!(trained.history.epochs.len(), 2);
        let last = trained.history.last().unwrap();
        assert!(last.train_loss.is_finite());
        assert!(last.val_loss.is_finite());
        assert!((0.0..=1.0).contains(&last.val_acc));
    }

    #[test]
    fn test_no_validation_set_reports_nan() {
        let (samples, src, tgt, len) = toy_samples();
        let settings = TrainerSettings {
            batch_size:          4,
            epochs:              1,
            validation_fraction: 0.0,
            ..Default::default()
        };

        let trained = train::<B>(
            &small_config(Topology::EmbeddingBidirectional, src, tgt, len),
            &settings,
            samples,
            None,
            Default::default(),
        )
        .unwrap();

        let m = &trained.history.epochs[0];
        assert!(m.val_loss.is_nan());
        assert_eq!(m.val_acc, 0.0);
    }

    #[test]
    fn test_repeated_epochs_reduce_training_loss() {
        let (samples, src, tgt, len) = toy_samples();
        let settings = TrainerSettings {
            batch_size:          4,
            epochs:              30,
            learning_rate:       0.01,
            validation_fraction: 0.0,
            shuffle_seed:        Some(1),
        };

        let trained = train::<B>(
            &small_config(Topology::Bidirectional, src, tgt, len).with_dropout(0.0),
            &settings,
            samples,
            None,
            Default::default(),
        )
        .unwrap();

        let first = trained.history.epochs.first().unwrap().train_loss;
        let last  = trained.history.last().unwrap().train_loss;
        assert!(last < first, "loss went from {first} to {last}");
    }

    #[test]
    fn test_wrong_width_is_rejected_before_training() {
        let (samples, src, tgt, len) = toy_samples();
        let err = train::<B>(
            &small_config(Topology::Plain, src, tgt, len + 1),
            &TrainerSettings::default(),
            samples,
            None,
            Default::default(),
        )
        .err()
        .unwrap();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_settings_validation() {
        let bad = TrainerSettings { batch_size: 0, ..Default::default() };
        assert!(bad.validate().is_err());
        let bad = TrainerSettings { validation_fraction: 1.0, ..Default::default() };
        assert!(bad.validate().is_err());
        assert!(TrainerSettings::default().validate().is_ok());
    }
}
