// ============================================================
// Layer 4 — Translation Batcher
// ============================================================
// Implements Burn's Batcher trait: a Vec of padded samples
// becomes two Int tensors of shape [batch, seq_len].
//
//   [s1_t1, s1_t2, ..., s1_tL, s2_t1, ..., sN_tL] → [N, L]
//
// Samples are padded to the same length before they reach the
// batcher, so stacking is a flatten + reshape.
//
// Reference: Burn Book §4 (Batcher)

use burn::{
    data::dataloader::batcher::Batcher,
    prelude::*,
    tensor::TensorData,
};

use crate::data::dataset::TranslationSample;
use crate::data::padder::PaddedBatch;

/// Source ids and target labels, both [batch_size, seq_len].
#[derive(Debug, Clone)]
pub struct TranslationBatch<B: Backend> {
    pub source: Tensor<B, 2, Int>,
    pub target: Tensor<B, 2, Int>,
}

#[derive(Clone, Debug)]
pub struct TranslationBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> TranslationBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<TranslationSample, TranslationBatch<B>> for TranslationBatcher<B> {
    fn batch(&self, items: Vec<TranslationSample>) -> TranslationBatch<B> {
        let batch_size = items.len();
        let seq_len    = items.first().map_or(0, |s| s.source.len());

        let source_flat: Vec<i64> = items
            .iter()
            .flat_map(|s| s.source.iter().map(|&x| x as i64))
            .collect();
        let target_flat: Vec<i64> = items
            .iter()
            .flat_map(|s| s.target.iter().map(|&x| x as i64))
            .collect();

        TranslationBatch {
            source: ids_tensor(source_flat, [batch_size, seq_len], &self.device),
            target: ids_tensor(target_flat, [batch_size, seq_len], &self.device),
        }
    }
}

/// [rows, width] Int tensor from a padded table.
pub fn padded_to_tensor<B: Backend>(batch: PaddedBatch, device: &B::Device) -> Tensor<B, 2, Int> {
    let shape = batch.shape();
    let flat: Vec<i64> = batch.into_data().into_iter().map(i64::from).collect();
    ids_tensor(flat, shape, device)
}

fn ids_tensor<B: Backend>(flat: Vec<i64>, shape: [usize; 2], device: &B::Device) -> Tensor<B, 2, Int> {
    Tensor::<B, 2, Int>::from_data(TensorData::new(flat, shape), device)
}
