use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::data::padder::PaddedBatch;
use crate::domain::error::PipelineError;

/// One padded (source, target) training example.
/// Both sequences have the model's fixed length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationSample {
    pub source: Vec<u32>,
    pub target: Vec<u32>,
}

impl TranslationSample {
    /// Zip two padded tables row by row. Row counts and widths
    /// must agree.
    pub fn from_batches(
        source: &PaddedBatch,
        target: &PaddedBatch,
    ) -> Result<Vec<Self>, PipelineError> {
        if source.rows() != target.rows() {
            return Err(PipelineError::shape("target rows", source.rows(), target.rows()));
        }
        if source.width() != target.width() {
            return Err(PipelineError::shape("source width", target.width(), source.width()));
        }
        Ok(source
            .iter_rows()
            .zip(target.iter_rows())
            .map(|(s, t)| Self {
                source: s.to_vec(),
                target: t.to_vec(),
            })
            .collect())
    }
}

pub struct TranslationDataset {
    samples: Vec<TranslationSample>,
}

impl TranslationDataset {
    pub fn new(samples: Vec<TranslationSample>) -> Self { Self { samples } }
}

impl Dataset<TranslationSample> for TranslationDataset {
    fn get(&self, index: usize) -> Option<TranslationSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::padder::pad_sequences;

    #[test]
    fn test_rows_are_zipped_in_order() {
        let src = pad_sequences(&[vec![1, 2], vec![3]], Some(3));
        let tgt = pad_sequences(&[vec![4], vec![5, 6, 7]], Some(3));
        let samples = TranslationSample::from_batches(&src, &tgt).unwrap();
        assert_eq!(samples[1].source, vec![3, 0, 0]);
        assert_eq!(samples[1].target, vec![5, 6, 7]);

        let dataset = TranslationDataset::new(samples);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.get(0).unwrap().target, vec![4, 0, 0]);
        assert!(dataset.get(2).is_none());
    }

    #[test]
    fn test_width_mismatch_is_rejected() {
        let src = pad_sequences(&[vec![1, 2]], Some(2));
        let tgt = pad_sequences(&[vec![4]], Some(3));
        assert!(matches!(
            TranslationSample::from_batches(&src, &tgt),
            Err(PipelineError::ShapeMismatch { expected: 3, actual: 2, .. })
        ));
    }
}
