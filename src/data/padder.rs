// ============================================================
// Layer 4 — Sequence Padder
// ============================================================
// Turns ragged id sequences into a fixed-width [rows, width]
// table.
//
//   width omitted   → width = longest input sequence
//   shorter rows    → zeros appended at the end (post-padding)
//   longer rows     → only the first `width` ids are kept
//
// The same function shapes training batches and single
// inference inputs, so a sentence is laid out identically in
// both.

use crate::data::vocabulary::PAD_ID;
#[cfg(test)]
use crate::domain::error::PipelineError;

/// A row-major table of token ids with an explicit shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddedBatch {
    data:  Vec<u32>,
    rows:  usize,
    width: usize,
}

impl PaddedBatch {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn shape(&self) -> [usize; 2] {
        [self.rows, self.width]
    }

    pub fn row(&self, index: usize) -> &[u32] {
        &self.data[index * self.width..(index + 1) * self.width]
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[u32]> {
        (0..self.rows).map(move |i| self.row(i))
    }

    /// Row-major ids, `rows * width` of them.
    pub fn into_data(self) -> Vec<u32> {
        self.data
    }
}

#[cfg(test)]
impl PaddedBatch {
    /// Wrap existing row-major data. `data.len()` must be `rows * width`.
    pub fn from_data(data: Vec<u32>, rows: usize, width: usize) -> Result<Self, PipelineError> {
        if data.len() != rows * width {
            return Err(PipelineError::shape("padded batch data", rows * width, data.len()));
        }
        Ok(Self { data, rows, width })
    }

    /// Rows as owned vectors, for re-padding.
    pub fn to_sequences(&self) -> Vec<Vec<u32>> {
        self.iter_rows().map(<[u32]>::to_vec).collect()
    }
}

/// Pad or truncate every sequence to `length` (or to the longest
/// sequence when `length` is `None`).
pub fn pad_sequences(sequences: &[Vec<u32>], length: Option<usize>) -> PaddedBatch {
    let width = length.unwrap_or_else(|| longest(sequences));
    let mut data = Vec::with_capacity(sequences.len() * width);

    for seq in sequences {
        let kept = seq.len().min(width);
        data.extend_from_slice(&seq[..kept]);
        data.extend(std::iter::repeat(PAD_ID).take(width - kept));
    }

    PaddedBatch {
        data,
        rows: sequences.len(),
        width,
    }
}

pub fn longest(sequences: &[Vec<u32>]) -> usize {
    sequences.iter().map(Vec::len).max().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_width_is_longest_row() {
        let batch = pad_sequences(&[vec![1, 2, 3], vec![4]], None);
        assert_eq!(batch.shape(), [2, 3]);
        assert_eq!(batch.row(0), &[1, 2, 3]);
        assert_eq!(batch.row(1), &[4, 0, 0]);
    }

    #[test]
    fn test_short_rows_keep_prefix_and_fill_with_zero() {
        let seq = vec![7, 8, 9];
        let batch = pad_sequences(&[seq.clone()], Some(8));
        let row = batch.row(0);
        assert_eq!(&row[..seq.len()], seq.as_slice());
        assert!(row[seq.len()..].iter().all(|&id| id == PAD_ID));
        assert_eq!(row.len(), 8);
    }

    #[test]
    fn test_long_rows_are_truncated_from_the_end() {
        let batch = pad_sequences(&[vec![1, 2, 3, 4, 5]], Some(3));
        assert_eq!(batch.row(0), &[1, 2, 3]);
    }

    #[test]
    fn test_padding_is_idempotent() {
        let seqs = vec![vec![3, 1], vec![9, 9, 9, 9, 9], vec![], vec![2, 4, 6]];
        for length in [0, 2, 4, 7] {
            let once = pad_sequences(&seqs, Some(length));
            let twice = pad_sequences(&once.to_sequences(), Some(length));
            assert_eq!(once, twice, "length {length}");
        }
    }

    #[test]
    fn test_sample_sentence_padded_to_21() {
        use crate::data::vocabulary::Vocabulary;

        let sentence = "new jersey is sometimes quiet during autumn , and it is snowy in april .";
        let vocab = Vocabulary::build(&[sentence]);
        let ids = vocab.encode(sentence).ids;
        assert_eq!(ids.len(), 15);

        let batch = pad_sequences(&[ids], Some(21));
        let row = batch.row(0);
        assert_eq!(row.len(), 21);
        assert!(row[..15].iter().all(|&id| id != PAD_ID));
        assert_eq!(&row[15..], &[0; 6]);
    }

    #[test]
    fn test_from_data_checks_shape() {
        assert!(PaddedBatch::from_data(vec![1, 2, 3], 2, 2).is_err());
        let batch = PaddedBatch::from_data(vec![1, 2, 3, 4], 2, 2).unwrap();
        assert_eq!(batch.row(1), &[3, 4]);
    }

    #[test]
    fn test_empty_batch() {
        let batch = pad_sequences(&[], None);
        assert_eq!(batch.shape(), [0, 0]);
        assert_eq!(batch.iter_rows().count(), 0);
    }
}
