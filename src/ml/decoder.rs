// ============================================================
// Layer 5 — Logits → Text
// ============================================================
// Greedy decoding: take the arg-max id at every position and
// look it up in the target vocabulary. Id 0 prints as <PAD>.
// No beam search, no length penalty.

use burn::prelude::*;

use crate::data::vocabulary::{Vocabulary, PAD_MARKER};

/// Arg-max id per position of a [seq_len, vocab] score table.
pub fn argmax_ids<B: Backend>(scores: Tensor<B, 2>) -> Vec<u32> {
    let [len, _] = scores.dims();
    scores
        .argmax(1)
        .reshape([len])
        .into_data()
        .iter::<i64>()
        .map(|id| id as u32)
        .collect()
}

/// Decode one sequence of per-position distributions into text,
/// one token per position.
pub fn logits_to_text<B: Backend>(scores: Tensor<B, 2>, vocab: &Vocabulary) -> String {
    vocab.decode_ids(&argmax_ids(scores))
}

/// Drop pad markers from decoded text for display.
pub fn strip_padding(text: &str) -> String {
    text.split_whitespace()
        .filter(|t| *t != PAD_MARKER)
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::padder::pad_sequences;
    use burn::backend::NdArray;
    use burn::tensor::TensorData;

    type B = NdArray;

    /// A [len, vocab] table with all mass on the given ids.
    fn one_hot(ids: &[u32], vocab: usize) -> Tensor<B, 2> {
        let mut data = vec![0.0f32; ids.len() * vocab];
        for (pos, &id) in ids.iter().enumerate() {
            data[pos * vocab + id as usize] = 1.0;
        }
        Tensor::from_data(TensorData::new(data, [ids.len(), vocab]), &Default::default())
    }

    #[test]
    fn test_picks_highest_score_per_position() {
        let vocab = Vocabulary::build(&["le chat"]);
        let scores = Tensor::<B, 2>::from_data(
            TensorData::new(vec![0.1f32, 0.7, 0.2, 0.5, 0.1, 0.4, 0.2, 0.3, 0.5], [3, 3]),
            &Default::default(),
        );
        assert_eq!(logits_to_text(scores, &vocab), "le <PAD> chat");
    }

    #[test]
    fn test_round_trip_through_padding() {
        let corpus = ["she dislikes grapefruit , lemons , and peaches .", "he likes apples ."];
        let vocab = Vocabulary::build(&corpus);

        for sentence in corpus {
            let padded = pad_sequences(&[vocab.encode(sentence).ids], Some(12));
            let decoded = logits_to_text(one_hot(padded.row(0), vocab.size()), &vocab);
            assert_eq!(decoded.split(' ').count(), 12);
            assert_eq!(strip_padding(&decoded), sentence);
        }
    }

    #[test]
    fn test_strip_padding() {
        assert_eq!(strip_padding("il est <PAD> <PAD>"), "il est");
        assert_eq!(strip_padding("<PAD>"), "");
    }
}
