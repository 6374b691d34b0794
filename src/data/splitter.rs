// ============================================================
// Layer 4 — Train/Validation Splitter
// ============================================================
// Splits samples into a training set and a held-out validation
// set of round(validation_fraction × N) samples.
//
//   seed = None     → the last samples are held out, in order
//   seed = Some(s)  → samples are shuffled with StdRng(s) first
//
// Either way the result is reproducible, and no sample ends up
// in both sets.
//
// Uses Fisher-Yates shuffle via rand::seq::SliceRandom.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Split `samples` into (train, validation).
///
/// # Example
/// ```ignore
/// let (train, val) = split_train_val(all_samples, 0.2, None);
/// // val holds the last 20% of all_samples
/// ```
pub fn split_train_val<T>(
    mut samples:         Vec<T>,
    validation_fraction: f64,
    seed:                Option<u64>,
) -> (Vec<T>, Vec<T>) {
    if let Some(seed) = seed {
        let mut rng = StdRng::seed_from_u64(seed);
        samples.shuffle(&mut rng);
    }

    let total    = samples.len();
    let held_out = ((total as f64) * validation_fraction.clamp(0.0, 1.0)).round() as usize;
    let split_at = total - held_out.min(total);

    let val = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} validation ({}% / {}%)",
        samples.len(),
        val.len(),
        (samples.len() * 100) / total.max(1),
        (val.len()     * 100) / total.max(1),
    );

    (samples, val)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, val)      = split_train_val(items, 0.2, None);
        assert_eq!(train.len(), 80);
        assert_eq!(val.len(),   20);
    }

    #[test]
    fn test_suffix_is_held_out_without_seed() {
        let items: Vec<usize> = (0..10).collect();
        let (train, val)      = split_train_val(items, 0.3, None);
        assert_eq!(train, (0..7).collect::<Vec<_>>());
        assert_eq!(val,   vec![7, 8, 9]);
    }

    #[test]
    fn test_seeded_split_is_reproducible_and_disjoint() {
        let items: Vec<usize> = (0..50).collect();
        let (train_a, val_a)  = split_train_val(items.clone(), 0.2, Some(7));
        let (train_b, val_b)  = split_train_val(items, 0.2, Some(7));
        assert_eq!(train_a, train_b);
        assert_eq!(val_a,   val_b);

        let mut all: Vec<usize> = train_a.into_iter().chain(val_a).collect();
        all.sort_unstable();
        assert_eq!(all, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_dataset() {
        let items: Vec<usize> = Vec::new();
        let (train, val)      = split_train_val(items, 0.2, None);
        assert!(train.is_empty());
        assert!(val.is_empty());
    }

    #[test]
    fn test_zero_fraction_keeps_everything_for_training() {
        let items: Vec<usize> = (0..10).collect();
        let (train, val)      = split_train_val(items, 0.0, None);
        assert_eq!(train.len(), 10);
        assert!(val.is_empty());
    }
}
