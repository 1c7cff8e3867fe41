// ============================================================
// Train/Validation Splitter
// ============================================================
// Shuffles patches and splits them into a training set and a
// held-out validation set. Patches from one image are spatially
// correlated, so the shuffle matters: without it the validation
// set would come from a single corner of a single image.

use rand::seq::SliceRandom;

/// Randomly shuffle `samples` and split into (train, validation).
///
/// `train_fraction` is the proportion kept for training,
/// e.g. 0.8 keeps 80% and holds out 20%.
pub fn split_train_val<T>(mut samples: Vec<T>, train_fraction: f64) -> (Vec<T>, Vec<T>) {
    let mut rng = rand::thread_rng();
    samples.shuffle(&mut rng);

    let total = samples.len();
    let split_at = ((total as f64) * train_fraction).round() as usize;
    let split_at = split_at.min(total);

    // split_off(n) removes [n..] and returns it
    let val = samples.split_off(split_at);

    tracing::debug!(
        "dataset split: {} training, {} validation",
        samples.len(),
        val.len(),
    );

    (samples, val)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_sizes_at_default_fraction() {
        // 40 patches at the 0.8 training fraction: 32 train, 8 held out
        let patches: Vec<u32> = (0..40).collect();
        let (train, val) = split_train_val(patches, 0.8);
        assert_eq!(train.len(), 32);
        assert_eq!(val.len(), 8);
    }

    #[test]
    fn test_fraction_rounds_to_nearest() {
        // 7 * 0.5 = 3.5 rounds up: 4 train, 3 validation
        let patches: Vec<u32> = (0..7).collect();
        let (train, val) = split_train_val(patches, 0.5);
        assert_eq!(train.len(), 4);
        assert_eq!(val.len(), 3);
    }

    #[test]
    fn test_split_loses_and_invents_nothing() {
        // The shuffle reorders but every patch lands on exactly one side
        let patches: Vec<u32> = (0..33).collect();
        let (train, val) = split_train_val(patches, 0.6);

        let mut recombined: Vec<u32> = train.into_iter().chain(val).collect();
        recombined.sort_unstable();
        assert_eq!(recombined, (0..33).collect::<Vec<u32>>());
    }

    #[test]
    fn test_no_patches_no_panic() {
        let (train, val) = split_train_val(Vec::<u32>::new(), 0.8);
        assert!(train.is_empty());
        assert!(val.is_empty());
    }

    #[test]
    fn test_everything_trains_at_fraction_one() {
        let (train, val) = split_train_val((0..12).collect::<Vec<u32>>(), 1.0);
        assert_eq!(train.len(), 12);
        assert!(val.is_empty());
    }
}
