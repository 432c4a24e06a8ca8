// ============================================================
// Layer 4 - Train/Validation Splitter
// ============================================================
// Holds out the LAST `validation_fraction` of the samples, in
// their original order; no shuffling before the split.
//
// Split point: floor(n * (1 - validation_fraction)).
// With fraction 0.0 every sample is used for training.

/// Split `samples` into (train, validation).
pub fn split_train_val<T>(mut samples: Vec<T>, validation_fraction: f64) -> (Vec<T>, Vec<T>) {
    let total    = samples.len();
    let split_at = ((total as f64) * (1.0 - validation_fraction)).floor() as usize;

    // Clamp to valid range to avoid panics on tiny datasets
    let split_at = split_at.min(total);

    let val = samples.split_off(split_at);

    tracing::debug!(
        "Dataset split: {} training, {} validation",
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
    fn test_correct_split_sizes() {
        let items: Vec<usize> = (0..100).collect();
        let (train, val)      = split_train_val(items, 0.2);
        assert_eq!(train.len(), 80);
        assert_eq!(val.len(),   20);
    }

    #[test]
    fn test_validation_is_the_tail() {
        let items: Vec<usize> = (0..10).collect();
        let (train, val)      = split_train_val(items, 0.2);
        assert_eq!(train, (0..8).collect::<Vec<_>>());
        assert_eq!(val,   vec![8, 9]);
    }

    #[test]
    fn test_split_point_rounds_down() {
        // 3 * 0.8 = 2.4 → 2 train, 1 validation
        let (train, val) = split_train_val(vec!['a', 'b', 'c'], 0.2);
        assert_eq!(train, vec!['a', 'b']);
        assert_eq!(val,   vec!['c']);
    }

    #[test]
    fn test_single_sample_goes_to_validation() {
        let (train, val) = split_train_val(vec![1], 0.2);
        assert!(train.is_empty());
        assert_eq!(val, vec![1]);
    }

    #[test]
    fn test_empty_dataset() {
        let items: Vec<usize> = Vec::new();
        let (train, val)      = split_train_val(items, 0.2);
        assert!(train.is_empty());
        assert!(val.is_empty());
    }

    #[test]
    fn test_zero_fraction_keeps_everything() {
        let items: Vec<usize> = (0..10).collect();
        let (train, val)      = split_train_val(items, 0.0);
        assert_eq!(train.len(), 10);
        assert!(val.is_empty());
    }
}
