// ============================================================
// Layer 4 - Sequence Padding
// ============================================================
// Brings every token sequence to exactly `max_len` entries:
//   - shorter sequences get PAD_INDEX appended on the right
//   - longer sequences lose entries from the `truncation` side

use serde::{Deserialize, Serialize};

use crate::data::vocabulary::PAD_INDEX;

/// Which end of an over-long sequence is cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Truncation {
    /// Drop leading tokens, keep the tail
    Pre,
    /// Drop trailing tokens, keep the head
    #[default]
    Post,
}

/// Pad or truncate `ids` to exactly `max_len` entries.
pub fn pad_sequence(ids: &[u32], max_len: usize, truncation: Truncation) -> Vec<u32> {
    let kept = if ids.len() > max_len {
        match truncation {
            Truncation::Pre  => &ids[ids.len() - max_len..],
            Truncation::Post => &ids[..max_len],
        }
    } else {
        ids
    };

    let mut padded = Vec::with_capacity(max_len);
    padded.extend_from_slice(kept);
    padded.resize(max_len, PAD_INDEX);
    padded
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pads_on_the_right_with_zero() {
        assert_eq!(pad_sequence(&[4, 5], 5, Truncation::Post), vec![4, 5, 0, 0, 0]);
    }

    #[test]
    fn test_post_truncation_keeps_head() {
        assert_eq!(pad_sequence(&[1, 2, 3, 4], 2, Truncation::Post), vec![1, 2]);
    }

    #[test]
    fn test_pre_truncation_keeps_tail() {
        assert_eq!(pad_sequence(&[1, 2, 3, 4], 2, Truncation::Pre), vec![3, 4]);
    }

    #[test]
    fn test_exact_length_is_unchanged() {
        let ids = vec![7, 8, 9, 10];
        for truncation in [Truncation::Pre, Truncation::Post] {
            assert_eq!(pad_sequence(&ids, 4, truncation), ids);
        }
    }

    #[test]
    fn test_padding_is_idempotent() {
        let once  = pad_sequence(&[3, 1, 4, 1, 5, 9, 2, 6], 5, Truncation::Post);
        let twice = pad_sequence(&once, 5, Truncation::Post);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_sequence_becomes_all_padding() {
        assert_eq!(pad_sequence(&[], 3, Truncation::Post), vec![0, 0, 0]);
    }
}
