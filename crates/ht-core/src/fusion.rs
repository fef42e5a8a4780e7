//! Merge, blend and normalize score vectors.

use crate::category::{CategoryMap, NormalizedScores, ScoreVector};
use crate::numeric::round2;

/// Element-wise sum of the lexical and phrasal vectors.
pub fn merge_scores(lexical: &ScoreVector, phrasal: &ScoreVector) -> ScoreVector {
    CategoryMap::from_fn(|c| lexical[c] + phrasal[c])
}

/// `alpha·rule + (1-alpha)·ml` for every category.
pub fn blend_scores(rule: &ScoreVector, ml: &ScoreVector, alpha: f64) -> ScoreVector {
    CategoryMap::from_fn(|c| alpha * rule[c] + (1.0 - alpha) * ml[c])
}

/// Rescale by the maximum, round to 2 places, drop entries below `threshold`.
///
/// An all-zero vector yields an empty map. Otherwise the category holding the
/// maximum always survives with exactly 1.0.
pub fn normalize_and_threshold(scores: &ScoreVector, threshold: f64) -> NormalizedScores {
    let max = scores.max();
    if max <= 0.0 || !max.is_finite() {
        return NormalizedScores::new();
    }
    scores
        .iter()
        .filter_map(|(category, &value)| {
            let normalized = round2(value / max);
            (normalized >= threshold).then_some((category, normalized))
        })
        .collect()
}
