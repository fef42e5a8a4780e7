//! Maps external classifier output into the category space.

use crate::category::ScoreVector;
use crate::classifier::LabelScore;
use crate::tables::Tables;

/// Fan each `(label, probability)` pair out over its weighted targets.
///
/// A category accumulates `probability × weight` over every label that
/// targets it. Unknown and neutral labels contribute nothing; negative or
/// non-finite probabilities are treated as zero.
pub fn adapt_classifier_output(tables: &Tables, output: &[LabelScore]) -> ScoreVector {
    let mut scores = ScoreVector::zero();
    for pair in output {
        let Some(targets) = tables.fanout(&pair.label) else {
            continue;
        };
        let probability = if pair.score.is_finite() {
            pair.score.max(0.0)
        } else {
            0.0
        };
        for &(category, weight) in targets {
            scores[category] += probability * weight;
        }
    }
    scores
}

/// Labels in `output` that the fan-out table doesn't know.
pub fn unmapped_labels<'a>(tables: &Tables, output: &'a [LabelScore]) -> Vec<&'a str> {
    output
        .iter()
        .filter(|p| tables.fanout(&p.label).is_none())
        .map(|p| p.label.as_str())
        .collect()
}
