//! Single-token scoring against the lexicon.

use crate::category::ScoreVector;
use crate::constants::MODIFIER_WINDOW;
use crate::tables::Tables;

/// Product of modifier factors over a window of tokens, left to right.
/// 1.0 when the window holds no intensifier or negator.
pub fn modifier_multiplier<S: AsRef<str>>(tables: &Tables, window: &[S]) -> f64 {
    window
        .iter()
        .filter_map(|t| tables.modifier(t.as_ref()))
        .fold(1.0, |m, modifier| m * modifier.factor())
}

/// Score a lower-cased token sequence.
///
/// Each keyword hit adds the multiplier of the (up to) three tokens strictly
/// before it to every category that lists the keyword.
pub fn score_tokens<S: AsRef<str>>(tables: &Tables, tokens: &[S]) -> ScoreVector {
    let mut scores = ScoreVector::zero();
    for (i, token) in tokens.iter().enumerate() {
        let categories = tables.keyword_categories(token.as_ref());
        if categories.is_empty() {
            continue;
        }
        let window = &tokens[i.saturating_sub(MODIFIER_WINDOW)..i];
        let multiplier = modifier_multiplier(tables, window);
        for &category in categories {
            scores[category] += multiplier;
        }
    }
    scores
}
