//! Multi-word expression scoring on raw sentence text.

use crate::category::ScoreVector;
use crate::constants::{MODIFIER_WINDOW, MWE_BASE_SCORE, MWE_LOOKBACK_CHARS};
use crate::lexical::modifier_multiplier;
use crate::tables::Tables;
use crate::tokenizer::tokenize;

/// Score every configured phrase found in `sentence`.
///
/// Phrases match by substring containment in the lower-cased text. Only the
/// first occurrence of a phrase counts; its modifier window is the last three
/// tokens of the 50 characters preceding it.
pub fn score_phrases(tables: &Tables, sentence: &str) -> ScoreVector {
    let lower = sentence.to_lowercase();
    let mut scores = ScoreVector::zero();

    for (category, phrase) in tables.phrases() {
        let Some(index) = lower.find(phrase) else {
            continue;
        };
        let preceding = tokenize(lookback(&lower[..index], MWE_LOOKBACK_CHARS));
        let window = &preceding[preceding.len().saturating_sub(MODIFIER_WINDOW)..];
        scores[category] += MWE_BASE_SCORE * modifier_multiplier(tables, window);
    }

    scores
}

/// The last `max_chars` characters of `text`.
fn lookback(text: &str, max_chars: usize) -> &str {
    match max_chars.checked_sub(1) {
        Some(n) => text
            .char_indices()
            .rev()
            .nth(n)
            .map_or(text, |(i, _)| &text[i..]),
        None => "",
    }
}
