//! Per-sentence orchestration and the externally visible result records.
//!
//! Every sentence goes through the same stateless sequence:
//! rule scoring → classifier fan-out → blend → normalize → synthesize →
//! position. Sentences never influence each other, so a document is just the
//! sentence transform mapped over its segments.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::{EmotionCategory, NormalizedScores, ScoreVector};
use crate::classifier::{Classifier, ClassifierError, ClassifierResult};
use crate::config::{ConfigError, PipelineConfig};
use crate::fusion::{blend_scores, merge_scores, normalize_and_threshold};
use crate::lexical::score_tokens;
use crate::phrasal::score_phrases;
use crate::placement::{PositionedCommandSet, position_commands};
use crate::signal::adapt_classifier_output;
use crate::synth::synthesize_commands;
use crate::tables::Tables;
use crate::tokenizer::{split_sentences, tokenize};

/// The primary output record for one sentence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SentenceResult {
    /// 1-based, in segmentation order.
    pub sentence_number: usize,
    pub sentence: String,
    pub normalized_emotion_scores: NormalizedScores,
    /// Always four entries, addresses 1–4, even when there are no commands.
    pub haptic_commands: Vec<PositionedCommandSet>,
}

/// The secondary (plotting) output record: pre-normalization blended scores.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RawSentenceResult {
    pub sentence_number: usize,
    pub sentence: String,
    pub raw_scores: BTreeMap<EmotionCategory, f64>,
}

/// Scoring-to-command compiler bound to a set of tables and tunables.
#[derive(Clone, Copy, Debug)]
pub struct Pipeline<'t> {
    tables: &'t Tables,
    config: PipelineConfig,
}

impl Pipeline<'static> {
    /// Standard tables with default tunables.
    pub fn standard() -> Self {
        Self {
            tables: Tables::standard(),
            config: PipelineConfig::default(),
        }
    }
}

impl<'t> Pipeline<'t> {
    pub fn new(tables: &'t Tables, config: PipelineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { tables, config })
    }

    pub fn tables(&self) -> &'t Tables {
        self.tables
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Lexical + phrasal scores, merged.
    pub fn rule_scores(&self, sentence: &str) -> ScoreVector {
        let lexical = score_tokens(self.tables, &tokenize(sentence));
        let phrasal = score_phrases(self.tables, sentence);
        merge_scores(&lexical, &phrasal)
    }

    /// Blend rule scores with classifier output.
    ///
    /// Without classifier output the sentence is scored by rules alone
    /// (alpha taken as 1.0) rather than halved against an empty ML vector.
    pub fn blended_scores(&self, sentence: &str, classified: &ClassifierResult) -> ScoreVector {
        let rule = self.rule_scores(sentence);
        match classified {
            Ok(output) => {
                let ml = adapt_classifier_output(self.tables, output);
                blend_scores(&rule, &ml, self.config.alpha)
            }
            Err(_) => rule,
        }
    }

    pub fn compile_sentence(
        &self,
        sentence_number: usize,
        sentence: &str,
        classified: &ClassifierResult,
    ) -> SentenceResult {
        let blended = self.blended_scores(sentence, classified);
        let normalized = normalize_and_threshold(&blended, self.config.normalize_threshold);
        let commands = if normalized.is_empty() {
            Vec::new()
        } else {
            synthesize_commands(self.tables, &normalized, &self.config)
        };
        SentenceResult {
            sentence_number,
            sentence: sentence.to_string(),
            normalized_emotion_scores: normalized,
            haptic_commands: position_commands(&commands),
        }
    }

    pub fn raw_sentence(
        &self,
        sentence_number: usize,
        sentence: &str,
        classified: &ClassifierResult,
    ) -> RawSentenceResult {
        RawSentenceResult {
            sentence_number,
            sentence: sentence.to_string(),
            raw_scores: self.blended_scores(sentence, classified).to_map(),
        }
    }

    /// Compile pre-segmented sentences against precomputed classifier output.
    /// `classified[i]` belongs to `sentences[i]`; a missing entry counts as
    /// [`ClassifierError::Missing`].
    pub fn compile_sentences(
        &self,
        sentences: &[String],
        classified: &[ClassifierResult],
    ) -> Vec<SentenceResult> {
        self.map_sentences(sentences, classified, |n, s, c| self.compile_sentence(n, s, c))
    }

    pub fn raw_sentences(
        &self,
        sentences: &[String],
        classified: &[ClassifierResult],
    ) -> Vec<RawSentenceResult> {
        self.map_sentences(sentences, classified, |n, s, c| self.raw_sentence(n, s, c))
    }

    /// Segment `text`, classify every sentence in one batch, and compile.
    pub fn compile_document(&self, text: &str, classifier: &dyn Classifier) -> Vec<SentenceResult> {
        let sentences = split_sentences(text);
        let classified = classifier.classify_batch(&sentences);
        self.compile_sentences(&sentences, &classified)
    }

    pub fn raw_document(&self, text: &str, classifier: &dyn Classifier) -> Vec<RawSentenceResult> {
        let sentences = split_sentences(text);
        let classified = classifier.classify_batch(&sentences);
        self.raw_sentences(&sentences, &classified)
    }

    fn map_sentences<T>(
        &self,
        sentences: &[String],
        classified: &[ClassifierResult],
        f: impl Fn(usize, &str, &ClassifierResult) -> T,
    ) -> Vec<T> {
        let missing: ClassifierResult = Err(ClassifierError::Missing);
        sentences
            .iter()
            .enumerate()
            .map(|(i, sentence)| f(i + 1, sentence, classified.get(i).unwrap_or(&missing)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::EmotionCategory::*;
    use crate::classifier::LabelScore;
    use crate::placement::Placement;

    fn neutral() -> ClassifierResult {
        Ok(vec![LabelScore::new("neutral", 0.98), LabelScore::new("joy", 0.02)])
    }

    #[test]
    fn test_rule_scores_combine_lexical_and_phrasal() {
        let p = Pipeline::standard();
        // "skittering" is a Fear keyword and part of a Fear phrase
        let s = p.rule_scores("She felt ice skittering up her spine.");
        assert_eq!(s[Fear], 3.0);
    }

    #[test]
    fn test_blend_uses_alpha() {
        let p = Pipeline::standard();
        let out = Ok(vec![LabelScore::new("fear", 1.0)]);
        let s = p.blended_scores("She was very afraid of the dark.", &out);
        // 0.5 × 2.0 + 0.5 × 0.6
        assert_eq!(s[Fear], 1.3);
        assert_eq!(s[Anxiety], 0.2);
    }

    #[test]
    fn test_classifier_failure_falls_back_to_rules() {
        let p = Pipeline::standard();
        let s = p.blended_scores(
            "She was very afraid of the dark.",
            &Err(ClassifierError::Inference("timeout".into())),
        );
        assert_eq!(s[Fear], 2.0);
    }

    #[test]
    fn test_neutral_sentence_has_empty_scores_and_four_empty_sets() {
        let p = Pipeline::standard();
        let r = p.compile_sentence(
            1,
            "The table stood by the window.",
            &Ok(vec![LabelScore::new("neutral", 1.0)]),
        );
        assert!(r.normalized_emotion_scores.is_empty());
        assert_eq!(r.haptic_commands.len(), 4);
        assert!(r.haptic_commands.iter().all(|s| s.commands.is_empty()));
    }

    #[test]
    fn test_compile_sentence_fear() {
        let p = Pipeline::standard();
        let r = p.compile_sentence(
            3,
            "She was very afraid of the dark.",
            &Ok(vec![LabelScore::new("fear", 0.9), LabelScore::new("neutral", 0.1)]),
        );
        assert_eq!(r.sentence_number, 3);
        assert_eq!(r.normalized_emotion_scores[&Fear], 1.0);
        let addresses: Vec<Placement> = r.haptic_commands.iter().map(|s| s.placement).collect();
        assert_eq!(addresses, Placement::ALL.to_vec());
        // every placement carries the same emotions
        for set in &r.haptic_commands {
            let emotions: Vec<_> = set.commands.iter().map(|c| c.emotion).collect();
            assert_eq!(emotions, vec![Fear, Anxiety]);
        }
    }

    #[test]
    fn test_compile_sentences_numbers_and_missing_outputs() {
        let p = Pipeline::standard();
        let sentences = vec!["One fear.".to_string(), "Two tears.".to_string(), "Three.".to_string()];
        let results = p.compile_sentences(&sentences, &[neutral()]);
        let numbers: Vec<_> = results.iter().map(|r| r.sentence_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        // sentence 2 has no classifier output and is scored by rules alone
        assert_eq!(results[1].normalized_emotion_scores.len(), 1);
        assert_eq!(results[1].normalized_emotion_scores[&Sorrow], 1.0);
    }

    #[test]
    fn test_raw_sentence_is_dense() {
        let p = Pipeline::standard();
        let r = p.raw_sentence(1, "Calm.", &Ok(vec![]));
        assert_eq!(r.raw_scores.len(), EmotionCategory::COUNT);
        assert_eq!(r.raw_scores[&Relief], 0.5);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = PipelineConfig {
            alpha: -0.1,
            ..Default::default()
        };
        assert!(Pipeline::new(Tables::standard(), config).is_err());
    }

    #[test]
    fn test_compile_document_with_closure_classifier() {
        let p = Pipeline::standard();
        let classifier = |_: &str| -> ClassifierResult { Ok(vec![LabelScore::new("neutral", 1.0)]) };
        let results = p.compile_document("The fear rose. The room was quiet.", &classifier);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].normalized_emotion_scores[&Fear], 1.0);
        assert!(results[1].normalized_emotion_scores.is_empty());
    }
}
