//! The seam to the external emotion classifier.
//!
//! The core never loads a model. Whoever drives the pipeline supplies
//! classifier output per sentence, either through a [`Classifier`]
//! implementation or by passing precomputed results.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One `(label, probability)` pair from the external classifier.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f64,
}

impl LabelScore {
    pub fn new(label: impl Into<String>, score: f64) -> Self {
        Self {
            label: label.into(),
            score,
        }
    }
}

/// Why a sentence has no classifier output. Never fatal to the pipeline:
/// the sentence is scored by rules alone.
#[derive(Clone, Debug, PartialEq)]
pub enum ClassifierError {
    /// The backend could not be reached.
    Unavailable(String),
    /// The backend answered, but not with a usable result.
    Inference(String),
    /// No output was recorded for this sentence.
    Missing,
    /// Classification is switched off (rules-only mode).
    Disabled,
}

impl fmt::Display for ClassifierError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifierError::Unavailable(msg) => write!(f, "classifier unavailable: {msg}"),
            ClassifierError::Inference(msg) => write!(f, "classifier inference failed: {msg}"),
            ClassifierError::Missing => write!(f, "no classifier output for sentence"),
            ClassifierError::Disabled => write!(f, "classifier disabled"),
        }
    }
}

impl std::error::Error for ClassifierError {}

pub type ClassifierResult = Result<Vec<LabelScore>, ClassifierError>;

/// Sentence → label/score pairs.
pub trait Classifier: Send + Sync {
    fn classify(&self, sentence: &str) -> ClassifierResult;

    /// Classify a whole document's sentences. Backends with batch inference
    /// override this; results must line up with `sentences`.
    fn classify_batch(&self, sentences: &[String]) -> Vec<ClassifierResult> {
        sentences.iter().map(|s| self.classify(s)).collect()
    }
}

impl<F> Classifier for F
where
    F: Fn(&str) -> ClassifierResult + Send + Sync,
{
    fn classify(&self, sentence: &str) -> ClassifierResult {
        self(sentence)
    }
}

/// A classifier that is always off. Every sentence falls back to rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct RulesOnly;

impl Classifier for RulesOnly {
    fn classify(&self, _sentence: &str) -> ClassifierResult {
        Err(ClassifierError::Disabled)
    }
}
