//! Recorded classifier output, replayed by sentence text.

use std::collections::HashMap;
use std::path::Path;

use ht_core::{Classifier, ClassifierError, ClassifierResult, LabelScore};

use crate::error::Result;

/// A JSON object mapping each sentence to its `[{label, score}]` list.
/// Sentences not in the file report [`ClassifierError::Missing`].
#[derive(Clone, Debug, Default)]
pub struct FixtureClassifier {
    outputs: HashMap<String, Vec<LabelScore>>,
}

impl FixtureClassifier {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let fixture = Self::from_json(&content)?;
        tracing::debug!(path = %path.display(), sentences = fixture.len(), "loaded classifier fixture");
        Ok(fixture)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let outputs: HashMap<String, Vec<LabelScore>> = serde_json::from_str(json)?;
        Ok(Self {
            outputs: outputs
                .into_iter()
                .map(|(sentence, labels)| (sentence.trim().to_string(), labels))
                .collect(),
        })
    }

    pub fn insert(&mut self, sentence: impl Into<String>, labels: Vec<LabelScore>) {
        self.outputs.insert(sentence.into().trim().to_string(), labels);
    }

    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }
}

impl Classifier for FixtureClassifier {
    fn classify(&self, sentence: &str) -> ClassifierResult {
        self.outputs
            .get(sentence.trim())
            .cloned()
            .ok_or(ClassifierError::Missing)
    }
}
