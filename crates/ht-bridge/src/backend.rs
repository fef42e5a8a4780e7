use ht_core::{Classifier, ClassifierError, ClassifierResult};

use crate::error::{BridgeError, Result};
use crate::fixture::FixtureClassifier;
use crate::http::HttpClassifier;
use crate::settings::{BackendKind, ClassifierSettings};

/// The classifier a run was configured with.
#[derive(Debug)]
pub enum ClassifierBackend {
    Http(HttpClassifier),
    Fixture(FixtureClassifier),
    RulesOnly,
}

impl ClassifierBackend {
    /// Build the configured backend. The HTTP backend is pinged first and an
    /// unreachable endpoint is an error.
    pub async fn from_settings(settings: &ClassifierSettings) -> Result<Self> {
        match settings.backend {
            BackendKind::Http => Ok(Self::Http(HttpClassifier::connect(settings).await?)),
            BackendKind::Fixture => {
                let path = settings.fixture.as_deref().ok_or_else(|| {
                    BridgeError::Config("classifier.fixture is required for the fixture backend".into())
                })?;
                Ok(Self::Fixture(FixtureClassifier::from_file(path)?))
            }
            BackendKind::RulesOnly => {
                tracing::info!("classifier disabled, scoring with rules only");
                Ok(Self::RulesOnly)
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Http(_) => "http",
            Self::Fixture(_) => "fixture",
            Self::RulesOnly => "rules-only",
        }
    }

    /// One result per sentence, in order. Failed sentences are logged and
    /// left as errors for the pipeline to score by rules alone.
    pub async fn classify_all(&self, sentences: &[String]) -> Vec<ClassifierResult> {
        let results = match self {
            Self::Http(http) => http.classify_all(sentences).await,
            Self::Fixture(fixture) => fixture.classify_batch(sentences),
            Self::RulesOnly => vec![Err(ClassifierError::Disabled); sentences.len()],
        };
        for (i, result) in results.iter().enumerate() {
            if let Err(e) = result
                && *e != ClassifierError::Disabled
            {
                tracing::warn!(sentence = i + 1, "falling back to rule scores: {e}");
            }
        }
        results
    }
}

/// Count of results that carry no classifier output.
pub fn fallback_count(results: &[ClassifierResult]) -> usize {
    results.iter().filter(|r| r.is_err()).count()
}
