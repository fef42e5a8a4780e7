//! Layered run settings: TOML file, then environment overrides.
//!
//! ```toml
//! [pipeline]
//! alpha = 0.5
//!
//! [classifier]
//! backend = "http"
//! endpoint = "http://localhost:8080/classify"
//! batch_size = 16
//! ```

use std::env;
use std::path::{Path, PathBuf};

use ht_core::PipelineConfig;
use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};

/// Names the settings file when `--config` is not given.
pub const CONFIG_ENV: &str = "HT_CONFIG";
pub const CLASSIFIER_URL_ENV: &str = "HT_CLASSIFIER_URL";
pub const CLASSIFIER_TOKEN_ENV: &str = "HT_CLASSIFIER_TOKEN";
pub const ALPHA_ENV: &str = "HT_ALPHA";

pub const DEFAULT_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/j-hartmann/emotion-english-distilroberta-base";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    #[default]
    Http,
    Fixture,
    RulesOnly,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierSettings {
    pub backend: BackendKind,
    pub endpoint: String,
    /// Sent as a bearer token when present.
    pub token: Option<String>,
    /// Sentences per request.
    pub batch_size: usize,
    /// Requests in flight at once.
    pub concurrency: usize,
    pub timeout_secs: u64,
    /// JSON file of recorded classifier output, for the fixture backend.
    pub fixture: Option<PathBuf>,
}

impl Default for ClassifierSettings {
    fn default() -> Self {
        Self {
            backend: BackendKind::Http,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: None,
            batch_size: 16,
            concurrency: 4,
            timeout_secs: 30,
            fixture: None,
        }
    }
}

impl ClassifierSettings {
    pub fn validate(&self) -> Result<()> {
        if self.batch_size == 0 {
            return Err(BridgeError::Config("classifier.batch_size must be > 0".into()));
        }
        if self.concurrency == 0 {
            return Err(BridgeError::Config("classifier.concurrency must be > 0".into()));
        }
        match self.backend {
            BackendKind::Http if self.endpoint.trim().is_empty() => Err(BridgeError::Config(
                "classifier.endpoint cannot be empty".into(),
            )),
            BackendKind::Fixture if self.fixture.is_none() => Err(BridgeError::Config(
                "classifier.fixture is required for the fixture backend".into(),
            )),
            _ => Ok(()),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub pipeline: PipelineConfig,
    pub classifier: ClassifierSettings,
}

impl Settings {
    /// Resolve settings: `path`, else `$HT_CONFIG`, else defaults; then the
    /// `HT_*` environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_ENV).map(PathBuf::from));
        let mut settings = match path {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        settings.apply_overrides(|key| env::var(key).ok())?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut settings = Self::from_toml(&content)?;
        // a relative fixture path is relative to the settings file
        if let (Some(fixture), Some(dir)) = (&settings.classifier.fixture, path.parent())
            && fixture.is_relative()
        {
            settings.classifier.fixture = Some(dir.join(fixture));
        }
        tracing::debug!(path = %path.display(), "loaded settings");
        Ok(settings)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `HT_CLASSIFIER_URL`, `HT_CLASSIFIER_TOKEN` and `HT_ALPHA` as
    /// resolved by `lookup`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup(CLASSIFIER_URL_ENV) {
            self.classifier.endpoint = url;
        }
        if let Some(token) = lookup(CLASSIFIER_TOKEN_ENV) {
            self.classifier.token = Some(token).filter(|t| !t.is_empty());
        }
        if let Some(alpha) = lookup(ALPHA_ENV) {
            self.pipeline.alpha = alpha.trim().parse().map_err(|_| {
                BridgeError::Config(format!("{ALPHA_ENV} is not a number: {alpha:?}"))
            })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.pipeline.validate()?;
        self.classifier.validate()
    }
}
