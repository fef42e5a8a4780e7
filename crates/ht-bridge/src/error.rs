use std::fmt;

use ht_core::ConfigError;

#[derive(Debug)]
pub enum BridgeError {
    Io(std::io::Error),
    Json(serde_json::Error),
    Toml(toml::de::Error),
    Http(reqwest::Error),
    Config(String),
    /// The classifier could not be reached at startup.
    ClassifierUnavailable(String),
    /// Two inputs of one run map to the same output file.
    OutputConflict(String),
}

impl fmt::Display for BridgeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BridgeError::Io(e) => write!(f, "I/O error: {e}"),
            BridgeError::Json(e) => write!(f, "JSON error: {e}"),
            BridgeError::Toml(e) => write!(f, "config parse error: {e}"),
            BridgeError::Http(e) => write!(f, "HTTP error: {e}"),
            BridgeError::Config(msg) => write!(f, "invalid config: {msg}"),
            BridgeError::ClassifierUnavailable(msg) => write!(f, "classifier unavailable: {msg}"),
            BridgeError::OutputConflict(msg) => write!(f, "output conflict: {msg}"),
        }
    }
}

impl std::error::Error for BridgeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BridgeError::Io(e) => Some(e),
            BridgeError::Json(e) => Some(e),
            BridgeError::Toml(e) => Some(e),
            BridgeError::Http(e) => Some(e),
            BridgeError::Config(_)
            | BridgeError::ClassifierUnavailable(_)
            | BridgeError::OutputConflict(_) => None,
        }
    }
}

impl From<std::io::Error> for BridgeError {
    fn from(e: std::io::Error) -> Self {
        BridgeError::Io(e)
    }
}

impl From<serde_json::Error> for BridgeError {
    fn from(e: serde_json::Error) -> Self {
        BridgeError::Json(e)
    }
}

impl From<toml::de::Error> for BridgeError {
    fn from(e: toml::de::Error) -> Self {
        BridgeError::Toml(e)
    }
}

impl From<reqwest::Error> for BridgeError {
    fn from(e: reqwest::Error) -> Self {
        BridgeError::Http(e)
    }
}

impl From<ConfigError> for BridgeError {
    fn from(e: ConfigError) -> Self {
        BridgeError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
