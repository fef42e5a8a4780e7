use std::fmt;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ALPHA, DEFAULT_AMPLIFICATION, DEFAULT_NORMALIZE_THRESHOLD, DEFAULT_WEIGHT_THRESHOLD,
};

/// Tunables of the scoring-to-command pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Weight of the rule-based vector in the blend, in [0, 1].
    pub alpha: f64,
    /// Normalized scores below this are dropped, in [0, 1].
    pub normalize_threshold: f64,
    /// Normalized scores below this produce no command, in [0, 1].
    pub weight_threshold: f64,
    /// Score amplification before vibration/light scaling, > 0.
    pub amplification: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            normalize_threshold: DEFAULT_NORMALIZE_THRESHOLD,
            weight_threshold: DEFAULT_WEIGHT_THRESHOLD,
            amplification: DEFAULT_AMPLIFICATION,
        }
    }
}

impl PipelineConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        unit_interval("alpha", self.alpha)?;
        unit_interval("normalize_threshold", self.normalize_threshold)?;
        unit_interval("weight_threshold", self.weight_threshold)?;
        if !(self.amplification.is_finite() && self.amplification > 0.0) {
            return Err(ConfigError::OutOfRange {
                field: "amplification",
                value: self.amplification,
                expected: "a positive number",
            });
        }
        Ok(())
    }
}

fn unit_interval(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfRange {
            field,
            value,
            expected: "a value in [0, 1]",
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    OutOfRange {
        field: &'static str,
        value: f64,
        expected: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::OutOfRange {
                field,
                value,
                expected,
            } => write!(f, "{field} = {value} is out of range, expected {expected}"),
        }
    }
}

impl std::error::Error for ConfigError {}
