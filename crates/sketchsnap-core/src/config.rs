//! Tunable parameters of the stroke pipeline.

use crate::recognition::Thresholds;
use crate::simplify::DEFAULT_EPSILON;
use crate::smooth::DEFAULT_TENSION;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Parameters for simplification, smoothing, previews and commit.
///
/// Every field has a default, so partial JSON documents are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// RDP tolerance applied when a stroke is finalized.
    pub simplify_epsilon: f64,
    /// Smoothing tension for committed strokes.
    pub render_tension: f64,
    /// Smoothing tension for the live stroke.
    pub preview_tension: f64,
    /// The live buffer must hold more points than this before previews run.
    pub preview_min_points: usize,
    /// Previews are shown only above this confidence.
    pub preview_confidence: f64,
    /// Committed shapes need at least this confidence.
    pub commit_confidence: f64,
    /// Samples closer than this to the previous one are dropped (0 keeps all).
    pub min_point_distance: f64,
    /// Per-analyzer acceptance thresholds.
    pub thresholds: Thresholds,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            simplify_epsilon: DEFAULT_EPSILON,
            render_tension: DEFAULT_TENSION,
            preview_tension: DEFAULT_TENSION,
            preview_min_points: 10,
            preview_confidence: 0.5,
            commit_confidence: 0.6,
            min_point_distance: 0.0,
            thresholds: Thresholds::default(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::debug!("Loaded engine config from {}", path.display());
        Ok(config)
    }

    /// Check that every value is finite and in range.
    pub fn validate(&self) -> ConfigResult<()> {
        non_negative("simplify_epsilon", self.simplify_epsilon)?;
        non_negative("render_tension", self.render_tension)?;
        non_negative("preview_tension", self.preview_tension)?;
        non_negative("min_point_distance", self.min_point_distance)?;
        unit_interval("preview_confidence", self.preview_confidence)?;
        unit_interval("commit_confidence", self.commit_confidence)?;
        unit_interval("thresholds.line_straightness", self.thresholds.line_straightness)?;
        unit_interval("thresholds.circle", self.thresholds.circle)?;
        unit_interval("thresholds.rectangle", self.thresholds.rectangle)?;
        unit_interval("thresholds.triangle", self.thresholds.triangle)?;
        Ok(())
    }
}

fn non_negative(field: &'static str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a finite value >= 0, got {}", value),
        })
    }
}

fn unit_interval(field: &'static str, value: f64) -> ConfigResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a value in [0, 1], got {}", value),
        })
    }
}
