//! Recorded stroke files.

use crate::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use sketchsnap_core::Point;
use std::fs;
use std::path::Path;

/// A stroke as recorded on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrokeFile {
    pub points: Vec<Point>,
    /// Optional per-sample pressure; missing entries read as 1.0.
    #[serde(default)]
    pub pressures: Vec<f64>,
}

impl StrokeFile {
    pub fn load(path: &Path) -> CliResult<Self> {
        let json = fs::read_to_string(path)?;
        let stroke: Self = serde_json::from_str(&json)?;
        if stroke.points.is_empty() {
            return Err(CliError::EmptyStroke(path.display().to_string()));
        }
        log::debug!("Loaded {} samples from {}", stroke.points.len(), path.display());
        Ok(stroke)
    }

    /// Pressure of sample `i`.
    pub fn pressure(&self, i: usize) -> f64 {
        self.pressures.get(i).copied().unwrap_or(1.0)
    }
}
