//! Threshold configuration
//!
//! Every tolerance used by the comparator and the two aggregation strategies,
//! with defaults matching the reference sizing rules. Overrides come from the
//! environment or a JSON file.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::error::{FitError, Result};

/// Two-step tolerance: within `perfect` → Perfect, within `regular` → Regular
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tolerance {
    pub perfect: f64,
    pub regular: f64,
}

impl Tolerance {
    /// Garment dimensions, in inches
    pub const INCHES: Tolerance = Tolerance { perfect: 1.0, regular: 2.0 };

    /// Shoe sizes, in size units
    pub const SHOE_SIZE: Tolerance = Tolerance { perfect: 0.5, regular: 1.0 };
}

/// Per-field severity bands used by the analyzer details
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityBands {
    pub perfect: f64,
    pub slight: f64,
    pub moderate: f64,
}

impl Default for SeverityBands {
    fn default() -> Self {
        Self { perfect: 0.5, slight: 1.0, moderate: 2.0 }
    }
}

/// Bands applied to the mean absolute difference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AveragedBands {
    pub perfect: f64,
    pub good: f64,
    pub loose: f64,
}

impl Default for AveragedBands {
    fn default() -> Self {
        Self { perfect: 0.5, good: 1.5, loose: 3.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FitConfig {
    pub tolerance: Tolerance,
    pub shoe_tolerance: Tolerance,
    pub severity: SeverityBands,
    pub averaged: AveragedBands,
}

impl Default for FitConfig {
    fn default() -> Self {
        Self {
            tolerance: Tolerance::INCHES,
            shoe_tolerance: Tolerance::SHOE_SIZE,
            severity: SeverityBands::default(),
            averaged: AveragedBands::default(),
        }
    }
}

fn env_f64(name: &str) -> Option<f64> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn ascending(name: &str, values: &[f64]) -> Result<()> {
    let ok = values.iter().all(|v| v.is_finite() && *v >= 0.0)
        && values.windows(2).all(|w| w[0] < w[1]);
    if ok {
        Ok(())
    } else {
        Err(FitError::InvalidConfig(format!(
            "{} thresholds must be non-negative and strictly increasing, got {:?}",
            name, values
        )))
    }
}

impl FitConfig {
    /// Defaults with overrides from environment variables
    ///
    /// Unset or unparsable variables keep the default.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(v) = env_f64("FIT_PERFECT_TOLERANCE") {
            config.tolerance.perfect = v;
        }
        if let Some(v) = env_f64("FIT_REGULAR_TOLERANCE") {
            config.tolerance.regular = v;
        }
        if let Some(v) = env_f64("FIT_SHOE_PERFECT_TOLERANCE") {
            config.shoe_tolerance.perfect = v;
        }
        if let Some(v) = env_f64("FIT_SHOE_REGULAR_TOLERANCE") {
            config.shoe_tolerance.regular = v;
        }

        config
    }

    /// Load from a JSON file; missing sections take their defaults
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read fit config {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse fit config {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ascending("tolerance", &[self.tolerance.perfect, self.tolerance.regular])?;
        ascending(
            "shoe_tolerance",
            &[self.shoe_tolerance.perfect, self.shoe_tolerance.regular],
        )?;
        ascending(
            "severity",
            &[self.severity.perfect, self.severity.slight, self.severity.moderate],
        )?;
        ascending(
            "averaged",
            &[self.averaged.perfect, self.averaged.good, self.averaged.loose],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let config = FitConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.tolerance, Tolerance { perfect: 1.0, regular: 2.0 });
        assert_eq!(config.shoe_tolerance, Tolerance { perfect: 0.5, regular: 1.0 });
    }

    #[test]
    fn test_rejects_inverted_bands() {
        let mut config = FitConfig::default();
        config.averaged.good = 0.2;
        assert!(matches!(config.validate(), Err(FitError::InvalidConfig(_))));
    }

    #[test]
    fn test_partial_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "tolerance": {{ "perfect": 0.75, "regular": 1.5 }} }}"#).unwrap();

        let config = FitConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.tolerance.perfect, 0.75);
        assert_eq!(config.shoe_tolerance, Tolerance::SHOE_SIZE);
        assert_eq!(config.averaged, AveragedBands::default());
    }

    #[test]
    fn test_invalid_json_file_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "tolerance": {{ "perfect": 3.0, "regular": 1.0 }} }}"#).unwrap();

        assert!(FitConfig::from_json_file(file.path()).is_err());
    }
}
