//! Error types for fit scoring.

use thiserror::Error;

use crate::measurements::Dimension;

/// Errors raised by the fit scoring core.
///
/// A missing or non-positive measurement is not an error: the affected
/// dimension is skipped and reported on the result instead.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FitError {
    /// Archetype string is not one of the known garment categories.
    #[error("Invalid garment type: '{0}'")]
    InvalidArchetype(String),

    /// A measurement failed strict validation.
    #[error("Invalid measurement for {dimension}: {value}")]
    InvalidMeasurement {
        /// Dimension carrying the bad value
        dimension: Dimension,
        /// Offending value
        value: f64,
    },

    /// Threshold configuration is not strictly increasing.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl FitError {
    /// Create an InvalidArchetype error.
    pub fn invalid_archetype(raw: &str) -> Self {
        Self::InvalidArchetype(raw.to_string())
    }

    /// Create an InvalidMeasurement error.
    pub fn invalid_measurement(dimension: Dimension, value: f64) -> Self {
        Self::InvalidMeasurement { dimension, value }
    }
}

/// Result alias for fit scoring operations.
pub type Result<T> = std::result::Result<T, FitError>;
