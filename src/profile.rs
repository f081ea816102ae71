//! Saved Measurement Profile
//!
//! A single JSON document holding the user's measurements, when they were
//! saved, and the last computed fit result.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::calculator::FitResult;
use crate::measurements::MeasurementRecord;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementProfile {
    pub measurements: MeasurementRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    pub saved_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_result: Option<FitResult>,
}

impl MeasurementProfile {
    /// New profile stamped with the current time
    pub fn new(measurements: MeasurementRecord, gender: Option<String>) -> Self {
        Self {
            measurements,
            gender,
            saved_at: Utc::now(),
            last_result: None,
        }
    }
}

/// File-backed profile storage
#[derive(Debug, Clone)]
pub struct ProfileStore {
    path: PathBuf,
}

impl ProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the saved profile; `None` if nothing has been saved yet
    pub fn load(&self) -> Result<Option<MeasurementProfile>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read profile: {:?}", self.path))?;
        let profile = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse profile JSON: {:?}", self.path))?;

        Ok(Some(profile))
    }

    pub fn save(&self, profile: &MeasurementProfile) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create profile directory: {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(profile)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write profile: {:?}", self.path))?;

        tracing::debug!("Saved profile to {:?}", self.path);
        Ok(())
    }

    /// Replace the last computed result, keeping the measurements
    pub fn record_result(&self, result: FitResult) -> Result<()> {
        let Some(mut profile) = self.load()? else {
            anyhow::bail!("No saved profile at {:?}", self.path);
        };
        profile.last_result = Some(result);
        self.save(&profile)
    }

    /// Remove the saved profile; a missing file is not an error
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove profile: {:?}", self.path)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::FitCalculator;
    use crate::measurements::Dimension;
    use tempfile::TempDir;

    fn profile() -> MeasurementProfile {
        let measurements = MeasurementRecord::new()
            .with(Dimension::Chest, 40.5)
            .with(Dimension::Waist, 32.0);
        MeasurementProfile::new(measurements, Some("female".to_string()))
    }

    #[test]
    fn test_missing_profile_loads_as_none() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::new(dir.path().join("profile.json"));
        assert!(store.load().unwrap().is_none());
        assert!(store.clear().is_ok());
    }

    #[test]
    fn test_save_load_clear() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::new(dir.path().join("nested").join("profile.json"));
        let saved = profile();

        store.save(&saved).unwrap();
        assert_eq!(store.load().unwrap(), Some(saved));

        store.clear().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_record_result() {
        let dir = TempDir::new().unwrap();
        let store = ProfileStore::new(dir.path().join("profile.json"));
        let saved = profile();
        let garment = MeasurementRecord::new().with(Dimension::Chest, 41.0);
        let result = FitCalculator::default()
            .calculate_fit(&saved.measurements, &garment, "shirt")
            .unwrap();

        assert!(store.record_result(result.clone()).is_err());

        store.save(&saved).unwrap();
        store.record_result(result.clone()).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.last_result, Some(result));
        assert_eq!(loaded.measurements, saved.measurements);
    }

    #[test]
    fn test_corrupt_profile_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("profile.json");
        fs::write(&path, "{not json").unwrap();
        assert!(ProfileStore::new(path).load().is_err());
    }
}
