//! Measurement Records
//!
//! Flat dimension → value records for a person's body or a garment. Records
//! arrive from collaborators (profile forms, size charts, scans) as loose JSON
//! objects; anything that is not a recognised numeric dimension is ignored.

use std::collections::BTreeMap;
use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FitError, Result};

/// A body or garment dimension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Chest,
    Bust,
    Waist,
    Hip,
    Shoulder,
    Sleeve,
    Inseam,
    /// Shoe size in size units, not inches
    #[serde(rename = "size")]
    ShoeSize,
    FootLength,
    Height,
    Weight,
}

/// How a dimension is classified once it falls outside tolerance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DimensionKind {
    /// Circumference: more garment means looser (Tight/Loose)
    Girth,
    /// Linear: more garment means longer (Short/Long)
    Length,
    /// Size units with their own tolerance (Tight/Loose)
    ShoeSize,
}

impl Dimension {
    pub const ALL: [Dimension; 11] = [
        Dimension::Chest,
        Dimension::Bust,
        Dimension::Waist,
        Dimension::Hip,
        Dimension::Shoulder,
        Dimension::Sleeve,
        Dimension::Inseam,
        Dimension::ShoeSize,
        Dimension::FootLength,
        Dimension::Height,
        Dimension::Weight,
    ];

    /// Canonical record key
    pub fn key(&self) -> &'static str {
        match self {
            Dimension::Chest => "chest",
            Dimension::Bust => "bust",
            Dimension::Waist => "waist",
            Dimension::Hip => "hip",
            Dimension::Shoulder => "shoulder",
            Dimension::Sleeve => "sleeve",
            Dimension::Inseam => "inseam",
            Dimension::ShoeSize => "size",
            Dimension::FootLength => "footLength",
            Dimension::Height => "height",
            Dimension::Weight => "weight",
        }
    }

    /// Resolve a record key, accepting the plural and camel/snake variants
    /// that different collaborators emit.
    pub fn from_key(key: &str) -> Option<Self> {
        let dim = match key.trim() {
            "chest" => Dimension::Chest,
            "bust" => Dimension::Bust,
            "waist" => Dimension::Waist,
            "hip" | "hips" => Dimension::Hip,
            "shoulder" | "shoulders" => Dimension::Shoulder,
            "sleeve" | "sleeves" => Dimension::Sleeve,
            "inseam" => Dimension::Inseam,
            "size" | "shoeSize" | "shoe_size" => Dimension::ShoeSize,
            "footLength" | "foot_length" => Dimension::FootLength,
            "height" => Dimension::Height,
            "weight" => Dimension::Weight,
            _ => return None,
        };
        Some(dim)
    }

    pub fn kind(&self) -> DimensionKind {
        match self {
            Dimension::Chest | Dimension::Bust | Dimension::Waist | Dimension::Hip => {
                DimensionKind::Girth
            }
            Dimension::ShoeSize => DimensionKind::ShoeSize,
            Dimension::Shoulder
            | Dimension::Sleeve
            | Dimension::Inseam
            | Dimension::FootLength
            | Dimension::Height
            | Dimension::Weight => DimensionKind::Length,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Extract a numeric value from a loose JSON value.
/// Handles both numeric JSON values and string-encoded numbers.
fn value_as_f64(v: &Value) -> Option<f64> {
    v.as_f64()
        .or_else(|| v.as_str().and_then(|s| s.trim().parse::<f64>().ok()))
}

/// Mapping from dimension to measured value
///
/// Values are stored as given; `get` hides anything that cannot take part in
/// a comparison (absent, zero, negative, NaN, infinite).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, Value>", into = "BTreeMap<String, f64>")]
pub struct MeasurementRecord {
    values: FxHashMap<Dimension, f64>,
}

impl MeasurementRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, dimension: Dimension, value: f64) -> Self {
        self.values.insert(dimension, value);
        self
    }

    pub fn insert(&mut self, dimension: Dimension, value: f64) {
        self.values.insert(dimension, value);
    }

    /// Comparable value for `dimension`, or `None` if it must be skipped
    pub fn get(&self, dimension: Dimension) -> Option<f64> {
        self.values
            .get(&dimension)
            .copied()
            .filter(|v| v.is_finite() && *v > 0.0)
    }

    /// Raw stored value, including unusable ones
    pub fn raw(&self, dimension: Dimension) -> Option<f64> {
        self.values.get(&dimension).copied()
    }

    pub fn has(&self, dimension: Dimension) -> bool {
        self.get(dimension).is_some()
    }

    /// Dimensions with comparable values, in canonical order
    pub fn dimensions(&self) -> impl Iterator<Item = Dimension> + '_ {
        Dimension::ALL.into_iter().filter(move |d| self.has(*d))
    }

    /// Number of comparable dimensions
    pub fn len(&self) -> usize {
        self.dimensions().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Strict check for callers that want to reject bad input up front
    /// instead of silently skipping it.
    pub fn validate(&self) -> Result<()> {
        for dim in Dimension::ALL {
            if let Some(v) = self.raw(dim) {
                if !v.is_finite() || v < 0.0 {
                    return Err(FitError::invalid_measurement(dim, v));
                }
            }
        }
        Ok(())
    }

    /// Build from a flat JSON object, ignoring unknown keys and non-numeric values
    ///
    /// When several keys name the same dimension (`hip` and `hips`), a usable
    /// value beats an unusable one, then the canonical key beats an alias.
    /// Remaining ties go to the first key in sorted order.
    pub fn from_json_map(data: &BTreeMap<String, Value>) -> Self {
        let mut chosen: FxHashMap<Dimension, ((bool, bool), f64)> = FxHashMap::default();

        for (key, value) in data {
            let (Some(dim), Some(v)) = (Dimension::from_key(key), value_as_f64(value)) else {
                continue;
            };
            let rank = (v.is_finite() && v > 0.0, key.trim() == dim.key());
            match chosen.get(&dim) {
                Some((best, _)) if *best >= rank => {}
                _ => {
                    chosen.insert(dim, (rank, v));
                }
            }
        }

        chosen.into_iter().map(|(dim, (_, v))| (dim, v)).collect()
    }

    /// Parse from a JSON document
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

impl From<BTreeMap<String, Value>> for MeasurementRecord {
    fn from(data: BTreeMap<String, Value>) -> Self {
        Self::from_json_map(&data)
    }
}

impl From<MeasurementRecord> for BTreeMap<String, f64> {
    fn from(record: MeasurementRecord) -> Self {
        record
            .values
            .into_iter()
            .filter(|(_, v)| v.is_finite())
            .map(|(dim, v)| (dim.key().to_string(), v))
            .collect()
    }
}

impl FromIterator<(Dimension, f64)> for MeasurementRecord {
    fn from_iter<I: IntoIterator<Item = (Dimension, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
