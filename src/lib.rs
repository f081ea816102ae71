//! Fit Scorer Rust Implementation
//!
//! Garment fit classification: compares a person's body measurements against
//! a garment's measurements and reports how it will fit.
//!
//! Layout:
//! - `measurements/`: dimension vocabulary and flat measurement records
//! - `comparator/`: per-dimension labels and severity grading
//! - `archetype/`: garment categories and their dimension tables
//! - `strategy/`: label-count and averaged-band aggregation
//! - `description/`: summaries, problem areas, recommendations
//! - `calculator/`: entry points tying the above together
//! - `size_lookup/`: brand size charts with a synthetic fallback
//! - `size_recommender/`: per-brand size sheet from body measurements
//! - `profile/`: saved measurement profile
//! - `config/`: tolerance and band thresholds

pub mod archetype;
pub mod calculator;
pub mod comparator;
pub mod config;
pub mod description;
pub mod error;
pub mod measurements;
pub mod profile;
pub mod size_lookup;
pub mod size_recommender;
pub mod strategy;

// Re-export commonly used types
pub use archetype::{Archetype, DimensionSlot};
pub use calculator::{FitAnalysis, FitCalculator, FitResult, SourcedAnalysis};
pub use comparator::{
    compare, compare_opt, DimensionComparison, DimensionSeverity, FitLabel, Severity,
};
pub use config::{FitConfig, Tolerance};
pub use description::{FitDescription, SizeAdjustment};
pub use error::{FitError, Result};
pub use measurements::{Dimension, DimensionKind, MeasurementRecord};
pub use profile::{MeasurementProfile, ProfileStore};
pub use size_lookup::{Brand, GarmentSource, MeasurementOrigin, ResolvedGarment, SizeLookupResolver};
pub use size_recommender::{recommend_sizes, SizeCategory, SizeProfile};
pub use strategy::{
    AveragedBandStrategy, FitStrategy, LabelCountStrategy, OverallFit, StrategyKind, Verdict,
};
