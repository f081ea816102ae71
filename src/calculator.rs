//! Fit Calculator
//!
//! Entry points that tie the pieces together: resolve the archetype, compare
//! each slot, aggregate with a strategy, and describe the outcome.
//!
//! - [`FitCalculator::calculate_fit`]: label-count verdict with description
//! - [`FitCalculator::analyze_fit`]: averaged-band verdict with severity
//!   details and recommendations
//! - [`FitCalculator::evaluate`]: caller-selected strategy over the label table

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::archetype::{Archetype, DimensionSlot};
use crate::comparator::{compare, compare_opt, DimensionComparison, DimensionSeverity};
use crate::config::{FitConfig, Tolerance};
use crate::description::{describe, recommendations, FitDescription};
use crate::error::Result;
use crate::measurements::{Dimension, DimensionKind, MeasurementRecord};
use crate::size_lookup::{GarmentSource, MeasurementOrigin};
use crate::strategy::{
    AveragedBandStrategy, FitStrategy, LabelCountStrategy, OverallFit, StrategyKind, Verdict,
};

/// Comparisons for one garment; archetypes have at most a handful of slots
pub type Comparisons = SmallVec<[DimensionComparison; 4]>;

/// Label-count calculation result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub archetype: Archetype,
    pub overall_fit: OverallFit,
    pub verdict: Verdict,
    /// Summary plus problem-area note, ready to display
    pub description: String,
    pub explanation: FitDescription,
    /// Compared slots in archetype order
    pub measurements: Comparisons,
    /// Slots skipped because a value was missing on either side
    pub skipped: Vec<Dimension>,
}

impl FitResult {
    pub fn comparison(&self, dimension: Dimension) -> Option<&DimensionComparison> {
        self.measurements.iter().find(|c| c.dimension == dimension)
    }
}

/// One entry of the averaged-band difference list
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifferenceEntry {
    pub dimension: Dimension,
    pub difference: f64,
    pub absolute: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallAnalysis {
    pub fit_level: OverallFit,
    pub avg_difference: f64,
    pub differences: Vec<DifferenceEntry>,
}

/// Averaged-band analysis result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitAnalysis {
    pub archetype: Archetype,
    pub overall: OverallAnalysis,
    pub verdict: Verdict,
    /// Every dimension measured on both sides, graded by severity
    pub details: Vec<DimensionSeverity>,
    pub recommendations: Vec<String>,
}

/// Analysis together with where the garment numbers came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcedAnalysis {
    pub analysis: FitAnalysis,
    pub origin: MeasurementOrigin,
}

/// Stateless calculator carrying its threshold configuration
#[derive(Debug, Clone, Default)]
pub struct FitCalculator {
    config: FitConfig,
}

impl FitCalculator {
    pub fn new(config: FitConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FitConfig {
        &self.config
    }

    fn tolerance_for(&self, kind: DimensionKind) -> Tolerance {
        match kind {
            DimensionKind::ShoeSize => self.config.shoe_tolerance,
            DimensionKind::Girth | DimensionKind::Length => self.config.tolerance,
        }
    }

    /// Strategy instance for `kind`, configured from this calculator
    pub fn strategy(&self, kind: StrategyKind) -> Box<dyn FitStrategy> {
        match kind {
            StrategyKind::LabelCount => Box::new(LabelCountStrategy),
            StrategyKind::AveragedBand => Box::new(AveragedBandStrategy::new(self.config.averaged)),
        }
    }

    /// Compare every slot that has usable values on both sides
    pub fn compare_slots(
        &self,
        slots: &[DimensionSlot],
        user: &MeasurementRecord,
        garment: &MeasurementRecord,
    ) -> (Comparisons, Vec<Dimension>) {
        let mut comparisons = Comparisons::new();
        let mut skipped = Vec::new();

        for slot in slots {
            match compare_opt(
                slot.garment,
                user.get(slot.user),
                garment.get(slot.garment),
                slot.kind,
                self.tolerance_for(slot.kind),
            ) {
                Some(comp) => comparisons.push(comp),
                None => skipped.push(slot.garment),
            }
        }

        if !skipped.is_empty() {
            tracing::warn!("Skipped dimensions with missing values: {:?}", skipped);
        }

        (comparisons, skipped)
    }

    /// Label-count fit for a named archetype
    ///
    /// Fails only when `archetype` is not a known garment category.
    pub fn calculate_fit(
        &self,
        user: &MeasurementRecord,
        garment: &MeasurementRecord,
        archetype: &str,
    ) -> Result<FitResult> {
        let archetype: Archetype = archetype.parse()?;
        Ok(self.calculate(archetype, user, garment))
    }

    /// Label-count fit for a parsed archetype
    pub fn calculate(
        &self,
        archetype: Archetype,
        user: &MeasurementRecord,
        garment: &MeasurementRecord,
    ) -> FitResult {
        let (measurements, skipped) = self.compare_slots(archetype.label_slots(), user, garment);
        let verdict = LabelCountStrategy.evaluate(&measurements);
        let explanation = describe(archetype, &measurements, &verdict);

        tracing::debug!(
            "{} fit: {} ({} compared, {} skipped)",
            archetype,
            verdict.fit.display_text(),
            verdict.contributing,
            skipped.len()
        );

        FitResult {
            archetype,
            overall_fit: verdict.fit,
            verdict,
            description: explanation.text(),
            explanation,
            measurements,
            skipped,
        }
    }

    /// Aggregate the label-table comparisons with a caller-chosen strategy
    pub fn evaluate(
        &self,
        user: &MeasurementRecord,
        garment: &MeasurementRecord,
        archetype: &str,
        strategy: &dyn FitStrategy,
    ) -> Result<Verdict> {
        let archetype: Archetype = archetype.parse()?;
        let (comparisons, _) = self.compare_slots(archetype.label_slots(), user, garment);
        Ok(strategy.evaluate(&comparisons))
    }

    /// Averaged-band analysis for a named archetype
    ///
    /// Unknown archetypes are rejected, same as [`Self::calculate_fit`].
    pub fn analyze_fit(
        &self,
        user: &MeasurementRecord,
        garment: &MeasurementRecord,
        archetype: &str,
    ) -> Result<FitAnalysis> {
        let archetype: Archetype = archetype.parse()?;
        Ok(self.analyze(archetype, user, garment))
    }

    /// Averaged-band analysis for a parsed archetype
    pub fn analyze(
        &self,
        archetype: Archetype,
        user: &MeasurementRecord,
        garment: &MeasurementRecord,
    ) -> FitAnalysis {
        let (comparisons, _) = self.compare_slots(archetype.averaged_slots(), user, garment);
        let verdict = AveragedBandStrategy::new(self.config.averaged).evaluate(&comparisons);

        let differences = comparisons
            .iter()
            .map(|c| DifferenceEntry {
                dimension: c.dimension,
                difference: c.difference,
                absolute: c.abs_difference,
            })
            .collect();

        tracing::debug!(
            "{} analysis: {} (mean {:.2} over {})",
            archetype,
            verdict.fit.display_text(),
            verdict.mean_abs_difference,
            verdict.contributing
        );

        FitAnalysis {
            archetype,
            overall: OverallAnalysis {
                fit_level: verdict.fit,
                avg_difference: verdict.mean_abs_difference,
                differences,
            },
            verdict,
            details: self.severity_details(user, garment),
            recommendations: recommendations(&verdict),
        }
    }

    /// Severity for every dimension present on both sides
    pub fn severity_details(
        &self,
        user: &MeasurementRecord,
        garment: &MeasurementRecord,
    ) -> Vec<DimensionSeverity> {
        user.dimensions()
            .filter_map(|dim| {
                let g = garment.get(dim)?;
                let u = user.get(dim)?;
                let comp = compare(dim, u, g, dim.kind(), self.tolerance_for(dim.kind()));
                Some(DimensionSeverity::from_comparison(&comp, self.config.severity))
            })
            .collect()
    }

    /// Resolve garment numbers from a data source, then analyze
    pub fn analyze_from_source<S: GarmentSource + ?Sized>(
        &self,
        user: &MeasurementRecord,
        source: &mut S,
        listing: &str,
        size_label: &str,
        archetype: &str,
    ) -> Result<SourcedAnalysis> {
        let archetype: Archetype = archetype.parse()?;
        let resolved = source.garment_measurements(listing, size_label, archetype);

        Ok(SourcedAnalysis {
            analysis: self.analyze(archetype, user, &resolved.measurements),
            origin: resolved.origin,
        })
    }
}
