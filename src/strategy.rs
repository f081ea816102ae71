//! Fit Aggregation Strategies
//!
//! Two ways of turning a set of per-dimension comparisons into one overall
//! verdict. They are deliberately kept apart: on mixed tight/loose input they
//! disagree, and callers pick one explicitly.
//!
//! - [`LabelCountStrategy`]: counts per-dimension labels; tight beats loose.
//! - [`AveragedBandStrategy`]: classifies the mean absolute difference.

use serde::{Deserialize, Serialize};

use crate::comparator::{DimensionComparison, FitLabel};
use crate::config::AveragedBands;

/// Overall verdict for a garment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OverallFit {
    Perfect,
    /// Label-count strategy: every dimension within the wider tolerance
    Regular,
    /// Averaged-band strategy: mean difference within the second band
    Good,
    Tight,
    Loose,
}

impl OverallFit {
    pub fn display_text(&self) -> &'static str {
        match self {
            OverallFit::Perfect => "Perfect",
            OverallFit::Regular => "Regular",
            OverallFit::Good => "Good",
            OverallFit::Tight => "Tight",
            OverallFit::Loose => "Loose",
        }
    }
}

/// Which aggregation produced a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    LabelCount,
    AveragedBand,
}

impl StrategyKind {
    /// Parse a caller-facing strategy name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "label" | "label_count" | "labels" => Some(StrategyKind::LabelCount),
            "averaged" | "averaged_band" | "average" | "avg" => Some(StrategyKind::AveragedBand),
            _ => None,
        }
    }
}

/// Aggregated result
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub fit: OverallFit,
    pub strategy: StrategyKind,
    /// Number of comparisons that went into the verdict
    pub contributing: usize,
    /// Mean absolute difference over the contributing comparisons (0 if none)
    pub mean_abs_difference: f64,
}

impl Verdict {
    /// True when no dimension could be compared and the verdict is the
    /// strategy's neutral default
    pub fn is_neutral_default(&self) -> bool {
        self.contributing == 0
    }
}

fn mean_abs_difference(comparisons: &[DimensionComparison]) -> f64 {
    if comparisons.is_empty() {
        return 0.0;
    }
    let total: f64 = comparisons.iter().map(|c| c.abs_difference).sum();
    total / comparisons.len() as f64
}

/// Aggregates per-dimension comparisons into an overall verdict
pub trait FitStrategy: Send + Sync {
    fn kind(&self) -> StrategyKind;

    /// Must not depend on the order of `comparisons`
    fn evaluate(&self, comparisons: &[DimensionComparison]) -> Verdict;
}

// ============================================================================
// Label-count strategy
// ============================================================================

/// Label tallies for a set of comparisons
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LabelCounts {
    pub perfect: usize,
    pub regular: usize,
    pub tight_like: usize,
    pub loose_like: usize,
}

impl LabelCounts {
    pub fn tally<'a>(labels: impl IntoIterator<Item = &'a FitLabel>) -> Self {
        let mut counts = Self::default();
        for label in labels {
            match label {
                FitLabel::Perfect => counts.perfect += 1,
                FitLabel::Regular => counts.regular += 1,
                FitLabel::Tight | FitLabel::Short => counts.tight_like += 1,
                FitLabel::Loose | FitLabel::Long => counts.loose_like += 1,
            }
        }
        counts
    }

    pub fn total(&self) -> usize {
        self.perfect + self.regular + self.tight_like + self.loose_like
    }
}

/// Overall fit from discrete label counts
///
/// All Perfect → Perfect; all Perfect/Regular → Regular; any tight-like →
/// Tight, even when loose-like labels are also present; otherwise Loose.
/// An empty set is Regular.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabelCountStrategy;

impl LabelCountStrategy {
    pub fn overall_from_labels<'a>(labels: impl IntoIterator<Item = &'a FitLabel>) -> OverallFit {
        let counts = LabelCounts::tally(labels);
        let total = counts.total();

        if total == 0 {
            OverallFit::Regular
        } else if counts.perfect == total {
            OverallFit::Perfect
        } else if counts.perfect + counts.regular == total {
            OverallFit::Regular
        } else if counts.tight_like > 0 {
            OverallFit::Tight
        } else if counts.loose_like > 0 {
            OverallFit::Loose
        } else {
            OverallFit::Regular
        }
    }
}

impl FitStrategy for LabelCountStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::LabelCount
    }

    fn evaluate(&self, comparisons: &[DimensionComparison]) -> Verdict {
        Verdict {
            fit: Self::overall_from_labels(comparisons.iter().map(|c| &c.fit)),
            strategy: StrategyKind::LabelCount,
            contributing: comparisons.len(),
            mean_abs_difference: mean_abs_difference(comparisons),
        }
    }
}

// ============================================================================
// Averaged-band strategy
// ============================================================================

/// Overall fit from the mean absolute difference
///
/// Direction is ignored: a mix of tight and loose dimensions can average out
/// to Good, and anything beyond the third band reads as Tight. An empty set
/// is Good.
#[derive(Debug, Clone, Copy, Default)]
pub struct AveragedBandStrategy {
    pub bands: AveragedBands,
}

impl AveragedBandStrategy {
    pub fn new(bands: AveragedBands) -> Self {
        Self { bands }
    }

    pub fn band_for(&self, mean: f64) -> OverallFit {
        if mean <= self.bands.perfect {
            OverallFit::Perfect
        } else if mean <= self.bands.good {
            OverallFit::Good
        } else if mean <= self.bands.loose {
            OverallFit::Loose
        } else {
            OverallFit::Tight
        }
    }
}

impl FitStrategy for AveragedBandStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::AveragedBand
    }

    fn evaluate(&self, comparisons: &[DimensionComparison]) -> Verdict {
        let mean = mean_abs_difference(comparisons);
        let fit = if comparisons.is_empty() {
            OverallFit::Good
        } else {
            self.band_for(mean)
        };

        Verdict {
            fit,
            strategy: StrategyKind::AveragedBand,
            contributing: comparisons.len(),
            mean_abs_difference: mean,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::compare;
    use crate::config::Tolerance;
    use crate::measurements::{Dimension, DimensionKind};
    use approx::assert_relative_eq;

    fn chest(user: f64, garment: f64) -> DimensionComparison {
        compare(Dimension::Chest, user, garment, DimensionKind::Girth, Tolerance::INCHES)
    }

    fn labels(fits: &[FitLabel]) -> OverallFit {
        LabelCountStrategy::overall_from_labels(fits.iter())
    }

    #[test]
    fn test_all_perfect() {
        assert_eq!(labels(&[FitLabel::Perfect, FitLabel::Perfect]), OverallFit::Perfect);
    }

    #[test]
    fn test_perfect_and_regular() {
        assert_eq!(labels(&[FitLabel::Perfect, FitLabel::Regular]), OverallFit::Regular);
        assert_eq!(labels(&[FitLabel::Regular]), OverallFit::Regular);
    }

    #[test]
    fn test_tight_beats_loose() {
        assert_eq!(
            labels(&[FitLabel::Loose, FitLabel::Short, FitLabel::Perfect]),
            OverallFit::Tight
        );
        assert_eq!(labels(&[FitLabel::Long, FitLabel::Tight]), OverallFit::Tight);
        assert_eq!(labels(&[FitLabel::Long, FitLabel::Regular]), OverallFit::Loose);
    }

    #[test]
    fn test_order_independent() {
        let set = [
            FitLabel::Perfect,
            FitLabel::Loose,
            FitLabel::Regular,
            FitLabel::Short,
        ];
        let expected = labels(&set);
        let mut rotated = set;
        for _ in 0..set.len() {
            rotated.rotate_left(1);
            assert_eq!(labels(&rotated), expected);
        }
        let mut reversed = set;
        reversed.reverse();
        assert_eq!(labels(&reversed), expected);
    }

    #[test]
    fn test_empty_is_neutral() {
        let verdict = LabelCountStrategy.evaluate(&[]);
        assert_eq!(verdict.fit, OverallFit::Regular);
        assert!(verdict.is_neutral_default());

        let verdict = AveragedBandStrategy::default().evaluate(&[]);
        assert_eq!(verdict.fit, OverallFit::Good);
        assert_eq!(verdict.mean_abs_difference, 0.0);
        assert!(verdict.is_neutral_default());
    }

    #[test]
    fn test_averaged_bands() {
        let strategy = AveragedBandStrategy::default();
        assert_eq!(strategy.band_for(0.5), OverallFit::Perfect);
        assert_eq!(strategy.band_for(1.5), OverallFit::Good);
        assert_eq!(strategy.band_for(3.0), OverallFit::Loose);
        assert_eq!(strategy.band_for(3.1), OverallFit::Tight);
    }

    #[test]
    fn test_strategies_diverge_on_mixed_input() {
        // +2 and -2: each Regular by label, mean 2.0 by magnitude
        let comps = [chest(40.0, 42.0), chest(40.0, 38.0)];

        let by_label = LabelCountStrategy.evaluate(&comps);
        let by_mean = AveragedBandStrategy::default().evaluate(&comps);

        assert_eq!(by_label.fit, OverallFit::Regular);
        assert_eq!(by_mean.fit, OverallFit::Loose);
        assert_relative_eq!(by_mean.mean_abs_difference, 2.0, epsilon = 1e-9);
        assert_eq!(by_label.strategy, StrategyKind::LabelCount);
        assert_eq!(by_mean.strategy, StrategyKind::AveragedBand);
    }

    #[test]
    fn test_averaged_ignores_direction() {
        // Tight by +/-3 each way still reads Loose on average
        let comps = [chest(40.0, 43.0), chest(40.0, 37.0)];
        assert_eq!(LabelCountStrategy.evaluate(&comps).fit, OverallFit::Tight);
        assert_eq!(AveragedBandStrategy::default().evaluate(&comps).fit, OverallFit::Loose);
    }

    #[test]
    fn test_strategy_names() {
        assert_eq!(StrategyKind::from_name("label"), Some(StrategyKind::LabelCount));
        assert_eq!(StrategyKind::from_name("Averaged"), Some(StrategyKind::AveragedBand));
        assert_eq!(StrategyKind::from_name("median"), None);
    }
}
