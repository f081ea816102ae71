//! Dimension Comparator
//!
//! Core logic for comparing one user measurement against the matching garment
//! measurement. The signed difference is always `garment - user`, so a
//! positive value means the garment is bigger than the body.

use serde::{Deserialize, Serialize};

use crate::config::{SeverityBands, Tolerance};
use crate::measurements::{Dimension, DimensionKind};

/// Per-dimension fit classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FitLabel {
    /// Within the tight tolerance
    Perfect,
    /// Within the wider tolerance
    Regular,
    /// Girth or shoe size smaller than the body
    Tight,
    /// Girth or shoe size larger than the body
    Loose,
    /// Length shorter than the body
    Short,
    /// Length longer than the body
    Long,
}

impl FitLabel {
    pub fn display_text(&self) -> &'static str {
        match self {
            FitLabel::Perfect => "Perfect",
            FitLabel::Regular => "Regular",
            FitLabel::Tight => "Tight",
            FitLabel::Loose => "Loose",
            FitLabel::Short => "Short",
            FitLabel::Long => "Long",
        }
    }

    /// Garment smaller than the body in this dimension
    pub fn is_tight_like(&self) -> bool {
        matches!(self, FitLabel::Tight | FitLabel::Short)
    }

    /// Garment larger than the body in this dimension
    pub fn is_loose_like(&self) -> bool {
        matches!(self, FitLabel::Loose | FitLabel::Long)
    }

    /// Outside tolerance in either direction
    pub fn is_problem(&self) -> bool {
        self.is_tight_like() || self.is_loose_like()
    }
}

/// Result of comparing one dimension
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionComparison {
    /// Garment dimension that was compared
    pub dimension: Dimension,

    /// User's body value
    pub user: f64,

    /// Garment value
    pub garment: f64,

    /// `garment - user`
    pub difference: f64,

    /// `|garment - user|`
    pub abs_difference: f64,

    pub fit: FitLabel,
}

impl DimensionComparison {
    pub fn is_within_tolerance(&self) -> bool {
        !self.fit.is_problem()
    }

    /// Format for display, e.g. "chest: garment 41.0 vs body 42.0 (-1.0)"
    pub fn format_with_context(&self) -> String {
        format!(
            "{}: garment {:.1} vs body {:.1} ({:+.1})",
            self.dimension, self.garment, self.user, self.difference
        )
    }
}

/// Classify a signed difference
///
/// Boundaries are inclusive: a difference of exactly `tolerance.regular`
/// is still Regular.
pub fn classify(difference: f64, kind: DimensionKind, tolerance: Tolerance) -> FitLabel {
    let abs = difference.abs();

    if abs <= tolerance.perfect {
        FitLabel::Perfect
    } else if abs <= tolerance.regular {
        FitLabel::Regular
    } else {
        match kind {
            DimensionKind::Girth | DimensionKind::ShoeSize => {
                if difference > 0.0 {
                    FitLabel::Loose
                } else {
                    FitLabel::Tight
                }
            }
            DimensionKind::Length => {
                if difference > 0.0 {
                    FitLabel::Long
                } else {
                    FitLabel::Short
                }
            }
        }
    }
}

/// Compare a user value against a garment value
///
/// # Arguments
/// * `dimension` - Garment dimension being compared
/// * `user` - User's body measurement
/// * `garment` - Garment measurement
/// * `kind` - Girth / length / shoe-size semantics for the directional label
/// * `tolerance` - Perfect and Regular thresholds
///
/// Inputs are expected to be finite and positive; use [`compare_opt`] to
/// skip missing values.
pub fn compare(
    dimension: Dimension,
    user: f64,
    garment: f64,
    kind: DimensionKind,
    tolerance: Tolerance,
) -> DimensionComparison {
    let difference = garment - user;

    DimensionComparison {
        dimension,
        user,
        garment,
        difference,
        abs_difference: difference.abs(),
        fit: classify(difference, kind, tolerance),
    }
}

/// Compare with skip semantics for missing data
/// Returns None if either side is absent, non-positive, or not finite
pub fn compare_opt(
    dimension: Dimension,
    user: Option<f64>,
    garment: Option<f64>,
    kind: DimensionKind,
    tolerance: Tolerance,
) -> Option<DimensionComparison> {
    let usable = |v: f64| v.is_finite() && v > 0.0;
    match (user, garment) {
        (Some(u), Some(g)) if usable(u) && usable(g) => {
            Some(compare(dimension, u, g, kind, tolerance))
        }
        _ => None,
    }
}

// ============================================================================
// Severity Grading
// ============================================================================

/// Direction-free severity of a single difference
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Perfect,
    Slight,
    Moderate,
    Significant,
}

impl Severity {
    pub fn from_abs_difference(abs_difference: f64, bands: SeverityBands) -> Self {
        if abs_difference <= bands.perfect {
            Severity::Perfect
        } else if abs_difference <= bands.slight {
            Severity::Slight
        } else if abs_difference <= bands.moderate {
            Severity::Moderate
        } else {
            Severity::Significant
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            Severity::Perfect => "perfect",
            Severity::Slight => "slight",
            Severity::Moderate => "moderate",
            Severity::Significant => "significant",
        }
    }
}

/// Severity-graded comparison used by the analyzer details
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionSeverity {
    pub dimension: Dimension,
    pub user: f64,
    pub garment: f64,
    pub difference: f64,
    pub status: Severity,
}

impl DimensionSeverity {
    pub fn from_comparison(comp: &DimensionComparison, bands: SeverityBands) -> Self {
        Self {
            dimension: comp.dimension,
            user: comp.user,
            garment: comp.garment,
            difference: comp.difference,
            status: Severity::from_abs_difference(comp.abs_difference, bands),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INCHES: Tolerance = Tolerance::INCHES;

    fn girth(user: f64, garment: f64) -> DimensionComparison {
        compare(Dimension::Chest, user, garment, DimensionKind::Girth, INCHES)
    }

    #[test]
    fn test_within_perfect_tolerance() {
        for garment in [41.0, 41.5, 42.0, 42.7, 43.0] {
            assert_eq!(girth(42.0, garment).fit, FitLabel::Perfect, "garment {}", garment);
        }
    }

    #[test]
    fn test_regular_band_is_inclusive() {
        assert_eq!(girth(42.0, 44.0).fit, FitLabel::Regular);
        assert_eq!(girth(42.0, 40.0).fit, FitLabel::Regular);
        assert_eq!(girth(42.0, 43.5).fit, FitLabel::Regular);
    }

    #[test]
    fn test_girth_direction() {
        let loose = girth(34.0, 38.0);
        assert_eq!(loose.fit, FitLabel::Loose);
        assert_eq!(loose.difference, 4.0);
        assert_eq!(loose.abs_difference, 4.0);

        let tight = girth(34.0, 31.5);
        assert_eq!(tight.fit, FitLabel::Tight);
        assert_eq!(tight.difference, -2.5);
    }

    #[test]
    fn test_length_direction() {
        let long = compare(Dimension::Sleeve, 34.0, 36.5, DimensionKind::Length, INCHES);
        assert_eq!(long.fit, FitLabel::Long);

        let short = compare(Dimension::Inseam, 32.0, 29.0, DimensionKind::Length, INCHES);
        assert_eq!(short.fit, FitLabel::Short);
    }

    #[test]
    fn test_shoe_size_thresholds() {
        let shoe = |garment| {
            let kind = DimensionKind::ShoeSize;
            compare(Dimension::ShoeSize, 9.0, garment, kind, Tolerance::SHOE_SIZE).fit
        };
        assert_eq!(shoe(9.0), FitLabel::Perfect);
        assert_eq!(shoe(9.5), FitLabel::Perfect);
        assert_eq!(shoe(10.0), FitLabel::Regular);
        assert_eq!(shoe(10.2), FitLabel::Loose);
        assert_eq!(shoe(7.5), FitLabel::Tight);
    }

    #[test]
    fn test_compare_opt_skips_missing() {
        let k = DimensionKind::Girth;
        assert!(compare_opt(Dimension::Waist, None, Some(30.0), k, INCHES).is_none());
        assert!(compare_opt(Dimension::Waist, Some(30.0), Some(0.0), k, INCHES).is_none());
        assert!(compare_opt(Dimension::Waist, Some(-1.0), Some(30.0), k, INCHES).is_none());
        let inf = Some(f64::INFINITY);
        assert!(compare_opt(Dimension::Waist, Some(30.0), inf, k, INCHES).is_none());
        assert!(compare_opt(Dimension::Waist, Some(30.0), Some(31.0), k, INCHES).is_some());
    }

    #[test]
    fn test_severity_bands() {
        let bands = SeverityBands::default();
        assert_eq!(Severity::from_abs_difference(0.5, bands), Severity::Perfect);
        assert_eq!(Severity::from_abs_difference(0.8, bands), Severity::Slight);
        assert_eq!(Severity::from_abs_difference(2.0, bands), Severity::Moderate);
        assert_eq!(Severity::from_abs_difference(2.1, bands), Severity::Significant);
    }

    #[test]
    fn test_tolerance_and_display() {
        let regular = girth(42.0, 44.0);
        assert!(regular.is_within_tolerance());
        assert_eq!(regular.fit.display_text(), "Regular");

        let tight = girth(42.0, 39.0);
        assert!(!tight.is_within_tolerance());
        assert_eq!(tight.fit.display_text(), "Tight");

        let bands = SeverityBands::default();
        let graded = DimensionSeverity::from_comparison(&tight, bands);
        assert_eq!(graded.status, Severity::Significant);
        assert_eq!(graded.status.display_text(), "significant");
        assert_eq!(Severity::Slight.display_text(), "slight");
    }

    #[test]
    fn test_format_with_context() {
        assert_eq!(
            girth(42.0, 41.0).format_with_context(),
            "chest: garment 41.0 vs body 42.0 (-1.0)"
        );
    }
}
