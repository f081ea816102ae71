//! Description Generation
//!
//! Turns comparisons and a verdict into the text a shopper reads: a summary
//! sentence, itemized problem areas, a size-adjustment hint, and the
//! analyzer's recommendation lines.

use serde::{Deserialize, Serialize};

use crate::archetype::Archetype;
use crate::comparator::{DimensionComparison, FitLabel};
use crate::measurements::Dimension;
use crate::strategy::{OverallFit, Verdict};

/// Summary used when no template covers the verdict
pub const GENERIC_SUMMARY: &str = "Fit assessment complete.";

/// Direction to move in a size range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizeAdjustment {
    SizeUp,
    SizeDown,
}

impl SizeAdjustment {
    /// Tight → size up, Loose → size down, anything else → none
    pub fn for_fit(fit: OverallFit) -> Option<Self> {
        match fit {
            OverallFit::Tight => Some(SizeAdjustment::SizeUp),
            OverallFit::Loose => Some(SizeAdjustment::SizeDown),
            _ => None,
        }
    }

    pub fn display_text(&self) -> &'static str {
        match self {
            SizeAdjustment::SizeUp => "size up",
            SizeAdjustment::SizeDown => "size down",
        }
    }
}

/// Human-readable explanation of a fit result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitDescription {
    pub summary: String,
    pub problem_areas: Vec<String>,
    pub size_adjustment: Option<SizeAdjustment>,
}

impl FitDescription {
    /// Summary followed by a "Note:" listing the problem areas, if any
    pub fn text(&self) -> String {
        if self.problem_areas.is_empty() {
            self.summary.clone()
        } else {
            format!("{} Note: {}.", self.summary, self.problem_areas.join(", "))
        }
    }
}

// ============================================================================
// Summary templates
// ============================================================================

fn summary_template(archetype: Archetype, fit: OverallFit) -> Option<String> {
    let noun = archetype.noun_phrase();

    let text = match fit {
        OverallFit::Perfect => format!(
            "{} should fit you perfectly! All measurements are within ideal range.",
            noun
        ),
        OverallFit::Regular => format!("{} should fit well with a comfortable fit.", noun),
        OverallFit::Tight => format!(
            "{} may feel tight. Consider sizing up for better comfort.",
            noun
        ),
        OverallFit::Loose => match archetype {
            Archetype::Pants | Archetype::Shorts => format!(
                "{} may feel loose. Consider sizing down or using a belt.",
                noun
            ),
            _ => format!(
                "{} may feel loose. Consider sizing down for a better fit.",
                noun
            ),
        },
        // Good belongs to the averaged-band vocabulary, which has its own
        // recommendation lines
        OverallFit::Good => return None,
    };

    Some(text)
}

/// Shoe summaries depend on the size difference rather than a fixed template
fn shoe_summary(fit: OverallFit, size_difference: f64) -> String {
    match fit {
        OverallFit::Perfect => "These shoes should fit you perfectly!".to_string(),
        OverallFit::Regular if size_difference > 0.0 => {
            "These shoes are slightly larger than your usual size but should still fit comfortably."
                .to_string()
        }
        OverallFit::Regular => {
            "These shoes are slightly smaller than your usual size but may work with thin socks."
                .to_string()
        }
        OverallFit::Tight => format!(
            "These shoes are {:.1} size(s) smaller. They will likely be too tight.",
            size_difference.abs()
        ),
        OverallFit::Loose => format!(
            "These shoes are {:.1} size(s) larger. They will likely be too loose.",
            size_difference.abs()
        ),
        OverallFit::Good => GENERIC_SUMMARY.to_string(),
    }
}

// ============================================================================
// Problem areas
// ============================================================================

/// Phrase for an out-of-tolerance dimension, e.g. "chest is too tight"
pub fn problem_phrase(dimension: Dimension, label: FitLabel) -> Option<&'static str> {
    use Dimension::*;
    use FitLabel::*;

    let phrase = match (dimension, label) {
        (Chest, Tight) => "chest is too tight",
        (Chest, Loose) => "chest is too loose",
        (Bust, Tight) => "bust is too tight",
        (Bust, Loose) => "bust is too loose",
        (Waist, Tight) => "waist is too tight",
        (Waist, Loose) => "waist is too loose",
        (Hip, Tight) => "hips are too tight",
        (Hip, Loose) => "hips are too loose",
        (Shoulder, Short) => "shoulders are narrow",
        (Shoulder, Long) => "shoulders are wide",
        (Sleeve, Short) => "sleeves are short",
        (Sleeve, Long) => "sleeves are long",
        (Inseam, Short) => "length is short",
        (Inseam, Long) => "length is long",
        (FootLength, Short) => "foot length is short",
        (FootLength, Long) => "foot length is long",
        (ShoeSize, Tight) => "size is too small",
        (ShoeSize, Loose) => "size is too large",
        _ => return None,
    };

    Some(phrase)
}

/// Problem phrases ordered by the archetype's slot order
pub fn problem_areas(archetype: Archetype, comparisons: &[DimensionComparison]) -> Vec<String> {
    let mut problems: Vec<(usize, &'static str)> = comparisons
        .iter()
        .filter(|c| !c.is_within_tolerance())
        .filter_map(|c| {
            let order = archetype.slot_index(c.dimension).unwrap_or(usize::MAX);
            problem_phrase(c.dimension, c.fit).map(|p| (order, p))
        })
        .collect();

    // Stable: dimensions outside the table keep their input order at the end
    problems.sort_by_key(|(order, _)| *order);
    problems.into_iter().map(|(_, p)| p.to_string()).collect()
}

/// Build the full description for a label-count result
pub fn describe(
    archetype: Archetype,
    comparisons: &[DimensionComparison],
    verdict: &Verdict,
) -> FitDescription {
    let summary = match archetype {
        // Nothing was compared: no template applies
        _ if verdict.is_neutral_default() => GENERIC_SUMMARY.to_string(),
        Archetype::Shoes => {
            let diff = comparisons
                .iter()
                .find(|c| c.dimension == Dimension::ShoeSize)
                .map(|c| c.difference)
                .unwrap_or(0.0);
            shoe_summary(verdict.fit, diff)
        }
        _ => summary_template(archetype, verdict.fit)
            .unwrap_or_else(|| GENERIC_SUMMARY.to_string()),
    };

    // Shoe text already names the size gap
    let problem_areas = match archetype {
        Archetype::Shoes => Vec::new(),
        _ => problem_areas(archetype, comparisons),
    };

    FitDescription {
        summary,
        problem_areas,
        size_adjustment: SizeAdjustment::for_fit(verdict.fit),
    }
}

// ============================================================================
// Averaged-band recommendations
// ============================================================================

/// Recommendation lines for an averaged-band verdict
///
/// A verdict with nothing compared gets the generic summary only.
pub fn recommendations(verdict: &Verdict) -> Vec<String> {
    if verdict.is_neutral_default() {
        return vec![GENERIC_SUMMARY.to_string()];
    }

    let mut lines = Vec::new();
    let mean = verdict.mean_abs_difference;

    match verdict.fit {
        OverallFit::Perfect => {
            lines.push("Perfect match! This size should fit you exceptionally well.".to_string());
            if mean < 0.3 {
                lines.push("This is nearly a custom-tailored fit.".to_string());
            }
        }
        OverallFit::Good | OverallFit::Regular => {
            lines.push("Good fit! This size should work well for you.".to_string());
            if mean > 1.0 {
                lines.push("There might be slight room for adjustment.".to_string());
            }
        }
        OverallFit::Loose => {
            lines.push(
                "Loose fit. Consider sizing down or checking the product description.".to_string(),
            );
            lines.push(
                "This size provides extra room - good if you prefer comfortable fits.".to_string(),
            );
        }
        OverallFit::Tight => {
            lines.push("Tight fit. Consider sizing up to ensure comfort.".to_string());
            lines.push(
                "This might feel restrictive - check return policy if unsure.".to_string(),
            );
        }
    }

    lines
}

// ============================================================================
// Letter-size suggestion
// ============================================================================

const LETTER_SIZES: [&str; 7] = ["XS", "S", "M", "L", "XL", "XXL", "XXXL"];

/// Suggest a neighbouring letter size from tight/loose label counts
///
/// More tight-like than loose-like dimensions moves one size up; the reverse
/// moves one size down. Unknown sizes and the ends of the range stay put.
pub fn suggest_size(comparisons: &[DimensionComparison], current_size: &str) -> String {
    let current = current_size.trim().to_ascii_uppercase();
    let Some(index) = LETTER_SIZES.iter().position(|s| *s == current) else {
        return current_size.to_string();
    };

    let tight = comparisons.iter().filter(|c| c.fit.is_tight_like()).count();
    let loose = comparisons.iter().filter(|c| c.fit.is_loose_like()).count();

    let target = if tight > loose {
        (index + 1).min(LETTER_SIZES.len() - 1)
    } else if loose > tight {
        index.saturating_sub(1)
    } else {
        index
    };

    LETTER_SIZES[target].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparator::compare;
    use crate::config::Tolerance;
    use crate::measurements::DimensionKind;
    use crate::strategy::{AveragedBandStrategy, FitStrategy, LabelCountStrategy, StrategyKind};

    fn comp(dim: Dimension, user: f64, garment: f64) -> DimensionComparison {
        let tolerance = if dim == Dimension::ShoeSize {
            Tolerance::SHOE_SIZE
        } else {
            Tolerance::INCHES
        };
        compare(dim, user, garment, dim.kind(), tolerance)
    }

    fn verdict(fit: OverallFit, mean: f64) -> Verdict {
        Verdict {
            fit,
            strategy: StrategyKind::AveragedBand,
            contributing: 2,
            mean_abs_difference: mean,
        }
    }

    #[test]
    fn test_problem_areas_follow_slot_order() {
        // Discovery order: sleeve, chest
        let comps = [
            comp(Dimension::Sleeve, 34.0, 31.0),
            comp(Dimension::Chest, 42.0, 38.0),
        ];
        let problems = problem_areas(Archetype::Shirt, &comps);
        assert_eq!(problems, vec!["chest is too tight", "sleeves are short"]);
    }

    #[test]
    fn test_describe_pants_loose() {
        let comps = [
            comp(Dimension::Waist, 34.0, 38.0),
            comp(Dimension::Hip, 41.0, 42.0),
            comp(Dimension::Inseam, 32.0, 30.0),
        ];
        let v = LabelCountStrategy.evaluate(&comps);
        let desc = describe(Archetype::Pants, &comps, &v);

        assert_eq!(desc.problem_areas, vec!["waist is too loose"]);
        assert_eq!(desc.size_adjustment, Some(SizeAdjustment::SizeDown));
        assert_eq!(
            desc.text(),
            "These pants may feel loose. Consider sizing down or using a belt. \
             Note: waist is too loose."
        );
    }

    #[test]
    fn test_describe_shoes() {
        let comps = [comp(Dimension::ShoeSize, 9.0, 10.2)];
        let v = LabelCountStrategy.evaluate(&comps);
        let desc = describe(Archetype::Shoes, &comps, &v);
        assert_eq!(
            desc.summary,
            "These shoes are 1.2 size(s) larger. They will likely be too loose."
        );
        assert!(desc.problem_areas.is_empty());

        let comps = [comp(Dimension::ShoeSize, 9.0, 8.2)];
        let v = LabelCountStrategy.evaluate(&comps);
        assert!(describe(Archetype::Shoes, &comps, &v).summary.contains("slightly smaller"));
    }

    #[test]
    fn test_generic_summary_for_unmapped_verdict() {
        let desc = describe(Archetype::Dress, &[], &verdict(OverallFit::Good, 1.0));
        assert_eq!(desc.summary, GENERIC_SUMMARY);
        assert_eq!(desc.size_adjustment, None);
    }

    #[test]
    fn test_size_adjustment_text() {
        assert_eq!(SizeAdjustment::SizeUp.display_text(), "size up");
        assert_eq!(SizeAdjustment::SizeDown.display_text(), "size down");
    }

    #[test]
    fn test_size_adjustment() {
        assert_eq!(SizeAdjustment::for_fit(OverallFit::Tight), Some(SizeAdjustment::SizeUp));
        assert_eq!(SizeAdjustment::for_fit(OverallFit::Loose), Some(SizeAdjustment::SizeDown));
        assert_eq!(SizeAdjustment::for_fit(OverallFit::Perfect), None);
        assert_eq!(SizeAdjustment::for_fit(OverallFit::Regular), None);
    }

    #[test]
    fn test_recommendations() {
        let lines = recommendations(&verdict(OverallFit::Perfect, 0.2));
        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains("custom-tailored"));

        let lines = recommendations(&verdict(OverallFit::Perfect, 0.4));
        assert_eq!(lines.len(), 1);

        let lines = recommendations(&verdict(OverallFit::Good, 1.2));
        assert!(lines[1].contains("slight room"));

        let lines = recommendations(&verdict(OverallFit::Tight, 4.0));
        assert!(lines[0].starts_with("Tight fit"));
    }

    #[test]
    fn test_recommendations_without_comparisons() {
        let empty = AveragedBandStrategy::default().evaluate(&[]);
        assert_eq!(empty.fit, OverallFit::Good);
        assert_eq!(recommendations(&empty), vec![GENERIC_SUMMARY.to_string()]);
    }

    #[test]
    fn test_suggest_size() {
        let tight = [comp(Dimension::Chest, 42.0, 38.0), comp(Dimension::Sleeve, 34.0, 34.0)];
        assert_eq!(suggest_size(&tight, "M"), "L");
        assert_eq!(suggest_size(&tight, "xxxl"), "XXXL");

        let loose = [comp(Dimension::Waist, 32.0, 36.0)];
        assert_eq!(suggest_size(&loose, "S"), "XS");
        assert_eq!(suggest_size(&loose, "XS"), "XS");

        let mixed = [comp(Dimension::Waist, 32.0, 36.0), comp(Dimension::Hip, 40.0, 36.0)];
        assert_eq!(suggest_size(&mixed, "L"), "L");
        assert_eq!(suggest_size(&tight, "32W x 30L"), "32W x 30L");
    }

    #[test]
    fn test_every_directional_label_has_a_phrase() {
        for archetype in Archetype::ALL {
            for slot in archetype.label_slots() {
                let labels: &[FitLabel] = match slot.kind {
                    DimensionKind::Length => &[FitLabel::Short, FitLabel::Long],
                    _ => &[FitLabel::Tight, FitLabel::Loose],
                };
                for label in labels {
                    let phrase = problem_phrase(slot.garment, *label);
                    assert!(phrase.is_some(), "{} {:?}", slot.garment, label);
                }
            }
        }
    }
}
