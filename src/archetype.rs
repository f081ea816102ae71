//! Garment Archetypes
//!
//! Declarative tables mapping each garment category to the ordered dimension
//! slots that take part in its fit calculation. Adding an archetype is a
//! table change.
//!
//! There are two tables because the two aggregation strategies were defined
//! against different dimension sets:
//! - [`Archetype::label_slots`] for the label-count calculator
//! - [`Archetype::averaged_slots`] for the averaged-band analyzer

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FitError;
use crate::measurements::{Dimension, DimensionKind};

/// Garment category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Archetype {
    Shirt,
    Pants,
    Shoes,
    Dress,
    Shorts,
    Skirt,
    Jacket,
}

/// One dimension taking part in a fit calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionSlot {
    /// Dimension read from the garment record
    pub garment: Dimension,
    /// Dimension read from the user record
    pub user: Dimension,
    /// Label semantics once outside tolerance
    pub kind: DimensionKind,
}

impl DimensionSlot {
    /// Same dimension on both sides
    pub const fn direct(dimension: Dimension, kind: DimensionKind) -> Self {
        Self { garment: dimension, user: dimension, kind }
    }

    /// Garment dimension compared against a different user dimension.
    ///
    /// Dress bust uses this: the profile form never collects a separate bust
    /// measurement, so the user's chest stands in for it. This is a sizing
    /// convention, not a body identity.
    pub const fn proxied(garment: Dimension, user: Dimension, kind: DimensionKind) -> Self {
        Self { garment, user, kind }
    }

    pub fn is_proxy(&self) -> bool {
        self.garment != self.user
    }
}

use Dimension::*;
use DimensionKind::{Girth, Length};

const CHEST: DimensionSlot = DimensionSlot::direct(Chest, Girth);
const WAIST: DimensionSlot = DimensionSlot::direct(Waist, Girth);
const HIP: DimensionSlot = DimensionSlot::direct(Hip, Girth);
const SHOULDER: DimensionSlot = DimensionSlot::direct(Shoulder, Length);
const SLEEVE: DimensionSlot = DimensionSlot::direct(Sleeve, Length);
const INSEAM: DimensionSlot = DimensionSlot::direct(Inseam, Length);
const DRESS_BUST: DimensionSlot = DimensionSlot::proxied(Bust, Chest, Girth);
const SHOE_SIZE: DimensionSlot = DimensionSlot::direct(ShoeSize, DimensionKind::ShoeSize);
const FOOT_LENGTH: DimensionSlot = DimensionSlot::direct(FootLength, Length);

// ============================================================================
// Label-count calculator table
// ============================================================================

static LABEL_SHIRT: &[DimensionSlot] = &[CHEST, SHOULDER, SLEEVE];
static LABEL_PANTS: &[DimensionSlot] = &[WAIST, HIP, INSEAM];
static LABEL_SHOES: &[DimensionSlot] = &[SHOE_SIZE];
static LABEL_DRESS: &[DimensionSlot] = &[DRESS_BUST, WAIST, HIP];
static LABEL_SHORTS: &[DimensionSlot] = &[WAIST, HIP, INSEAM];
static LABEL_SKIRT: &[DimensionSlot] = &[WAIST, HIP];
static LABEL_JACKET: &[DimensionSlot] = &[CHEST, SHOULDER, SLEEVE];

// ============================================================================
// Averaged-band analyzer table
// ============================================================================

static AVG_SHIRT: &[DimensionSlot] = &[CHEST, SHOULDER, SLEEVE];
static AVG_PANTS: &[DimensionSlot] = &[WAIST, HIP, INSEAM];
static AVG_SHORTS: &[DimensionSlot] = &[WAIST, INSEAM];
static AVG_SKIRT: &[DimensionSlot] = &[WAIST, HIP];
static AVG_DRESS: &[DimensionSlot] = &[CHEST, WAIST, HIP];
static AVG_JACKET: &[DimensionSlot] = &[CHEST, SHOULDER, SLEEVE];
static AVG_SHOES: &[DimensionSlot] = &[FOOT_LENGTH];

impl Archetype {
    pub const ALL: [Archetype; 7] = [
        Archetype::Shirt,
        Archetype::Pants,
        Archetype::Shoes,
        Archetype::Dress,
        Archetype::Shorts,
        Archetype::Skirt,
        Archetype::Jacket,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Archetype::Shirt => "shirt",
            Archetype::Pants => "pants",
            Archetype::Shoes => "shoes",
            Archetype::Dress => "dress",
            Archetype::Shorts => "shorts",
            Archetype::Skirt => "skirt",
            Archetype::Jacket => "jacket",
        }
    }

    /// Slots for the label-count calculator, in description order
    pub fn label_slots(&self) -> &'static [DimensionSlot] {
        match self {
            Archetype::Shirt => LABEL_SHIRT,
            Archetype::Pants => LABEL_PANTS,
            Archetype::Shoes => LABEL_SHOES,
            Archetype::Dress => LABEL_DRESS,
            Archetype::Shorts => LABEL_SHORTS,
            Archetype::Skirt => LABEL_SKIRT,
            Archetype::Jacket => LABEL_JACKET,
        }
    }

    /// Slots for the averaged-band analyzer
    pub fn averaged_slots(&self) -> &'static [DimensionSlot] {
        match self {
            Archetype::Shirt => AVG_SHIRT,
            Archetype::Pants => AVG_PANTS,
            Archetype::Shoes => AVG_SHOES,
            Archetype::Dress => AVG_DRESS,
            Archetype::Shorts => AVG_SHORTS,
            Archetype::Skirt => AVG_SKIRT,
            Archetype::Jacket => AVG_JACKET,
        }
    }

    /// Garment dimensions relevant to the label-count calculator
    pub fn dimensions(&self) -> Vec<Dimension> {
        self.label_slots().iter().map(|s| s.garment).collect()
    }

    /// Singular/plural noun used in descriptions
    pub fn noun_phrase(&self) -> &'static str {
        match self {
            Archetype::Shirt => "This shirt",
            Archetype::Pants => "These pants",
            Archetype::Shoes => "These shoes",
            Archetype::Dress => "This dress",
            Archetype::Shorts => "These shorts",
            Archetype::Skirt => "This skirt",
            Archetype::Jacket => "This jacket",
        }
    }

    /// Position of a garment dimension in the label table, for ordering output
    pub fn slot_index(&self, dimension: Dimension) -> Option<usize> {
        self.label_slots().iter().position(|s| s.garment == dimension)
    }
}

impl FromStr for Archetype {
    type Err = FitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        Archetype::ALL
            .into_iter()
            .find(|a| a.key() == normalized)
            .ok_or_else(|| FitError::invalid_archetype(s))
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!("shirt".parse::<Archetype>(), Ok(Archetype::Shirt));
        assert_eq!("  Pants ".parse::<Archetype>(), Ok(Archetype::Pants));
        assert_eq!(
            "hat".parse::<Archetype>(),
            Err(FitError::InvalidArchetype("hat".to_string()))
        );
        assert!("".parse::<Archetype>().is_err());
    }

    #[test]
    fn test_label_table() {
        assert_eq!(Archetype::Shirt.dimensions(), vec![Chest, Shoulder, Sleeve]);
        assert_eq!(Archetype::Pants.dimensions(), vec![Waist, Hip, Inseam]);
        assert_eq!(Archetype::Dress.dimensions(), vec![Bust, Waist, Hip]);
        assert_eq!(Archetype::Shoes.dimensions(), vec![ShoeSize]);
    }

    #[test]
    fn test_dress_bust_is_chest_proxy() {
        let bust = Archetype::Dress.label_slots()[0];
        assert!(bust.is_proxy());
        assert_eq!(bust.garment, Bust);
        assert_eq!(bust.user, Chest);
        assert_eq!(bust.kind, Girth);

        let proxies = Archetype::ALL
            .iter()
            .flat_map(|a| a.label_slots())
            .filter(|s| s.is_proxy())
            .count();
        assert_eq!(proxies, 1);
    }

    #[test]
    fn test_averaged_table() {
        let dims = |a: Archetype| a.averaged_slots().iter().map(|s| s.garment).collect::<Vec<_>>();
        assert_eq!(dims(Archetype::Shorts), vec![Waist, Inseam]);
        assert_eq!(dims(Archetype::Skirt), vec![Waist, Hip]);
        assert_eq!(dims(Archetype::Dress), vec![Chest, Waist, Hip]);
        assert_eq!(dims(Archetype::Shoes), vec![FootLength]);
    }

    #[test]
    fn test_every_archetype_has_slots() {
        for a in Archetype::ALL {
            assert!(!a.label_slots().is_empty(), "{}", a);
            assert!(!a.averaged_slots().is_empty(), "{}", a);
        }
    }
}
