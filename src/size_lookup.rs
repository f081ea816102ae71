//! Garment Size Lookup
//!
//! Resolves garment measurements from a brand's published size chart. When the
//! brand or size is not charted, a synthetic record is generated from
//! per-archetype base values plus uniform jitter drawn from an injected random
//! source. Synthetic records are a placeholder for real product data; the
//! comparator and strategies never see the random source.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::archetype::Archetype;
use crate::measurements::{Dimension, MeasurementRecord};

/// Retailers with known size charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Brand {
    Nike,
    Zara,
    HM,
    Amazon,
    Levis,
}

impl Brand {
    /// Match a brand name, domain, or product URL
    pub fn from_source(source: &str) -> Option<Self> {
        let s = source.trim().to_ascii_lowercase();

        if s.contains("nike.com") || s == "nike" {
            Some(Brand::Nike)
        } else if s.contains("zara.com") || s == "zara" {
            Some(Brand::Zara)
        } else if s.contains("h&m.com") || s.contains("hm.com") || s == "h&m" || s == "hm" {
            Some(Brand::HM)
        } else if s.contains("amazon.com") || s == "amazon" {
            Some(Brand::Amazon)
        } else if s.contains("levi.com") || s == "levi's" || s == "levis" || s == "levi" {
            Some(Brand::Levis)
        } else {
            None
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Brand::Nike => "Nike",
            Brand::Zara => "Zara",
            Brand::HM => "H&M",
            Brand::Amazon => "Amazon",
            Brand::Levis => "Levi's",
        }
    }

    /// Letter charts match case-insensitively; waist/length labels match exactly
    fn normalize_label(&self, label: &str) -> String {
        match self {
            Brand::Levis => label.trim().to_string(),
            _ => label.trim().to_ascii_uppercase(),
        }
    }

    fn chart(&self) -> &'static [SizeChartRow] {
        match self {
            Brand::Nike => NIKE,
            Brand::Zara => ZARA,
            Brand::HM => HM,
            // Amazon sizing varies per seller
            Brand::Amazon => &[],
            Brand::Levis => LEVIS,
        }
    }
}

/// One size-chart row; zero means the dimension is not published
#[derive(Debug, Clone, Copy)]
pub struct SizeChartRow {
    pub label: &'static str,
    pub chest: f64,
    pub waist: f64,
    pub hip: f64,
    pub shoulder: f64,
    pub sleeve: f64,
    pub inseam: f64,
}

impl SizeChartRow {
    pub fn to_record(&self) -> MeasurementRecord {
        [
            (Dimension::Chest, self.chest),
            (Dimension::Waist, self.waist),
            (Dimension::Hip, self.hip),
            (Dimension::Shoulder, self.shoulder),
            (Dimension::Sleeve, self.sleeve),
            (Dimension::Inseam, self.inseam),
        ]
        .into_iter()
        .filter(|(_, v)| *v > 0.0)
        .collect()
    }
}

const fn row(
    label: &'static str,
    chest: f64,
    waist: f64,
    hip: f64,
    shoulder: f64,
    sleeve: f64,
    inseam: f64,
) -> SizeChartRow {
    SizeChartRow { label, chest, waist, hip, shoulder, sleeve, inseam }
}

// ============================================================================
// Embedded size charts (inches)
// ============================================================================

static NIKE: &[SizeChartRow] = &[
    row("S", 38.0, 30.0, 0.0, 0.0, 0.0, 0.0),
    row("M", 41.0, 32.5, 0.0, 0.0, 0.0, 0.0),
    row("L", 44.0, 35.0, 0.0, 0.0, 0.0, 0.0),
    row("XL", 48.0, 38.5, 0.0, 0.0, 0.0, 0.0),
];

static ZARA: &[SizeChartRow] = &[
    row("XS", 39.4, 33.9, 39.4, 17.3, 25.2, 0.0),
    row("S", 40.9, 35.4, 40.9, 17.7, 25.6, 0.0),
    row("M", 42.5, 37.0, 42.5, 18.1, 26.0, 0.0),
    row("L", 45.3, 39.8, 45.3, 18.7, 26.6, 0.0),
];

static HM: &[SizeChartRow] = &[
    row("XS", 33.9, 26.8, 36.2, 14.6, 23.2, 30.7),
    row("S", 35.4, 28.3, 37.8, 15.0, 23.6, 31.1),
    row("M", 37.0, 29.9, 39.4, 15.4, 24.0, 31.5),
    row("L", 39.8, 32.7, 42.1, 16.1, 24.4, 31.9),
    row("XL", 42.9, 35.8, 45.3, 17.1, 24.8, 32.3),
];

static LEVIS: &[SizeChartRow] = &[
    row("28W x 30L", 0.0, 28.0, 0.0, 0.0, 0.0, 30.0),
    row("29W x 30L", 0.0, 29.0, 0.0, 0.0, 0.0, 30.0),
    row("30W x 30L", 0.0, 30.0, 0.0, 0.0, 0.0, 30.0),
    row("31W x 30L", 0.0, 31.0, 0.0, 0.0, 0.0, 30.0),
    row("32W x 32L", 0.0, 32.0, 0.0, 0.0, 0.0, 32.0),
    row("33W x 32L", 0.0, 33.0, 0.0, 0.0, 0.0, 32.0),
    row("34W x 32L", 0.0, 34.0, 0.0, 0.0, 0.0, 32.0),
    row("36W x 34L", 0.0, 36.0, 0.0, 0.0, 0.0, 34.0),
];

/// Chart lookup without fallback
pub fn lookup_chart(brand: Brand, size_label: &str) -> Option<MeasurementRecord> {
    let label = brand.normalize_label(size_label);
    brand
        .chart()
        .iter()
        .find(|r| r.label == label)
        .map(SizeChartRow::to_record)
}

// ============================================================================
// Synthetic fallback
// ============================================================================

/// `base + U[0, span)` for one dimension
#[derive(Debug, Clone, Copy)]
pub struct JitterRange {
    pub dimension: Dimension,
    pub base: f64,
    pub span: f64,
}

const fn jitter(dimension: Dimension, base: f64, span: f64) -> JitterRange {
    JitterRange { dimension, base, span }
}

static SHIRT_JITTER: &[JitterRange] = &[
    jitter(Dimension::Chest, 40.0, 8.0),
    jitter(Dimension::Waist, 32.0, 8.0),
    jitter(Dimension::Shoulder, 16.0, 4.0),
    jitter(Dimension::Sleeve, 32.0, 4.0),
];

static PANTS_JITTER: &[JitterRange] = &[
    jitter(Dimension::Waist, 30.0, 8.0),
    jitter(Dimension::Hip, 38.0, 6.0),
    jitter(Dimension::Inseam, 30.0, 4.0),
];

static SHORTS_JITTER: &[JitterRange] = &[
    jitter(Dimension::Waist, 30.0, 8.0),
    jitter(Dimension::Inseam, 7.0, 4.0),
];

static SKIRT_JITTER: &[JitterRange] = &[
    jitter(Dimension::Waist, 26.0, 8.0),
    jitter(Dimension::Hip, 36.0, 8.0),
];

static DRESS_JITTER: &[JitterRange] = &[
    jitter(Dimension::Chest, 32.0, 8.0),
    jitter(Dimension::Waist, 26.0, 8.0),
    jitter(Dimension::Hip, 36.0, 8.0),
];

static SHOES_JITTER: &[JitterRange] = &[jitter(Dimension::FootLength, 10.0, 2.0)];

pub fn jitter_ranges(archetype: Archetype) -> &'static [JitterRange] {
    match archetype {
        Archetype::Shirt | Archetype::Jacket => SHIRT_JITTER,
        Archetype::Pants => PANTS_JITTER,
        Archetype::Shorts => SHORTS_JITTER,
        Archetype::Skirt => SKIRT_JITTER,
        Archetype::Dress => DRESS_JITTER,
        Archetype::Shoes => SHOES_JITTER,
    }
}

/// Generate a synthetic garment record for `archetype`
pub fn synthetic_measurements<R: Rng + ?Sized>(
    archetype: Archetype,
    rng: &mut R,
) -> MeasurementRecord {
    jitter_ranges(archetype)
        .iter()
        .map(|j| (j.dimension, j.base + rng.gen::<f64>() * j.span))
        .collect()
}

/// Where resolved garment measurements came from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "origin", rename_all = "snake_case")]
pub enum MeasurementOrigin {
    SizeChart { brand: Brand, size: String },
    Synthetic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedGarment {
    pub measurements: MeasurementRecord,
    pub origin: MeasurementOrigin,
}

impl ResolvedGarment {
    pub fn is_synthetic(&self) -> bool {
        self.origin == MeasurementOrigin::Synthetic
    }
}

/// Anything that can produce garment measurements for a listing
///
/// Size charts, page extractors and scans all sit behind this; the fit
/// calculator only sees the resulting record.
pub trait GarmentSource {
    fn garment_measurements(
        &mut self,
        source: &str,
        size_label: &str,
        archetype: Archetype,
    ) -> ResolvedGarment;
}

/// Resolves garment measurements, falling back to synthetic data
pub struct SizeLookupResolver<R: Rng> {
    rng: R,
}

impl<R: Rng> SizeLookupResolver<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Look up `(source, size_label)`, or synthesize values for `archetype`
    ///
    /// `source` may be a brand name, a domain, or a product URL.
    pub fn resolve(
        &mut self,
        source: &str,
        size_label: &str,
        archetype: Archetype,
    ) -> ResolvedGarment {
        let charted = Brand::from_source(source)
            .and_then(|brand| lookup_chart(brand, size_label).map(|record| (brand, record)));

        match charted {
            Some((brand, measurements)) => {
                tracing::debug!("Size chart hit: {} {}", brand.display_name(), size_label);
                ResolvedGarment {
                    measurements,
                    origin: MeasurementOrigin::SizeChart {
                        brand,
                        size: brand.normalize_label(size_label),
                    },
                }
            }
            None => {
                tracing::warn!(
                    "No size chart for '{}' size '{}', using synthetic {} measurements",
                    source,
                    size_label,
                    archetype
                );
                ResolvedGarment {
                    measurements: synthetic_measurements(archetype, &mut self.rng),
                    origin: MeasurementOrigin::Synthetic,
                }
            }
        }
    }
}

impl<R: Rng> GarmentSource for SizeLookupResolver<R> {
    fn garment_measurements(
        &mut self,
        source: &str,
        size_label: &str,
        archetype: Archetype,
    ) -> ResolvedGarment {
        self.resolve(source, size_label, archetype)
    }
}
