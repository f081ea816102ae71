//! Brand Size Recommendations
//!
//! Maps a user's raw measurements into labeled size buckets per brand
//! (shirts by chest, pants by waist, shoes by an estimate from height).
//! Each brand applies a fixed offset to the body value; a variance drawn from
//! the injected random source models chart disagreement and sets the
//! confidence figure.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::measurements::{Dimension, MeasurementRecord};

/// Garment category on the size sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SizeCategory {
    Shirt,
    Pants,
    Shoes,
}

impl SizeCategory {
    pub fn display_name(&self) -> &'static str {
        match self {
            SizeCategory::Shirt => "SHIRT",
            SizeCategory::Pants => "PANTS",
            SizeCategory::Shoes => "SHOES",
        }
    }
}

/// Size bucket: primary label plus regional detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeBucket {
    pub label: String,
    pub detail: String,
}

impl SizeBucket {
    fn new(label: impl Into<String>, detail: impl Into<String>) -> Self {
        Self { label: label.into(), detail: detail.into() }
    }
}

/// Shirt bucket by chest (inches)
pub fn shirt_size(chest: f64) -> SizeBucket {
    let (label, detail) = if chest < 36.0 {
        ("XS", "UK 6 / US 2")
    } else if chest < 38.0 {
        ("S", "UK 8 / US 4")
    } else if chest < 40.0 {
        ("M", "UK 10 / US 6")
    } else if chest < 42.0 {
        ("L", "UK 12 / US 8")
    } else if chest < 44.0 {
        ("XL", "UK 14 / US 10")
    } else {
        ("XXL", "UK 16 / US 12")
    };
    SizeBucket::new(label, detail)
}

/// Pants bucket by waist (inches), rendered as `{waist}W x {length}L`
pub fn pants_size(waist: f64) -> SizeBucket {
    let w = waist.floor() as i64;
    let (length, detail) = if w < 28 {
        (30, "UK 6 / US 2")
    } else if w < 30 {
        (32, "UK 8 / US 4")
    } else if w < 32 {
        (32, "UK 10 / US 6")
    } else if w < 34 {
        (34, "UK 12 / US 8")
    } else {
        (34, "UK 14 / US 10")
    };
    SizeBucket::new(format!("{}W x {}L", w, length), detail)
}

/// Shoe bucket from a US size, with rough UK/EU conversions
pub fn shoe_size(us: f64) -> SizeBucket {
    SizeBucket::new(
        format!("US {}", us),
        format!("UK {} / EU {}", us - 1.0, us + 33.0),
    )
}

/// Rough US shoe size from height (inches)
pub fn estimate_shoe_size(height: f64) -> f64 {
    if height < 64.0 {
        8.0
    } else if height < 67.0 {
        8.5
    } else if height < 70.0 {
        9.0
    } else if height < 73.0 {
        9.5
    } else {
        10.0
    }
}

/// Brand entry on the size sheet with its offset from the body value
#[derive(Debug, Clone, Copy)]
pub struct BrandOffset {
    pub brand: &'static str,
    pub offset: f64,
}

const fn brand(brand: &'static str, offset: f64) -> BrandOffset {
    BrandOffset { brand, offset }
}

static SHIRT_BRANDS: &[BrandOffset] = &[
    brand("H&M", 0.0),
    brand("Zara", -1.5),
    brand("Uniqlo", 0.0),
    brand("Nike", 1.0),
];

static PANTS_BRANDS: &[BrandOffset] = &[
    brand("Levi's", 0.0),
    brand("Gap", 0.0),
    brand("Old Navy", -0.5),
    brand("ASOS", 0.5),
];

static SHOE_BRANDS: &[BrandOffset] = &[
    brand("Nike", 0.0),
    brand("Adidas", 0.0),
    brand("Puma", 0.0),
    brand("New Balance", -0.5),
];

/// One brand's recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BrandSize {
    pub brand: String,
    pub size: String,
    pub detail: String,
    /// Percent, 90–100
    pub confidence: f64,
}

/// Recommendations for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySizes {
    pub category: SizeCategory,
    pub brands: Vec<BrandSize>,
}

/// Complete size sheet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizeProfile {
    pub categories: Vec<CategorySizes>,
}

impl SizeProfile {
    pub fn category(&self, category: SizeCategory) -> Option<&CategorySizes> {
        self.categories.iter().find(|c| c.category == category)
    }

    /// Plain-text listing for sharing
    pub fn share_text(&self) -> String {
        self.categories
            .iter()
            .map(|c| {
                let lines: Vec<String> = c
                    .brands
                    .iter()
                    .map(|b| format!("{}: {}", b.brand, b.size))
                    .collect();
                format!("{}:\n{}", c.category.display_name(), lines.join("\n"))
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Confidence from the drawn variance: tighter agreement, higher confidence
pub fn confidence<R: Rng + ?Sized>(variance: f64, rng: &mut R) -> f64 {
    let abs = variance.abs();
    let r: f64 = rng.gen();
    if abs < 1.0 {
        96.0 + r * 4.0
    } else if abs < 2.0 {
        93.0 + r * 3.0
    } else {
        90.0 + r * 3.0
    }
}

fn assign<R: Rng + ?Sized>(
    category: SizeCategory,
    base: f64,
    brands: &[BrandOffset],
    bucket: fn(f64) -> SizeBucket,
    rng: &mut R,
) -> CategorySizes {
    let brands = brands
        .iter()
        .map(|b| {
            let variance = (rng.gen::<f64>() - 0.5) * 4.0;
            let adjusted = base + b.offset + variance;
            let SizeBucket { label, detail } = bucket(adjusted);
            BrandSize {
                brand: b.brand.to_string(),
                size: label,
                detail,
                confidence: confidence(variance, &mut *rng),
            }
        })
        .collect();

    CategorySizes { category, brands }
}

/// Shoe sizes stay on half-size steps; variance only moves the confidence
fn shoe_bucket_for(base: f64) -> SizeBucket {
    shoe_size((base * 2.0).round() / 2.0)
}

/// Build the size sheet for a user
///
/// Categories whose source measurement is missing are left out. Shoe size
/// comes from the recorded shoe size when present, else from height.
pub fn recommend_sizes<R: Rng + ?Sized>(
    measurements: &MeasurementRecord,
    rng: &mut R,
) -> SizeProfile {
    let mut categories = Vec::new();

    if let Some(chest) = measurements.get(Dimension::Chest) {
        categories.push(assign(SizeCategory::Shirt, chest, SHIRT_BRANDS, shirt_size, rng));
    }

    if let Some(waist) = measurements.get(Dimension::Waist) {
        categories.push(assign(SizeCategory::Pants, waist, PANTS_BRANDS, pants_size, rng));
    }

    let shoe_base = measurements
        .get(Dimension::ShoeSize)
        .or_else(|| measurements.get(Dimension::Height).map(estimate_shoe_size));
    if let Some(base) = shoe_base {
        let brands = SHOE_BRANDS
            .iter()
            .map(|b| {
                let variance = (rng.gen::<f64>() - 0.5) * 4.0;
                let SizeBucket { label, detail } = shoe_bucket_for(base + b.offset);
                BrandSize {
                    brand: b.brand.to_string(),
                    size: label,
                    detail,
                    confidence: confidence(variance, &mut *rng),
                }
            })
            .collect();
        categories.push(CategorySizes { category: SizeCategory::Shoes, brands });
    }

    tracing::debug!("Size sheet built with {} categories", categories.len());
    SizeProfile { categories }
}
