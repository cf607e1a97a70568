//! # IS 10262 / IS 456 Reference Tables
//!
//! Static reference data for mix proportioning. All tables are immutable,
//! process-wide constants built once at startup; there is no runtime
//! mutation path.
//!
//! ## Table Summary
//!
//! | Table                  | Key           | Source              |
//! |------------------------|---------------|---------------------|
//! | Durability limits      | grade         | IS 456 Table 5      |
//! | Standard deviation S   | grade         | IS 10262 Table 2    |
//! | Margin X               | grade         | IS 10262 Table 1    |
//! | Entrapped air          | agg. size     | IS 10262 Table 3    |
//! | Base water content     | agg. size     | IS 10262 Table 4    |
//! | Coarse agg. volume     | zone × size   | IS 10262 Table 5    |
//!
//! The standard publishes S and X only for M30 and above. Lower grades
//! fall back to [`DEFAULT_STD_DEV_MPA`] / [`DEFAULT_MARGIN_MPA`]; the
//! durability lookup has no fallback because a minimum cement content has
//! no safe default.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::errors::{MixError, MixResult};
use crate::materials::{AggregateSize, ConcreteGrade, FineAggZone};

// ============================================================================
// Code Section References
// ============================================================================

/// IS code clause references for mix design stages and table lookups.
///
/// These constants provide traceable references to IS 10262 (Concrete Mix
/// Proportioning - Guidelines) and IS 456 (Plain and Reinforced Concrete).
pub mod is_ref {
    // Derivation stages
    /// Target mean strength formula
    pub const TARGET_STRENGTH: &str = "IS 10262 cl. 4.2";
    /// Water content adjustment for slump
    pub const SLUMP_ADJUSTMENT: &str = "IS 10262 cl. 5.3";
    /// Coarse aggregate volume adjustment for W/C ratio
    pub const CA_VOLUME_ADJUSTMENT: &str = "IS 10262 cl. 5.5.1";
    /// Absolute volume method
    pub const ABSOLUTE_VOLUME: &str = "IS 10262 cl. 6";

    // Tables
    /// Assumed standard deviation
    pub const STD_DEV: &str = "IS 10262 Table 2";
    /// Margin X over characteristic strength
    pub const MARGIN_X: &str = "IS 10262 Table 1";
    /// Approximate entrapped air content
    pub const ENTRAPPED_AIR: &str = "IS 10262 Table 3";
    /// Water content per m3 at 50 mm slump
    pub const WATER_CONTENT: &str = "IS 10262 Table 4";
    /// Coarse aggregate volume per unit volume of total aggregate
    pub const CA_VOLUME: &str = "IS 10262 Table 5";
    /// Minimum cement content and maximum W/C ratio for durability
    pub const DURABILITY: &str = "IS 456 Table 5";
    /// Maximum cement content cap
    pub const MAX_CEMENT: &str = "IS 456 cl. 8.2.4.2";
}

// ============================================================================
// Constants
// ============================================================================

/// Reference slump (mm) at which the base water content table is defined
pub const REFERENCE_SLUMP_MM: f64 = 50.0;

/// Reference water-cement ratio at which the coarse aggregate volume
/// table is defined
pub const REFERENCE_WC_RATIO: f64 = 0.50;

/// Maximum cement content (kg/m3) permitted by IS 456 cl. 8.2.4.2
pub const MAX_CEMENT_CONTENT_KG: f64 = 450.0;

/// Assumed standard deviation (MPa) for grades without a published
/// Table 2 entry
pub const DEFAULT_STD_DEV_MPA: f64 = 5.0;

/// Margin X (MPa) for grades without a published Table 1 entry
pub const DEFAULT_MARGIN_MPA: f64 = 6.5;

// ============================================================================
// Durability Limits (IS 456 Table 5)
// ============================================================================

/// Durability limits for a concrete grade: minimum cement content and
/// maximum permitted water-cement ratio for reinforced concrete.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DurabilityLimits {
    /// Minimum cement content (kg/m3)
    pub min_cement_kg: f64,

    /// Maximum permitted water-cement ratio
    pub max_wc_ratio: f64,
}

static DURABILITY_TABLE: Lazy<BTreeMap<ConcreteGrade, DurabilityLimits>> = Lazy::new(|| {
    BTreeMap::from([
        (
            ConcreteGrade::M15,
            DurabilityLimits { min_cement_kg: 300.0, max_wc_ratio: 0.55 },
        ),
        (
            ConcreteGrade::M20,
            DurabilityLimits { min_cement_kg: 300.0, max_wc_ratio: 0.55 },
        ),
        (
            ConcreteGrade::M25,
            DurabilityLimits { min_cement_kg: 300.0, max_wc_ratio: 0.50 },
        ),
        (
            ConcreteGrade::M30,
            DurabilityLimits { min_cement_kg: 320.0, max_wc_ratio: 0.45 },
        ),
        (
            ConcreteGrade::M35,
            DurabilityLimits { min_cement_kg: 340.0, max_wc_ratio: 0.45 },
        ),
        (
            ConcreteGrade::M40,
            DurabilityLimits { min_cement_kg: 360.0, max_wc_ratio: 0.40 },
        ),
    ])
});

/// Look up durability limits for a grade (IS 456 Table 5).
///
/// This lookup is mandatory: unlike the statistical tables there is no
/// fallback, because a minimum cement content has no safe default.
pub fn durability_limits(grade: ConcreteGrade) -> MixResult<DurabilityLimits> {
    DURABILITY_TABLE
        .get(&grade)
        .copied()
        .ok_or_else(|| MixError::unsupported_grade(grade.designation()))
}

// ============================================================================
// Target Strength Statistics (IS 10262 Tables 1 and 2)
// ============================================================================

/// Assumed standard deviation S (MPa) for the target strength formula.
///
/// Published for M30 and above; lower grades use the documented fallback
/// [`DEFAULT_STD_DEV_MPA`].
pub fn assumed_std_dev_mpa(grade: ConcreteGrade) -> f64 {
    published_std_dev_mpa(grade).unwrap_or(DEFAULT_STD_DEV_MPA)
}

/// Margin X (MPa) over characteristic strength for the target strength
/// formula.
///
/// Published for M30 and above; lower grades use the documented fallback
/// [`DEFAULT_MARGIN_MPA`].
pub fn margin_x_mpa(grade: ConcreteGrade) -> f64 {
    published_margin_x_mpa(grade).unwrap_or(DEFAULT_MARGIN_MPA)
}

fn published_std_dev_mpa(grade: ConcreteGrade) -> Option<f64> {
    match grade {
        ConcreteGrade::M30 | ConcreteGrade::M35 | ConcreteGrade::M40 => Some(5.0),
        _ => None,
    }
}

fn published_margin_x_mpa(grade: ConcreteGrade) -> Option<f64> {
    match grade {
        ConcreteGrade::M30 | ConcreteGrade::M35 | ConcreteGrade::M40 => Some(6.5),
        _ => None,
    }
}

// ============================================================================
// Per-Size Tables (IS 10262 Tables 3 and 4)
// ============================================================================

/// Approximate entrapped air content as a volume fraction of concrete
/// (IS 10262 Table 3).
pub fn entrapped_air_fraction(size: AggregateSize) -> f64 {
    match size {
        AggregateSize::Mm10 => 0.015,
        AggregateSize::Mm20 => 0.010,
        AggregateSize::Mm40 => 0.008,
    }
}

/// Base water content (kg/m3) at the 50 mm reference slump
/// (IS 10262 Table 4).
pub fn base_water_content_kg(size: AggregateSize) -> f64 {
    match size {
        AggregateSize::Mm10 => 208.0,
        AggregateSize::Mm20 => 186.0,
        AggregateSize::Mm40 => 165.0,
    }
}

// ============================================================================
// Coarse Aggregate Volume (IS 10262 Table 5)
// ============================================================================

static COARSE_AGG_VOLUME_TABLE: Lazy<BTreeMap<(FineAggZone, u32), f64>> = Lazy::new(|| {
    BTreeMap::from([
        ((FineAggZone::I, 10), 0.48),
        ((FineAggZone::I, 20), 0.60),
        ((FineAggZone::I, 40), 0.69),
        ((FineAggZone::II, 10), 0.50),
        ((FineAggZone::II, 20), 0.62),
        ((FineAggZone::II, 40), 0.71),
        ((FineAggZone::III, 10), 0.52),
        ((FineAggZone::III, 20), 0.64),
        ((FineAggZone::III, 40), 0.72),
        ((FineAggZone::IV, 10), 0.54),
        ((FineAggZone::IV, 20), 0.66),
        ((FineAggZone::IV, 40), 0.73),
    ])
});

/// Base coarse-aggregate volume fraction of total aggregate, defined at
/// the 0.50 reference water-cement ratio (IS 10262 Table 5).
pub fn coarse_agg_volume_fraction(zone: FineAggZone, size: AggregateSize) -> MixResult<f64> {
    COARSE_AGG_VOLUME_TABLE
        .get(&(zone, size.mm() as u32))
        .copied()
        .ok_or_else(|| {
            MixError::Internal {
                message: format!("coarse aggregate volume table has no entry for {zone} / {size}"),
            }
        })
}
