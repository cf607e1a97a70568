//! # Material Vocabulary
//!
//! Typed domain vocabulary for mix proportioning: concrete grades,
//! nominal aggregate sizes, fine-aggregate grading zones, and exposure
//! conditions. Replaces the stringly-typed designations of spreadsheet
//! workflows with closed enums so unsupported values fail at the boundary
//! instead of deep inside a table lookup.
//!
//! ## Example
//!
//! ```rust
//! use mix_core::materials::{ConcreteGrade, AggregateSize, FineAggZone};
//!
//! let grade = ConcreteGrade::from_str_flexible("M35").unwrap();
//! assert_eq!(grade.fck_mpa(), 35.0);
//!
//! let size = AggregateSize::try_from(20u32).unwrap();
//! assert_eq!(size.mm(), 20.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{MixError, MixResult};

/// Concrete grade designation per IS 456.
///
/// The numeric suffix is the characteristic compressive strength `fck`
/// in MPa. Only grades with IS 456 Table 5 durability entries are
/// representable; anything else is rejected at parse time with
/// [`MixError::UnsupportedGrade`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ConcreteGrade {
    /// M15 (fck = 15 MPa)
    M15,
    /// M20 (fck = 20 MPa)
    M20,
    /// M25 (fck = 25 MPa)
    M25,
    /// M30 (fck = 30 MPa)
    M30,
    /// M35 (fck = 35 MPa)
    M35,
    /// M40 (fck = 40 MPa)
    M40,
}

impl ConcreteGrade {
    /// All grade variants for UI selection
    pub const ALL: [ConcreteGrade; 6] = [
        ConcreteGrade::M15,
        ConcreteGrade::M20,
        ConcreteGrade::M25,
        ConcreteGrade::M30,
        ConcreteGrade::M35,
        ConcreteGrade::M40,
    ];

    /// Characteristic compressive strength fck (MPa)
    pub fn fck_mpa(&self) -> f64 {
        match self {
            ConcreteGrade::M15 => 15.0,
            ConcreteGrade::M20 => 20.0,
            ConcreteGrade::M25 => 25.0,
            ConcreteGrade::M30 => 30.0,
            ConcreteGrade::M35 => 35.0,
            ConcreteGrade::M40 => 40.0,
        }
    }

    /// Grade designation string (e.g., "M35")
    pub fn designation(&self) -> &'static str {
        match self {
            ConcreteGrade::M15 => "M15",
            ConcreteGrade::M20 => "M20",
            ConcreteGrade::M25 => "M25",
            ConcreteGrade::M30 => "M30",
            ConcreteGrade::M35 => "M35",
            ConcreteGrade::M40 => "M40",
        }
    }

    /// Parse from common string representations ("M35", "m 35", "35")
    pub fn from_str_flexible(s: &str) -> MixResult<Self> {
        match s.to_uppercase().replace([' ', '-', '_'], "").as_str() {
            "M15" | "15" => Ok(ConcreteGrade::M15),
            "M20" | "20" => Ok(ConcreteGrade::M20),
            "M25" | "25" => Ok(ConcreteGrade::M25),
            "M30" | "30" => Ok(ConcreteGrade::M30),
            "M35" | "35" => Ok(ConcreteGrade::M35),
            "M40" | "40" => Ok(ConcreteGrade::M40),
            _ => Err(MixError::unsupported_grade(s)),
        }
    }
}

impl std::fmt::Display for ConcreteGrade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.designation())
    }
}

/// Nominal maximum aggregate size per IS 10262 Table 2/4.
///
/// Serializes as the bare millimetre value (10, 20, 40) to match the
/// spreadsheet and JSON conventions of the field data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum AggregateSize {
    /// 10 mm nominal maximum size
    Mm10,
    /// 20 mm nominal maximum size
    Mm20,
    /// 40 mm nominal maximum size
    Mm40,
}

impl AggregateSize {
    /// All aggregate size variants for UI selection
    pub const ALL: [AggregateSize; 3] = [
        AggregateSize::Mm10,
        AggregateSize::Mm20,
        AggregateSize::Mm40,
    ];

    /// Nominal maximum size in millimetres
    pub fn mm(&self) -> f64 {
        match self {
            AggregateSize::Mm10 => 10.0,
            AggregateSize::Mm20 => 20.0,
            AggregateSize::Mm40 => 40.0,
        }
    }
}

impl TryFrom<u32> for AggregateSize {
    type Error = MixError;

    fn try_from(mm: u32) -> MixResult<Self> {
        match mm {
            10 => Ok(AggregateSize::Mm10),
            20 => Ok(AggregateSize::Mm20),
            40 => Ok(AggregateSize::Mm40),
            _ => Err(MixError::invalid_input(
                "max_agg_size",
                mm.to_string(),
                "Nominal maximum aggregate size must be 10, 20 or 40 mm",
            )),
        }
    }
}

impl From<AggregateSize> for u32 {
    fn from(size: AggregateSize) -> u32 {
        size.mm() as u32
    }
}

impl std::fmt::Display for AggregateSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} mm", self.mm() as u32)
    }
}

/// Fine-aggregate grading zone per IS 383 sieve classification.
///
/// Zone I is the coarsest grading, Zone IV the finest. The zone shifts
/// the base coarse-aggregate volume fraction (IS 10262 Table 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FineAggZone {
    /// Grading Zone I (coarsest)
    I,
    /// Grading Zone II
    II,
    /// Grading Zone III
    III,
    /// Grading Zone IV (finest)
    IV,
}

impl FineAggZone {
    /// All zone variants for UI selection
    pub const ALL: [FineAggZone; 4] = [
        FineAggZone::I,
        FineAggZone::II,
        FineAggZone::III,
        FineAggZone::IV,
    ];

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            FineAggZone::I => "Zone I",
            FineAggZone::II => "Zone II",
            FineAggZone::III => "Zone III",
            FineAggZone::IV => "Zone IV",
        }
    }
}

impl std::fmt::Display for FineAggZone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Environmental exposure condition per IS 456 Table 3.
///
/// Carried for record-keeping on the design sheet; the numeric derivation
/// works from the adopted water-cement ratio the designer chose for this
/// exposure, not from the enum itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Exposure {
    /// Protected against weather
    Mild,
    /// Sheltered from severe rain, buried concrete
    #[default]
    Moderate,
    /// Exposed to severe rain, alternate wetting and drying
    Severe,
    /// Sea water spray, corrosive fumes
    VerySevere,
    /// Tidal zone, aggressive chemical environment
    Extreme,
}

impl Exposure {
    /// All exposure variants for UI selection
    pub const ALL: [Exposure; 5] = [
        Exposure::Mild,
        Exposure::Moderate,
        Exposure::Severe,
        Exposure::VerySevere,
        Exposure::Extreme,
    ];

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Exposure::Mild => "Mild",
            Exposure::Moderate => "Moderate",
            Exposure::Severe => "Severe",
            Exposure::VerySevere => "Very Severe",
            Exposure::Extreme => "Extreme",
        }
    }
}

impl std::fmt::Display for Exposure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
