//! # Concrete Mix Design Calculation
//!
//! Proportions a cubic metre of concrete per IS 10262: target strength,
//! water content, cement content, aggregate split by absolute volume,
//! field-moisture correction and batching ratios.
//!
//! ## Assumptions
//!
//! - SI units throughout: kg, m3, mm, MPa; bulk densities in t/m3
//! - One cubic metre of compacted concrete, entrapped air per IS 10262 Table 3
//! - Aggregate masses are derived in the saturated-surface-dry (SSD) state,
//!   then corrected to field condition from measured moisture/absorption
//! - Durability compliance checks are advisory: they are reported, and the
//!   computation proceeds with the adopted water-cement ratio regardless
//!
//! ## Example (LLM-friendly)
//!
//! ```rust
//! use mix_core::calculations::mix_design::{calculate, MixDesignInput};
//! use mix_core::materials::{AggregateSize, ConcreteGrade, Exposure, FineAggZone};
//!
//! let input = MixDesignInput {
//!     cement_sg: 2.9,
//!     workability_slump_mm: 140.0,
//!     adopted_wc_ratio: 0.4,
//!     use_superplasticizer: true,
//!     superplasticizer_pct: 0.5,
//!     water_reduction_pct: 15.0,
//!     fa_absorption_pct: 1.05,
//!     ..MixDesignInput::new(
//!         ConcreteGrade::M35,
//!         Exposure::Severe,
//!         AggregateSize::Mm20,
//!         FineAggZone::II,
//!     )
//! };
//!
//! let result = calculate(&input).unwrap();
//!
//! println!("Target strength: {:.2} MPa", result.target_strength.target_mean_mpa);
//! println!("Water: {:.0} kg/m3", result.water_content.final_kg);
//! println!("Cement: {:.0} kg/m3", result.cement_content.content_kg);
//! println!("Checks pass: {}", result.checks_pass());
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{MixError, MixResult};
use crate::materials::{AggregateSize, ConcreteGrade, Exposure, FineAggZone};
use crate::tables;

/// Outcome of an advisory durability compliance check.
///
/// Serializes as the design-sheet strings `"OK"` / `"NOT OK"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ComplianceCheck {
    /// Within the code limit
    #[serde(rename = "OK")]
    Ok,
    /// Outside the code limit; reported but not enforced
    #[serde(rename = "NOT OK")]
    NotOk,
}

impl ComplianceCheck {
    fn from_bool(ok: bool) -> Self {
        if ok {
            ComplianceCheck::Ok
        } else {
            ComplianceCheck::NotOk
        }
    }

    /// True if the check passed
    pub fn is_ok(&self) -> bool {
        matches!(self, ComplianceCheck::Ok)
    }
}

impl std::fmt::Display for ComplianceCheck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComplianceCheck::Ok => write!(f, "OK"),
            ComplianceCheck::NotOk => write!(f, "NOT OK"),
        }
    }
}

/// Input parameters for a mix design.
///
/// All material properties are explicit: there are no hidden defaults in
/// the calculation itself. [`MixDesignInput::new`] fills the customary
/// laboratory assumptions for fields a designer typically leaves at their
/// textbook values; override any of them with struct update syntax.
///
/// ## JSON Example
///
/// ```json
/// {
///   "grade": "M35",
///   "exposure": "Severe",
///   "max_agg_size": 20,
///   "fa_zone": "II",
///   "cement_sg": 2.9,
///   "fa_sg": 2.65,
///   "ca_sg": 2.66,
///   "workability_slump_mm": 140.0,
///   "adopted_wc_ratio": 0.4,
///   "use_superplasticizer": true,
///   "superplasticizer_pct": 0.5,
///   "water_reduction_pct": 15.0,
///   "admixture_sg": 1.25,
///   "ca_absorption_pct": 0.5,
///   "fa_absorption_pct": 1.05,
///   "ca_moisture_pct": 0.0,
///   "fa_moisture_pct": 0.0,
///   "bulk_density_cement": 1.3,
///   "bulk_density_fa": 1.76,
///   "bulk_density_ca20": 1.6,
///   "bulk_density_ca10": 1.55,
///   "ca20_fraction": 0.6,
///   "ca10_fraction": 0.4
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixDesignInput {
    /// Concrete grade designation (encodes fck)
    pub grade: ConcreteGrade,

    /// Environmental exposure condition (record-keeping only)
    pub exposure: Exposure,

    /// Nominal maximum aggregate size
    pub max_agg_size: AggregateSize,

    /// Fine-aggregate grading zone per IS 383
    pub fa_zone: FineAggZone,

    /// Specific gravity of cement
    pub cement_sg: f64,

    /// Specific gravity of fine aggregate
    pub fa_sg: f64,

    /// Specific gravity of coarse aggregate
    pub ca_sg: f64,

    /// Target slump (mm)
    pub workability_slump_mm: f64,

    /// Water-cement ratio adopted by the designer
    pub adopted_wc_ratio: f64,

    /// Whether a superplasticizer is used
    pub use_superplasticizer: bool,

    /// Admixture dosage, % by mass of cement
    pub superplasticizer_pct: f64,

    /// Water reduction achievable from the admixture, %
    pub water_reduction_pct: f64,

    /// Specific gravity of the admixture
    pub admixture_sg: f64,

    /// Coarse aggregate water absorption, % by mass
    pub ca_absorption_pct: f64,

    /// Fine aggregate water absorption, % by mass
    pub fa_absorption_pct: f64,

    /// As-received coarse aggregate surface moisture, % by mass
    pub ca_moisture_pct: f64,

    /// As-received fine aggregate surface moisture, % by mass
    pub fa_moisture_pct: f64,

    /// Bulk density of cement (t/m3), batching conversion only
    pub bulk_density_cement: f64,

    /// Bulk density of fine aggregate (t/m3), batching conversion only
    pub bulk_density_fa: f64,

    /// Bulk density of the 20 mm coarse fraction (t/m3)
    pub bulk_density_ca20: f64,

    /// Bulk density of the 10 mm coarse fraction (t/m3)
    pub bulk_density_ca10: f64,

    /// Mass share of coarse aggregate batched as the 20 mm fraction
    ///
    /// Complementary with `ca10_fraction`; the split is propagated as
    /// given, the engine does not re-normalize it.
    pub ca20_fraction: f64,

    /// Mass share of coarse aggregate batched as the 10 mm fraction
    pub ca10_fraction: f64,
}

impl MixDesignInput {
    /// Create an input with the customary laboratory defaults.
    ///
    /// Defaults: specific gravities 3.15 (OPC) / 2.65 (FA) / 2.70 (CA),
    /// 50 mm slump, adopted W/C at the 0.50 table reference, no
    /// superplasticizer (dosage 0 %, reduction 0 %, SG 1.25), absorption
    /// 0.5 % CA / 1.0 % FA, zero measured moisture, bulk densities
    /// 1.30 / 1.76 / 1.60 / 1.55 t/m3, coarse split 0.6 / 0.4.
    pub fn new(
        grade: ConcreteGrade,
        exposure: Exposure,
        max_agg_size: AggregateSize,
        fa_zone: FineAggZone,
    ) -> Self {
        MixDesignInput {
            grade,
            exposure,
            max_agg_size,
            fa_zone,
            cement_sg: 3.15,
            fa_sg: 2.65,
            ca_sg: 2.70,
            workability_slump_mm: tables::REFERENCE_SLUMP_MM,
            adopted_wc_ratio: tables::REFERENCE_WC_RATIO,
            use_superplasticizer: false,
            superplasticizer_pct: 0.0,
            water_reduction_pct: 0.0,
            admixture_sg: 1.25,
            ca_absorption_pct: 0.5,
            fa_absorption_pct: 1.0,
            ca_moisture_pct: 0.0,
            fa_moisture_pct: 0.0,
            bulk_density_cement: 1.3,
            bulk_density_fa: 1.76,
            bulk_density_ca20: 1.6,
            bulk_density_ca10: 1.55,
            ca20_fraction: 0.6,
            ca10_fraction: 0.4,
        }
    }

    /// Validate input parameters.
    ///
    /// Every denominator of the pipeline derives from these fields, so a
    /// value that fails here would otherwise surface downstream as a
    /// silent `NaN`/`Infinity`.
    pub fn validate(&self) -> MixResult<()> {
        for (field, value) in [
            ("cement_sg", self.cement_sg),
            ("fa_sg", self.fa_sg),
            ("ca_sg", self.ca_sg),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(MixError::invalid_input(
                    field,
                    value.to_string(),
                    "Specific gravity must be positive",
                ));
            }
        }
        if !self.adopted_wc_ratio.is_finite() || self.adopted_wc_ratio <= 0.0 {
            return Err(MixError::invalid_input(
                "adopted_wc_ratio",
                self.adopted_wc_ratio.to_string(),
                "Water-cement ratio must be positive",
            ));
        }
        if !self.workability_slump_mm.is_finite() || self.workability_slump_mm < 0.0 {
            return Err(MixError::invalid_input(
                "workability_slump_mm",
                self.workability_slump_mm.to_string(),
                "Slump cannot be negative",
            ));
        }
        for (field, value) in [
            ("superplasticizer_pct", self.superplasticizer_pct),
            ("water_reduction_pct", self.water_reduction_pct),
            ("ca_absorption_pct", self.ca_absorption_pct),
            ("fa_absorption_pct", self.fa_absorption_pct),
            ("ca_moisture_pct", self.ca_moisture_pct),
            ("fa_moisture_pct", self.fa_moisture_pct),
            ("ca20_fraction", self.ca20_fraction),
            ("ca10_fraction", self.ca10_fraction),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(MixError::invalid_input(
                    field,
                    value.to_string(),
                    "Value cannot be negative",
                ));
            }
        }
        if self.use_superplasticizer
            && (!self.admixture_sg.is_finite() || self.admixture_sg <= 0.0)
        {
            return Err(MixError::invalid_input(
                "admixture_sg",
                self.admixture_sg.to_string(),
                "Admixture specific gravity must be positive when a superplasticizer is used",
            ));
        }
        // A reduction of 100 % or more would zero out the water content,
        // and with it the cement content every batching ratio divides by
        if self.use_superplasticizer && self.water_reduction_pct >= 100.0 {
            return Err(MixError::invalid_input(
                "water_reduction_pct",
                self.water_reduction_pct.to_string(),
                "Water reduction must be below 100 %",
            ));
        }
        for (field, value) in [
            ("bulk_density_cement", self.bulk_density_cement),
            ("bulk_density_fa", self.bulk_density_fa),
            ("bulk_density_ca20", self.bulk_density_ca20),
            ("bulk_density_ca10", self.bulk_density_ca10),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(MixError::invalid_input(
                    field,
                    value.to_string(),
                    "Bulk density must be positive",
                ));
            }
        }
        Ok(())
    }
}

/// Target mean strength derivation (IS 10262 cl. 4.2).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetStrength {
    /// Characteristic strength fck (MPa)
    pub characteristic_mpa: f64,

    /// Assumed standard deviation S (MPa)
    pub std_dev_mpa: f64,

    /// Margin X over fck (MPa)
    pub margin_mpa: f64,

    /// Target mean strength max(fck + 1.65 S, fck + X), 2 dp (MPa)
    pub target_mean_mpa: f64,
}

/// Water-cement ratio durability check (IS 456 Table 5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterCementCheck {
    /// Maximum ratio permitted for durability
    pub max_ratio_durability: f64,

    /// Ratio adopted by the designer
    pub adopted_ratio: f64,

    /// Advisory check: adopted <= maximum
    pub check: ComplianceCheck,
}

/// Water content derivation (IS 10262 Table 4 with cl. 5.3 adjustments).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaterContent {
    /// Table 4 base demand at 50 mm slump (kg/m3)
    pub base_kg: f64,

    /// After the +3 % per 25 mm slump correction (kg/m3)
    pub slump_adjusted_kg: f64,

    /// After the superplasticizer water reduction (kg/m3)
    pub after_admixture_kg: f64,

    /// Rounded up to the next whole kg (kg/m3)
    pub final_kg: f64,

    /// Water to be added at the mixer after aggregate moisture
    /// corrections (kg/m3)
    pub to_be_added_kg: f64,
}

/// Cement content derivation and durability check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CementContent {
    /// Cement content = final water / adopted W/C (kg/m3)
    pub content_kg: f64,

    /// Minimum required for durability (kg/m3)
    pub min_required_kg: f64,

    /// Maximum permitted by IS 456 cl. 8.2.4.2 (kg/m3)
    pub max_permitted_kg: f64,

    /// Advisory check: minimum <= content <= maximum
    pub check: ComplianceCheck,
}

/// Coarse/fine split of total aggregate volume (IS 10262 Table 5).
///
/// These are fractions of total aggregate volume, not absolute volumes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateProportions {
    /// Table 5 base coarse fraction at the reference W/C ratio
    pub base_coarse_fraction: f64,

    /// Reference W/C ratio at which the table is defined (0.50)
    pub reference_wc_ratio: f64,

    /// Coarse fraction after the +-0.01 per 0.05 W/C correction
    pub coarse_fraction: f64,

    /// Fine fraction, the exact complement of the coarse fraction
    pub fine_fraction: f64,
}

/// Absolute volumes of each constituent in one cubic metre (m3).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbsoluteVolumes {
    /// Cement
    pub cement_m3: f64,
    /// Mixing water
    pub water_m3: f64,
    /// Entrapped air
    pub air_m3: f64,
    /// Chemical admixture
    pub admixture_m3: f64,
    /// Total aggregate (coarse + fine)
    pub total_agg_m3: f64,
    /// Coarse aggregate
    pub coarse_agg_m3: f64,
    /// Fine aggregate
    pub fine_agg_m3: f64,
}

/// Constituent masses for one cubic metre of concrete (kg).
///
/// Used for both the SSD-basis mix and the field-corrected mix; the
/// `water_kg` of the field mix is the water to be added at the mixer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixMasses {
    /// Cement
    pub cement_kg: f64,
    /// Water
    pub water_kg: f64,
    /// Fine aggregate
    pub fine_agg_kg: f64,
    /// Coarse aggregate
    pub coarse_agg_kg: f64,
    /// Admixture
    pub admixture_kg: f64,
}

/// Coarse aggregate split between the 20 mm and 10 mm stockpiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoarseSplit {
    /// Mass share of the 20 mm fraction, as supplied by the caller
    pub ca20_fraction: f64,
    /// Mass share of the 10 mm fraction, as supplied by the caller
    pub ca10_fraction: f64,
    /// SSD mass batched as 20 mm (kg)
    pub ca20_kg: f64,
    /// SSD mass batched as 10 mm (kg)
    pub ca10_kg: f64,
}

/// Field bulk volume occupied by each constituent (m3), from the
/// caller-supplied bulk densities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkVolumes {
    /// Cement
    pub cement_m3: f64,
    /// Fine aggregate
    pub fine_agg_m3: f64,
    /// 20 mm coarse fraction
    pub ca20_m3: f64,
    /// 10 mm coarse fraction
    pub ca10_m3: f64,
}

/// Site batching ratios normalized to cement = 1, reported to 3 dp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchRatios {
    /// Water
    pub water: f64,
    /// Cement (always 1)
    pub cement: f64,
    /// Fine aggregate (sand)
    pub sand: f64,
    /// 20 mm coarse fraction
    pub ca20: f64,
    /// 10 mm coarse fraction
    pub ca10: f64,
}

/// Batching stage output: split, bulk volumes, and both ratio bases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batching {
    /// Coarse aggregate stockpile split
    pub split: CoarseSplit,

    /// Per-constituent field bulk volumes
    pub bulk_volumes: BulkVolumes,

    /// Ratios by mass
    pub by_weight: BatchRatios,

    /// Ratios by field bulk volume
    pub by_volume: BatchRatios,
}

/// Results from a mix design calculation.
///
/// A pure function of the input and the reference tables: two calls with
/// identical input yield bit-identical results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixDesignResult {
    /// Target mean strength stage
    pub target_strength: TargetStrength,

    /// Durability W/C ratio check
    pub water_cement: WaterCementCheck,

    /// Water content stage
    pub water_content: WaterContent,

    /// Cement content stage
    pub cement_content: CementContent,

    /// Aggregate volume proportioning stage
    pub proportions: AggregateProportions,

    /// Absolute volume balance over 1 m3
    pub volumes: AbsoluteVolumes,

    /// SSD-basis mix masses per m3
    pub ssd_masses: MixMasses,

    /// Field-corrected mix masses per m3
    pub field_masses: MixMasses,

    /// Weight and volume batching ratios
    pub batching: Batching,
}

impl MixDesignResult {
    /// True if both advisory durability checks passed
    pub fn checks_pass(&self) -> bool {
        self.water_cement.check.is_ok() && self.cement_content.check.is_ok()
    }
}

/// Round up to the next multiple of `significance` (spreadsheet CEILING).
fn ceil_to(value: f64, significance: f64) -> f64 {
    if significance == 0.0 {
        return 0.0;
    }
    (value / significance).ceil() * significance
}

/// Round to `dp` decimal places for reporting fields.
fn round_dp(value: f64, dp: i32) -> f64 {
    let scale = 10f64.powi(dp);
    (value * scale).round() / scale
}

/// Field-condition mass of one aggregate plus the delta to accumulate
/// into the water-to-add total.
///
/// A zero moisture reading with positive absorption means the stockpile
/// is bone dry: it will absorb mix water, so the SSD-to-field mass
/// difference is extra water to add. Otherwise the aggregate carries
/// surface moisture and the net of moisture minus absorption adjusts
/// both the batched mass and the water total.
fn field_correction(mass_ssd_kg: f64, moisture_pct: f64, absorption_pct: f64) -> (f64, f64) {
    if moisture_pct == 0.0 && absorption_pct > 0.0 {
        let mass_field = mass_ssd_kg / (1.0 + absorption_pct / 100.0);
        (mass_field, mass_ssd_kg - mass_field)
    } else {
        let mass_field = mass_ssd_kg * (1.0 + (moisture_pct - absorption_pct) / 100.0);
        (mass_field, mass_field - mass_ssd_kg)
    }
}

/// Calculate a complete mix design.
///
/// Stateless and side-effect free; fails with a typed [`MixError`] rather
/// than returning a partial result.
///
/// # Arguments
///
/// * `input` - Project stipulations and material test data
///
/// # Returns
///
/// * `Ok(MixDesignResult)` - The proportioned mix
/// * `Err(MixError)` - If inputs are invalid or the volume balance cannot close
pub fn calculate(input: &MixDesignInput) -> MixResult<MixDesignResult> {
    input.validate()?;

    // Target mean strength (IS 10262 cl. 4.2)
    let fck = input.grade.fck_mpa();
    let std_dev = tables::assumed_std_dev_mpa(input.grade);
    let margin = tables::margin_x_mpa(input.grade);
    let target_strength = TargetStrength {
        characteristic_mpa: fck,
        std_dev_mpa: std_dev,
        margin_mpa: margin,
        target_mean_mpa: round_dp((fck + 1.65 * std_dev).max(fck + margin), 2),
    };

    // Durability limits (IS 456 Table 5) - mandatory lookup
    let limits = tables::durability_limits(input.grade)?;
    let water_cement = WaterCementCheck {
        max_ratio_durability: limits.max_wc_ratio,
        adopted_ratio: input.adopted_wc_ratio,
        check: ComplianceCheck::from_bool(input.adopted_wc_ratio <= limits.max_wc_ratio),
    };

    // Water content: Table 4 base, +3 % per 25 mm slump above the 50 mm
    // reference (unclamped), then the admixture reduction, then ceiling
    // to the next whole kg
    let base_kg = tables::base_water_content_kg(input.max_agg_size);
    let slump_delta = input.workability_slump_mm - tables::REFERENCE_SLUMP_MM;
    let slump_adjusted_kg = base_kg * (1.0 + 0.03 * (slump_delta / 25.0));
    let after_admixture_kg = if input.use_superplasticizer && input.water_reduction_pct > 0.0 {
        slump_adjusted_kg * (1.0 - input.water_reduction_pct / 100.0)
    } else {
        slump_adjusted_kg
    };
    let water_final_kg = ceil_to(after_admixture_kg, 1.0);

    // Cement content, checked against both durability bounds
    let cement_kg = water_final_kg / input.adopted_wc_ratio;
    let cement_content = CementContent {
        content_kg: cement_kg,
        min_required_kg: limits.min_cement_kg,
        max_permitted_kg: tables::MAX_CEMENT_CONTENT_KG,
        check: ComplianceCheck::from_bool(
            cement_kg >= limits.min_cement_kg && cement_kg <= tables::MAX_CEMENT_CONTENT_KG,
        ),
    };

    // Aggregate volume proportioning: Table 5 base, +-0.01 per 0.05
    // deviation of the adopted ratio from the 0.50 reference
    let base_coarse = tables::coarse_agg_volume_fraction(input.fa_zone, input.max_agg_size)?;
    let coarse_fraction = base_coarse
        + ((tables::REFERENCE_WC_RATIO - input.adopted_wc_ratio) / 0.05) * 0.01;
    if coarse_fraction <= 0.0 || coarse_fraction >= 1.0 {
        return Err(MixError::invalid_input(
            "adopted_wc_ratio",
            input.adopted_wc_ratio.to_string(),
            format!(
                "W/C correction drives the coarse aggregate fraction to {coarse_fraction:.3}, outside (0, 1)"
            ),
        ));
    }
    let fine_fraction = 1.0 - coarse_fraction;
    let proportions = AggregateProportions {
        base_coarse_fraction: base_coarse,
        reference_wc_ratio: tables::REFERENCE_WC_RATIO,
        coarse_fraction,
        fine_fraction,
    };

    // Absolute volume balance: 1 m3 = cement + water + air + admixture + aggregate
    let admixture_kg = if input.use_superplasticizer {
        cement_kg * input.superplasticizer_pct / 100.0
    } else {
        0.0
    };
    let admixture_m3 = if input.use_superplasticizer {
        admixture_kg / (input.admixture_sg * 1000.0)
    } else {
        0.0
    };
    let cement_m3 = cement_kg / (input.cement_sg * 1000.0);
    let water_m3 = water_final_kg / 1000.0;
    let air_m3 = tables::entrapped_air_fraction(input.max_agg_size);
    let total_agg_m3 = 1.0 - (cement_m3 + water_m3 + air_m3 + admixture_m3);
    if total_agg_m3 <= 0.0 {
        return Err(MixError::invalid_input(
            "total_aggregate_volume",
            format!("{total_agg_m3:.4}"),
            "Cement, water, air and admixture volumes leave no room for aggregate; \
             reduce the water demand or check the specific gravities",
        ));
    }
    let coarse_agg_m3 = total_agg_m3 * coarse_fraction;
    let fine_agg_m3 = total_agg_m3 * fine_fraction;
    let volumes = AbsoluteVolumes {
        cement_m3,
        water_m3,
        air_m3,
        admixture_m3,
        total_agg_m3,
        coarse_agg_m3,
        fine_agg_m3,
    };

    let mass_ca_ssd_kg = coarse_agg_m3 * input.ca_sg * 1000.0;
    let mass_fa_ssd_kg = fine_agg_m3 * input.fa_sg * 1000.0;
    let ssd_masses = MixMasses {
        cement_kg,
        water_kg: water_final_kg,
        fine_agg_kg: mass_fa_ssd_kg,
        coarse_agg_kg: mass_ca_ssd_kg,
        admixture_kg,
    };

    // Field-moisture correction, both aggregates accumulating into the
    // same water-to-add running total
    let (mass_fa_field_kg, fa_water_delta) =
        field_correction(mass_fa_ssd_kg, input.fa_moisture_pct, input.fa_absorption_pct);
    let (mass_ca_field_kg, ca_water_delta) =
        field_correction(mass_ca_ssd_kg, input.ca_moisture_pct, input.ca_absorption_pct);
    let water_to_be_added_kg = water_final_kg + fa_water_delta + ca_water_delta;

    let water_content = WaterContent {
        base_kg,
        slump_adjusted_kg,
        after_admixture_kg,
        final_kg: water_final_kg,
        to_be_added_kg: water_to_be_added_kg,
    };
    let field_masses = MixMasses {
        cement_kg,
        water_kg: water_to_be_added_kg,
        fine_agg_kg: mass_fa_field_kg,
        coarse_agg_kg: mass_ca_field_kg,
        admixture_kg,
    };

    // Batching ratios: the split is propagated as supplied, without
    // re-normalization
    let ca20_kg = mass_ca_ssd_kg * input.ca20_fraction;
    let ca10_kg = mass_ca_ssd_kg * input.ca10_fraction;
    let cement_bulk_m3 = cement_kg / (input.bulk_density_cement * 1000.0);
    let fa_bulk_m3 = mass_fa_ssd_kg / (input.bulk_density_fa * 1000.0);
    let ca20_bulk_m3 = ca20_kg / (input.bulk_density_ca20 * 1000.0);
    let ca10_bulk_m3 = ca10_kg / (input.bulk_density_ca10 * 1000.0);
    let water_bulk_m3 = water_final_kg / (input.bulk_density_cement * 1000.0);

    let batching = Batching {
        split: CoarseSplit {
            ca20_fraction: input.ca20_fraction,
            ca10_fraction: input.ca10_fraction,
            ca20_kg,
            ca10_kg,
        },
        bulk_volumes: BulkVolumes {
            cement_m3: cement_bulk_m3,
            fine_agg_m3: fa_bulk_m3,
            ca20_m3: ca20_bulk_m3,
            ca10_m3: ca10_bulk_m3,
        },
        by_weight: BatchRatios {
            water: round_dp(input.adopted_wc_ratio, 3),
            cement: 1.0,
            sand: round_dp(mass_fa_ssd_kg / cement_kg, 3),
            ca20: round_dp(ca20_kg / cement_kg, 3),
            ca10: round_dp(ca10_kg / cement_kg, 3),
        },
        by_volume: BatchRatios {
            water: round_dp(water_bulk_m3 / cement_bulk_m3, 3),
            cement: 1.0,
            sand: round_dp(fa_bulk_m3 / cement_bulk_m3, 3),
            ca20: round_dp(ca20_bulk_m3 / cement_bulk_m3, 3),
            ca10: round_dp(ca10_bulk_m3 / cement_bulk_m3, 3),
        },
    };

    Ok(MixDesignResult {
        target_strength,
        water_cement,
        water_content,
        cement_content,
        proportions,
        volumes,
        ssd_masses,
        field_masses,
        batching,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// M35 worked example from the published design sheet.
    fn m35_input() -> MixDesignInput {
        MixDesignInput {
            cement_sg: 2.9,
            fa_sg: 2.65,
            ca_sg: 2.66,
            workability_slump_mm: 140.0,
            adopted_wc_ratio: 0.4,
            use_superplasticizer: true,
            superplasticizer_pct: 0.5,
            water_reduction_pct: 15.0,
            fa_absorption_pct: 1.05,
            ..MixDesignInput::new(
                ConcreteGrade::M35,
                Exposure::Severe,
                AggregateSize::Mm20,
                FineAggZone::II,
            )
        }
    }

    #[test]
    fn test_m35_target_strength() {
        let result = calculate(&m35_input()).unwrap();
        // max(35 + 1.65 * 5, 35 + 6.5) = max(43.25, 41.5)
        assert_eq!(result.target_strength.target_mean_mpa, 43.25);
        assert_eq!(result.target_strength.std_dev_mpa, 5.0);
        assert_eq!(result.target_strength.margin_mpa, 6.5);
    }

    #[test]
    fn test_m35_water_and_cement() {
        let result = calculate(&m35_input()).unwrap();

        assert_eq!(result.water_content.base_kg, 186.0);
        // 186 * (1 + 0.03 * 90/25) = 206.088
        assert!((result.water_content.slump_adjusted_kg - 206.088).abs() < 1e-9);
        // 206.088 * 0.85 = 175.1748, ceiling 176
        assert!((result.water_content.after_admixture_kg - 175.1748).abs() < 1e-9);
        assert_eq!(result.water_content.final_kg, 176.0);

        assert!((result.cement_content.content_kg - 440.0).abs() < 1e-9);
        assert!(result.cement_content.check.is_ok());
        assert!(result.water_cement.check.is_ok());
        assert!(result.checks_pass());
    }

    #[test]
    fn test_m35_proportions_and_masses() {
        let result = calculate(&m35_input()).unwrap();

        // Zone II / 20 mm base 0.62, + (0.50 - 0.40)/0.05 * 0.01 = 0.64
        assert!((result.proportions.coarse_fraction - 0.64).abs() < 1e-12);
        assert!((result.proportions.fine_fraction - 0.36).abs() < 1e-12);

        assert!((result.ssd_masses.fine_agg_kg - 630.13).abs() < 0.05);
        assert!((result.ssd_masses.coarse_agg_kg - 1124.46).abs() < 0.05);
        assert!((result.ssd_masses.admixture_kg - 2.2).abs() < 1e-9);
    }

    #[test]
    fn test_m35_field_correction() {
        let result = calculate(&m35_input()).unwrap();

        // Zero moisture with positive absorption: bone-dry stockpiles,
        // field masses shrink and the difference becomes extra water
        assert!(result.field_masses.fine_agg_kg < result.ssd_masses.fine_agg_kg);
        assert!(result.field_masses.coarse_agg_kg < result.ssd_masses.coarse_agg_kg);
        assert!((result.water_content.to_be_added_kg - 188.14).abs() < 0.05);
        assert_eq!(
            result.field_masses.water_kg,
            result.water_content.to_be_added_kg
        );
    }

    #[test]
    fn test_m35_batching_ratios() {
        let result = calculate(&m35_input()).unwrap();

        assert_eq!(result.batching.by_weight.cement, 1.0);
        assert_eq!(result.batching.by_weight.water, 0.4);
        assert!((result.batching.by_weight.sand - 1.432).abs() < 1e-9);
        assert!((result.batching.by_weight.ca20 - 1.533).abs() < 1e-9);
        assert!((result.batching.by_weight.ca10 - 1.022).abs() < 1e-9);

        // Water bulk volume over cement bulk volume collapses to the W/C ratio
        assert!((result.batching.by_volume.water - 0.4).abs() < 1e-9);
        assert!((result.batching.by_volume.sand - 1.058).abs() < 1e-9);
    }

    #[test]
    fn test_volume_closure() {
        let result = calculate(&m35_input()).unwrap();
        let v = &result.volumes;
        let sum = v.cement_m3 + v.water_m3 + v.air_m3 + v.admixture_m3
            + v.coarse_agg_m3 + v.fine_agg_m3;
        assert!((sum - 1.0).abs() < 1e-6, "volume closure off: {sum}");
    }

    #[test]
    fn test_determinism() {
        let input = m35_input();
        let a = serde_json::to_string(&calculate(&input).unwrap()).unwrap();
        let b = serde_json::to_string(&calculate(&input).unwrap()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_slump_monotonicity() {
        let mut low = m35_input();
        low.workability_slump_mm = 75.0;
        let mut high = m35_input();
        high.workability_slump_mm = 150.0;

        let low = calculate(&low).unwrap();
        let high = calculate(&high).unwrap();
        assert!(high.water_content.slump_adjusted_kg > low.water_content.slump_adjusted_kg);
    }

    #[test]
    fn test_water_reduction_monotonicity() {
        let mut small = m35_input();
        small.water_reduction_pct = 10.0;
        let mut large = m35_input();
        large.water_reduction_pct = 20.0;

        let small = calculate(&small).unwrap();
        let large = calculate(&large).unwrap();
        assert!(large.water_content.after_admixture_kg < small.water_content.after_admixture_kg);
    }

    #[test]
    fn test_total_water_reduction_is_invalid() {
        // 100 % reduction would zero the water content and the cement
        // content that every batching ratio divides by
        let mut input = m35_input();
        input.water_reduction_pct = 100.0;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        input.water_reduction_pct = 150.0;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");

        // Just below the bound the design still closes with positive masses
        input.water_reduction_pct = 99.0;
        let result = calculate(&input).unwrap();
        assert!(result.water_content.final_kg > 0.0);
        assert!(result.cement_content.content_kg > 0.0);
        assert!(result.batching.by_weight.sand.is_finite());

        // Without the superplasticizer the reduction is not applied and
        // the field is carried as a plain record
        input.use_superplasticizer = false;
        input.water_reduction_pct = 150.0;
        let result = calculate(&input).unwrap();
        assert_eq!(result.water_content.after_admixture_kg, result.water_content.slump_adjusted_kg);
    }

    #[test]
    fn test_ceiling_behavior() {
        for slump in [60.0, 85.0, 110.0, 140.0] {
            let mut input = m35_input();
            input.workability_slump_mm = slump;
            let result = calculate(&input).unwrap();
            let w = &result.water_content;
            assert_eq!(w.final_kg.fract(), 0.0);
            assert!(w.final_kg >= w.after_admixture_kg);
            assert!(w.final_kg - w.after_admixture_kg < 1.0);
        }
    }

    #[test]
    fn test_low_slump_extrapolates_below_base() {
        // 25 mm slump sits below the 50 mm reference; the linear
        // correction is unclamped and goes below the table value
        let mut input = m35_input();
        input.workability_slump_mm = 25.0;
        let result = calculate(&input).unwrap();
        assert!(result.water_content.slump_adjusted_kg < result.water_content.base_kg);
    }

    #[test]
    fn test_m15_uses_fallback_statistics() {
        let input = MixDesignInput {
            adopted_wc_ratio: 0.5,
            ..MixDesignInput::new(
                ConcreteGrade::M15,
                Exposure::Moderate,
                AggregateSize::Mm20,
                FineAggZone::II,
            )
        };
        let result = calculate(&input).unwrap();
        // max(15 + 1.65 * 5, 15 + 6.5) = 23.25
        assert_eq!(result.target_strength.target_mean_mpa, 23.25);
        assert_eq!(result.target_strength.std_dev_mpa, 5.0);
    }

    #[test]
    fn test_wc_check_not_ok_is_advisory() {
        let mut input = m35_input();
        input.adopted_wc_ratio = 0.5; // above the 0.45 M35 limit
        let result = calculate(&input).unwrap();
        assert!(!result.water_cement.check.is_ok());
        // Engine still proceeds with the adopted ratio
        assert!((result.cement_content.content_kg - result.water_content.final_kg / 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_cement_upper_bound() {
        // Push cement above 450 kg/m3 with a very low W/C ratio
        let mut input = m35_input();
        input.adopted_wc_ratio = 0.3;
        let result = calculate(&input).unwrap();
        assert!(result.cement_content.content_kg > 450.0);
        assert!(!result.cement_content.check.is_ok());
    }

    #[test]
    fn test_zero_wc_ratio_is_invalid() {
        let mut input = m35_input();
        input.adopted_wc_ratio = 0.0;
        let err = calculate(&input).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_negative_sg_is_invalid() {
        let mut input = m35_input();
        input.cement_sg = -2.9;
        assert!(calculate(&input).is_err());

        let mut input = m35_input();
        input.fa_sg = 0.0;
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_negative_slump_is_invalid() {
        let mut input = m35_input();
        input.workability_slump_mm = -10.0;
        assert!(calculate(&input).is_err());
    }

    #[test]
    fn test_negative_aggregate_volume_is_reported() {
        // An extreme slump demand inflates water and cement until their
        // volumes exceed the cubic metre
        let mut input = m35_input();
        input.use_superplasticizer = false;
        input.water_reduction_pct = 0.0;
        input.workability_slump_mm = 2500.0;
        let err = calculate(&input).unwrap_err();
        match err {
            MixError::InvalidInput { field, .. } => {
                assert_eq!(field, "total_aggregate_volume");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_surface_moisture_branch() {
        let mut input = m35_input();
        input.fa_moisture_pct = 2.0; // above the 1.05 % absorption
        let result = calculate(&input).unwrap();
        // Net moisture above absorption inflates the batched field mass
        assert!(result.field_masses.fine_agg_kg > result.ssd_masses.fine_agg_kg);
    }

    #[test]
    fn test_inconsistent_split_propagates() {
        // The ca20/ca10 split is caller-maintained; an inconsistent one
        // flows straight through to the batched weights
        let mut input = m35_input();
        input.ca20_fraction = 0.7;
        input.ca10_fraction = 0.5;
        let result = calculate(&input).unwrap();
        let split = &result.batching.split;
        assert!((split.ca20_kg + split.ca10_kg - result.ssd_masses.coarse_agg_kg * 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_no_admixture_volume_without_superplasticizer() {
        let mut input = m35_input();
        input.use_superplasticizer = false;
        let result = calculate(&input).unwrap();
        assert_eq!(result.volumes.admixture_m3, 0.0);
        assert_eq!(result.ssd_masses.admixture_kg, 0.0);
    }

    #[test]
    fn test_defaults_roundtrip() {
        let input = MixDesignInput::new(
            ConcreteGrade::M25,
            Exposure::Moderate,
            AggregateSize::Mm20,
            FineAggZone::III,
        );
        assert_eq!(input.admixture_sg, 1.25);
        assert_eq!(input.ca_absorption_pct, 0.5);
        assert_eq!(input.fa_absorption_pct, 1.0);
        assert_eq!(input.bulk_density_cement, 1.3);
        assert_eq!(input.ca20_fraction + input.ca10_fraction, 1.0);

        let json = serde_json::to_string(&input).unwrap();
        let roundtrip: MixDesignInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);
    }

    #[test]
    fn test_result_serialization() {
        let result = calculate(&m35_input()).unwrap();
        let json = serde_json::to_string_pretty(&result).unwrap();
        assert!(json.contains("\"check\": \"OK\""));
        let roundtrip: MixDesignResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, roundtrip);
    }

    #[test]
    fn test_ceil_to() {
        assert_eq!(ceil_to(161.2, 1.0), 162.0);
        assert_eq!(ceil_to(161.0, 1.0), 161.0);
        assert_eq!(ceil_to(5.0, 0.0), 0.0);
    }
}
