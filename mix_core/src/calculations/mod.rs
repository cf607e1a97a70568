//! # Mix Design Calculations
//!
//! Calculation modules follow a single pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, MixError>` - Pure calculation function
//!
//! ## LLM Integration
//!
//! All types are designed for LLM consumption:
//! - Comprehensive rustdoc with examples
//! - Clean JSON serialization
//! - Structured error responses
//!
//! ## Available Calculations
//!
//! - [`mix_design`] - Concrete mix proportioning per IS 10262

pub mod mix_design;

// Re-export commonly used types
pub use mix_design::{calculate, ComplianceCheck, MixDesignInput, MixDesignResult};
