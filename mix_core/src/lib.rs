//! # mix_core - Concrete Mix Proportioning Engine
//!
//! `mix_core` computes concrete mix designs per IS 10262 with a clean,
//! LLM-friendly API. All inputs and outputs are JSON-serializable, making
//! it ideal for integration with AI assistants via MCP or similar protocols.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Typed Tables**: IS 10262 / IS 456 reference data as immutable constants
//!
//! ## Quick Start
//!
//! ```rust
//! use mix_core::calculations::mix_design::{calculate, MixDesignInput};
//! use mix_core::materials::{AggregateSize, ConcreteGrade, Exposure, FineAggZone};
//!
//! let input = MixDesignInput::new(
//!     ConcreteGrade::M25,
//!     Exposure::Moderate,
//!     AggregateSize::Mm20,
//!     FineAggZone::II,
//! );
//!
//! let result = calculate(&input).unwrap();
//! println!("Cement: {:.0} kg/m3", result.cement_content.content_kg);
//! ```
//!
//! ## Modules
//!
//! - [`calculations`] - The mix design pipeline (input, stages, result)
//! - [`materials`] - Grades, aggregate sizes, zones, exposure conditions
//! - [`tables`] - IS 10262 / IS 456 reference tables
//! - [`project`] - Design-sheet container with record-keeping metadata
//! - [`errors`] - Structured error types

pub mod calculations;
pub mod errors;
pub mod materials;
pub mod project;
pub mod tables;

// Re-export commonly used types at crate root for convenience
pub use calculations::{ComplianceCheck, MixDesignInput, MixDesignResult};
pub use errors::{MixError, MixResult};
pub use project::{MixProject, ProjectMetadata};
