//! # Error Types
//!
//! Structured error types for mix_core. These errors are designed to be
//! informative for both humans and LLMs, providing enough context to
//! understand and fix issues programmatically.
//!
//! ## Example
//!
//! ```rust
//! use mix_core::errors::{MixError, MixResult};
//!
//! fn validate_wc_ratio(ratio: f64) -> MixResult<()> {
//!     if ratio <= 0.0 {
//!         return Err(MixError::InvalidInput {
//!             field: "adopted_wc_ratio".to_string(),
//!             value: ratio.to_string(),
//!             reason: "Water-cement ratio must be positive".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for mix_core operations
pub type MixResult<T> = Result<T, MixError>;

/// Structured error type for mix design operations.
///
/// Each variant provides specific context about what went wrong,
/// enabling programmatic error handling by LLMs and other consumers.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum MixError {
    /// An input value is invalid (out of range, non-finite, or it drives a
    /// derived quantity negative)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Grade designation has no entry in the durability table
    #[error("Unsupported grade '{grade}'. Supported grades: {supported}")]
    UnsupportedGrade { grade: String, supported: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl MixError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        MixError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create an UnsupportedGrade error, listing every supported designation
    pub fn unsupported_grade(grade: impl Into<String>) -> Self {
        let supported: Vec<&str> = crate::materials::ConcreteGrade::ALL
            .iter()
            .map(|g| g.designation())
            .collect();
        MixError::UnsupportedGrade {
            grade: grade.into(),
            supported: supported.join(", "),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            MixError::InvalidInput { .. } => "INVALID_INPUT",
            MixError::UnsupportedGrade { .. } => "UNSUPPORTED_GRADE",
            MixError::SerializationError { .. } => "SERIALIZATION_ERROR",
            MixError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}
