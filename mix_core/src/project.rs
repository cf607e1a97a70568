//! # Project Data Structures
//!
//! The `MixProject` struct pairs one mix design input with the
//! record-keeping metadata that goes on the design sheet (designer, job
//! number, client, timestamps). Projects serialize to human-readable JSON;
//! persistence of computed designs is deliberately left to the caller.
//!
//! ## Example
//!
//! ```rust
//! use mix_core::project::MixProject;
//! use mix_core::calculations::mix_design::MixDesignInput;
//! use mix_core::materials::{AggregateSize, ConcreteGrade, Exposure, FineAggZone};
//!
//! let input = MixDesignInput::new(
//!     ConcreteGrade::M30,
//!     Exposure::Severe,
//!     AggregateSize::Mm20,
//!     FineAggZone::II,
//! );
//! let project = MixProject::new("Jane Engineer", "25-042", "ACME Infra", input);
//!
//! let result = project.compute().unwrap();
//! assert!(result.target_strength.target_mean_mpa > 30.0);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calculations::mix_design::{calculate, MixDesignInput, MixDesignResult};
use crate::errors::MixResult;

/// Current schema version for serialized projects
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root design-sheet container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixProject {
    /// Project metadata (version, designer, job info)
    pub meta: ProjectMetadata,

    /// The mix design input for this sheet
    pub input: MixDesignInput,
}

/// Record-keeping metadata for a design sheet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version of this structure
    pub version: String,

    /// Stable identifier for this sheet
    pub id: Uuid,

    /// Name of the responsible designer
    pub designer: String,

    /// Job/project number (e.g., "25-001")
    pub job_id: String,

    /// Client name
    pub client: String,

    /// When the sheet was created
    pub created: DateTime<Utc>,

    /// Last modification time
    pub modified: DateTime<Utc>,
}

impl MixProject {
    /// Create a new project around a design input.
    pub fn new(
        designer: impl Into<String>,
        job_id: impl Into<String>,
        client: impl Into<String>,
        input: MixDesignInput,
    ) -> Self {
        let now = Utc::now();
        MixProject {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                id: Uuid::new_v4(),
                designer: designer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            input,
        }
    }

    /// Run the mix design for this sheet's input.
    ///
    /// The computation is pure; calling this repeatedly without touching
    /// the input yields identical results.
    pub fn compute(&self) -> MixResult<MixDesignResult> {
        calculate(&self.input)
    }

    /// Replace the design input, updating the modified timestamp.
    pub fn set_input(&mut self, input: MixDesignInput) {
        self.input = input;
        self.touch();
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::materials::{AggregateSize, ConcreteGrade, Exposure, FineAggZone};

    fn test_project() -> MixProject {
        let input = MixDesignInput::new(
            ConcreteGrade::M30,
            Exposure::Severe,
            AggregateSize::Mm20,
            FineAggZone::II,
        );
        MixProject::new("Test Designer", "25-001", "Test Client", input)
    }

    #[test]
    fn test_project_metadata() {
        let project = test_project();
        assert_eq!(project.meta.designer, "Test Designer");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.meta.created, project.meta.modified);
    }

    #[test]
    fn test_project_compute_delegates() {
        let project = test_project();
        let direct = calculate(&project.input).unwrap();
        let via_project = project.compute().unwrap();
        assert_eq!(direct, via_project);
    }

    #[test]
    fn test_set_input_touches() {
        let mut project = test_project();
        let created = project.meta.created;
        let mut input = project.input.clone();
        input.adopted_wc_ratio = 0.42;
        project.set_input(input);
        assert!(project.meta.modified >= created);
        assert_eq!(project.input.adopted_wc_ratio, 0.42);
    }

    #[test]
    fn test_project_serialization() {
        let project = test_project();
        let json = serde_json::to_string_pretty(&project).unwrap();
        let roundtrip: MixProject = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.id, project.meta.id);
        assert_eq!(roundtrip.input, project.input);
    }
}
