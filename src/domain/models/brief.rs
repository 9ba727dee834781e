//! Project brief domain model.
//!
//! A brief is the natural-language input describing the desired project.
//! It is immutable once constructed; every pipeline stage only reads it.

use serde::{Deserialize, Serialize};

use crate::domain::errors::{DomainError, DomainResult};

/// Free-text description of a project plus optional structured hints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectBrief {
    /// What the project should do (required, non-blank)
    pub description: String,
    /// Ordered functional requirements
    #[serde(default)]
    pub requirements: Vec<String>,
    /// Ordered constraints (stack, hosting, budget, ...)
    #[serde(default)]
    pub constraints: Vec<String>,
    /// Optional delivery timeline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
}

impl ProjectBrief {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            requirements: Vec::new(),
            constraints: Vec::new(),
            timeline: None,
        }
    }

    pub fn with_requirements(mut self, requirements: Vec<String>) -> Self {
        self.requirements = requirements;
        self
    }

    pub fn with_constraints(mut self, constraints: Vec<String>) -> Self {
        self.constraints = constraints;
        self
    }

    pub fn with_timeline(mut self, timeline: impl Into<String>) -> Self {
        self.timeline = Some(timeline.into());
        self
    }

    /// Reject a brief without a usable description.
    pub fn validate(&self) -> DomainResult<()> {
        if self.description.trim().is_empty() {
            return Err(DomainError::InvalidBrief(
                "description is required".to_string(),
            ));
        }
        Ok(())
    }

    /// Parse a brief from a JSON or YAML document.
    ///
    /// JSON is tried first since every JSON document is also YAML but the
    /// JSON parser gives clearer errors for JSON input.
    pub fn from_document(raw: &str) -> DomainResult<Self> {
        let brief: Self = match serde_json::from_str(raw) {
            Ok(brief) => brief,
            Err(_) => serde_yaml::from_str(raw)?,
        };
        brief.validate()?;
        Ok(brief)
    }
}
