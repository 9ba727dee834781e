//! Technical task domain model.
//!
//! Tasks are created by the breakdown engine and are read-only afterwards.
//! Each one describes a feature slice the orchestrator generates code for.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::errors::{DomainError, DomainResult};

/// Which side of the project a task targets.
///
/// Unknown strings are preserved in `Other` so that a payload with an
/// unsupported type still deserializes and can be rejected by the
/// orchestrator with a precise message.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TaskKind {
    Frontend,
    Backend,
    General,
    Other(String),
}

impl TaskKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
            Self::General => "general",
            Self::Other(s) => s.as_str(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.as_str().trim().is_empty()
    }

    /// The code-generating agent for this kind, if there is one.
    pub fn agent(&self) -> Option<AgentKind> {
        match self {
            Self::Frontend => Some(AgentKind::Frontend),
            Self::Backend => Some(AgentKind::Backend),
            Self::General | Self::Other(_) => None,
        }
    }
}

/// The two code-generating agents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Frontend,
    Backend,
}

impl AgentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Frontend => "frontend",
            Self::Backend => "backend",
        }
    }
}

impl From<String> for TaskKind {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "frontend" => Self::Frontend,
            "backend" => Self::Backend,
            "general" => Self::General,
            _ => Self::Other(s),
        }
    }
}

impl From<&str> for TaskKind {
    fn from(s: &str) -> Self {
        Self::from(s.to_string())
    }
}

impl From<TaskKind> for String {
    fn from(kind: TaskKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Priority level for tasks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low = 1,
    #[default]
    Medium = 2,
    High = 3,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }
}

/// A discrete unit of work the pipeline generates code for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalTask {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub kind: TaskKind,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f32>,
    /// Task identifiers or free-text prerequisites
    #[serde(default)]
    pub dependencies: Vec<String>,
    #[serde(default)]
    pub acceptance_criteria: Vec<String>,
}

impl TechnicalTask {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        kind: TaskKind,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            kind,
            priority: TaskPriority::default(),
            estimated_hours: None,
            dependencies: Vec::new(),
            acceptance_criteria: Vec::new(),
        }
    }

    pub fn with_priority(mut self, priority: TaskPriority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_estimated_hours(mut self, hours: f32) -> Self {
        self.estimated_hours = Some(hours);
        self
    }

    pub fn with_dependency(mut self, dependency: impl Into<String>) -> Self {
        self.dependencies.push(dependency.into());
        self
    }

    pub fn with_acceptance_criteria(mut self, criteria: Vec<String>) -> Self {
        self.acceptance_criteria = criteria;
        self
    }

    /// Check the fields generation depends on.
    ///
    /// A task without title, description or type never reaches a generator.
    pub fn validate(&self) -> DomainResult<()> {
        if self.title.trim().is_empty()
            || self.description.trim().is_empty()
            || self.kind.is_empty()
        {
            return Err(DomainError::Validation(
                "title, description, and type are required".to_string(),
            ));
        }
        if let Some(hours) = self.estimated_hours {
            if hours < 0.0 || hours.is_nan() {
                return Err(DomainError::Validation(format!(
                    "estimated hours must be non-negative, got {hours}"
                )));
            }
        }
        Ok(())
    }

    /// A task is complete enough to plan against when it also lists
    /// acceptance criteria.
    pub fn is_well_formed(&self) -> bool {
        self.validate().is_ok() && !self.acceptance_criteria.is_empty()
    }
}
