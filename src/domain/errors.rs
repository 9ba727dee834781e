//! Domain errors for the generation pipeline.

use thiserror::Error;

/// Domain-level errors that can occur while turning a brief into a project.
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invalid brief: {0}")]
    InvalidBrief(String),

    #[error("Invalid task: {0}")]
    Validation(String),

    #[error("Unknown task type: {0}")]
    UnsupportedTaskType(String),

    #[error("Text generation failed: {0}")]
    Capability(#[from] CapabilityError),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("I/O error: {0}")]
    Io(String),
}

pub type DomainResult<T> = Result<T, DomainError>;

impl DomainError {
    /// True when the error came from the external text-generation capability
    /// and can be recovered by the deterministic fallback.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::Capability(_))
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(err: serde_json::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

impl From<serde_yaml::Error> for DomainError {
    fn from(err: serde_yaml::Error) -> Self {
        DomainError::SerializationError(err.to_string())
    }
}

impl From<std::io::Error> for DomainError {
    fn from(err: std::io::Error) -> Self {
        DomainError::Io(err.to_string())
    }
}

/// Failures of the external text-generation capability.
///
/// Every variant is recovered locally by substituting the template
/// generator; none of them is surfaced as a pipeline failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CapabilityError {
    #[error("Text generator not configured: {0}")]
    NotConfigured(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Quota exceeded: {0}")]
    Quota(String),

    #[error("Timed out after {0}s")]
    Timeout(u64),

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },
}
