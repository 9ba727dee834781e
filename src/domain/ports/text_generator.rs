//! Text generator port - interface for the external LLM capability.

use async_trait::async_trait;

use crate::domain::errors::CapabilityError;

/// Given a prompt, return generated text.
///
/// Implementations are treated as unreliable and non-idempotent: callers
/// invoke `complete` at most once per task and never retry it blindly.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Get the generator type name.
    fn name(&self) -> &'static str;

    /// Check if the generator is configured well enough to attempt a call.
    async fn is_available(&self) -> bool;

    /// Generate text for a prompt.
    async fn complete(&self, prompt: &str) -> Result<String, CapabilityError>;
}
