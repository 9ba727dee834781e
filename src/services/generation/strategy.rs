//! The seam between the orchestrator and the ways code can be produced.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::errors::DomainResult;
use crate::domain::models::{AgentKind, GeneratedFile, GenerationMode, GenerationSource, TechnicalTask};
use crate::domain::ports::{IdGenerator, TextGenerator};

use super::{FallbackStrategy, RemoteStrategy, TemplateStrategy};

/// Files produced for one task, and where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutput {
    pub files: Vec<GeneratedFile>,
    pub source: GenerationSource,
}

impl GenerationOutput {
    pub fn new(files: Vec<GeneratedFile>, source: GenerationSource) -> Self {
        Self { files, source }
    }
}

/// Produces files for a validated frontend or backend task.
///
/// Errors are capability failures (recoverable) or domain failures of the
/// task itself. Strategies never inspect each other.
#[async_trait]
pub trait GenerationStrategy: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    async fn generate(&self, task: &TechnicalTask, agent: AgentKind) -> DomainResult<GenerationOutput>;
}

/// Build the strategy for a generation mode.
///
/// `Remote` with a generator yields remote-with-fallback. `Remote` without
/// one degrades to templates with a warning. `FallbackOnly` never uses the
/// generator.
pub fn build_strategy(
    mode: GenerationMode,
    generator: Option<Arc<dyn TextGenerator>>,
    ids: Arc<dyn IdGenerator>,
    timeout_secs: u64,
) -> Arc<dyn GenerationStrategy> {
    match (mode, generator) {
        (GenerationMode::FallbackOnly, _) => {
            tracing::info!("generation mode fallback_only: using templates");
            Arc::new(TemplateStrategy::new())
        }
        (GenerationMode::Remote, Some(generator)) => {
            tracing::info!(generator = generator.name(), timeout_secs, "generation mode remote");
            let remote = RemoteStrategy::new(generator, ids).with_timeout_secs(timeout_secs);
            Arc::new(FallbackStrategy::new(Arc::new(remote), TemplateStrategy::new()))
        }
        (GenerationMode::Remote, None) => {
            tracing::warn!("no text generator available, degrading to template generation");
            Arc::new(TemplateStrategy::new())
        }
    }
}
