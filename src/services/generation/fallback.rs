//! Primary strategy with template substitution on capability failure.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::errors::DomainResult;
use crate::domain::models::{AgentKind, TechnicalTask};

use super::strategy::{GenerationOutput, GenerationStrategy};
use super::template::TemplateStrategy;

/// Runs the primary once; a recoverable failure is replaced by templates.
pub struct FallbackStrategy {
    primary: Arc<dyn GenerationStrategy>,
    fallback: TemplateStrategy,
}

impl FallbackStrategy {
    pub fn new(primary: Arc<dyn GenerationStrategy>, fallback: TemplateStrategy) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait]
impl GenerationStrategy for FallbackStrategy {
    fn name(&self) -> &'static str {
        "fallback"
    }

    async fn generate(&self, task: &TechnicalTask, agent: AgentKind) -> DomainResult<GenerationOutput> {
        match self.primary.generate(task, agent).await {
            Ok(output) => Ok(output),
            Err(err) if err.is_recoverable() => {
                tracing::warn!(
                    task_id = %task.id,
                    strategy = self.primary.name(),
                    error = %err,
                    "primary generation failed, using templates"
                );
                Ok(self.fallback.render(task, agent))
            }
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::substrates::{MockResponse, MockTextGenerator};
    use crate::adapters::SequentialIdGenerator;
    use crate::domain::errors::{CapabilityError, DomainError};
    use crate::domain::models::{GenerationSource, TaskKind};
    use crate::services::generation::RemoteStrategy;

    struct Rejecting;

    #[async_trait]
    impl GenerationStrategy for Rejecting {
        fn name(&self) -> &'static str {
            "rejecting"
        }

        async fn generate(&self, _task: &TechnicalTask, _agent: AgentKind) -> DomainResult<GenerationOutput> {
            Err(DomainError::Validation("bad".into()))
        }
    }

    fn task() -> TechnicalTask {
        TechnicalTask::new("t", "Build Authentication UI", "Forms", TaskKind::Frontend)
    }

    #[tokio::test]
    async fn test_capability_failure_uses_templates_once() {
        let mock = Arc::new(MockTextGenerator::with_default_response(MockResponse::failure(
            CapabilityError::Network("connection refused".into()),
        )));
        let remote = RemoteStrategy::new(mock.clone(), Arc::new(SequentialIdGenerator::default()));
        let strategy = FallbackStrategy::new(Arc::new(remote), TemplateStrategy::new());

        let output = strategy.generate(&task(), AgentKind::Frontend).await.unwrap();
        assert_eq!(output.source, GenerationSource::Template);
        assert!(output.files.iter().any(|f| f.path == "src/components/LoginForm.tsx"));
        assert_eq!(mock.call_count(), 1);
    }

    #[tokio::test]
    async fn test_domain_failure_is_not_masked() {
        let strategy = FallbackStrategy::new(Arc::new(Rejecting), TemplateStrategy::new());
        let err = strategy.generate(&task(), AgentKind::Frontend).await.unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }
}
