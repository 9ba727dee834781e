//! Generation through the external text-generation capability.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;

use crate::domain::errors::{CapabilityError, DomainResult};
use crate::domain::models::{AgentKind, GenerationSource, TechnicalTask};
use crate::domain::ports::{IdGenerator, TextGenerator};
use crate::services::code_enhancer::CodeEnhancer;
use crate::services::response_extractor::ResponseExtractor;

use super::prompt::build_prompt;
use super::strategy::{GenerationOutput, GenerationStrategy};

const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Prompt, call, extract, enhance.
///
/// The generator is called once per task. A response that yields no files
/// is reported as malformed so a wrapping fallback can substitute.
pub struct RemoteStrategy {
    generator: Arc<dyn TextGenerator>,
    extractor: ResponseExtractor,
    enhancer: CodeEnhancer,
    timeout_secs: u64,
}

impl RemoteStrategy {
    pub fn new(generator: Arc<dyn TextGenerator>, ids: Arc<dyn IdGenerator>) -> Self {
        Self {
            generator,
            extractor: ResponseExtractor::new(ids),
            enhancer: CodeEnhancer::new(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

#[async_trait]
impl GenerationStrategy for RemoteStrategy {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn generate(&self, task: &TechnicalTask, agent: AgentKind) -> DomainResult<GenerationOutput> {
        let prompt = build_prompt(task, agent);
        tracing::debug!(
            task_id = %task.id,
            generator = self.generator.name(),
            prompt_len = prompt.len(),
            "requesting remote generation"
        );

        let text = match timeout(Duration::from_secs(self.timeout_secs), self.generator.complete(&prompt)).await {
            Ok(result) => result?,
            Err(_) => return Err(CapabilityError::Timeout(self.timeout_secs).into()),
        };

        let extracted = self.extractor.extract(&text, agent);
        if extracted.is_empty() {
            return Err(CapabilityError::Malformed("response contained no code blocks".to_string()).into());
        }

        let files = self.enhancer.enhance_all(&extracted, task);
        tracing::info!(task_id = %task.id, files = files.len(), "remote generation produced files");
        Ok(GenerationOutput::new(files, GenerationSource::Remote))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::substrates::{MockResponse, MockTextGenerator};
    use crate::adapters::SequentialIdGenerator;
    use crate::domain::errors::DomainError;
    use crate::domain::models::TaskKind;

    fn task() -> TechnicalTask {
        TechnicalTask::new("t-1", "Implement Task Management API", "CRUD endpoints", TaskKind::Backend)
    }

    fn strategy(mock: Arc<MockTextGenerator>) -> RemoteStrategy {
        RemoteStrategy::new(mock, Arc::new(SequentialIdGenerator::default()))
    }

    #[tokio::test]
    async fn test_extracts_and_enhances() {
        let mock = Arc::new(MockTextGenerator::with_default_response(MockResponse::success(
            "Here you go:\n```typescript\n// File: src/client/api.ts\nexport const load = () => fetch('/api/tasks');\n```\n",
        )));
        let output = strategy(mock.clone()).generate(&task(), AgentKind::Backend).await.unwrap();

        assert_eq!(output.source, GenerationSource::Remote);
        assert_eq!(output.files.len(), 1);
        assert_eq!(output.files[0].path, "src/client/api.ts");
        assert!(output.files[0].content.contains("withRequestState"));
        assert_eq!(mock.call_count(), 1);
        assert!(mock.prompts()[0].contains("Implement Task Management API"));
    }

    #[tokio::test]
    async fn test_no_code_blocks_is_malformed() {
        let mock = Arc::new(MockTextGenerator::new());
        let err = strategy(mock).generate(&task(), AgentKind::Backend).await.unwrap_err();
        assert!(matches!(err, DomainError::Capability(CapabilityError::Malformed(_))));
    }

    #[tokio::test]
    async fn test_capability_error_propagates() {
        let mock = Arc::new(MockTextGenerator::with_default_response(MockResponse::failure(
            CapabilityError::Quota("rate limited".into()),
        )));
        let err = strategy(mock).generate(&task(), AgentKind::Backend).await.unwrap_err();
        assert!(err.is_recoverable());
    }

    #[tokio::test(start_paused = true)]
    async fn test_timeout() {
        let mock = Arc::new(MockTextGenerator::with_default_response(MockResponse::Delayed(
            Duration::from_secs(30),
            "late".into(),
        )));
        let err = strategy(mock)
            .with_timeout_secs(1)
            .generate(&task(), AgentKind::Backend)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Capability(CapabilityError::Timeout(1))));
    }
}
