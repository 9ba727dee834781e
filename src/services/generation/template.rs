//! Deterministic generation from hand-authored templates.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::{AgentKind, GenerationSource, TechnicalTask};
use crate::services::code_enhancer::CodeEnhancer;

use super::strategy::{GenerationOutput, GenerationStrategy};
use super::templates;

/// Template-backed strategy. Never fails for a valid task.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateStrategy {
    enhancer: CodeEnhancer,
}

impl TemplateStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Synchronous core, shared with the fallback path.
    pub fn render(&self, task: &TechnicalTask, agent: AgentKind) -> GenerationOutput {
        let files = templates::files_for(task, agent);
        let files = self.enhancer.enhance_all(&files, task);
        tracing::debug!(task_id = %task.id, files = files.len(), "rendered template files");
        GenerationOutput::new(files, GenerationSource::Template)
    }
}

#[async_trait]
impl GenerationStrategy for TemplateStrategy {
    fn name(&self) -> &'static str {
        "template"
    }

    async fn generate(&self, task: &TechnicalTask, agent: AgentKind) -> DomainResult<GenerationOutput> {
        Ok(self.render(task, agent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::TaskKind;

    #[tokio::test]
    async fn test_auth_backend_files() {
        let task = TechnicalTask::new("t", "Implement User Authentication API", "JWT login", TaskKind::Backend);
        let output = TemplateStrategy::new().generate(&task, AgentKind::Backend).await.unwrap();

        assert_eq!(output.source, GenerationSource::Template);
        let paths: Vec<_> = output.files.iter().map(|f| f.path.as_str()).collect();
        assert!(paths.contains(&"src/routes/auth.ts"));
        assert!(paths.contains(&"src/middleware/auth.ts"));
        assert!(paths.contains(&"migrations/001_create_users.sql"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let task = TechnicalTask::new("t", "Build Task Management Interface", "List", TaskKind::Frontend);
        let strategy = TemplateStrategy::new();
        assert_eq!(strategy.render(&task, AgentKind::Frontend), strategy.render(&task, AgentKind::Frontend));
    }
}
