//! End-to-end pipeline from a brief to generated files.

use serde::Serialize;
use std::sync::Arc;

use crate::adapters::substrates::GeneratorRegistry;
use crate::domain::errors::DomainResult;
use crate::domain::models::{
    AssembledProject, GeneratedFile, GenerationConfig, GenerationSummary, ProjectBrief, TaskResult,
    TechnicalTask,
};
use crate::domain::ports::IdGenerator;
use crate::services::execution_plan::ExecutionPlanner;
use crate::services::generation::{build_strategy, GenerationOrchestrator, GenerationStrategy};
use crate::services::project_assembler::ProjectAssembler;
use crate::services::task_breakdown::TaskBreakdownEngine;

/// Tasks and rendered plan for a brief, without generating anything.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BriefAnalysis {
    pub tasks: Vec<TechnicalTask>,
    pub execution_plan: String,
}

/// Outcome of generating every task of a brief.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectGeneration {
    pub results: Vec<TaskResult>,
    pub summary: GenerationSummary,
}

impl ProjectGeneration {
    /// Files of all successful tasks, in task order.
    pub fn files(&self) -> Vec<GeneratedFile> {
        self.results
            .iter()
            .filter(|r| r.response.success)
            .flat_map(|r| r.response.files().iter().cloned())
            .collect()
    }
}

/// Wires breakdown, planning, generation and assembly together.
pub struct ProjectPipeline {
    breakdown: TaskBreakdownEngine,
    planner: ExecutionPlanner,
    orchestrator: GenerationOrchestrator,
    assembler: ProjectAssembler,
}

impl ProjectPipeline {
    pub fn new(ids: Arc<dyn IdGenerator>, strategy: Arc<dyn GenerationStrategy>) -> Self {
        Self {
            breakdown: TaskBreakdownEngine::new(ids),
            planner: ExecutionPlanner::new(),
            orchestrator: GenerationOrchestrator::new(strategy),
            assembler: ProjectAssembler::new(),
        }
    }

    /// Build a pipeline for the configured generation mode.
    ///
    /// A configured-but-unusable generator (no API key) degrades to template
    /// generation up front instead of failing once per task.
    pub async fn from_config(config: &GenerationConfig, ids: Arc<dyn IdGenerator>) -> DomainResult<Self> {
        let generator = match GeneratorRegistry::from_config(config).for_mode(config.mode)? {
            Some(generator) if generator.is_available().await => Some(generator),
            Some(generator) => {
                tracing::warn!(generator = generator.name(), "text generator is not configured");
                None
            }
            None => None,
        };

        let strategy = build_strategy(config.mode, generator, ids.clone(), config.timeout_secs);
        Ok(Self::new(ids, strategy))
    }

    pub fn strategy_name(&self) -> &'static str {
        self.orchestrator.strategy_name()
    }

    /// Decompose a brief and render its execution plan.
    pub fn analyze(&self, brief: &ProjectBrief) -> DomainResult<BriefAnalysis> {
        let tasks = self.breakdown.breakdown(brief)?;
        let execution_plan = self.planner.plan_text(&tasks);
        Ok(BriefAnalysis { tasks, execution_plan })
    }

    /// Generate code for every task of a brief, one task at a time.
    ///
    /// Only an invalid brief is an error. Task failures are recorded in the
    /// results and summary.
    pub async fn generate_project(&self, brief: &ProjectBrief) -> DomainResult<ProjectGeneration> {
        let tasks = self.breakdown.breakdown(brief)?;
        tracing::info!(tasks = tasks.len(), strategy = self.strategy_name(), "starting generation");

        let mut results = Vec::with_capacity(tasks.len());
        for task in &tasks {
            let (response, source) = self.orchestrator.generate_with_source(task).await;
            if response.success {
                tracing::info!(task_id = %task.id, files = response.files().len(), "task generated");
            } else {
                tracing::warn!(task_id = %task.id, error = ?response.error, "task failed");
            }
            results.push(TaskResult::new(task, source, response));
        }

        let summary = GenerationSummary::from_results(&results);
        tracing::info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            files = summary.files_generated,
            "generation finished"
        );
        Ok(ProjectGeneration { results, summary })
    }

    /// Assemble the files of a finished generation.
    pub fn assemble(
        &self,
        generation: &ProjectGeneration,
        project_name: &str,
        description: &str,
    ) -> DomainResult<AssembledProject> {
        self.assembler.assemble(&generation.files(), project_name, description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::SequentialIdGenerator;
    use crate::domain::errors::DomainError;
    use crate::domain::models::{GenerationMode, GenerationSource};
    use crate::services::generation::TemplateStrategy;

    fn pipeline() -> ProjectPipeline {
        ProjectPipeline::new(
            Arc::new(SequentialIdGenerator::new("task")),
            Arc::new(TemplateStrategy::new()),
        )
    }

    #[test]
    fn test_analyze() {
        let brief = ProjectBrief::new("A todo app with login");
        let analysis = pipeline().analyze(&brief).unwrap();
        assert_eq!(analysis.tasks.len(), 4);
        assert!(analysis.execution_plan.contains("Backend Development"));
    }

    #[test]
    fn test_analyze_rejects_blank_brief() {
        let err = pipeline().analyze(&ProjectBrief::new("  ")).unwrap_err();
        assert!(matches!(err, DomainError::InvalidBrief(_)));
    }

    #[tokio::test]
    async fn test_generate_project_with_templates() {
        let brief = ProjectBrief::new("Build a todo app with user authentication");
        let generation = pipeline().generate_project(&brief).await.unwrap();

        assert_eq!(generation.summary.total_tasks, 4);
        assert!(generation.summary.all_succeeded());
        assert!(generation
            .results
            .iter()
            .all(|r| r.source == Some(GenerationSource::Template)));
        assert_eq!(generation.files().len(), generation.summary.files_generated);
    }

    #[tokio::test]
    async fn test_no_topics_generates_nothing() {
        let generation = pipeline()
            .generate_project(&ProjectBrief::new("Something vague"))
            .await
            .unwrap();
        assert_eq!(generation.summary.total_tasks, 0);
        assert!(generation.files().is_empty());
    }

    #[tokio::test]
    async fn test_from_config_without_key_uses_templates() {
        // a blank key counts as missing even when the environment has one
        let config = GenerationConfig {
            mode: GenerationMode::Remote,
            api_key: Some("  ".to_string()),
            ..Default::default()
        };
        let pipeline = ProjectPipeline::from_config(&config, Arc::new(SequentialIdGenerator::default()))
            .await
            .unwrap();
        assert_eq!(pipeline.strategy_name(), "template");
    }

    #[tokio::test]
    async fn test_from_config_fallback_only() {
        let config = GenerationConfig {
            mode: GenerationMode::FallbackOnly,
            api_key: Some("sk-test".to_string()),
            ..Default::default()
        };
        let pipeline = ProjectPipeline::from_config(&config, Arc::new(SequentialIdGenerator::default()))
            .await
            .unwrap();
        assert_eq!(pipeline.strategy_name(), "template");
    }
}
