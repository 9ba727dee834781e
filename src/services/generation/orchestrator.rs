//! Per-task code production.

use std::sync::Arc;

use crate::domain::errors::DomainError;
use crate::domain::models::{AgentResponse, GenerationSource, TechnicalTask};

use super::strategy::{GenerationOutput, GenerationStrategy};

/// Validates a task, dispatches it to its agent and wraps the outcome in an
/// [`AgentResponse`]. Failures never escape as errors.
pub struct GenerationOrchestrator {
    strategy: Arc<dyn GenerationStrategy>,
}

impl GenerationOrchestrator {
    pub fn new(strategy: Arc<dyn GenerationStrategy>) -> Self {
        Self { strategy }
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Generate code for one task.
    pub async fn generate(&self, task: &TechnicalTask) -> AgentResponse {
        self.generate_with_source(task).await.0
    }

    /// Like [`generate`](Self::generate), also reporting which generator
    /// produced the files. The source is `None` for failures.
    pub async fn generate_with_source(&self, task: &TechnicalTask) -> (AgentResponse, Option<GenerationSource>) {
        if let Err(err) = task.validate() {
            tracing::warn!(task_id = %task.id, error = %err, "rejecting invalid task");
            return (AgentResponse::failure(err.to_string()), None);
        }

        let Some(agent) = task.kind.agent() else {
            let err = DomainError::UnsupportedTaskType(task.kind.to_string());
            tracing::warn!(task_id = %task.id, task_type = %task.kind, "no agent for task type");
            return (AgentResponse::failure(err.to_string()), None);
        };

        tracing::info!(
            task_id = %task.id,
            task_type = agent.as_str(),
            strategy = self.strategy.name(),
            "generating task"
        );

        match self.strategy.generate(task, agent).await {
            Ok(output) => {
                let response = AgentResponse::success(summarize(agent.as_str(), &output), output.files);
                (response, Some(output.source))
            }
            Err(err) => {
                tracing::error!(task_id = %task.id, error = %err, "generation failed");
                (AgentResponse::failure(err.to_string()), None)
            }
        }
    }
}

fn summarize(agent: &str, output: &GenerationOutput) -> String {
    let paths: Vec<&str> = output.files.iter().map(|f| f.path.as_str()).collect();
    format!(
        "Generated {} {agent} file(s) from {}: {}",
        paths.len(),
        output.source.as_str(),
        paths.join(", ")
    )
}
