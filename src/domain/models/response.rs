//! Per-task generation results and the run summary.

use serde::{Deserialize, Serialize};

use super::generated_file::GeneratedFile;
use super::task::TechnicalTask;

/// Which generator produced a task's files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationSource {
    /// External text-generation capability
    Remote,
    /// Deterministic hand-authored templates
    Template,
}

impl GenerationSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Remote => "remote",
            Self::Template => "template",
        }
    }
}

/// Terminal result of one task's generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentResponse {
    pub success: bool,
    /// Human-readable summary
    pub output: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files: Option<Vec<GeneratedFile>>,
    /// Present iff `success` is false
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AgentResponse {
    pub fn success(output: impl Into<String>, files: Vec<GeneratedFile>) -> Self {
        Self {
            success: true,
            output: output.into(),
            files: Some(files),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            success: false,
            output: format!("Generation failed: {error}"),
            files: None,
            error: Some(error),
        }
    }

    pub fn files(&self) -> &[GeneratedFile] {
        self.files.as_deref().unwrap_or_default()
    }
}

/// An `AgentResponse` tagged with the task it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResult {
    pub task_id: String,
    pub task_title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<GenerationSource>,
    #[serde(flatten)]
    pub response: AgentResponse,
}

impl TaskResult {
    pub fn new(task: &TechnicalTask, source: Option<GenerationSource>, response: AgentResponse) -> Self {
        Self {
            task_id: task.id.clone(),
            task_title: task.title.clone(),
            source,
            response,
        }
    }
}

/// A failed task as reported in the summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFailure {
    pub task_id: String,
    pub task_title: String,
    pub error: String,
}

/// Aggregate counts over a pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationSummary {
    pub total_tasks: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub files_generated: usize,
    pub failures: Vec<TaskFailure>,
}

impl GenerationSummary {
    pub fn from_results(results: &[TaskResult]) -> Self {
        let mut summary = Self {
            total_tasks: results.len(),
            ..Default::default()
        };
        for result in results {
            if result.response.success {
                summary.succeeded += 1;
                summary.files_generated += result.response.files().len();
            } else {
                summary.failed += 1;
                summary.failures.push(TaskFailure {
                    task_id: result.task_id.clone(),
                    task_title: result.task_title.clone(),
                    error: result.response.error.clone().unwrap_or_default(),
                });
            }
        }
        summary
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{FileKind, TaskKind};

    #[test]
    fn test_failure_carries_error() {
        let response = AgentResponse::failure("Unknown task type: general");
        assert!(!response.success);
        assert_eq!(response.error.as_deref(), Some("Unknown task type: general"));
        assert!(response.files().is_empty());
    }

    #[test]
    fn test_summary_counts() {
        let task = TechnicalTask::new("a", "A", "desc", TaskKind::Backend);
        let ok = TaskResult::new(
            &task,
            Some(GenerationSource::Template),
            AgentResponse::success(
                "done",
                vec![GeneratedFile::new("src/a.ts", "x", FileKind::Other)],
            ),
        );
        let bad = TaskResult::new(&task, None, AgentResponse::failure("boom"));

        let summary = GenerationSummary::from_results(&[ok, bad]);
        assert_eq!(summary.total_tasks, 2);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.files_generated, 1);
        assert_eq!(summary.failures[0].error, "boom");
        assert!(!summary.all_succeeded());
    }

    #[test]
    fn test_task_result_flattens_response() {
        let task = TechnicalTask::new("id-1", "Title", "desc", TaskKind::Frontend);
        let result = TaskResult::new(&task, None, AgentResponse::failure("nope"));
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value["taskId"], "id-1");
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "nope");
        assert!(value.get("files").is_none());
    }
}
