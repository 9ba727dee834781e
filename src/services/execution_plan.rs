//! Execution plan for reporting.
//!
//! Backend tasks form phase 1 and frontend tasks phase 2, so the server
//! contract exists before the client is built against it. General tasks
//! are not placed in a phase but still count towards the total.

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

use crate::domain::models::{TaskKind, TechnicalTask};

/// One entry of a phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannedTask {
    pub task_id: String,
    pub title: String,
    pub priority: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimated_hours: Option<f32>,
}

impl From<&TechnicalTask> for PlannedTask {
    fn from(task: &TechnicalTask) -> Self {
        Self {
            task_id: task.id.clone(),
            title: task.title.clone(),
            priority: task.priority.as_str().to_string(),
            estimated_hours: task.estimated_hours,
        }
    }
}

/// A group of tasks rendered under one heading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionPhase {
    /// Phase number (1-indexed)
    pub number: usize,
    pub name: String,
    pub tasks: Vec<PlannedTask>,
}

impl ExecutionPhase {
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn estimated_hours(&self) -> f32 {
        self.tasks.iter().filter_map(|t| t.estimated_hours).sum()
    }
}

/// Tasks organized into phases, plus the overall count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionPlan {
    pub phases: Vec<ExecutionPhase>,
    pub total_tasks: usize,
}

impl ExecutionPlan {
    pub fn total_phases(&self) -> usize {
        self.phases.len()
    }

    pub fn get_phase(&self, number: usize) -> Option<&ExecutionPhase> {
        self.phases.iter().find(|p| p.number == number)
    }

    /// Tasks placed in some phase.
    pub fn phased_tasks(&self) -> usize {
        self.phases.iter().map(ExecutionPhase::task_count).sum()
    }

    /// Human-readable plan text.
    pub fn render(&self) -> String {
        let mut out = String::from("Execution Plan\n==============\n");
        for phase in &self.phases {
            let _ = writeln!(out, "\nPhase {}: {}", phase.number, phase.name);
            if phase.is_empty() {
                out.push_str("  (no tasks)\n");
                continue;
            }
            for (i, task) in phase.tasks.iter().enumerate() {
                let _ = write!(out, "  {}. {} [{}]", i + 1, task.title, task.priority);
                if let Some(hours) = task.estimated_hours {
                    let _ = write!(out, " ~{hours}h");
                }
                out.push('\n');
            }
        }
        let _ = writeln!(out, "\nTotal tasks: {}", self.total_tasks);
        out
    }
}

/// Builds execution plans from task lists.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExecutionPlanner;

impl ExecutionPlanner {
    pub fn new() -> Self {
        Self
    }

    /// Partition tasks by kind, keeping their relative order.
    pub fn plan(&self, tasks: &[TechnicalTask]) -> ExecutionPlan {
        let collect = |kind: TaskKind| -> Vec<PlannedTask> {
            tasks
                .iter()
                .filter(|t| t.kind == kind)
                .map(PlannedTask::from)
                .collect()
        };

        ExecutionPlan {
            phases: vec![
                ExecutionPhase {
                    number: 1,
                    name: "Backend Development".to_string(),
                    tasks: collect(TaskKind::Backend),
                },
                ExecutionPhase {
                    number: 2,
                    name: "Frontend Development".to_string(),
                    tasks: collect(TaskKind::Frontend),
                },
            ],
            total_tasks: tasks.len(),
        }
    }

    /// Shortcut for `plan(tasks).render()`.
    pub fn plan_text(&self, tasks: &[TechnicalTask]) -> String {
        self.plan(tasks).render()
    }
}
