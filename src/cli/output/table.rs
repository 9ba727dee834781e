//! Table output formatting for CLI commands
//!
//! Formats tasks, generation results and path collisions using comfy-table.

use crate::domain::models::{PathCollision, TaskPriority, TaskResult, TechnicalTask};
use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use std::env;

use super::truncate;

/// Table formatter for CLI output
pub struct TableFormatter {
    /// Whether to use colors in output
    use_colors: bool,
    /// Maximum width for tables (None = auto)
    max_width: Option<u16>,
}

impl TableFormatter {
    /// Create a new table formatter
    pub fn new() -> Self {
        Self {
            use_colors: supports_color(),
            max_width: None,
        }
    }

    /// Create a new table formatter with custom settings
    pub fn with_config(use_colors: bool, max_width: Option<u16>) -> Self {
        Self { use_colors, max_width }
    }

    /// Format technical tasks as a table
    pub fn format_tasks(&self, tasks: &[TechnicalTask]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["#", "Type", "Title", "Priority", "Hours", "Depends on"]));

        for (i, task) in tasks.iter().enumerate() {
            let priority = if self.use_colors {
                Cell::new(task.priority.as_str()).fg(priority_color(task.priority))
            } else {
                Cell::new(task.priority.as_str())
            };
            let hours = task
                .estimated_hours
                .map_or_else(|| "-".to_string(), |h| format!("{h:.0}"));
            let dependencies = tasks
                .iter()
                .enumerate()
                .filter(|(_, other)| task.dependencies.contains(&other.id))
                .map(|(j, _)| format!("#{}", j + 1))
                .collect::<Vec<_>>()
                .join(", ");

            table.add_row(vec![
                Cell::new(i + 1),
                Cell::new(task.kind.as_str()),
                Cell::new(truncate(&task.title, 48)),
                priority,
                Cell::new(hours),
                Cell::new(if dependencies.is_empty() { "-".to_string() } else { dependencies }),
            ]);
        }

        table.to_string()
    }

    /// Format per-task generation results as a table
    pub fn format_results(&self, results: &[TaskResult]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Task", "Status", "Source", "Files"]));

        for result in results {
            let (label, color) = if result.response.success {
                ("ok", Color::Green)
            } else {
                ("failed", Color::Red)
            };
            let status = if self.use_colors {
                Cell::new(label).fg(color)
            } else {
                Cell::new(label)
            };
            let files = match &result.response.error {
                Some(error) => truncate(error, 48),
                None => result.response.files().len().to_string(),
            };

            table.add_row(vec![
                Cell::new(truncate(&result.task_title, 40)),
                status,
                Cell::new(result.source.map_or("-", |s| s.as_str())),
                Cell::new(files),
            ]);
        }

        table.to_string()
    }

    /// Format path collisions as a table
    pub fn format_collisions(&self, collisions: &[PathCollision]) -> String {
        let mut table = self.create_base_table();
        table.set_header(header(&["Path", "Renamed to", "Generated as"]));
        for collision in collisions {
            table.add_row(vec![
                Cell::new(&collision.path),
                Cell::new(&collision.renamed_to),
                Cell::new(&collision.source),
            ]);
        }
        table.to_string()
    }

    fn create_base_table(&self) -> Table {
        let mut table = Table::new();
        table
            .load_preset(presets::UTF8_FULL_CONDENSED)
            .set_content_arrangement(ContentArrangement::Dynamic);
        if let Some(width) = self.max_width {
            table.set_width(width);
        }
        table
    }
}

impl Default for TableFormatter {
    fn default() -> Self {
        Self::new()
    }
}

fn header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|name| Cell::new(name).add_attribute(Attribute::Bold))
        .collect()
}

const fn priority_color(priority: TaskPriority) -> Color {
    match priority {
        TaskPriority::High => Color::Red,
        TaskPriority::Medium => Color::Yellow,
        TaskPriority::Low => Color::DarkGrey,
    }
}

/// Colors are off when `NO_COLOR` is set or stdout is not a terminal.
fn supports_color() -> bool {
    env::var_os("NO_COLOR").is_none() && console::colors_enabled()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::{AgentResponse, GeneratedFile, GenerationSource, TaskKind};

    fn formatter() -> TableFormatter {
        TableFormatter::with_config(false, Some(120))
    }

    #[test]
    fn test_format_tasks_shows_dependencies() {
        let backend = TechnicalTask::new("b", "Implement Authentication API", "d", TaskKind::Backend)
            .with_estimated_hours(6.0);
        let frontend = TechnicalTask::new("f", "Build Authentication UI", "d", TaskKind::Frontend).with_dependency("b");
        let out = formatter().format_tasks(&[backend, frontend]);

        assert!(out.contains("Implement Authentication API"));
        assert!(out.contains("#1"));
        assert!(out.contains("backend"));
        assert!(out.contains('6'));
    }

    #[test]
    fn test_format_results() {
        let task = TechnicalTask::new("a", "Build UI", "d", TaskKind::Frontend);
        let ok = TaskResult::new(
            &task,
            Some(GenerationSource::Template),
            AgentResponse::success("done", vec![GeneratedFile::classified("src/A.tsx", "x")]),
        );
        let failed = TaskResult::new(&task, None, AgentResponse::failure("Unknown task type: general"));
        let out = formatter().format_results(&[ok, failed]);

        assert!(out.contains("template"));
        assert!(out.contains("failed"));
        assert!(out.contains("Unknown task type: general"));
    }
}
