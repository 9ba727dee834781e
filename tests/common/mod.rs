//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

#![allow(dead_code)]

use std::sync::Arc;

use projectsmith::adapters::SequentialIdGenerator;
use projectsmith::domain::models::{GeneratedFile, ProjectBrief};
use projectsmith::domain::ports::IdGenerator;
use projectsmith::services::generation::TemplateStrategy;
use projectsmith::services::ProjectPipeline;

/// The brief used by the end-to-end scenarios.
pub const TODO_BRIEF: &str = "Build a todo app with user authentication and task management";

/// Root-level files allowed outside `frontend/` and `backend/`.
pub const ROOT_FILES: [&str; 4] = ["README.md", "package.json", "START.sh", "START.bat"];

/// Deterministic id generator.
pub fn ids() -> Arc<dyn IdGenerator> {
    Arc::new(SequentialIdGenerator::new("task"))
}

/// Pipeline that only uses templates.
pub fn template_pipeline() -> ProjectPipeline {
    ProjectPipeline::new(ids(), Arc::new(TemplateStrategy::new()))
}

pub fn todo_brief() -> ProjectBrief {
    ProjectBrief::new(TODO_BRIEF)
}

pub fn file(path: &str, content: &str) -> GeneratedFile {
    GeneratedFile::classified(path, content)
}

/// Setup test logging
///
/// Initializes a tracing subscriber that writes through the test harness.
pub fn setup_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}
