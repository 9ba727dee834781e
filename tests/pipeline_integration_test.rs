//! End-to-end tests: brief -> tasks -> generation -> assembly -> disk.

mod common;

use std::sync::Arc;

use projectsmith::adapters::substrates::{MockResponse, MockTextGenerator};
use projectsmith::adapters::DirectorySink;
use projectsmith::domain::errors::CapabilityError;
use projectsmith::domain::models::{GenerationMode, GenerationSource, TaskKind, TechnicalTask};
use projectsmith::domain::ports::{ProjectSink, TextGenerator};
use projectsmith::services::generation::{build_strategy, GenerationOrchestrator, TemplateStrategy};
use projectsmith::services::ProjectPipeline;

use common::{ids, template_pipeline, todo_brief, ROOT_FILES};

#[test]
fn test_todo_brief_breaks_into_four_ordered_tasks() {
    let analysis = template_pipeline().analyze(&todo_brief()).unwrap();

    let kinds: Vec<TaskKind> = analysis.tasks.iter().map(|t| t.kind.clone()).collect();
    assert_eq!(
        kinds,
        vec![TaskKind::Backend, TaskKind::Frontend, TaskKind::Backend, TaskKind::Frontend]
    );
    assert!(analysis.tasks[0].title.contains("Authentication"));
    assert!(analysis.tasks[2].title.to_lowercase().contains("task"));
    assert_eq!(analysis.tasks[1].dependencies, vec![analysis.tasks[0].id.clone()]);
    assert!(analysis.execution_plan.contains("Frontend Development"));
}

#[tokio::test]
async fn test_fallback_only_generation_assembles_full_project() {
    common::setup_test_logging();
    let pipeline = template_pipeline();
    let brief = todo_brief();

    let generation = pipeline.generate_project(&brief).await.unwrap();
    assert_eq!(generation.summary.total_tasks, 4);
    assert!(generation.summary.all_succeeded());
    for result in &generation.results {
        assert!(result.response.success);
        assert!(!result.response.files().is_empty(), "{} produced no files", result.task_title);
    }

    let project = pipeline.assemble(&generation, "Todo App", &brief.description).unwrap();
    for expected in [
        "frontend/package.json",
        "frontend/index.html",
        "frontend/src/main.tsx",
        "frontend/src/App.tsx",
        "backend/package.json",
        "backend/src/server.ts",
        "backend/.env.example",
        "backend/migrations/001_create_users.sql",
        "package.json",
        "README.md",
        "START.sh",
        "START.bat",
    ] {
        assert!(project.contains(expected), "missing {expected}");
    }
    for path in project.paths() {
        assert!(
            path.starts_with("frontend/") || path.starts_with("backend/") || ROOT_FILES.contains(&path),
            "unexpected path {path}"
        );
    }

    let server = &project.get("backend/src/server.ts").unwrap().content;
    assert!(server.contains("app.use('/api/auth', authRouter);"));
    assert!(server.contains("app.use('/api/tasks', tasksRouter);"));

    let app = &project.get("frontend/src/App.tsx").unwrap().content;
    assert!(app.contains("<AuthProvider>"));
    assert!(app.contains("<LoginForm />"));
    assert!(app.contains("<TaskList />"));
}

#[tokio::test]
async fn test_assembled_project_is_written_to_disk() {
    let pipeline = template_pipeline();
    let brief = todo_brief();
    let generation = pipeline.generate_project(&brief).await.unwrap();
    let project = pipeline.assemble(&generation, "Todo App", &brief.description).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let report = DirectorySink::new(dir.path().join("todo-app")).write(&project).unwrap();

    assert_eq!(report.files_written, project.files.len());
    let manifest = std::fs::read_to_string(dir.path().join("todo-app/package.json")).unwrap();
    assert!(manifest.contains("install:all"));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(dir.path().join("todo-app/START.sh")).unwrap().permissions().mode();
        assert_ne!(mode & 0o111, 0, "START.sh should be executable");
    }
}

#[tokio::test]
async fn test_general_task_is_rejected() {
    let orchestrator = GenerationOrchestrator::new(Arc::new(TemplateStrategy::new()));
    let task = TechnicalTask::new("g-1", "Write documentation", "Project docs", TaskKind::General);

    let response = orchestrator.generate(&task).await;
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("Unknown task type: general"));
    assert!(response.files.is_none());
}

#[tokio::test]
async fn test_remote_generation_with_fallback() {
    let mock = Arc::new(MockTextGenerator::new());
    mock.push_response(MockResponse::success(
        "Here is the API:\n\n```typescript\n// File: src/routes/auth.ts\nimport { Router } from 'express';\n\nconst router = Router();\n\nexport default router;\n```\n",
    ));
    mock.push_response(MockResponse::failure(CapabilityError::Network("connection reset".into())));
    // the remaining calls get the default response, which has no code blocks

    let generator: Arc<dyn TextGenerator> = mock.clone();
    let strategy = build_strategy(GenerationMode::Remote, Some(generator), ids(), 5);
    let pipeline = ProjectPipeline::new(ids(), strategy);

    let generation = pipeline.generate_project(&todo_brief()).await.unwrap();

    assert_eq!(mock.call_count(), 4);
    assert!(generation.summary.all_succeeded());
    let sources: Vec<_> = generation.results.iter().map(|r| r.source).collect();
    assert_eq!(
        sources,
        vec![
            Some(GenerationSource::Remote),
            Some(GenerationSource::Template),
            Some(GenerationSource::Template),
            Some(GenerationSource::Template),
        ]
    );
    let remote_files = generation.results[0].response.files();
    assert_eq!(remote_files.len(), 1);
    assert_eq!(remote_files[0].path, "src/routes/auth.ts");
    assert!(mock.prompts()[0].contains("Task: "));
}

#[tokio::test]
async fn test_vague_brief_yields_root_readme_only() {
    let pipeline = template_pipeline();
    let brief = projectsmith::ProjectBrief::new("Something nice");
    let generation = pipeline.generate_project(&brief).await.unwrap();
    assert_eq!(generation.summary.total_tasks, 0);

    let project = pipeline.assemble(&generation, "", &brief.description).unwrap();
    assert_eq!(project.paths().collect::<Vec<_>>(), vec!["README.md"]);
}
