//! Projectsmith - brief-to-project generation
//!
//! Projectsmith turns a free-text project brief into an installable
//! React + Express project: the brief is broken into technical tasks, code
//! is generated per task (remotely or from templates), post-processed, and
//! assembled into a `frontend/` + `backend/` tree with manifests, entry
//! points and launch scripts.
//!
//! # Architecture
//!
//! This crate follows Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): models, errors and port traits
//! - **Service Layer** (`services`): breakdown, generation, enhancement and assembly
//! - **Adapters** (`adapters`): text generators, id generators, project sinks
//! - **Infrastructure Layer** (`infrastructure`): configuration and logging
//! - **CLI Layer** (`cli`): command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use projectsmith::adapters::TimestampIdGenerator;
//! use projectsmith::domain::models::{GenerationConfig, GenerationMode, ProjectBrief};
//! use projectsmith::services::ProjectPipeline;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = GenerationConfig { mode: GenerationMode::FallbackOnly, ..Default::default() };
//!     let pipeline = ProjectPipeline::from_config(&config, Arc::new(TimestampIdGenerator::new())).await?;
//!     let brief = ProjectBrief::new("A todo app with user authentication");
//!     let generation = pipeline.generate_project(&brief).await?;
//!     let project = pipeline.assemble(&generation, "todo-app", &brief.description)?;
//!     println!("{} files", project.files.len());
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{CapabilityError, DomainError, DomainResult};
pub use domain::models::{
    AgentResponse, AssembledProject, Config, GeneratedFile, GenerationMode, ProjectBrief,
    TaskKind, TechnicalTask,
};
pub use domain::ports::{IdGenerator, ProjectSink, TextGenerator};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use services::{ProjectAssembler, ProjectPipeline};
