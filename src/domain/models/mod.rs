//! Domain models for the generation pipeline.

pub mod brief;
pub mod config;
pub mod generated_file;
pub mod project;
pub mod response;
pub mod task;

pub use brief::ProjectBrief;
pub use config::{Config, GenerationConfig, GenerationMode, LoggingConfig, OutputConfig};
pub use generated_file::{extension_of, stem_of, FileKind, GeneratedFile};
pub use project::{AssembledProject, PathCollision, ProjectFile};
pub use response::{AgentResponse, GenerationSource, GenerationSummary, TaskFailure, TaskResult};
pub use task::{AgentKind, TaskKind, TaskPriority, TechnicalTask};
