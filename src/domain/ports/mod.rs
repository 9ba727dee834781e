//! Port trait definitions (Hexagonal Architecture)
//!
//! This module defines the interfaces that adapters must implement:
//! - TextGenerator: the external text-generation capability
//! - IdGenerator: identifiers for tasks and synthesized files
//! - ProjectSink: delivery of the assembled project tree

pub mod id_generator;
pub mod project_sink;
pub mod text_generator;

pub use id_generator::IdGenerator;
pub use project_sink::{ProjectSink, WriteReport};
pub use text_generator::TextGenerator;
