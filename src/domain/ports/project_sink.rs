//! Project sink port - where assembled projects are delivered.

use serde::Serialize;
use std::path::PathBuf;

use crate::domain::errors::DomainResult;
use crate::domain::models::AssembledProject;

/// Outcome of delivering a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WriteReport {
    pub root: PathBuf,
    pub files_written: usize,
}

/// Packaging collaborator receiving the final `(path, content)` tree.
pub trait ProjectSink: Send + Sync {
    fn write(&self, project: &AssembledProject) -> DomainResult<WriteReport>;
}
