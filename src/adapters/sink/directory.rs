//! Writes an assembled project to a directory on disk.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::AssembledProject;
use crate::domain::ports::{ProjectSink, WriteReport};

/// Sink that materializes the project tree under `root`.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn resolve(&self, relative: &str) -> DomainResult<PathBuf> {
        let rel = Path::new(relative);
        let escapes = rel.components().any(|c| {
            matches!(c, Component::ParentDir | Component::RootDir | Component::Prefix(_))
        });
        if relative.is_empty() || escapes {
            return Err(DomainError::Io(format!(
                "refusing to write outside the project root: {relative}"
            )));
        }
        Ok(self.root.join(rel))
    }
}

impl ProjectSink for DirectorySink {
    fn write(&self, project: &AssembledProject) -> DomainResult<WriteReport> {
        fs::create_dir_all(&self.root)?;

        let mut files_written = 0;
        for file in &project.files {
            let target = self.resolve(&file.path)?;
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&target, &file.content)?;
            if file.path.ends_with(".sh") {
                mark_executable(&target)?;
            }
            files_written += 1;
        }

        tracing::info!(
            root = %self.root.display(),
            files = files_written,
            "project written"
        );

        Ok(WriteReport {
            root: self.root.clone(),
            files_written,
        })
    }
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> DomainResult<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut permissions = fs::metadata(path)?.permissions();
    permissions.set_mode(permissions.mode() | 0o755);
    fs::set_permissions(path, permissions)?;
    Ok(())
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> DomainResult<()> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::ProjectFile;

    #[test]
    fn test_writes_nested_files() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path().join("out"));
        let project = AssembledProject {
            name: "demo".into(),
            files: vec![
                ProjectFile::new("README.md", "# demo"),
                ProjectFile::new("frontend/src/App.tsx", "export default function App() {}"),
            ],
            collisions: vec![],
        };

        let report = sink.write(&project).unwrap();
        assert_eq!(report.files_written, 2);
        let app = fs::read_to_string(dir.path().join("out/frontend/src/App.tsx")).unwrap();
        assert!(app.contains("App"));
    }

    #[test]
    fn test_rejects_escaping_paths() {
        let dir = tempfile::tempdir().unwrap();
        let sink = DirectorySink::new(dir.path());
        let project = AssembledProject {
            name: "demo".into(),
            files: vec![ProjectFile::new("../evil.sh", "rm -rf /")],
            collisions: vec![],
        };
        assert!(matches!(sink.write(&project), Err(DomainError::Io(_))));
    }
}
