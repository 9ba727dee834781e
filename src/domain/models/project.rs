//! Assembled project tree.

use serde::{Deserialize, Serialize};

/// One file of the final project tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectFile {
    pub path: String,
    pub content: String,
}

impl ProjectFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }
}

/// Two inputs normalized to the same final path.
///
/// The first claimant keeps the path; the later one is written to
/// `renamed_to` instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathCollision {
    /// Contested final path
    pub path: String,
    /// Where the later file was placed
    pub renamed_to: String,
    /// Path of the later file as it was generated
    pub source: String,
}

/// The full installable tree produced by the assembler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssembledProject {
    pub name: String,
    pub files: Vec<ProjectFile>,
    #[serde(default)]
    pub collisions: Vec<PathCollision>,
}

impl AssembledProject {
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.files.iter().map(|f| f.path.as_str())
    }

    pub fn get(&self, path: &str) -> Option<&ProjectFile> {
        self.files.iter().find(|f| f.path == path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// The tree as ordered `(path, content)` pairs for packaging.
    pub fn entries(&self) -> Vec<(&str, &str)> {
        self.files
            .iter()
            .map(|f| (f.path.as_str(), f.content.as_str()))
            .collect()
    }
}
