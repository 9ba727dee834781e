//! Generated file domain model.

use serde::{Deserialize, Serialize};

/// Coarse classification of a generated file, derived from its path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileKind {
    Component,
    Api,
    Schema,
    Config,
    Other,
}

impl FileKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Component => "component",
            Self::Api => "api",
            Self::Schema => "schema",
            Self::Config => "config",
            Self::Other => "other",
        }
    }

    /// Classify a path: routes and controllers are api, models and schemas
    /// are schema, JSX sources are components.
    pub fn classify(path: &str) -> Self {
        let lower = path.to_lowercase();
        if lower.contains("route") || lower.contains("controller") {
            Self::Api
        } else if lower.contains("model") || lower.contains("schema") {
            Self::Schema
        } else if lower.ends_with(".tsx") || lower.ends_with(".jsx") {
            Self::Component
        } else {
            Self::Other
        }
    }
}

/// One source file produced for a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    /// Relative, forward-slash separated path
    pub path: String,
    pub content: String,
    #[serde(rename = "type")]
    pub kind: FileKind,
}

impl GeneratedFile {
    pub fn new(path: impl Into<String>, content: impl Into<String>, kind: FileKind) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
            kind,
        }
    }

    /// Build a file whose kind is inferred from its path.
    pub fn classified(path: impl Into<String>, content: impl Into<String>) -> Self {
        let path = path.into();
        let kind = FileKind::classify(&path);
        Self::new(path, content, kind)
    }

    /// Lower-cased extension without the dot, empty when absent.
    pub fn extension(&self) -> String {
        extension_of(&self.path)
    }

    /// File name without directories or extension.
    pub fn stem(&self) -> &str {
        stem_of(&self.path)
    }
}

/// Lower-cased extension of a slash-separated path.
pub fn extension_of(path: &str) -> String {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(0) | None => String::new(),
        Some(idx) => name[idx + 1..].to_lowercase(),
    }
}

/// File name of a slash-separated path without its extension.
pub fn stem_of(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    }
}
