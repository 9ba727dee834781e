//! Deterministic post-processing of generated file content.
//!
//! The enhancer applies a fixed sequence of textual repairs to every file a
//! strategy produces. Each repair is triggered by something observable in
//! the content and is a no-op once its fix is present, so running the
//! enhancer twice yields the same result as running it once.
//!
//! | Order | Repair              | Applies to           |
//! |-------|---------------------|----------------------|
//! | 1     | Framework import    | tsx, jsx             |
//! | 2     | Props interface     | tsx                  |
//! | 3     | Request state       | ts, tsx, js, jsx     |
//! | 4     | Accessibility       | tsx, jsx, html       |
//! | 5     | Responsive styles   | css, scss, less      |
//!
//! The enhancer never parses code. A repair whose trigger is ambiguous
//! leaves the content alone.

mod a11y;
mod imports;
mod props;
mod requests;
mod styles;

pub use a11y::find_tag_end;

use crate::domain::models::{GeneratedFile, TechnicalTask};

/// A single content repair.
type Repair = fn(&str, &str) -> Option<String>;

// ---------------------------------------------------------------------------
// CodeEnhancer
// ---------------------------------------------------------------------------

/// Applies the repair sequence to generated files.
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeEnhancer;

impl CodeEnhancer {
    const REPAIRS: [(&'static str, Repair); 5] = [
        ("framework_import", imports::add_framework_import),
        ("props_interface", props::add_props_interface),
        ("request_state", requests::add_request_state),
        ("accessibility", a11y::add_accessibility_attributes),
        ("responsive_styles", styles::add_breakpoints),
    ];

    pub fn new() -> Self {
        Self
    }

    /// Return a repaired copy of `file`. Path and kind are preserved.
    pub fn enhance(&self, file: &GeneratedFile, task: &TechnicalTask) -> GeneratedFile {
        let mut content = file.content.clone();
        let mut applied = Vec::new();

        for (name, repair) in Self::REPAIRS {
            if let Some(updated) = repair(&file.path, &content) {
                content = updated;
                applied.push(name);
            }
        }

        if !applied.is_empty() {
            tracing::debug!(
                task_id = %task.id,
                path = %file.path,
                repairs = ?applied,
                "enhanced generated file"
            );
        }

        GeneratedFile {
            path: file.path.clone(),
            content,
            kind: file.kind,
        }
    }

    /// Enhance every file of a task's output, keeping order.
    pub fn enhance_all(&self, files: &[GeneratedFile], task: &TechnicalTask) -> Vec<GeneratedFile> {
        files.iter().map(|f| self.enhance(f, task)).collect()
    }
}

/// Split a file stem into lower-cased alphanumeric words, breaking on
/// separators and camelCase boundaries.
pub(crate) fn stem_words(stem: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for c in stem.chars() {
        if !c.is_ascii_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if c.is_ascii_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = c.is_ascii_lowercase() || c.is_ascii_digit();
        current.push(c.to_ascii_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// `PascalCase` identifier for a file stem, falling back to `Component`.
pub(crate) fn pascal_case(stem: &str) -> String {
    let name: String = stem_words(stem)
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_ascii_uppercase().to_string() + chars.as_str()
            })
        })
        .collect();

    match name.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => name,
        Some(_) => format!("Component{name}"),
        None => "Component".to_string(),
    }
}
