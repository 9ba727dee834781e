//! Extraction of candidate files from free-form generated text.
//!
//! Generated text is untrusted, so extraction is a tolerant scan rather
//! than a parse: fenced blocks are found with a regex, a leading
//! `// File: <path>` or `/* File: <path> */` line names the file, and
//! anything that does not fit is skipped instead of failing the task.

use regex::Regex;
use std::sync::{Arc, LazyLock};

use crate::domain::models::{extension_of, AgentKind, GeneratedFile};
use crate::domain::ports::IdGenerator;

/// A fenced block: opening backticks, optional info string, body, closing
/// backticks. A fence left open at the end of the text never matches.
static FENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```[ \t]*([A-Za-z0-9_+#.\-]*)[^\n]*\n(.*?)```").expect("valid fence regex")
});

static LINE_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*//\s*[Ff]ile:\s*(.+?)\s*$").expect("valid line path regex")
});

static BLOCK_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*/\*\s*[Ff]ile:\s*(.+?)\s*\*/\s*$").expect("valid block path regex")
});

/// Parses generated text into files.
pub struct ResponseExtractor {
    ids: Arc<dyn IdGenerator>,
}

impl ResponseExtractor {
    pub fn new(ids: Arc<dyn IdGenerator>) -> Self {
        Self { ids }
    }

    /// Extract every usable fenced block from `text`.
    ///
    /// Returns an empty list when there are no fences. Two blocks naming the
    /// same path collapse into one: the later content wins, at the earlier
    /// position.
    pub fn extract(&self, text: &str, agent: AgentKind) -> Vec<GeneratedFile> {
        let mut files: Vec<GeneratedFile> = Vec::new();

        for caps in FENCE.captures_iter(text) {
            let language = caps.get(1).map_or("", |m| m.as_str()).to_lowercase();
            let body = caps.get(2).map_or("", |m| m.as_str());

            let (declared, content) = split_path_declaration(body);
            let content = content.trim_matches('\n').trim_end();
            if content.trim().is_empty() {
                tracing::debug!(language = %language, "skipping empty fenced block");
                continue;
            }

            let path = match declared.and_then(|p| sanitize_path(&p)) {
                Some(path) => path,
                None => self.default_path(&language, agent),
            };

            let file = GeneratedFile::classified(path, format!("{content}\n"));
            match files.iter_mut().find(|f| f.path == file.path) {
                Some(existing) => {
                    tracing::warn!(path = %file.path, "duplicate path in response, keeping later block");
                    *existing = file;
                }
                None => files.push(file),
            }
        }

        tracing::debug!(files = files.len(), agent = agent.as_str(), "extracted files");
        files
    }

    fn default_path(&self, language: &str, agent: AgentKind) -> String {
        let extension = extension_for_language(language, agent);
        let directory = if is_style_extension(extension) {
            "src/styles"
        } else {
            match agent {
                AgentKind::Frontend => "src/components",
                AgentKind::Backend => "src/controllers",
            }
        };
        format!("{directory}/generated-{}.{extension}", self.ids.next_id())
    }
}

/// Split a leading path declaration from a block body.
///
/// Only the first non-blank line is considered.
fn split_path_declaration(body: &str) -> (Option<String>, &str) {
    let leading_blank = body.len() - body.trim_start_matches(['\n', '\r', ' ', '\t']).len();
    let rest = &body[leading_blank..];
    let (first_line, after) = match rest.find('\n') {
        Some(idx) => (&rest[..idx], &rest[idx + 1..]),
        None => (rest, ""),
    };

    let declared = LINE_PATH
        .captures(first_line)
        .or_else(|| BLOCK_PATH.captures(first_line))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    match declared {
        Some(path) => (Some(path), after),
        None => (None, body),
    }
}

/// Normalize a declared path into a relative, forward-slash path.
///
/// Returns `None` when nothing usable remains.
pub fn sanitize_path(raw: &str) -> Option<String> {
    let cleaned = raw
        .trim()
        .trim_matches(|c| c == '`' || c == '"' || c == '\'')
        .replace('\\', "/");

    let segments: Vec<&str> = cleaned
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty() && *s != "." && *s != "..")
        .collect();

    if segments.is_empty() {
        None
    } else {
        Some(segments.join("/"))
    }
}

/// File extension for a fence language tag.
pub fn extension_for_language(language: &str, agent: AgentKind) -> &'static str {
    match language {
        "tsx" => "tsx",
        "ts" | "typescript" => "ts",
        "jsx" => "jsx",
        "js" | "javascript" | "node" => "js",
        "css" => "css",
        "scss" => "scss",
        "sass" => "sass",
        "less" => "less",
        "sql" | "postgresql" | "postgres" | "mysql" | "sqlite" => "sql",
        "json" => "json",
        "html" => "html",
        "yaml" | "yml" => "yml",
        "sh" | "bash" | "shell" | "zsh" => "sh",
        "md" | "markdown" => "md",
        "py" | "python" => "py",
        "" => match agent {
            AgentKind::Frontend => "tsx",
            AgentKind::Backend => "ts",
        },
        _ => "txt",
    }
}

fn is_style_extension(extension: &str) -> bool {
    matches!(extension, "css" | "scss" | "sass" | "less")
}

/// True when the path names a stylesheet.
pub fn is_style_path(path: &str) -> bool {
    is_style_extension(&extension_of(path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::SequentialIdGenerator;
    use crate::domain::models::FileKind;

    fn extractor() -> ResponseExtractor {
        ResponseExtractor::new(Arc::new(SequentialIdGenerator::new("blk")))
    }

    #[test]
    fn test_no_fences_yields_nothing() {
        let files = extractor().extract("Here is some prose without code.", AgentKind::Frontend);
        assert!(files.is_empty());
    }

    #[test]
    fn test_line_comment_path() {
        let text = "Intro\n```tsx\n// File: src/components/LoginForm.tsx\nexport const A = 1;\n```\n";
        let files = extractor().extract(text, AgentKind::Frontend);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "src/components/LoginForm.tsx");
        assert_eq!(files[0].content, "export const A = 1;\n");
        assert_eq!(files[0].kind, FileKind::Component);
    }

    #[test]
    fn test_block_comment_path() {
        let text = "```css\n/* File: src/styles/app.css */\nbody { margin: 0; }\n```";
        let files = extractor().extract(text, AgentKind::Frontend);
        assert_eq!(files[0].path, "src/styles/app.css");
        assert!(!files[0].content.contains("File:"));
    }

    #[test]
    fn test_missing_path_synthesizes_name() {
        let text = "```typescript\nexport function handler() {}\n```";
        let files = extractor().extract(text, AgentKind::Backend);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "src/controllers/generated-blk-1.ts");
        assert_eq!(files[0].kind, FileKind::Api);
    }

    #[test]
    fn test_untagged_style_and_frontend_defaults() {
        let text = "```\nconst x = <div/>;\n```\n```scss\n.a { color: red; }\n```";
        let files = extractor().extract(text, AgentKind::Frontend);
        assert_eq!(files[0].path, "src/components/generated-blk-1.tsx");
        assert_eq!(files[1].path, "src/styles/generated-blk-2.scss");
    }

    #[test]
    fn test_empty_blocks_are_discarded() {
        let text = "```ts\n// File: src/empty.ts\n\n```\n```ts\n   \n```";
        assert!(extractor().extract(text, AgentKind::Backend).is_empty());
    }

    #[test]
    fn test_unterminated_fence_is_ignored() {
        let text = "```ts\n// File: a.ts\nconst a = 1;\n```\n```ts\n// File: b.ts\nconst b = ";
        let files = extractor().extract(text, AgentKind::Backend);
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].path, "a.ts");
    }

    #[test]
    fn test_duplicate_paths_collapse() {
        let text = "```ts\n// File: src/a.ts\nold\n```\n```ts\n// File: src/b.ts\nb\n```\n```ts\n// File: ./src/a.ts\nnew\n```";
        let files = extractor().extract(text, AgentKind::Backend);
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, "src/a.ts");
        assert_eq!(files[0].content, "new\n");
    }

    #[test]
    fn test_sanitize_path() {
        assert_eq!(sanitize_path(" ./src\\models\\User.ts "), Some("src/models/User.ts".into()));
        assert_eq!(sanitize_path("/etc/../passwd"), Some("etc/passwd".into()));
        assert_eq!(sanitize_path("`src/app.ts`"), Some("src/app.ts".into()));
        assert_eq!(sanitize_path(" .. "), None);
    }

    #[test]
    fn test_classifies_by_path() {
        let text = "```ts\n// File: src/models/Task.ts\nexport interface Task {}\n```\n```ts\n// File: src/routes/tasks.ts\nexport default 1;\n```";
        let files = extractor().extract(text, AgentKind::Backend);
        assert_eq!(files[0].kind, FileKind::Schema);
        assert_eq!(files[1].kind, FileKind::Api);
    }
}
