//! Final path computation and collision bookkeeping.

use std::collections::BTreeSet;

use super::bucket::Bucket;
use crate::domain::models::{extension_of, stem_of, FileKind, GeneratedFile, PathCollision};
use crate::services::response_extractor::sanitize_path;

/// Leading segments that carry no information once a file is bucketed.
const STRIPPED_PREFIXES: [&str; 5] = ["frontend", "backend", "client", "server", "src"];

/// Files that live at the root of a bucket rather than under `src/`.
pub const BUCKET_ROOT_FILES: [&str; 5] =
    ["package.json", "tsconfig.json", "vite.config.ts", "index.html", ".env.example"];

/// Names that keep having no extension.
const EXTENSIONLESS: [&str; 4] = ["Dockerfile", "Makefile", "Procfile", "LICENSE"];

const STYLE_EXTENSIONS: [&str; 4] = ["css", "scss", "sass", "less"];

/// Final project path for a file in a bucket.
pub fn normalize(file: &GeneratedFile, bucket: Bucket) -> String {
    let sanitized = sanitize_path(&file.path).unwrap_or_else(|| "file".to_string());
    let mut segments: Vec<&str> = sanitized.split('/').collect();
    while segments.len() > 1 && STRIPPED_PREFIXES.contains(&segments[0].to_lowercase().as_str()) {
        segments.remove(0);
    }
    let relative = segments.join("/");
    let dir = bucket.dir();

    if bucket == Bucket::Server && is_migration(&relative) {
        let name = segments.last().copied().unwrap_or("migration");
        let name = if extension_of(name).is_empty() {
            format!("{name}.sql")
        } else {
            name.to_string()
        };
        return format!("{dir}/migrations/{name}");
    }

    if segments.len() == 1 && BUCKET_ROOT_FILES.contains(&relative.as_str()) {
        return format!("{dir}/{relative}");
    }

    let relative = fix_extension(&relative, file, bucket);
    if relative.contains('/') {
        format!("{dir}/src/{relative}")
    } else {
        match conventional_dir(&relative, file, bucket) {
            Some(sub) => format!("{dir}/src/{sub}/{relative}"),
            None => format!("{dir}/src/{relative}"),
        }
    }
}

fn is_migration(relative: &str) -> bool {
    extension_of(relative) == "sql" || relative.to_lowercase().contains("migration")
}

/// True for paths or content that read as a UI component.
pub fn is_component_like(relative: &str, file: &GeneratedFile) -> bool {
    let in_component_dir = relative
        .split('/')
        .rev()
        .skip(1)
        .any(|segment| segment == "components" || segment == "pages");
    file.kind == FileKind::Component
        || in_component_dir
        || file.content.contains("/>")
        || file.content.contains("</")
}

fn fix_extension(relative: &str, file: &GeneratedFile, bucket: Bucket) -> String {
    let name = relative.rsplit('/').next().unwrap_or(relative);
    if name.starts_with('.') || EXTENSIONLESS.contains(&name) {
        return relative.to_string();
    }

    let extension = extension_of(relative);
    let replacement = match bucket {
        Bucket::Client if is_component_like(relative, file) => {
            matches!(extension.as_str(), "" | "js" | "jsx" | "ts").then_some("tsx")
        }
        Bucket::Client | Bucket::Server => matches!(extension.as_str(), "" | "js").then_some("ts"),
    };

    match replacement {
        Some(new_ext) => with_extension(relative, new_ext),
        None => relative.to_string(),
    }
}

/// Replace (or add) the extension of a slash path.
pub fn with_extension(relative: &str, extension: &str) -> String {
    let (dir, name) = match relative.rfind('/') {
        Some(idx) => (&relative[..=idx], &relative[idx + 1..]),
        None => ("", relative),
    };
    format!("{dir}{}.{extension}", stem_of(name))
}

/// Subdirectory for a bare file name.
fn conventional_dir(name: &str, file: &GeneratedFile, bucket: Bucket) -> Option<&'static str> {
    let lower = name.to_lowercase();
    let stem = stem_of(&lower).to_string();

    match bucket {
        Bucket::Client => {
            if STYLE_EXTENSIONS.contains(&extension_of(&lower).as_str()) {
                (stem != "index").then_some("styles")
            } else if matches!(stem.as_str(), "app" | "main" | "index") {
                None
            } else {
                Some("components")
            }
        }
        Bucket::Server => {
            if matches!(stem.as_str(), "server" | "index" | "app") {
                None
            } else if lower.contains("controller") {
                Some("controllers")
            } else if lower.contains("route") {
                Some("routes")
            } else if lower.contains("middleware") || stem == "auth" {
                Some("middleware")
            } else if lower.contains("model") || lower.contains("schema") || file.kind == FileKind::Schema {
                Some("models")
            } else if file.kind == FileKind::Api {
                Some("routes")
            } else {
                Some("controllers")
            }
        }
    }
}

/// Hands out unique final paths and records every collision.
#[derive(Debug, Default)]
pub struct PathAllocator {
    taken: BTreeSet<String>,
    collisions: Vec<PathCollision>,
}

impl PathAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a path as used before any generated file is placed.
    pub fn reserve(&mut self, path: impl Into<String>) {
        self.taken.insert(path.into());
    }

    pub fn is_taken(&self, path: &str) -> bool {
        self.taken.contains(path)
    }

    /// Claim `desired`, or the first free `<stem>-<n>.<ext>` variant.
    pub fn claim(&mut self, desired: String, source: &str) -> String {
        if self.taken.insert(desired.clone()) {
            return desired;
        }

        let renamed = (1..)
            .map(|n| numbered(&desired, n))
            .find(|candidate| !self.taken.contains(candidate))
            .unwrap_or_else(|| desired.clone());
        self.taken.insert(renamed.clone());

        tracing::warn!(path = %desired, renamed_to = %renamed, source = %source, "path collision");
        self.collisions.push(PathCollision {
            path: desired,
            renamed_to: renamed.clone(),
            source: source.to_string(),
        });
        renamed
    }

    pub fn into_collisions(self) -> Vec<PathCollision> {
        self.collisions
    }
}

fn numbered(path: &str, n: usize) -> String {
    let (dir, name) = match path.rfind('/') {
        Some(idx) => (&path[..=idx], &path[idx + 1..]),
        None => ("", path),
    };
    match name.rfind('.') {
        Some(idx) if idx > 0 => format!("{dir}{}-{n}{}", &name[..idx], &name[idx..]),
        _ => format!("{dir}{name}-{n}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, content: &str) -> GeneratedFile {
        GeneratedFile::classified(path, content)
    }

    #[test]
    fn test_strips_known_prefixes() {
        let f = file("./frontend/src/components/Nav.tsx", "x");
        assert_eq!(normalize(&f, Bucket::Client), "frontend/src/components/Nav.tsx");
        let f = file("/server/src/routes/auth.ts", "x");
        assert_eq!(normalize(&f, Bucket::Server), "backend/src/routes/auth.ts");
        let f = file("src/api/authClient.ts", "x");
        assert_eq!(normalize(&f, Bucket::Client), "frontend/src/api/authClient.ts");
    }

    #[test]
    fn test_migrations_move_to_backend_root() {
        let f = file("db/migrations/001_users", "CREATE TABLE users ();");
        assert_eq!(normalize(&f, Bucket::Server), "backend/migrations/001_users.sql");
        let f = file("schema.sql", "x");
        assert_eq!(normalize(&f, Bucket::Server), "backend/migrations/schema.sql");
    }

    #[test]
    fn test_bucket_root_files() {
        assert_eq!(normalize(&file("frontend/package.json", "{}"), Bucket::Client), "frontend/package.json");
        assert_eq!(normalize(&file(".env.example", "A=1"), Bucket::Server), "backend/.env.example");
        assert_eq!(normalize(&file("vite.config.ts", "x"), Bucket::Client), "frontend/vite.config.ts");
    }

    #[test]
    fn test_client_extensions() {
        let f = file("src/components/Button.js", "export default () => null;");
        assert_eq!(normalize(&f, Bucket::Client), "frontend/src/components/Button.tsx");
        let f = file("src/pages/Home.ts", "x");
        assert_eq!(normalize(&f, Bucket::Client), "frontend/src/pages/Home.tsx");
        let f = file("src/hooks/useThing.js", "export const x = 1;");
        assert_eq!(normalize(&f, Bucket::Client), "frontend/src/hooks/useThing.ts");
        let f = file("src/widgets/Card", "const c = <div />;");
        assert_eq!(normalize(&f, Bucket::Client), "frontend/src/widgets/Card.tsx");
    }

    #[test]
    fn test_server_extensions_and_bare_names() {
        let f = file("userController.js", "x");
        assert_eq!(normalize(&f, Bucket::Server), "backend/src/controllers/userController.ts");
        let f = file("tasks.routes.ts", "x");
        assert_eq!(normalize(&f, Bucket::Server), "backend/src/routes/tasks.routes.ts");
        let f = file("auth.ts", "x");
        assert_eq!(normalize(&f, Bucket::Server), "backend/src/middleware/auth.ts");
        let f = file("server.js", "x");
        assert_eq!(normalize(&f, Bucket::Server), "backend/src/server.ts");
        let f = file("deploy/Dockerfile", "FROM node");
        assert_eq!(normalize(&f, Bucket::Server), "backend/src/deploy/Dockerfile");
    }

    #[test]
    fn test_bare_client_names() {
        assert_eq!(normalize(&file("Nav.jsx", "x"), Bucket::Client), "frontend/src/components/Nav.tsx");
        assert_eq!(normalize(&file("theme.css", "x"), Bucket::Client), "frontend/src/styles/theme.css");
        assert_eq!(normalize(&file("App.tsx", "x"), Bucket::Client), "frontend/src/App.tsx");
        assert_eq!(normalize(&file("index.css", "x"), Bucket::Client), "frontend/src/index.css");
    }

    #[test]
    fn test_allocator_renames_and_records() {
        let mut paths = PathAllocator::new();
        paths.reserve("frontend/package.json");
        assert_eq!(paths.claim("frontend/src/a.ts".into(), "a.ts"), "frontend/src/a.ts");
        assert_eq!(paths.claim("frontend/src/a.ts".into(), "src/a.js"), "frontend/src/a-1.ts");
        assert_eq!(paths.claim("frontend/src/a.ts".into(), "client/a.ts"), "frontend/src/a-2.ts");
        assert_eq!(paths.claim("frontend/package.json".into(), "package.json"), "frontend/package-1.json");

        let collisions = paths.into_collisions();
        assert_eq!(collisions.len(), 3);
        assert_eq!(collisions[0].path, "frontend/src/a.ts");
        assert_eq!(collisions[0].renamed_to, "frontend/src/a-1.ts");
        assert_eq!(collisions[0].source, "src/a.js");
    }

    #[test]
    fn test_numbered_without_extension() {
        assert_eq!(numbered("backend/Makefile", 2), "backend/Makefile-2");
    }
}
