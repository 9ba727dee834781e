//! Entry points and build configuration synthesized around generated code.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::LazyLock;

use super::{CLIENT_PORT, SERVER_PORT};
use crate::domain::models::{extension_of, stem_of, ProjectFile};
use crate::services::code_enhancer::stem_words;

static PROPLESS_DEFAULT_COMPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+default\s+function\s+([A-Z]\w*)\s*\(\s*\)").expect("valid component regex")
});

static AUTH_PROVIDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+(?:function|const)\s+AuthProvider\b").expect("valid provider regex")
});

static DEFAULT_EXPORT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"export\s+default\b").expect("valid export regex"));

static ERROR_HANDLER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+(?:function|const)\s+errorHandler\b").expect("valid handler regex")
});

static NOT_FOUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"export\s+(?:function|const)\s+notFound\b").expect("valid handler regex")
});

/// Candidate server entry points, in preference order.
pub const SERVER_ENTRIES: [&str; 3] = ["src/server.ts", "src/index.ts", "src/app.ts"];

/// Import specifier for `path` as seen from `<bucket>/src/`.
fn module_specifier(path: &str, bucket_dir: &str) -> Option<String> {
    let relative = path.strip_prefix(bucket_dir)?.strip_prefix("/src/")?;
    let without_ext = match relative.rfind('.') {
        Some(idx) if idx > relative.rfind('/').map_or(0, |s| s + 1) => &relative[..idx],
        _ => relative,
    };
    Some(format!("./{without_ext}"))
}

/// Body of a single-quoted JavaScript string literal.
fn js_string(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('\r', "")
        .replace('\n', "\\n")
}

fn html_escape(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

// ----------------------------------------------------------------------------
// Client
// ----------------------------------------------------------------------------

pub fn vite_config() -> String {
    format!(
        "import {{ defineConfig }} from 'vite';
import react from '@vitejs/plugin-react';

export default defineConfig({{
  plugins: [react()],
  server: {{
    port: {CLIENT_PORT},
    proxy: {{
      '/api': 'http://localhost:{SERVER_PORT}',
    }},
  }},
}});
"
    )
}

pub fn index_html(title: &str) -> String {
    format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>{}</title>
  </head>
  <body>
    <div id="root"></div>
    <script type="module" src="/src/main.tsx"></script>
  </body>
</html>
"#,
        html_escape(title)
    )
}

pub const MAIN_TSX: &str = "import React from 'react';
import ReactDOM from 'react-dom/client';
import App from './App';
import './index.css';

ReactDOM.createRoot(document.getElementById('root')!).render(
  <React.StrictMode>
    <App />
  </React.StrictMode>,
);
";

pub const INDEX_CSS: &str = ":root {
  font-family: system-ui, -apple-system, 'Segoe UI', Roboto, sans-serif;
  line-height: 1.5;
  color: #1f2933;
  background-color: #f5f7fa;
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
}

.app {
  max-width: 960px;
  margin: 0 auto;
  padding: 2rem 1.5rem;
}

.app-header {
  margin-bottom: 2rem;
}

.app-content {
  display: grid;
  gap: 1.5rem;
}

@media (max-width: 640px) {
  .app {
    padding: 1rem;
  }
}
";

/// Root component rendering every prop-less default-export component.
pub fn app_tsx(client_files: &[ProjectFile], title: &str, description: &str) -> String {
    let mut imports = vec!["import React from 'react';".to_string()];
    let mut seen = BTreeSet::new();
    let mut components = Vec::new();

    let provider = client_files
        .iter()
        .find(|f| AUTH_PROVIDER.is_match(&f.content))
        .and_then(|f| module_specifier(&f.path, "frontend"));
    if let Some(specifier) = &provider {
        imports.push(format!("import {{ AuthProvider }} from '{specifier}';"));
    }

    for file in client_files.iter().filter(|f| f.path.starts_with("frontend/src/components/")) {
        let Some(caps) = PROPLESS_DEFAULT_COMPONENT.captures(&file.content) else {
            continue;
        };
        let name = caps[1].to_string();
        if name == "App" || !seen.insert(name.clone()) {
            continue;
        }
        if let Some(specifier) = module_specifier(&file.path, "frontend") {
            imports.push(format!("import {name} from '{specifier}';"));
            components.push(name);
        }
    }

    let mut body = String::new();
    body.push_str("      <main className=\"app\">\n");
    body.push_str("        <header className=\"app-header\">\n");
    body.push_str("          <h1>{PROJECT_TITLE}</h1>\n");
    body.push_str("          <p>{PROJECT_DESCRIPTION}</p>\n");
    body.push_str("        </header>\n");
    body.push_str("        <section className=\"app-content\">\n");
    for name in &components {
        body.push_str(&format!("          <{name} />\n"));
    }
    body.push_str("        </section>\n");
    body.push_str("      </main>\n");

    let tree = if provider.is_some() {
        let indented: String = body.lines().map(|l| format!("  {l}\n")).collect();
        format!("      <AuthProvider>\n{indented}      </AuthProvider>\n")
    } else {
        body
    };

    format!(
        "{}\n\nconst PROJECT_TITLE = '{}';\nconst PROJECT_DESCRIPTION = '{}';\n\nexport default function App() {{\n  return (\n{tree}  );\n}}\n",
        imports.join("\n"),
        js_string(title),
        js_string(description.trim()),
    )
}

// ----------------------------------------------------------------------------
// Server
// ----------------------------------------------------------------------------

/// A route module mounted by the synthesized server entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMount {
    pub identifier: String,
    pub specifier: String,
    pub mount_path: String,
}

/// Route modules under `backend/src/routes/` that default-export a router.
pub fn route_mounts(server_files: &[ProjectFile]) -> Vec<RouteMount> {
    let mut mounts: Vec<RouteMount> = Vec::new();

    for file in server_files.iter().filter(|f| f.path.starts_with("backend/src/routes/")) {
        if !matches!(extension_of(&file.path).as_str(), "ts" | "js") || !DEFAULT_EXPORT.is_match(&file.content) {
            continue;
        }
        let Some(specifier) = module_specifier(&file.path, "backend") else {
            continue;
        };
        let stem = stem_of(&file.path);
        let base = stem.split('.').next().unwrap_or(stem);
        let words = stem_words(base);
        if words.is_empty() {
            continue;
        }

        let mut identifier: String = words
            .iter()
            .enumerate()
            .map(|(i, w)| {
                if i == 0 {
                    w.clone()
                } else {
                    let mut chars = w.chars();
                    chars.next().map_or_else(String::new, |c| c.to_ascii_uppercase().to_string() + chars.as_str())
                }
            })
            .collect();
        if identifier.starts_with(|c: char| c.is_ascii_digit()) {
            identifier.insert_str(0, "route");
        }
        identifier.push_str("Router");
        let mut unique = identifier.clone();
        let mut n = 2;
        while mounts.iter().any(|m| m.identifier == unique) {
            unique = format!("{identifier}{n}");
            n += 1;
        }

        mounts.push(RouteMount {
            identifier: unique,
            specifier,
            mount_path: format!("/api/{}", words.join("-")),
        });
    }
    mounts
}

/// Existing entry point of the server bucket, relative to `backend/`.
pub fn existing_server_entry(server_files: &[ProjectFile]) -> Option<&'static str> {
    SERVER_ENTRIES
        .into_iter()
        .find(|entry| server_files.iter().any(|f| f.path == format!("backend/{entry}")))
}

pub fn server_ts(server_files: &[ProjectFile]) -> String {
    let mounts = route_mounts(server_files);
    let handlers = server_files
        .iter()
        .find(|f| ERROR_HANDLER.is_match(&f.content) && NOT_FOUND.is_match(&f.content))
        .and_then(|f| module_specifier(&f.path, "backend"));

    let mut out = String::from("import 'dotenv/config';\nimport express from 'express';\nimport cors from 'cors';\n");
    for mount in &mounts {
        out.push_str(&format!("import {} from '{}';\n", mount.identifier, mount.specifier));
    }
    if let Some(specifier) = &handlers {
        out.push_str(&format!("import {{ errorHandler, notFound }} from '{specifier}';\n"));
    }

    out.push_str(&format!(
        "\nconst app = express();\nconst PORT = Number(process.env.PORT) || {SERVER_PORT};\n\napp.use(cors());\napp.use(express.json());\n\n"
    ));

    for mount in &mounts {
        out.push_str(&format!("app.use('{}', {});\n", mount.mount_path, mount.identifier));
    }
    if !mounts.iter().any(|m| m.mount_path == "/api/health") {
        out.push_str("\napp.get('/api/health', (_req, res) => {\n  res.json({ status: 'ok' });\n});\n");
    }
    if handlers.is_some() {
        out.push_str("\napp.use(notFound);\napp.use(errorHandler);\n");
    }

    out.push_str("\napp.listen(PORT, () => {\n  console.log(`Server listening on http://localhost:${PORT}`);\n});\n");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, content: &str) -> ProjectFile {
        ProjectFile::new(path, content)
    }

    #[test]
    fn test_module_specifier() {
        assert_eq!(
            module_specifier("frontend/src/components/TaskList.tsx", "frontend").as_deref(),
            Some("./components/TaskList")
        );
        assert_eq!(
            module_specifier("backend/src/routes/tasks.routes.ts", "backend").as_deref(),
            Some("./routes/tasks.routes")
        );
        assert_eq!(module_specifier("backend/migrations/001.sql", "backend"), None);
    }

    #[test]
    fn test_app_renders_propless_components_inside_provider() {
        let files = vec![
            file("frontend/src/context/AuthContext.tsx", "export function AuthProvider({ children }: P) {}"),
            file("frontend/src/components/LoginForm.tsx", "export default function LoginForm() {}"),
            file("frontend/src/components/TaskItem.tsx", "export default function TaskItem({ task }: P) {}"),
            file("frontend/src/components/TaskList.tsx", "export default function TaskList() {}"),
        ];
        let app = app_tsx(&files, "Todo App", "It's a todo app");

        assert!(app.contains("import { AuthProvider } from './context/AuthContext';"));
        assert!(app.contains("import LoginForm from './components/LoginForm';"));
        assert!(!app.contains("TaskItem"));
        assert!(app.contains("            <TaskList />\n"));
        assert!(app.contains("const PROJECT_DESCRIPTION = 'It\\'s a todo app';"));
        assert!(app.find("<AuthProvider>").unwrap() < app.find("<LoginForm />").unwrap());
    }

    #[test]
    fn test_app_without_provider() {
        let app = app_tsx(&[], "Demo", "");
        assert!(!app.contains("AuthProvider"));
        assert!(app.contains("      <main className=\"app\">\n"));
    }

    #[test]
    fn test_server_mounts_default_export_routes() {
        let files = vec![
            file("backend/src/routes/auth.ts", "export default router;"),
            file("backend/src/routes/taskItems.routes.ts", "export default router;"),
            file("backend/src/routes/helpers.ts", "export const x = 1;"),
            file("backend/src/middleware/errorHandler.ts", "export function notFound() {}\nexport function errorHandler() {}"),
        ];
        let server = server_ts(&files);

        assert!(server.contains("import authRouter from './routes/auth';"));
        assert!(server.contains("app.use('/api/task-items', taskItemsRouter);"));
        assert!(!server.contains("helpers"));
        assert!(server.contains("import { errorHandler, notFound } from './middleware/errorHandler';"));
        assert!(server.contains("app.get('/api/health'"));
        assert!(server.contains("${PORT}"));
        assert!(server.contains("|| 3001;"));
    }

    #[test]
    fn test_health_route_not_duplicated() {
        let files = vec![file("backend/src/routes/health.ts", "export default router;")];
        let server = server_ts(&files);
        assert!(server.contains("app.use('/api/health', healthRouter);"));
        assert!(!server.contains("app.get('/api/health'"));
    }

    #[test]
    fn test_existing_entry() {
        let files = vec![file("backend/src/index.ts", "")];
        assert_eq!(existing_server_entry(&files), Some("src/index.ts"));
        assert_eq!(existing_server_entry(&[]), None);
    }

    #[test]
    fn test_index_html_escapes_title() {
        let html = index_html("Tom & Jerry <3");
        assert!(html.contains("<title>Tom &amp; Jerry &lt;3</title>"));
    }

    #[test]
    fn test_vite_proxy() {
        let config = vite_config();
        assert!(config.contains("'/api': 'http://localhost:3001'"));
        assert!(config.contains("port: 5173,"));
    }
}
