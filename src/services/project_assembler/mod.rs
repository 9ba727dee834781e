//! Turns generated files into an installable two-part project.
//!
//! Assembly runs in fixed stages:
//!
//! 1. partition files into client and server buckets ([`bucket`])
//! 2. reserve synthesized configuration paths, then place generated files
//!    under their bucket, renaming on collision ([`paths`])
//! 3. synthesize manifests, entry points and docs around them
//! 4. add root orchestration files when both buckets exist
//!
//! The assembler never touches the filesystem. Output order and content
//! depend only on the inputs.

mod bootstrap;
mod bucket;
mod docs;
mod manifests;
mod paths;
mod scripts;

pub use bucket::{classify, Bucket};
pub use manifests::package_name;
pub use paths::normalize;

use crate::domain::errors::DomainResult;
use crate::domain::models::{AssembledProject, GeneratedFile, ProjectFile};

use bootstrap::RouteMount;
use docs::BucketDocs;
use paths::PathAllocator;

/// Port of the client dev server.
pub const CLIENT_PORT: u16 = 5173;
/// Port the server listens on by default.
pub const SERVER_PORT: u16 = 3001;

const DEFAULT_SLUG: &str = "generated-project";
const DEFAULT_TITLE: &str = "Generated Project";

/// Bucket paths reserved before any generated file is placed.
fn reserved_paths(bucket: Bucket) -> Vec<String> {
    let mut names = vec!["package.json", "tsconfig.json", "README.md", ".gitignore"];
    match bucket {
        Bucket::Client => names.push("vite.config.ts"),
        Bucket::Server => names.push(".env.example"),
    }
    names
        .into_iter()
        .map(|name| format!("{}/{name}", bucket.dir()))
        .collect()
}

/// Lower-case, dash-separated package name for a project.
pub fn project_slug(name: &str) -> String {
    let mut slug = String::new();
    for c in name.trim().chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    if slug.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectAssembler;

impl ProjectAssembler {
    pub fn new() -> Self {
        Self
    }

    /// Assemble `files` into the final project tree.
    pub fn assemble(
        &self,
        files: &[GeneratedFile],
        project_name: &str,
        description: &str,
    ) -> DomainResult<AssembledProject> {
        let slug = project_slug(project_name);
        let title = match project_name.trim() {
            "" => DEFAULT_TITLE,
            name => name,
        };

        let (client, server) = bucket::partition(files);
        let mut allocator = PathAllocator::new();
        for (bucket, members) in [(Bucket::Client, &client), (Bucket::Server, &server)] {
            if !members.is_empty() {
                reserved_paths(bucket).into_iter().for_each(|p| allocator.reserve(p));
            }
        }

        let placed_client = place(&client, Bucket::Client, &mut allocator);
        let placed_server = place(&server, Bucket::Server, &mut allocator);

        let mut output = Vec::new();
        let mut buckets = Vec::new();

        if !placed_client.is_empty() {
            let synthesized = synthesize_client(&placed_client, &slug, title, description, &mut allocator)?;
            output.extend(placed_client);
            output.extend(synthesized);
            buckets.push(Bucket::Client);
        }
        if !placed_server.is_empty() {
            let synthesized = synthesize_server(&placed_server, &slug, title, description, &mut allocator)?;
            output.extend(placed_server);
            output.extend(synthesized);
            buckets.push(Bucket::Server);
        }

        if buckets.len() == 2 {
            output.push(ProjectFile::new("package.json", manifests::root_package_json(&slug, description)?));
            output.push(ProjectFile::new("README.md", docs::root_readme(title, description, &buckets)));
            output.push(ProjectFile::new("START.sh", scripts::start_sh(title)));
            output.push(ProjectFile::new("START.bat", scripts::start_bat(title)));
        } else {
            output.push(ProjectFile::new("README.md", docs::root_readme(title, description, &buckets)));
        }

        let collisions = allocator.into_collisions();
        tracing::info!(
            project = %slug,
            files = output.len(),
            collisions = collisions.len(),
            "project assembled"
        );

        Ok(AssembledProject {
            name: slug,
            files: output,
            collisions,
        })
    }
}

fn place(files: &[&GeneratedFile], bucket: Bucket, allocator: &mut PathAllocator) -> Vec<ProjectFile> {
    files
        .iter()
        .map(|file| {
            let path = allocator.claim(paths::normalize(file, bucket), &file.path);
            ProjectFile::new(path, file.content.clone())
        })
        .collect()
}

/// Push `path` unless a generated file already occupies it.
fn add_if_absent(
    out: &mut Vec<ProjectFile>,
    allocator: &mut PathAllocator,
    path: &str,
    content: impl FnOnce() -> String,
) {
    if allocator.is_taken(path) {
        tracing::debug!(path, "keeping generated file");
        return;
    }
    allocator.reserve(path);
    out.push(ProjectFile::new(path, content()));
}

fn synthesize_client(
    placed: &[ProjectFile],
    slug: &str,
    title: &str,
    description: &str,
    allocator: &mut PathAllocator,
) -> DomainResult<Vec<ProjectFile>> {
    let mut entry_files = Vec::new();
    add_if_absent(&mut entry_files, allocator, "frontend/index.html", || bootstrap::index_html(title));
    add_if_absent(&mut entry_files, allocator, "frontend/src/main.tsx", || bootstrap::MAIN_TSX.to_string());
    add_if_absent(&mut entry_files, allocator, "frontend/src/App.tsx", || {
        bootstrap::app_tsx(placed, title, description)
    });
    add_if_absent(&mut entry_files, allocator, "frontend/src/index.css", || bootstrap::INDEX_CSS.to_string());

    let vite_config = ProjectFile::new("frontend/vite.config.ts", bootstrap::vite_config());
    let all: Vec<ProjectFile> = placed
        .iter()
        .chain(&entry_files)
        .chain(std::iter::once(&vite_config))
        .cloned()
        .collect();

    let mut out = vec![
        ProjectFile::new("frontend/package.json", manifests::package_json(Bucket::Client, slug, &all, "")?),
        ProjectFile::new("frontend/tsconfig.json", manifests::tsconfig(Bucket::Client)),
        vite_config,
    ];
    out.extend(entry_files);
    out.push(ProjectFile::new("frontend/.gitignore", manifests::GITIGNORE));

    let readme_files: Vec<ProjectFile> = placed.iter().chain(&out).cloned().collect();
    let readme = docs::bucket_readme(
        Bucket::Client,
        title,
        description,
        &BucketDocs {
            files: &readme_files,
            ..Default::default()
        },
    );
    out.push(ProjectFile::new("frontend/README.md", readme));
    Ok(out)
}

fn synthesize_server(
    placed: &[ProjectFile],
    slug: &str,
    title: &str,
    description: &str,
    allocator: &mut PathAllocator,
) -> DomainResult<Vec<ProjectFile>> {
    let mut out = Vec::new();
    let entry = match bootstrap::existing_server_entry(placed) {
        Some(entry) => entry,
        None => {
            add_if_absent(&mut out, allocator, "backend/src/server.ts", || bootstrap::server_ts(placed));
            bootstrap::SERVER_ENTRIES[0]
        }
    };

    let code: Vec<ProjectFile> = placed.iter().chain(&out).cloned().collect();
    let env_vars = manifests::detect_env_vars(&code);
    let routes: Vec<RouteMount> = bootstrap::route_mounts(placed);

    let mut config = vec![
        ProjectFile::new("backend/package.json", manifests::package_json(Bucket::Server, slug, &code, entry)?),
        ProjectFile::new("backend/tsconfig.json", manifests::tsconfig(Bucket::Server)),
        ProjectFile::new("backend/.env.example", manifests::env_example(&env_vars, slug)),
        ProjectFile::new("backend/.gitignore", manifests::GITIGNORE),
    ];
    out.append(&mut config);

    let mut documented_vars = env_vars;
    documented_vars.insert("PORT".to_string());
    let readme_files: Vec<ProjectFile> = placed.iter().chain(&out).cloned().collect();
    let readme = docs::bucket_readme(
        Bucket::Server,
        title,
        description,
        &BucketDocs {
            files: &readme_files,
            routes: &routes,
            env_vars: Some(&documented_vars),
            entry,
        },
    );
    out.push(ProjectFile::new("backend/README.md", readme));
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, content: &str) -> GeneratedFile {
        GeneratedFile::classified(path, content)
    }

    fn full_stack() -> Vec<GeneratedFile> {
        vec![
            file("src/components/TaskList.tsx", "import React from 'react';\nexport default function TaskList() { return <ul />; }\n"),
            file("src/api/tasksClient.ts", "export const tasksClient = {};\n"),
            file("src/routes/tasks.ts", "import { Router } from 'express';\nconst router = Router();\nexport default router;\n"),
            file("src/middleware/auth.ts", "import jwt from 'jsonwebtoken';\nconst s = process.env.JWT_SECRET;\n"),
            file("migrations/002_create_tasks.sql", "CREATE TABLE tasks (id TEXT);\n"),
        ]
    }

    #[test]
    fn test_project_slug() {
        assert_eq!(project_slug("Todo App!"), "todo-app");
        assert_eq!(project_slug("  --  "), "generated-project");
        assert_eq!(project_slug("My__Big  Project"), "my-big-project");
    }

    #[test]
    fn test_full_stack_layout() {
        let project = ProjectAssembler::new().assemble(&full_stack(), "Todo App", "Tasks").unwrap();
        let paths: Vec<&str> = project.paths().collect();

        for expected in [
            "frontend/src/components/TaskList.tsx",
            "frontend/src/api/tasksClient.ts",
            "frontend/package.json",
            "frontend/tsconfig.json",
            "frontend/vite.config.ts",
            "frontend/index.html",
            "frontend/src/main.tsx",
            "frontend/src/App.tsx",
            "frontend/src/index.css",
            "backend/src/routes/tasks.ts",
            "backend/src/middleware/auth.ts",
            "backend/migrations/002_create_tasks.sql",
            "backend/src/server.ts",
            "backend/.env.example",
            "package.json",
            "README.md",
            "START.sh",
            "START.bat",
        ] {
            assert!(paths.contains(&expected), "missing {expected}: {paths:?}");
        }
        assert_eq!(paths[0], "frontend/src/components/TaskList.tsx");
        assert_eq!(paths.last(), Some(&"START.bat"));
        assert!(project.collisions.is_empty());
        assert_eq!(project.name, "todo-app");
    }

    #[test]
    fn test_bucket_paths_are_prefixed() {
        let project = ProjectAssembler::new().assemble(&full_stack(), "Todo", "").unwrap();
        let roots = ["README.md", "package.json", "START.sh", "START.bat"];
        for path in project.paths() {
            assert!(
                path.starts_with("frontend/") || path.starts_with("backend/") || roots.contains(&path),
                "{path}"
            );
        }
    }

    #[test]
    fn test_server_wiring() {
        let project = ProjectAssembler::new().assemble(&full_stack(), "Todo", "").unwrap();
        let server = &project.get("backend/src/server.ts").unwrap().content;
        assert!(server.contains("app.use('/api/tasks', tasksRouter);"));

        let env = &project.get("backend/.env.example").unwrap().content;
        assert!(env.contains("JWT_SECRET=change-me"));

        let manifest: serde_json::Value =
            serde_json::from_str(&project.get("backend/package.json").unwrap().content).unwrap();
        assert_eq!(manifest["scripts"]["dev"], "tsx watch src/server.ts");
        assert!(manifest["dependencies"].get("jsonwebtoken").is_some());
    }

    #[test]
    fn test_generated_entry_is_kept() {
        let files = vec![
            file("server/index.js", "const express = require('express');\n"),
            file("src/routes/a.ts", "export default router;\n"),
        ];
        let project = ProjectAssembler::new().assemble(&files, "Api", "").unwrap();
        assert!(project.contains("backend/src/index.ts"));
        assert!(!project.contains("backend/src/server.ts"));
        let manifest: serde_json::Value =
            serde_json::from_str(&project.get("backend/package.json").unwrap().content).unwrap();
        assert_eq!(manifest["main"], "src/index.ts");
    }

    #[test]
    fn test_generated_app_is_kept() {
        let files = vec![file("src/App.tsx", "export default function App() { return <div />; }\n")];
        let project = ProjectAssembler::new().assemble(&files, "Solo", "").unwrap();
        let app = project.get("frontend/src/App.tsx").unwrap();
        assert!(app.content.contains("<div />"));
        assert_eq!(project.paths().filter(|p| *p == "frontend/src/App.tsx").count(), 1);
    }

    #[test]
    fn test_reserved_config_collision() {
        let files = vec![
            file("frontend/package.json", "{\"name\": \"mine\"}"),
            file("src/components/A.tsx", "export default function A() { return <p />; }"),
        ];
        let project = ProjectAssembler::new().assemble(&files, "X", "").unwrap();
        assert!(project.contains("frontend/package-1.json"));
        assert_eq!(project.collisions.len(), 1);
        assert_eq!(project.collisions[0].path, "frontend/package.json");
        assert_eq!(project.collisions[0].source, "frontend/package.json");
    }

    #[test]
    fn test_single_bucket_has_only_root_readme() {
        let files = vec![file("src/routes/a.ts", "export default router;\n")];
        let project = ProjectAssembler::new().assemble(&files, "Api", "").unwrap();
        assert!(project.contains("README.md"));
        assert!(!project.contains("package.json"));
        assert!(!project.contains("START.sh"));
        assert!(!project.paths().any(|p| p.starts_with("frontend/")));
    }

    #[test]
    fn test_empty_input() {
        let project = ProjectAssembler::new().assemble(&[], "", "").unwrap();
        assert_eq!(project.paths().collect::<Vec<_>>(), vec!["README.md"]);
        assert_eq!(project.name, "generated-project");
    }

    #[test]
    fn test_deterministic() {
        let assembler = ProjectAssembler::new();
        let a = assembler.assemble(&full_stack(), "Todo", "Tasks").unwrap();
        let b = assembler.assemble(&full_stack(), "Todo", "Tasks").unwrap();
        assert_eq!(a, b);
    }
}
