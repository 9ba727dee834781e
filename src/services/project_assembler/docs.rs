//! README files for the buckets and the project root.

use std::collections::BTreeSet;
use std::fmt::Write as _;

use super::bootstrap::RouteMount;
use super::bucket::Bucket;
use super::{CLIENT_PORT, SERVER_PORT};
use crate::domain::models::ProjectFile;

/// Facts about a bucket that its README reports.
#[derive(Debug, Default)]
pub struct BucketDocs<'a> {
    pub files: &'a [ProjectFile],
    pub routes: &'a [RouteMount],
    pub env_vars: Option<&'a BTreeSet<String>>,
    pub entry: &'a str,
}

pub fn bucket_readme(bucket: Bucket, title: &str, description: &str, docs: &BucketDocs<'_>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {title} {}\n", bucket.label());
    if !description.trim().is_empty() {
        let _ = writeln!(out, "{}\n", description.trim());
    }

    out.push_str("## Scripts\n\n");
    match bucket {
        Bucket::Client => {
            let _ = writeln!(out, "- `npm install` installs dependencies");
            let _ = writeln!(out, "- `npm run dev` starts Vite on http://localhost:{CLIENT_PORT}");
            let _ = writeln!(out, "- `npm run build` type-checks and bundles into `dist/`");
            let _ = writeln!(out, "- `npm run preview` serves the production bundle");
            let _ = writeln!(out, "\nRequests to `/api` are proxied to http://localhost:{SERVER_PORT}.");
        }
        Bucket::Server => {
            let _ = writeln!(out, "- `npm install` installs dependencies");
            let _ = writeln!(out, "- `npm run dev` runs `{}` with reload on http://localhost:{SERVER_PORT}", docs.entry);
            let _ = writeln!(out, "- `npm start` runs the server once");
            let _ = writeln!(out, "- `npm run build` compiles TypeScript into `dist/`");
        }
    }

    if !docs.routes.is_empty() {
        out.push_str("\n## API endpoints\n\n");
        for route in docs.routes {
            let _ = writeln!(out, "- `{}` ({})", route.mount_path, route.specifier.trim_start_matches("./"));
        }
    }

    if let Some(vars) = docs.env_vars {
        out.push_str("\n## Environment\n\nCopy `.env.example` to `.env` and adjust:\n\n");
        for var in vars {
            let _ = writeln!(out, "- `{var}`");
        }
    }

    let prefix = format!("{}/", bucket.dir());
    let migrations: Vec<&str> = docs
        .files
        .iter()
        .filter_map(|f| f.path.strip_prefix(&prefix))
        .filter(|p| p.starts_with("migrations/"))
        .collect();
    if !migrations.is_empty() {
        out.push_str("\n## Migrations\n\nApply these in order against your database:\n\n");
        for migration in migrations {
            let _ = writeln!(out, "- `{migration}`");
        }
    }

    out.push_str("\n## Files\n\n");
    for file in docs.files {
        if let Some(relative) = file.path.strip_prefix(&prefix) {
            let _ = writeln!(out, "- `{relative}`");
        }
    }
    out
}

pub fn root_readme(title: &str, description: &str, buckets: &[Bucket]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {title}\n");
    if !description.trim().is_empty() {
        let _ = writeln!(out, "{}\n", description.trim());
    }

    out.push_str("## Layout\n\n");
    if buckets.is_empty() {
        out.push_str("No source files were generated for this project.\n");
        return out;
    }
    for bucket in buckets {
        let what = match bucket {
            Bucket::Client => "React + Vite client",
            Bucket::Server => "Express + TypeScript API",
        };
        let _ = writeln!(out, "- `{}/`: {what} (see `{}/README.md`)", bucket.dir(), bucket.dir());
    }

    out.push_str("\n## Getting started\n\nRequires Node.js 18 or newer.\n\n");
    if buckets.len() > 1 {
        out.push_str("Run `./START.sh` (macOS/Linux) or `START.bat` (Windows) to install everything and launch both sides.\n\n");
        out.push_str("Or by hand:\n\n```sh\nnpm run install:all\nnpm run dev:backend\nnpm run dev:frontend\n```\n");
        let _ = writeln!(
            out,
            "\nThe client runs on http://localhost:{CLIENT_PORT} and the API on http://localhost:{SERVER_PORT}."
        );
    } else {
        let dir = buckets[0].dir();
        let _ = writeln!(out, "```sh\ncd {dir}\nnpm install\nnpm run dev\n```");
    }
    out
}
