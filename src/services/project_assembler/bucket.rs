//! Client/server partitioning of generated files.

use crate::domain::models::{extension_of, FileKind, GeneratedFile};

/// One side of the assembled project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    Client,
    Server,
}

impl Bucket {
    /// Top-level directory of the bucket.
    pub fn dir(&self) -> &'static str {
        match self {
            Self::Client => "frontend",
            Self::Server => "backend",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Client => "Frontend",
            Self::Server => "Backend",
        }
    }
}

const CLIENT_PATH_HINTS: [&str; 2] = ["component", "client"];
const CLIENT_EXTENSIONS: [&str; 3] = ["tsx", "jsx", "css"];
const SERVER_PATH_HINTS: [&str; 5] = ["controller", "model", "route", "middleware", "server"];

/// Bucket implied by the file itself, if any. Client rules win.
pub fn classify(file: &GeneratedFile) -> Option<Bucket> {
    let path = file.path.to_lowercase();
    let extension = extension_of(&file.path);

    let client = file.kind == FileKind::Component
        || CLIENT_PATH_HINTS.iter().any(|hint| path.contains(hint))
        || CLIENT_EXTENSIONS.contains(&extension.as_str());
    if client {
        return Some(Bucket::Client);
    }

    let server = matches!(file.kind, FileKind::Api | FileKind::Schema)
        || SERVER_PATH_HINTS.iter().any(|hint| path.contains(hint))
        || extension == "sql";
    server.then_some(Bucket::Server)
}

/// Split files into client and server lists, keeping input order.
///
/// Files matching neither side follow the server when it has any files,
/// otherwise the client.
pub fn partition(files: &[GeneratedFile]) -> (Vec<&GeneratedFile>, Vec<&GeneratedFile>) {
    let mut client = Vec::new();
    let mut server = Vec::new();
    let mut unclassified = Vec::new();

    for file in files {
        match classify(file) {
            Some(Bucket::Client) => client.push(file),
            Some(Bucket::Server) => server.push(file),
            None => unclassified.push(file),
        }
    }

    if !unclassified.is_empty() {
        let target = if server.is_empty() { Bucket::Client } else { Bucket::Server };
        tracing::debug!(files = unclassified.len(), bucket = target.dir(), "placing unclassified files");
        match target {
            Bucket::Client => client.extend(unclassified),
            Bucket::Server => server.extend(unclassified),
        }
    }

    (client, server)
}
