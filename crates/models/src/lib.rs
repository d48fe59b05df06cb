use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;

/// A local file scheduled for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    /// Path relative to the upload root, `/`-separated, no leading slash
    pub relative_path: String,
    pub absolute_path: PathBuf,
}

impl FileEntry {
    pub fn new(relative_path: impl Into<String>, absolute_path: impl Into<PathBuf>) -> Self {
        Self {
            relative_path: relative_path.into(),
            absolute_path: absolute_path.into(),
        }
    }

    /// Relative directory containing this file, `None` for files at the root
    pub fn parent_dir(&self) -> Option<&str> {
        self.relative_path.rsplit_once('/').map(|(parent, _)| parent)
    }

    pub fn file_name(&self) -> &str {
        self.relative_path
            .rsplit_once('/')
            .map_or(self.relative_path.as_str(), |(_, name)| name)
    }
}

/// Unique relative directories implied by a list of files.
///
/// Ordered shallowest first, then lexicographically, so a parent always
/// precedes its children.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectorySet {
    paths: Vec<String>,
}

impl DirectorySet {
    pub fn from_entries(entries: &[FileEntry]) -> Self {
        let mut seen = HashSet::new();

        for entry in entries {
            let Some(parent) = entry.parent_dir() else {
                continue;
            };

            // Every prefix ending before a separator is an ancestor
            for (idx, ch) in parent.char_indices() {
                if ch == '/' {
                    seen.insert(parent[..idx].to_string());
                }
            }
            seen.insert(parent.to_string());
        }

        let mut paths: Vec<String> = seen.into_iter().filter(|p| !p.is_empty()).collect();
        paths.sort_by(|a, b| depth(a).cmp(&depth(b)).then_with(|| a.cmp(b)));

        Self { paths }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.paths.iter().any(|p| p == path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

fn depth(path: &str) -> usize {
    path.matches('/').count()
}

/// A server as reported by the panel's client API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerRecord {
    /// Internal numeric id, not always exposed by the client API
    pub id: Option<u64>,
    /// Short identifier used in file API routes
    pub identifier: String,
    pub uuid: String,
    pub name: String,
    /// Egg name, when the panel included the egg relationship
    pub egg: Option<String>,
    pub egg_uuid: Option<String>,
    pub docker_image: Option<String>,
}

/// Successful result of a create-directory call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DirectoryOutcome {
    Created,
    AlreadyExists,
}

/// Lifecycle of a single upload task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UploadState {
    Pending,
    InFlight,
    Succeeded,
    Failed,
}

impl UploadState {
    pub fn is_terminal(self) -> bool {
        matches!(self, UploadState::Succeeded | UploadState::Failed)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedUpload {
    pub relative_path: String,
    pub cause: String,
}

/// Per-server outcome of a sync run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerReport {
    pub server_name: String,
    pub identifier: String,
    pub directories_created: usize,
    pub directories_existing: usize,
    pub succeeded: Vec<String>,
    pub failed: Vec<FailedUpload>,
    /// Set when directory creation failed and uploads were not attempted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aborted: Option<String>,
}

impl ServerReport {
    pub fn new(server: &ServerRecord) -> Self {
        Self {
            server_name: server.name.clone(),
            identifier: server.identifier.clone(),
            ..Default::default()
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed.is_empty() && self.aborted.is_none()
    }
}

/// Outcome of a full run across every selected server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub files_scanned: usize,
    pub directories_scanned: usize,
    pub servers: Vec<ServerReport>,
}

impl SyncReport {
    pub fn is_success(&self) -> bool {
        self.servers.iter().all(ServerReport::is_success)
    }

    pub fn total_succeeded(&self) -> usize {
        self.servers.iter().map(|s| s.succeeded.len()).sum()
    }

    pub fn total_failed(&self) -> usize {
        self.servers.iter().map(|s| s.failed.len()).sum()
    }

    /// Every failed file across servers as `(server name, failure)`, in report order
    pub fn failures(&self) -> impl Iterator<Item = (&str, &FailedUpload)> {
        self.servers
            .iter()
            .flat_map(|s| s.failed.iter().map(move |f| (s.server_name.as_str(), f)))
    }
}
