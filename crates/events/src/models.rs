use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum AppEvent {
    // Application lifecycle
    Starting,
    Finished {
        succeeded: usize,
        failed: usize,
        /// `server: path (cause)` for every failed file, in report order
        failures: Vec<String>,
        duration: Duration,
    },

    // Configuration
    ConfigLoading { path: String },
    ConfigLoaded { panel_url: String, root: String },
    ConfigCreated { path: String },
    ConfigMigrated { added_fields: Vec<String> },
    ConfigError { error: String },

    // Scanning
    ScanStarted { root: String },
    ScanCompleted { files: usize, directories: usize, duration: Duration },

    // Server selection
    ServersFetched { total: usize, pages: u32 },
    ServersSelected { names: Vec<String> },
    ServerSkipped { name: String, reason: String },

    // Per-server sync
    ServerSyncStarted { server: String, files: usize },
    DirectoryCreated { server: String, path: String },
    DirectoryExists { server: String, path: String },
    DirectoriesEnsured { server: String, created: usize, existing: usize },
    FileUploaded { server: String, path: String },
    UploadFailed { server: String, path: String, error: String },
    ServerAborted { server: String, error: String },
    ServerSyncCompleted { server: String, succeeded: usize, failed: Vec<String> },

    // Errors
    Error { context: String, error: String },
}

pub struct EventBus {
    pub(super) silent_mode: bool,
}
