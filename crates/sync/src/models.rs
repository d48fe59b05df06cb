use dashmap::DashSet;
use panelsync_config::SyncSettings;
use panelsync_events::EventBus;
use panelsync_models::{FailedUpload, UploadState};
use panelsync_panel::PanelApi;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use std::time::Duration;

/// Tunables of a sync run, taken from `[sync]`
#[derive(Debug, Clone)]
pub struct SyncOptions {
    pub upload_concurrency: usize,
    pub server_parallelism: usize,
    pub max_upload_attempts: u32,
    pub retry_backoff: Duration,
    pub probe_existing_directories: bool,
}

impl SyncOptions {
    pub fn from_settings(settings: &SyncSettings) -> Self {
        Self {
            upload_concurrency: settings.upload_concurrency.max(1),
            server_parallelism: settings.server_parallelism.max(1),
            max_upload_attempts: settings.max_upload_attempts.max(1),
            retry_backoff: Duration::from_millis(settings.retry_backoff_ms),
            probe_existing_directories: settings.probe_existing_directories,
        }
    }
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            upload_concurrency: 4,
            server_parallelism: 1,
            max_upload_attempts: 1,
            retry_backoff: Duration::from_millis(500),
            probe_existing_directories: false,
        }
    }
}

/// Which panel servers a run targets
#[derive(Debug, Clone, Default)]
pub struct SelectionCriteria {
    pub accepted_eggs: HashSet<String>,
    pub accepted_images: HashSet<String>,
    pub exclude_name_patterns: Vec<String>,
}

/// Directories already attempted in this run, keyed by server identifier
#[derive(Debug, Default)]
pub struct DirectoryLedger {
    pub(crate) attempted: DashSet<(String, String)>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectoryStats {
    pub created: usize,
    pub existing: usize,
}

/// Creates the remote directory tree of one server, parents first
pub struct DirectoryEnsurer {
    pub(crate) api: Arc<dyn PanelApi>,
    pub(crate) ledger: Arc<DirectoryLedger>,
    pub(crate) events: Arc<EventBus>,
    pub(crate) probe_existing: bool,
}

/// Per-task states of one server's uploads
#[derive(Debug)]
pub struct UploadTracker {
    pub(crate) states: Mutex<Vec<UploadState>>,
    pub(crate) in_flight: AtomicUsize,
    pub(crate) peak_in_flight: AtomicUsize,
}

#[derive(Debug, Clone, Default)]
pub struct UploadSummary {
    pub succeeded: Vec<String>,
    pub failed: Vec<FailedUpload>,
    pub peak_in_flight: usize,
}

/// Uploads files to one server with a fixed ceiling of in-flight requests
pub struct Uploader {
    pub(crate) api: Arc<dyn PanelApi>,
    pub(crate) events: Arc<EventBus>,
    pub(crate) concurrency: usize,
    pub(crate) max_attempts: u32,
    pub(crate) retry_backoff: Duration,
}

/// Selects servers, then ensures directories and uploads for each of them
pub struct SyncRunner {
    pub(crate) api: Arc<dyn PanelApi>,
    pub(crate) events: Arc<EventBus>,
    pub(crate) criteria: SelectionCriteria,
    pub(crate) options: SyncOptions,
}
