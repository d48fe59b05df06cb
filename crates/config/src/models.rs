use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub panel: PanelSettings,
    pub sync: SyncSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PanelSettings {
    pub url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "super::defaults::timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SyncSettings {
    #[serde(default = "super::defaults::root")]
    pub root: String,
    #[serde(default)]
    pub accepted_eggs: Vec<String>,
    #[serde(default)]
    pub accepted_images: Vec<String>,
    #[serde(default)]
    pub exclude_name_patterns: Vec<String>,
    #[serde(default = "super::defaults::upload_concurrency")]
    pub upload_concurrency: usize,
    #[serde(default = "super::defaults::server_parallelism")]
    pub server_parallelism: usize,
    #[serde(default = "super::defaults::max_upload_attempts")]
    pub max_upload_attempts: u32,
    #[serde(default = "super::defaults::retry_backoff_ms")]
    pub retry_backoff_ms: u64,
    #[serde(default)]
    pub probe_existing_directories: bool,
}

impl SyncSettings {
    pub fn accepted_egg_set(&self) -> HashSet<String> {
        self.accepted_eggs.iter().cloned().collect()
    }

    pub fn accepted_image_set(&self) -> HashSet<String> {
        self.accepted_images.iter().cloned().collect()
    }
}
