/// Default values for configuration fields

pub fn timeout_secs() -> u64 {
    30
}

pub fn root() -> String {
    "upload".to_string()
}

pub fn upload_concurrency() -> usize {
    4  // Simultaneous uploads per server
}

pub fn server_parallelism() -> usize {
    1  // Servers synced one after another
}

pub fn max_upload_attempts() -> u32 {
    1  // No retries
}

pub fn retry_backoff_ms() -> u64 {
    500
}

pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# ===============================================================================
# panelsync Configuration
# ===============================================================================

[panel]
url = ""                             # Panel base URL, e.g. "https://panel.example.com"
api_key = ""                         # Client API key (or set PANELSYNC_API_KEY)
timeout_secs = 30                    # Per-request timeout in seconds

[sync]
root = "upload"                      # Local folder mirrored to every selected server

# Server selection: a server is synced when its egg (name or uuid) is listed in
# accepted_eggs OR its docker image is listed in accepted_images
accepted_eggs = []                   # e.g. ["Counter-Strike 2"]
accepted_images = []                 # e.g. ["ghcr.io/example/cs2:latest"]
exclude_name_patterns = []           # Skip servers whose name contains any of these

# Performance
upload_concurrency = 4               # Max simultaneous uploads per server
server_parallelism = 1               # Servers synced at the same time
max_upload_attempts = 1              # 1 = no retries
retry_backoff_ms = 500               # First retry delay, doubled each attempt

# Check the parent listing before creating a folder
probe_existing_directories = false
"#;
