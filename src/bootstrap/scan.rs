use panelsync::prelude::{scan, AppEvent, Config, EventBus, FileSystem, ScanResult};
use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

/// Scans the configured root, resolved against the working directory
pub async fn scan_root(config: &Config, events: &Arc<EventBus>) -> Result<ScanResult> {
    let root = FileSystem::get_absolute_path(Path::new(&config.sync.root))?;

    events.emit(AppEvent::ScanStarted {
        root: root.display().to_string(),
    });

    let start = Instant::now();
    let result = scan(root.clone())
        .await
        .with_context(|| format!("Failed to scan '{}'", root.display()))?;

    events.emit(AppEvent::ScanCompleted {
        files: result.entries.len(),
        directories: result.directories.len(),
        duration: start.elapsed(),
    });

    Ok(result)
}
