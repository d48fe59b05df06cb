use super::errors::SyncError;
use super::models::{UploadSummary, UploadTracker, Uploader};
use futures::stream::{self, StreamExt};
use panelsync_events::{AppEvent, EventBus};
use panelsync_filesystem::{FileSystem, LocalFile};
use panelsync_models::{FailedUpload, FileEntry, ServerRecord};
use panelsync_panel::PanelApi;
use panelsync_utils::{backoff_delay, remote_dir};
use std::sync::Arc;
use std::time::Duration;

type Result<T> = std::result::Result<T, SyncError>;

impl Uploader {
    pub fn new(
        api: Arc<dyn PanelApi>,
        events: Arc<EventBus>,
        concurrency: usize,
        max_attempts: u32,
        retry_backoff: Duration,
    ) -> Self {
        Self {
            api,
            events,
            concurrency: concurrency.max(1),
            max_attempts: max_attempts.max(1),
            retry_backoff,
        }
    }

    /// Uploads every entry to `server`, never more than `concurrency` at once.
    ///
    /// A failed file is recorded and its siblings keep going.
    pub async fn upload_all(&self, server: &ServerRecord, entries: &[FileEntry]) -> UploadSummary {
        let tracker = UploadTracker::new(entries.len());

        // buffer_unordered polls at most `concurrency` uploads at a time
        let mut results: Vec<(usize, Result<()>)> = stream::iter(entries.iter().enumerate())
            .map(|(index, entry)| {
                let tracker = &tracker;

                async move {
                    tracker.start(index);
                    let result = self.upload_one(server, entry).await;
                    tracker.finish(index, result.is_ok());

                    (index, result)
                }
            })
            .buffer_unordered(self.concurrency)
            .collect()
            .await;

        // Report in scan order
        results.sort_by_key(|(index, _)| *index);

        let mut summary = UploadSummary {
            peak_in_flight: tracker.peak_in_flight(),
            ..Default::default()
        };

        for (index, result) in results {
            let entry = &entries[index];
            match result {
                Ok(()) => {
                    self.events.emit(AppEvent::FileUploaded {
                        server: server.name.clone(),
                        path: entry.relative_path.clone(),
                    });
                    summary.succeeded.push(entry.relative_path.clone());
                }
                Err(e) => {
                    self.events.emit(AppEvent::UploadFailed {
                        server: server.name.clone(),
                        path: entry.relative_path.clone(),
                        error: e.to_string(),
                    });
                    summary.failed.push(FailedUpload {
                        relative_path: entry.relative_path.clone(),
                        cause: e.to_string(),
                    });
                }
            }
        }

        tracing::debug!(
            server = %server.identifier,
            "{} uploaded, {} failed, peak {} in flight (limit {})",
            summary.succeeded.len(),
            summary.failed.len(),
            summary.peak_in_flight,
            self.concurrency
        );

        summary
    }

    async fn upload_one(&self, server: &ServerRecord, entry: &FileEntry) -> Result<()> {
        let file = FileSystem::read_file(&entry.absolute_path, entry.file_name())
            .await
            .map_err(|source| SyncError::LocalReadError {
                path: entry.absolute_path.display().to_string(),
                source,
            })?;
        let directory = remote_dir(entry.parent_dir());

        self.upload_with_retry(server, &directory, &file, &entry.relative_path)
            .await
    }

    async fn upload_with_retry(
        &self,
        server: &ServerRecord,
        directory: &str,
        file: &LocalFile,
        relative_path: &str,
    ) -> Result<()> {
        let mut attempt = 0;

        loop {
            match self.api.upload_file(server, directory, file).await {
                Ok(()) => return Ok(()),
                Err(e) if e.is_transient() && attempt + 1 < self.max_attempts => {
                    let backoff = backoff_delay(self.retry_backoff, attempt);
                    tracing::warn!(
                        server = %server.identifier,
                        "Upload attempt {} failed for {}: {}. Retrying in {:?}...",
                        attempt + 1,
                        relative_path,
                        e,
                        backoff
                    );
                    tokio::time::sleep(backoff).await;
                    attempt += 1;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}
