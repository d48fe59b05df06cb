use super::errors::SyncError;
use super::models::{
    DirectoryEnsurer, DirectoryLedger, SelectionCriteria, SyncOptions, SyncRunner, Uploader,
};
use super::selector::select_servers;
use chrono::Utc;
use futures::stream::{self, StreamExt};
use panelsync_config::Config;
use panelsync_events::{AppEvent, EventBus};
use panelsync_models::{FailedUpload, ServerRecord, ServerReport, SyncReport};
use panelsync_panel::PanelApi;
use panelsync_scanner::ScanResult;
use std::sync::Arc;

type Result<T> = std::result::Result<T, SyncError>;

impl SyncRunner {
    pub fn new(
        api: Arc<dyn PanelApi>,
        events: Arc<EventBus>,
        criteria: SelectionCriteria,
        options: SyncOptions,
    ) -> Self {
        Self {
            api,
            events,
            criteria,
            options,
        }
    }

    pub fn from_config(api: Arc<dyn PanelApi>, events: Arc<EventBus>, config: &Config) -> Self {
        Self::new(
            api,
            events,
            SelectionCriteria::from_settings(&config.sync),
            SyncOptions::from_settings(&config.sync),
        )
    }

    /// Mirrors `scan` onto every selected server.
    ///
    /// Fails only when server selection fails. Per-server and per-file
    /// problems end up in the returned report.
    pub async fn run(&self, scan: &ScanResult) -> Result<SyncReport> {
        let started_at = Utc::now();
        let servers = select_servers(self.api.as_ref(), &self.criteria, &self.events).await?;

        // Fresh per run: nothing carries over between invocations
        let ledger = Arc::new(DirectoryLedger::new());
        let ensurer = DirectoryEnsurer::new(
            Arc::clone(&self.api),
            ledger,
            Arc::clone(&self.events),
            self.options.probe_existing_directories,
        );
        let uploader = Uploader::new(
            Arc::clone(&self.api),
            Arc::clone(&self.events),
            self.options.upload_concurrency,
            self.options.max_upload_attempts,
            self.options.retry_backoff,
        );

        let mut reports: Vec<(usize, ServerReport)> = stream::iter(servers.iter().enumerate())
            .map(|(index, server)| {
                let ensurer = &ensurer;
                let uploader = &uploader;
                async move { (index, self.sync_server(ensurer, uploader, server, scan).await) }
            })
            .buffer_unordered(self.options.server_parallelism.max(1))
            .collect()
            .await;

        reports.sort_by_key(|(index, _)| *index);

        Ok(SyncReport {
            started_at,
            finished_at: Utc::now(),
            files_scanned: scan.entries.len(),
            directories_scanned: scan.directories.len(),
            servers: reports.into_iter().map(|(_, report)| report).collect(),
        })
    }

    async fn sync_server(
        &self,
        ensurer: &DirectoryEnsurer,
        uploader: &Uploader,
        server: &ServerRecord,
        scan: &ScanResult,
    ) -> ServerReport {
        let mut report = ServerReport::new(server);

        self.events.emit(AppEvent::ServerSyncStarted {
            server: server.name.clone(),
            files: scan.entries.len(),
        });

        match ensurer.ensure(server, &scan.directories).await {
            Ok(stats) => {
                report.directories_created = stats.created;
                report.directories_existing = stats.existing;
            }
            Err(e) => {
                // Uploads into a missing tree would only produce 404s
                let cause = e.to_string();
                self.events.emit(AppEvent::ServerAborted {
                    server: server.name.clone(),
                    error: cause.clone(),
                });

                report.failed = scan
                    .entries
                    .iter()
                    .map(|entry| FailedUpload {
                        relative_path: entry.relative_path.clone(),
                        cause: format!("not attempted: {}", cause),
                    })
                    .collect();
                report.aborted = Some(cause);
                self.emit_completed(&report);
                return report;
            }
        }

        let summary = uploader.upload_all(server, &scan.entries).await;
        report.succeeded = summary.succeeded;
        report.failed = summary.failed;

        self.emit_completed(&report);
        report
    }

    fn emit_completed(&self, report: &ServerReport) {
        self.events.emit(AppEvent::ServerSyncCompleted {
            server: report.server_name.clone(),
            succeeded: report.succeeded.len(),
            failed: report
                .failed
                .iter()
                .map(|f| f.relative_path.clone())
                .collect(),
        });
    }
}
