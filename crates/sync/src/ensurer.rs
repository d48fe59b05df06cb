use super::errors::SyncError;
use super::models::{DirectoryEnsurer, DirectoryLedger, DirectoryStats};
use panelsync_events::{AppEvent, EventBus};
use panelsync_models::{DirectoryOutcome, DirectorySet, ServerRecord};
use panelsync_panel::PanelApi;
use panelsync_utils::split_remote;
use std::sync::Arc;

type Result<T> = std::result::Result<T, SyncError>;

impl DirectoryEnsurer {
    pub fn new(
        api: Arc<dyn PanelApi>,
        ledger: Arc<DirectoryLedger>,
        events: Arc<EventBus>,
        probe_existing: bool,
    ) -> Self {
        Self {
            api,
            ledger,
            events,
            probe_existing,
        }
    }

    /// Creates every directory of `directories` on `server`, parents first.
    ///
    /// Paths already attempted for this server in the current run are
    /// skipped. The first non-conflict failure stops the walk.
    pub async fn ensure(&self, server: &ServerRecord, directories: &DirectorySet) -> Result<DirectoryStats> {
        let mut stats = DirectoryStats::default();

        for path in directories.iter() {
            if !self.ledger.claim(&server.identifier, path) {
                continue;
            }

            let outcome = self
                .ensure_one(server, path)
                .await
                .map_err(|source| SyncError::DirectoryError {
                    path: path.to_string(),
                    source,
                })?;

            match outcome {
                DirectoryOutcome::Created => {
                    stats.created += 1;
                    self.events.emit(AppEvent::DirectoryCreated {
                        server: server.name.clone(),
                        path: path.to_string(),
                    });
                }
                DirectoryOutcome::AlreadyExists => {
                    stats.existing += 1;
                    self.events.emit(AppEvent::DirectoryExists {
                        server: server.name.clone(),
                        path: path.to_string(),
                    });
                }
            }
        }

        self.events.emit(AppEvent::DirectoriesEnsured {
            server: server.name.clone(),
            created: stats.created,
            existing: stats.existing,
        });

        Ok(stats)
    }

    async fn ensure_one(
        &self,
        server: &ServerRecord,
        path: &str,
    ) -> std::result::Result<DirectoryOutcome, panelsync_panel::PanelError> {
        let (root, name) = split_remote(path);

        if self.probe_existing && self.api.directory_exists(server, &root, name).await? {
            return Ok(DirectoryOutcome::AlreadyExists);
        }

        self.api.create_directory(server, &root, name).await
    }
}
