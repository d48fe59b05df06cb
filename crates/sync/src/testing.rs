use panelsync_filesystem::LocalFile;
use panelsync_models::{DirectoryOutcome, ServerRecord};
use panelsync_panel::{PanelApi, PanelError, ServerPage};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

pub fn server(identifier: &str, name: &str, egg: Option<&str>, image: Option<&str>) -> ServerRecord {
    ServerRecord {
        id: None,
        identifier: identifier.to_string(),
        uuid: format!("{}-uuid", identifier),
        name: name.to_string(),
        egg: egg.map(str::to_string),
        egg_uuid: egg.map(|e| format!("{}-egg-uuid", e.to_lowercase())),
        docker_image: image.map(str::to_string),
    }
}

fn status_error(status: u16, url: &str) -> PanelError {
    PanelError::StatusError {
        status,
        url: url.to_string(),
        body: "mock failure".to_string(),
    }
}

/// In-memory panel that records every call it receives
#[derive(Default)]
pub struct MockPanel {
    pub pages: Vec<Vec<ServerRecord>>,
    pub list_error: Option<u16>,
    /// (server identifier, "/dir") pairs that exist remotely
    pub directories: Mutex<HashSet<(String, String)>>,
    /// (server identifier, "/dir/file") -> content
    pub files: Mutex<BTreeMap<(String, String), Vec<u8>>>,
    pub list_calls: Mutex<Vec<u32>>,
    pub create_calls: Mutex<Vec<(String, String)>>,
    pub probe_calls: Mutex<Vec<(String, String)>>,
    pub upload_calls: Mutex<Vec<(String, String)>>,
    /// Remote dirs ("/a/b") whose creation fails with a 500
    pub failing_directories: HashSet<String>,
    /// Remote file paths -> number of upcoming uploads that fail
    pub failing_uploads: Mutex<HashMap<String, usize>>,
    /// Remote file paths that are always refused with the given status
    pub rejected_uploads: Mutex<HashMap<String, u16>>,
    pub upload_delay: Duration,
    pub in_flight: AtomicUsize,
    pub peak_in_flight: AtomicUsize,
}

impl MockPanel {
    pub fn with_servers(servers: Vec<ServerRecord>) -> Self {
        Self {
            pages: vec![servers],
            ..Default::default()
        }
    }

    pub fn fail_upload(&self, remote_path: &str, times: usize) {
        self.failing_uploads.lock().insert(remote_path.to_string(), times);
    }

    pub fn reject_upload(&self, remote_path: &str, status: u16) {
        self.rejected_uploads.lock().insert(remote_path.to_string(), status);
    }

    pub fn create_calls_for(&self, server: &str) -> Vec<String> {
        self.create_calls
            .lock()
            .iter()
            .filter(|(s, _)| s == server)
            .map(|(_, p)| p.clone())
            .collect()
    }

    pub fn remote_files(&self, server: &str) -> Vec<String> {
        self.files
            .lock()
            .keys()
            .filter(|(s, _)| s == server)
            .map(|(_, p)| p.clone())
            .collect()
    }

    pub fn peak(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }
}

fn join_remote(root: &str, name: &str) -> String {
    format!("{}/{}", root.trim_end_matches('/'), name)
}

#[async_trait::async_trait]
impl PanelApi for MockPanel {
    async fn list_servers(&self, page: u32) -> Result<ServerPage, PanelError> {
        self.list_calls.lock().push(page);

        if let Some(status) = self.list_error {
            return Err(status_error(status, "/api/client"));
        }

        let total_pages = self.pages.len().max(1) as u32;
        let servers = self
            .pages
            .get(page.saturating_sub(1) as usize)
            .cloned()
            .unwrap_or_default();

        Ok(ServerPage {
            servers,
            current_page: page,
            total_pages,
        })
    }

    async fn create_directory(
        &self,
        server: &ServerRecord,
        root: &str,
        name: &str,
    ) -> Result<DirectoryOutcome, PanelError> {
        let path = join_remote(root, name);
        self.create_calls
            .lock()
            .push((server.identifier.clone(), path.clone()));

        // Let other tasks run between the claim and the response
        tokio::task::yield_now().await;

        if self.failing_directories.contains(&path) {
            return Err(status_error(500, "create-folder"));
        }

        let mut dirs = self.directories.lock();
        if root != "/" && !dirs.contains(&(server.identifier.clone(), root.to_string())) {
            return Err(status_error(404, "create-folder: parent missing"));
        }

        if dirs.insert((server.identifier.clone(), path)) {
            Ok(DirectoryOutcome::Created)
        } else {
            Ok(DirectoryOutcome::AlreadyExists)
        }
    }

    async fn directory_exists(
        &self,
        server: &ServerRecord,
        root: &str,
        name: &str,
    ) -> Result<bool, PanelError> {
        let path = join_remote(root, name);
        self.probe_calls
            .lock()
            .push((server.identifier.clone(), path.clone()));
        Ok(self.directories.lock().contains(&(server.identifier.clone(), path)))
    }

    async fn upload_file(
        &self,
        server: &ServerRecord,
        directory: &str,
        file: &LocalFile,
    ) -> Result<(), PanelError> {
        let path = join_remote(directory, &file.file_name);
        self.upload_calls
            .lock()
            .push((server.identifier.clone(), path.clone()));

        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(now, Ordering::SeqCst);

        if self.upload_delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.upload_delay).await;
        }

        let result = self.store_upload(server, directory, &path, file);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

impl MockPanel {
    fn store_upload(
        &self,
        server: &ServerRecord,
        directory: &str,
        path: &str,
        file: &LocalFile,
    ) -> Result<(), PanelError> {
        if let Some(status) = self.rejected_uploads.lock().get(path) {
            return Err(status_error(*status, "upload"));
        }

        {
            let mut failing = self.failing_uploads.lock();
            if let Some(remaining) = failing.get_mut(path) {
                if *remaining > 0 {
                    *remaining -= 1;
                    return Err(status_error(502, "upload"));
                }
            }
        }

        if directory != "/"
            && !self
                .directories
                .lock()
                .contains(&(server.identifier.clone(), directory.to_string()))
        {
            return Err(status_error(404, "upload: directory missing"));
        }

        // Overwrites like the real daemon
        self.files.lock().insert(
            (server.identifier.clone(), path.to_string()),
            file.content.to_vec(),
        );
        Ok(())
    }
}
