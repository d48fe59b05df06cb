use crate::PanelError;
use panelsync_filesystem::LocalFile;
use panelsync_models::{DirectoryOutcome, ServerRecord};

/// One page of the server listing
#[derive(Debug, Clone, Default)]
pub struct ServerPage {
    pub servers: Vec<ServerRecord>,
    pub current_page: u32,
    pub total_pages: u32,
}

impl ServerPage {
    pub fn is_last(&self) -> bool {
        self.current_page >= self.total_pages
    }
}

/// Panel operations used by a sync run
#[async_trait::async_trait]
pub trait PanelApi: Send + Sync {
    /// Fetch one page (1-based) of the servers visible to the API key
    async fn list_servers(&self, page: u32) -> Result<ServerPage, PanelError>;

    /// Create `name` inside remote directory `root`; conflicts are `AlreadyExists`
    async fn create_directory(
        &self,
        server: &ServerRecord,
        root: &str,
        name: &str,
    ) -> Result<DirectoryOutcome, PanelError>;

    /// Whether `root` already holds a directory called `name`
    async fn directory_exists(
        &self,
        server: &ServerRecord,
        root: &str,
        name: &str,
    ) -> Result<bool, PanelError>;

    /// Upload into remote `directory`, overwriting an existing file
    async fn upload_file(
        &self,
        server: &ServerRecord,
        directory: &str,
        file: &LocalFile,
    ) -> Result<(), PanelError>;
}
