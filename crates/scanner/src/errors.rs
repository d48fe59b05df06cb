use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Utils error: {0}")]
    UtilsError(#[from] panelsync_utils::UtilsError),

    #[error("Join error: {0}")]
    JoinError(#[from] tokio::task::JoinError),

    #[error("Upload root does not exist: {0}")]
    RootNotFound(String),

    #[error("Upload root is not a directory: {0}")]
    RootNotDirectory(String),

    #[error("Failed to scan directory: {0}")]
    ScanDirectoryError(String),
}
