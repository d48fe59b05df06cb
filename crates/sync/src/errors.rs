use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Panel error: {0}")]
    PanelError(#[from] panelsync_panel::PanelError),

    #[error("Failed to read '{path}': {source}")]
    LocalReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory '{path}': {source}")]
    DirectoryError {
        path: String,
        #[source]
        source: panelsync_panel::PanelError,
    },

    #[error("No servers matched the configured eggs/images ({total} visible on the panel)")]
    NoServersSelected { total: usize },
}
