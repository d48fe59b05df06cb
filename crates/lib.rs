// Re-export all public APIs from the workspace crates

pub use panelsync_models::*;
pub use panelsync_events::*;
pub use panelsync_utils::*;
pub use panelsync_filesystem::*;
pub use panelsync_config::*;
pub use panelsync_scanner::*;
pub use panelsync_panel::*;
pub use panelsync_sync::*;

/// Prelude module for convenient imports
pub mod prelude {
    // Core models
    pub use panelsync_models::{FileEntry, DirectorySet, ServerRecord, ServerReport, SyncReport};

    // Events
    pub use panelsync_events::{AppEvent, EventBus};

    // Configuration
    pub use panelsync_config::{Config, ConfigError};

    // Scanner
    pub use panelsync_scanner::{scan, ScanResult};

    // Panel
    pub use panelsync_panel::{PanelApi, PanelClient, PanelError};

    // Sync
    pub use panelsync_sync::{SyncError, SyncRunner};

    // Filesystem
    pub use panelsync_filesystem::FileSystem;
}
