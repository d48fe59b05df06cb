mod models;
mod errors;
mod ledger;
mod tracker;
mod selector;
mod ensurer;
mod uploader;
mod runner;

#[cfg(test)]
mod testing;

pub use models::{
    DirectoryEnsurer, DirectoryLedger, DirectoryStats, SelectionCriteria, SyncOptions, SyncRunner,
    UploadSummary, UploadTracker, Uploader,
};
pub use errors::SyncError;
pub use selector::select_servers;
