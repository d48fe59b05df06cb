mod models;
mod operations;

pub use models::{FileSystem, LocalFile};
