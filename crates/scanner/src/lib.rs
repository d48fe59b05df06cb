mod errors;
mod tree;

pub use errors::ScanError;
pub use tree::{scan, scan_tree, ScanResult};
