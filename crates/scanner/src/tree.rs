use super::errors::ScanError;
use panelsync_models::{DirectorySet, FileEntry};
use panelsync_utils::{is_hidden_name, normalize_path};
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

type Result<T> = std::result::Result<T, ScanError>;

/// Files found under the upload root and the directories they imply
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub root: PathBuf,
    pub entries: Vec<FileEntry>,
    pub directories: DirectorySet,
}

/// Scans on the blocking pool; the walk itself is synchronous
pub async fn scan(root: PathBuf) -> Result<ScanResult> {
    tokio::task::spawn_blocking(move || -> Result<ScanResult> {
        let start = std::time::Instant::now();
        let entries = scan_tree(&root)?;
        let directories = DirectorySet::from_entries(&entries);

        tracing::debug!(
            "Scanned '{}' in {:.2}s: {} files, {} directories",
            root.display(),
            start.elapsed().as_secs_f64(),
            entries.len(),
            directories.len()
        );

        Ok(ScanResult {
            root,
            entries,
            directories,
        })
    })
    .await?
}

/// Walks `root` depth-first, alphabetically within each directory.
///
/// Hidden entries are skipped and hidden directories are pruned with
/// everything below them. Symlinked directories are not followed.
pub fn scan_tree(root: &Path) -> Result<Vec<FileEntry>> {
    validate_root(root)?;

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e
                .path()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| root.display().to_string());
            ScanError::ScanDirectoryError(format!("{}: {}", path, e))
        })?;

        if !is_regular_file(&entry) {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(root)
            .map_err(|e| ScanError::ScanDirectoryError(format!("Failed to strip prefix: {}", e)))?;

        files.push(FileEntry::new(normalize_path(relative)?, entry.path()));
    }

    Ok(files)
}

fn validate_root(root: &Path) -> Result<()> {
    let metadata = match std::fs::metadata(root) {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ScanError::RootNotFound(root.display().to_string()));
        }
        Err(e) => return Err(e.into()),
    };

    if !metadata.is_dir() {
        return Err(ScanError::RootNotDirectory(root.display().to_string()));
    }

    // Surface permission problems before walking
    std::fs::read_dir(root)?;
    Ok(())
}

fn is_regular_file(entry: &DirEntry) -> bool {
    if entry.file_type().is_file() {
        return true;
    }
    // A symlink to a file is uploaded as its target's content
    entry.path_is_symlink() && entry.path().is_file()
}

fn is_hidden(entry: &DirEntry) -> bool {
    if is_hidden_name(entry.file_name()) {
        return true;
    }
    has_hidden_attribute(entry)
}

#[cfg(windows)]
fn has_hidden_attribute(entry: &DirEntry) -> bool {
    use std::os::windows::fs::MetadataExt;
    const FILE_ATTRIBUTE_HIDDEN: u32 = 0x2;

    entry
        .metadata()
        .map(|m| m.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0)
        .unwrap_or(false)
}

#[cfg(not(windows))]
fn has_hidden_attribute(_entry: &DirEntry) -> bool {
    false
}
