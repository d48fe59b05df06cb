use super::models::{FileSystem, LocalFile};
use anyhow::Result;
use bytes::Bytes;
use std::path::{Path, PathBuf};
use tokio::fs;

impl FileSystem {
    /// Reads a whole file for upload; the content is shared cheaply across retries
    pub async fn read_file(path: &Path, file_name: &str) -> std::io::Result<LocalFile> {
        let content = fs::read(path).await?;
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        tracing::trace!("Read {} ({} bytes, {})", path.display(), content.len(), mime_type);

        Ok(LocalFile {
            file_name: file_name.to_string(),
            mime_type,
            content: Bytes::from(content),
        })
    }

    pub fn get_absolute_path(path: &Path) -> Result<PathBuf> {
        let abs_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()?.join(path)
        };
        Ok(abs_path)
    }

    pub fn get_absolute_path_string(path: &str) -> Result<String> {
        let path_buf = PathBuf::from(path);
        let abs = Self::get_absolute_path(&path_buf)?;
        Ok(abs.to_string_lossy().to_string())
    }
}
