use bytes::Bytes;

/// Read-only helpers over the local upload tree
pub struct FileSystem;

/// File content loaded for upload
#[derive(Debug, Clone)]
pub struct LocalFile {
    pub file_name: String,
    pub mime_type: String,
    pub content: Bytes,
}

impl LocalFile {
    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}
