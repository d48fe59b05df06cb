use crate::UtilsError;
use std::ffi::OsStr;
use std::path::{Component, Path};

/// Joins the normal components of a relative path with `/`.
///
/// Fails on non-UTF-8 names rather than uploading a lossy file name.
pub fn normalize_path(path: &Path) -> Result<String, UtilsError> {
    let mut parts = Vec::new();

    for component in path.components() {
        match component {
            Component::Normal(name) => {
                let name = name.to_str().ok_or_else(|| {
                    UtilsError::PathConversionError(path.to_string_lossy().to_string())
                })?;
                parts.push(name);
            }
            Component::CurDir => {}
            _ => return Err(UtilsError::PathError(path.to_string_lossy().to_string())),
        }
    }

    Ok(parts.join("/"))
}

/// Dot-prefixed names are hidden
pub fn is_hidden_name(name: &OsStr) -> bool {
    name.to_string_lossy().starts_with('.')
}

/// Absolute remote directory for a relative one (`None` is the server root)
pub fn remote_dir(relative_dir: Option<&str>) -> String {
    match relative_dir {
        Some(dir) if !dir.is_empty() => format!("/{}", dir.trim_matches('/')),
        _ => "/".to_string(),
    }
}

/// Splits a relative directory into the remote root holding it and its leaf name
pub fn split_remote(relative_dir: &str) -> (String, &str) {
    let trimmed = relative_dir.trim_matches('/');
    match trimmed.rsplit_once('/') {
        Some((parent, name)) => (remote_dir(Some(parent)), name),
        None => ("/".to_string(), trimmed),
    }
}
