//! Saving the decoded message

use std::path::{Path, PathBuf};
use crate::types::{BlinkError, ErrorReason};

/// Write the message verbatim (UTF-8, no trailing newline), replacing any
/// existing file. Returns the path written.
pub fn save_message(message: &str, path: impl AsRef<Path>) -> Result<PathBuf, BlinkError> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| {
            BlinkError::new(ErrorReason::E301_SAVE_FAILED, format!("{}: {}", parent.display(), e))
        })?;
    }

    std::fs::write(path, message).map_err(|e| {
        BlinkError::new(ErrorReason::E301_SAVE_FAILED, format!("{}: {}", path.display(), e))
    })?;

    Ok(path.to_path_buf())
}

/// Read a saved message back
pub fn load_message(path: impl AsRef<Path>) -> Result<String, BlinkError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|e| {
        BlinkError::new(ErrorReason::E101_STREAM_READ, format!("{}: {}", path.display(), e))
    })
}
