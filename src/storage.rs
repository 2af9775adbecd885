// SPDX-License-Identifier: GPL-3.0-only

//! App-private storage for the recording output

use crate::constants::recording;
use crate::errors::{AppError, AppResult};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Path of the single recording file under `$XDG_DATA_HOME/<app_id>/`
///
/// The directory is created if needed. The file itself is overwritten by
/// every recording.
pub fn recording_output_path(app_id: &str, file_name: &str) -> AppResult<PathBuf> {
    let base = dirs::data_dir()
        .ok_or_else(|| AppError::Storage("no data directory for this user".to_string()))?;
    output_path_in(&base, app_id, file_name)
}

/// Same as [`recording_output_path`] rooted at `base`
pub fn output_path_in(base: &Path, app_id: &str, file_name: &str) -> AppResult<PathBuf> {
    let dir = base.join(app_id);
    std::fs::create_dir_all(&dir)?;
    let path = dir.join(sanitize_file_name(file_name));
    debug!(path = %path.display(), "Recording output path");
    Ok(path)
}

/// Keep only the final component so a config value cannot escape the directory
fn sanitize_file_name(file_name: &str) -> &str {
    Path::new(file_name)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(recording::DEFAULT_FILE_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_creates_app_directory() {
        let base = std::env::temp_dir().join(format!("pocket-camera-storage-{}", std::process::id()));
        let path = output_path_in(&base, "com.example.Camera", "clip.mp4").unwrap();
        assert_eq!(path, base.join("com.example.Camera").join("clip.mp4"));
        assert!(path.parent().unwrap().is_dir());
        let _ = std::fs::remove_dir_all(&base);
    }

    #[test]
    fn test_file_name_cannot_escape() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_file_name(""), recording::DEFAULT_FILE_NAME);
        assert_eq!(sanitize_file_name(".."), recording::DEFAULT_FILE_NAME);
    }
}
