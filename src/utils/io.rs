//! File I/O primitives with consistent error handling.

use crate::error::{DirCreateDetails, Error, ParentDirInfo, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read an input file, separating "missing" from other read failures.
pub fn read_input(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| {
        let shown = path.display().to_string();
        if e.kind() == ErrorKind::NotFound {
            Error::input_not_found(shown)
        } else {
            Error::input_read_failed(shown, e.to_string())
        }
    })
}

/// Write content to file with standardized error handling.
///
/// Wraps `fs::write` with `Error::output_write_failed` formatting.
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content)
        .map_err(|e| Error::output_write_failed(path.display().to_string(), e.to_string()))
}

/// Create a directory and all missing parents.
///
/// On failure the error carries the working directory and, where it can be
/// stat'ed, the owner and mode of the parent directory.
pub fn create_dir_all(path: &Path) -> Result<()> {
    // `fs::create_dir_all("")` succeeds without creating anything.
    if path.as_os_str().is_empty() {
        return Err(dir_create_error(path, "No such file or directory".to_string()));
    }

    fs::create_dir_all(path).map_err(|e| dir_create_error(path, e.to_string()))
}

fn dir_create_error(path: &Path, error: String) -> Error {
    Error::output_dir_create_failed(DirCreateDetails {
        path: path.display().to_string(),
        error,
        cwd: std::env::current_dir()
            .ok()
            .map(|p| p.display().to_string()),
        parent: parent_dir_info(path),
    })
}

fn parent_dir_info(path: &Path) -> Option<ParentDirInfo> {
    let absolute = std::path::absolute(path).ok()?;
    let parent = match absolute.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => absolute,
    };

    let mut info = ParentDirInfo {
        path: parent.display().to_string(),
        mode: None,
        uid: None,
        gid: None,
    };

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        if let Ok(meta) = fs::metadata(&parent) {
            info.mode = Some(meta.mode());
            info.uid = Some(meta.uid());
            info.gid = Some(meta.gid());
        }
    }

    Some(info)
}
