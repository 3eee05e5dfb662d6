//! Executable discovery on the search path.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::GenerateError;

/// Finds `binary` (or `binary.exe`) in the first search-path directory
/// that contains it.
///
/// # Errors
///
/// [`GenerateError::Discovery`] when no directory has a match or the
/// search path is unset.
pub fn find_executable(binary: &str, search_path: Option<&OsStr>) -> Result<PathBuf, GenerateError> {
    let not_found = || GenerateError::Discovery {
        binary: binary.to_string(),
    };
    let search_path = search_path.ok_or_else(not_found)?;
    let exe_name = format!("{binary}.exe");

    for dir in std::env::split_paths(search_path) {
        if dir.as_os_str().is_empty() {
            continue;
        }
        for candidate in [dir.join(binary), dir.join(&exe_name)] {
            if is_executable(&candidate) {
                debug!(path = %candidate.display(), "Found executable");
                return Ok(candidate);
            }
        }
    }

    Err(not_found())
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    let Ok(metadata) = fs::metadata(path) else {
        return false;
    };

    metadata.is_file() && (metadata.permissions().mode() & 0o111 != 0)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
