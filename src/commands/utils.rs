//! Shared utilities for commands

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SyncError};

/// Strip Windows extended-length path prefix (\\?\)
///
/// On Windows, `canonicalize()` returns paths like `\\?\C:\path`, which would
/// end up in the generated header. This strips the prefix.
pub fn strip_windows_prefix(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    if let Some(stripped) = path_str.strip_prefix(r"\\?\") {
        PathBuf::from(stripped)
    } else {
        path.to_path_buf()
    }
}

/// Read an input the run cannot proceed without
pub fn read_required(path: &Path, what: &'static str) -> Result<String> {
    if !path.is_file() {
        return Err(SyncError::FileNotFound {
            what,
            path: path.to_path_buf(),
        });
    }

    log::debug!("Reading {}: {}", what, path.display());
    fs::read_to_string(path).map_err(|source| SyncError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write an output, replacing any previous content
pub fn write_output(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|source| SyncError::Write {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    log::debug!("Writing {} bytes to {}", content.len(), path.display());
    fs::write(path, content).map_err(|source| SyncError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_strip_windows_prefix() {
        // Extended-length path prefix should be stripped
        let result = strip_windows_prefix(Path::new(r"\\?\C:\path\to\project"));
        assert_eq!(result, PathBuf::from(r"C:\path\to\project"));
    }

    #[test]
    fn test_strip_windows_prefix_unix() {
        let result = strip_windows_prefix(Path::new("/path/to/project"));
        assert_eq!(result, PathBuf::from("/path/to/project"));
    }

    #[test]
    fn test_read_required_missing() {
        let dir = TempDir::new().unwrap();
        let err = read_required(&dir.path().join("absent.json"), "settings template").unwrap_err();
        assert!(matches!(
            err,
            SyncError::FileNotFound {
                what: "settings template",
                ..
            }
        ));
    }

    #[test]
    fn test_write_output_truncates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".vscode").join("settings.json");

        write_output(&path, "a much longer first version").unwrap();
        write_output(&path, "short").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "short");
    }
}
