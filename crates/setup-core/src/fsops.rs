//! Filesystem transform utilities shared by the pipeline and installers

use std::fs;
use std::path::Path;

use walkdir::WalkDir;

use crate::error::{Result, SetupError};

/// Create a directory (and any missing parents) if it does not exist yet.
/// A no-op when the directory is already present; fails when the path exists
/// as a non-directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if path.is_dir() {
        return Ok(());
    }
    fs::create_dir_all(path)
        .map_err(|e| SetupError::io(format!("failed to create directory {}", path.display()), e))
}

/// Remove a directory and everything below it, children before parents.
/// A no-op (not an error) when the path does not exist.
pub fn delete_tree(path: &Path) -> Result<()> {
    if !path.exists() {
        return Ok(());
    }

    for entry in WalkDir::new(path).contents_first(true) {
        let entry = entry.map_err(|e| {
            let context = format!("failed to walk {}", path.display());
            match e.into_io_error() {
                Some(io) => SetupError::io(context, io),
                None => SetupError::io(
                    context,
                    std::io::Error::new(std::io::ErrorKind::Other, "walk error"),
                ),
            }
        })?;

        let child = entry.path();
        let result = if entry.file_type().is_dir() {
            fs::remove_dir(child)
        } else {
            fs::remove_file(child)
        };
        result.map_err(|e| SetupError::io(format!("failed to remove {}", child.display()), e))?;
    }

    Ok(())
}

/// Copy `src` to `dst`, overwriting `dst` if it exists. Fails when `src` is
/// missing.
pub fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    fs::copy(src, dst)
        .map(|_| ())
        .map_err(|e| {
            SetupError::io(
                format!("failed to copy {} to {}", src.display(), dst.display()),
                e,
            )
        })
}

/// Rename `src` to `dst`, overwriting `dst` if it exists. Fails when `src` is
/// missing.
pub fn rename_file(src: &Path, dst: &Path) -> Result<()> {
    fs::rename(src, dst).map_err(|e| {
        SetupError::io(
            format!("failed to rename {} to {}", src.display(), dst.display()),
            e,
        )
    })
}

/// Remove a single file. Fails when the file does not exist.
pub fn remove_file(path: &Path) -> Result<()> {
    fs::remove_file(path)
        .map_err(|e| SetupError::io(format!("failed to remove {}", path.display()), e))
}
