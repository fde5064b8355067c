//! In-place sentinel token substitution across template files

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SetupError};

/// The placeholder replaced with the project name in the Dockerfile and the
/// cronjob schedule file
pub const PROJECT_NAME_TOKEN: &str = "%%PROJECTNAME%%";

/// The placeholder replaced with the node major version in CI workflows and
/// the container build files
pub const NODE_VERSION_TOKEN: &str = "__NODEVERSION__";

/// Replace every literal occurrence of `token` with `value` in each listed
/// file, in place.
///
/// Fails with [`SetupError::NotFound`] when a listed file is absent. Files
/// processed before the missing one are not rolled back; the caller gets
/// at-least-once semantics across the list, never transactional ones.
pub fn substitute_token(files: &[PathBuf], token: &str, value: &str) -> Result<()> {
    for file in files {
        substitute_in_file(file, token, value)?;
    }
    Ok(())
}

fn substitute_in_file(path: &Path, token: &str, value: &str) -> Result<()> {
    if !path.is_file() {
        return Err(SetupError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let contents = fs::read_to_string(path)
        .map_err(|e| SetupError::io(format!("failed to read {}", path.display()), e))?;

    if !contents.contains(token) {
        return Ok(());
    }

    let replaced = contents.replace(token, value);
    fs::write(path, replaced)
        .map_err(|e| SetupError::io(format!("failed to write {}", path.display()), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_replaces_every_occurrence() {
        let tmp = tempfile::tempdir().unwrap();
        let file = write_file(
            tmp.path(),
            "Dockerfile",
            "LABEL app=%%PROJECTNAME%%\nCMD [\"%%PROJECTNAME%%\"]\n",
        );

        substitute_token(&[file.clone()], PROJECT_NAME_TOKEN, "bar").unwrap();
        let contents = fs::read_to_string(&file).unwrap();
        assert_eq!(contents, "LABEL app=bar\nCMD [\"bar\"]\n");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let tmp = tempfile::tempdir().unwrap();
        let err = substitute_token(
            &[tmp.path().join("absent")],
            PROJECT_NAME_TOKEN,
            "bar",
        )
        .unwrap_err();
        assert!(matches!(err, SetupError::NotFound { .. }));
    }

    #[test]
    fn test_earlier_files_are_not_rolled_back() {
        let tmp = tempfile::tempdir().unwrap();
        let first = write_file(tmp.path(), "first", "node:__NODEVERSION__");
        let missing = tmp.path().join("missing");

        let err = substitute_token(&[first.clone(), missing], NODE_VERSION_TOKEN, "20");
        assert!(err.is_err());

        // The first file keeps its substitution even though the list failed
        assert_eq!(fs::read_to_string(&first).unwrap(), "node:20");
    }

    #[test]
    fn test_second_run_is_a_noop_when_value_lacks_token() {
        let tmp = tempfile::tempdir().unwrap();
        let file = write_file(tmp.path(), "cron", "run %%PROJECTNAME%% hourly");

        substitute_token(&[file.clone()], PROJECT_NAME_TOKEN, "bar").unwrap();
        let once = fs::read_to_string(&file).unwrap();
        substitute_token(&[file.clone()], PROJECT_NAME_TOKEN, "bar").unwrap();
        let twice = fs::read_to_string(&file).unwrap();

        assert_eq!(once, twice);
        assert_eq!(twice, "run bar hourly");
    }

    #[test]
    fn test_value_containing_token_is_not_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let file = write_file(tmp.path(), "cron", "%%PROJECTNAME%%");
        let value = "wrapped-%%PROJECTNAME%%";

        substitute_token(&[file.clone()], PROJECT_NAME_TOKEN, value).unwrap();
        assert_eq!(fs::read_to_string(&file).unwrap(), "wrapped-%%PROJECTNAME%%");

        // Re-running substitutes again - the boundary the contract calls out
        substitute_token(&[file.clone()], PROJECT_NAME_TOKEN, value).unwrap();
        assert_eq!(
            fs::read_to_string(&file).unwrap(),
            "wrapped-wrapped-%%PROJECTNAME%%"
        );
    }
}
