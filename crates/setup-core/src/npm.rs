//! npm subprocess plumbing for feature dependency sets
//!
//! Installation is asynchronous in mechanism but blocking from the
//! pipeline's perspective: the pipeline awaits the child's exit before the
//! next step runs. No timeout is enforced on the child process.

use std::path::{Path, PathBuf};
use std::process::Stdio;

use colored::Colorize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command as TokioCommand;

use crate::error::{Result, SetupError};

/// Runs `npm install -D -E <packages>` in the project directory
pub struct NpmClient {
    project_dir: PathBuf,
    enabled: bool,
}

impl NpmClient {
    pub fn new(project_dir: &Path) -> Self {
        Self {
            project_dir: project_dir.to_path_buf(),
            enabled: true,
        }
    }

    /// A client that records nothing and spawns nothing; backs
    /// `--skip-install` and the test suite
    pub fn disabled(project_dir: &Path) -> Self {
        Self {
            project_dir: project_dir.to_path_buf(),
            enabled: false,
        }
    }

    /// Install the given packages as dev dependencies with exact pinned
    /// versions, streaming npm's output dimmed beneath the wizard.
    ///
    /// Returns [`SetupError::Install`] with npm's captured stderr when the
    /// process exits non-zero. Callers treat that as best-effort and proceed.
    pub async fn install_dev_pinned(&self, packages: &[&str]) -> Result<()> {
        if !self.enabled || packages.is_empty() {
            return Ok(());
        }

        let mut child = TokioCommand::new("npm")
            .arg("install")
            .arg("-D")
            .arg("-E")
            .args(packages)
            .current_dir(&self.project_dir)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| SetupError::io("failed to spawn npm".to_string(), e))?;

        let stdout = child.stdout.take().expect("stdout was piped");
        let stderr = child.stderr.take().expect("stderr was piped");

        let mut stdout_reader = BufReader::new(stdout).lines();
        let mut stderr_reader = BufReader::new(stderr).lines();
        let mut captured_stderr = Vec::new();

        loop {
            tokio::select! {
                line = stdout_reader.next_line() => {
                    match line {
                        Ok(Some(line)) => println!("  {}", line.dimmed()),
                        Ok(None) => break,
                        Err(_) => break,
                    }
                }
                line = stderr_reader.next_line() => {
                    if let Ok(Some(line)) = line {
                        captured_stderr.push(line);
                    }
                }
            }
        }

        // Drain whatever stderr is still buffered after stdout closed
        while let Ok(Some(line)) = stderr_reader.next_line().await {
            captured_stderr.push(line);
        }

        let status = child
            .wait()
            .await
            .map_err(|e| SetupError::io("failed to wait for npm".to_string(), e))?;

        if status.success() {
            Ok(())
        } else {
            Err(SetupError::Install {
                reason: format!(
                    "npm exited with code {}: {}",
                    status.code().unwrap_or(-1),
                    captured_stderr.join("\n")
                ),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_disabled_client_is_a_noop() {
        let tmp = tempfile::tempdir().unwrap();
        let npm = NpmClient::disabled(tmp.path());
        npm.install_dev_pinned(&["jasmine"]).await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_package_set_spawns_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let npm = NpmClient::new(tmp.path());
        npm.install_dev_pinned(&[]).await.unwrap();
    }
}
