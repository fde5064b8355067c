//! Feature installers
//!
//! One self-contained unit per optional feature. Every installer copies its
//! feature-specific files, edits shared config fragments, and names the npm
//! package set the orchestrator provisions afterwards - file edits always
//! land before installation starts.

pub mod checks;
pub mod codecov;
pub mod docker;
pub mod jasmine;
pub mod semantic_release;
pub mod sentry;

use std::path::{Path, PathBuf};

use crate::answers::AnswerSet;
use crate::error::Result;
use crate::manifest::PackageManifest;

pub use checks::ChecksInstaller;
pub use codecov::CodecovInstaller;
pub use docker::DockerInstaller;
pub use jasmine::JasmineInstaller;
pub use semantic_release::SemanticReleaseInstaller;
pub use sentry::SentryInstaller;

/// The template source tree, deleted once the pipeline finishes
pub const BOILERPLATE_DIR: &str = "boilerplate";

/// Target directory for the CI workflow files
pub const WORKFLOWS_DIR: &str = ".github/workflows";

/// What an installer produced: the updated manifest snapshot, the secrets the
/// resulting project will need, and the files it wrote or renamed.
pub struct InstallerOutcome {
    pub manifest: PackageManifest,
    pub secrets: Vec<&'static str>,
    pub files_touched: Vec<PathBuf>,
}

impl InstallerOutcome {
    /// An outcome that only carried the manifest through
    pub fn manifest_only(manifest: PackageManifest) -> Self {
        Self {
            manifest,
            secrets: Vec::new(),
            files_touched: Vec::new(),
        }
    }
}

/// A unit that enables one optional feature.
///
/// `apply` takes ownership of the current manifest snapshot and returns the
/// updated one, so the orchestrator's invocation order is the only ordering
/// that exists. Installers must be idempotent against their own completed
/// output: re-applying produces the same manifest fields and duplicates no
/// list entries.
pub trait Installer {
    /// Display name used in wizard output
    fn name(&self) -> &'static str;

    /// npm dev dependencies installed with exact pinned versions after
    /// `apply`; empty when the feature needs none
    fn packages(&self) -> &'static [&'static str] {
        &[]
    }

    fn apply(
        &self,
        root: &Path,
        answers: &AnswerSet,
        manifest: PackageManifest,
    ) -> Result<InstallerOutcome>;
}
