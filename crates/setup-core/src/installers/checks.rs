//! Baseline CI checks workflow, installed for every project shape

use std::path::Path;

use super::{Installer, InstallerOutcome, BOILERPLATE_DIR, WORKFLOWS_DIR};
use crate::answers::AnswerSet;
use crate::error::Result;
use crate::fsops;
use crate::manifest::PackageManifest;

pub struct ChecksInstaller;

impl Installer for ChecksInstaller {
    fn name(&self) -> &'static str {
        "CI checks"
    }

    fn apply(
        &self,
        root: &Path,
        _answers: &AnswerSet,
        manifest: PackageManifest,
    ) -> Result<InstallerOutcome> {
        let workflows = root.join(WORKFLOWS_DIR);
        fsops::ensure_directory(&workflows)?;

        let workflow = workflows.join("checks.yml");
        fsops::copy_file(&root.join(BOILERPLATE_DIR).join("checks.yml"), &workflow)?;

        Ok(InstallerOutcome {
            files_touched: vec![workflow],
            ..InstallerOutcome::manifest_only(manifest)
        })
    }
}
