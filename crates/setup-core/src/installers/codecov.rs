//! Codecov coverage: CI workflow plus an nyc-wrapped test script

use std::path::Path;

use super::{jasmine, Installer, InstallerOutcome, BOILERPLATE_DIR, WORKFLOWS_DIR};
use crate::answers::AnswerSet;
use crate::error::Result;
use crate::fsops;
use crate::manifest::PackageManifest;

pub struct CodecovInstaller;

impl CodecovInstaller {
    /// Wrap a test-runner invocation with nyc's coverage flags
    fn coverage_command(base_test: &str) -> String {
        format!(
            "nyc -e .ts -x \"*.spec.ts\" -x \"dist/**\" -x \"test/**\" --reporter=json {} --random=false",
            base_test
        )
    }
}

impl Installer for CodecovInstaller {
    fn name(&self) -> &'static str {
        "Codecov"
    }

    fn packages(&self) -> &'static [&'static str] {
        &["nyc"]
    }

    fn apply(
        &self,
        root: &Path,
        _answers: &AnswerSet,
        mut manifest: PackageManifest,
    ) -> Result<InstallerOutcome> {
        let workflows = root.join(WORKFLOWS_DIR);
        fsops::ensure_directory(&workflows)?;

        let workflow = workflows.join("codecov.yml");
        fsops::copy_file(&root.join(BOILERPLATE_DIR).join("codecov.yml"), &workflow)?;

        // Compose with whatever test script the Jasmine installer registered;
        // this installer always runs after it.
        let base_test = manifest
            .script("test")
            .unwrap_or(jasmine::TEST_COMMAND)
            .to_string();
        manifest.set_script("test:coverage", &Self::coverage_command(&base_test));

        Ok(InstallerOutcome {
            manifest,
            secrets: vec!["CODECOV_TOKEN"],
            files_touched: vec![workflow],
        })
    }
}
