//! Containerization for the containerized branch
//!
//! Copies the shape-appropriate build file and bakes the project name into
//! it. Cronjobs additionally get a schedule file renamed to carry the
//! project name. Only constructed for `ProjectShape::Containerized`.

use std::path::Path;

use super::{Installer, InstallerOutcome, BOILERPLATE_DIR};
use crate::answers::{AnswerSet, ProjectType};
use crate::error::Result;
use crate::fsops;
use crate::manifest::PackageManifest;
use crate::substitute::{substitute_token, PROJECT_NAME_TOKEN};

/// Template name of the cron schedule file before the project name rename
const CRON_TEMPLATE_NAME: &str = "PROJECTNAME-cron";

pub struct DockerInstaller {
    project_type: ProjectType,
}

impl DockerInstaller {
    pub fn new(project_type: ProjectType) -> Self {
        Self { project_type }
    }
}

impl Installer for DockerInstaller {
    fn name(&self) -> &'static str {
        "Docker"
    }

    fn apply(
        &self,
        root: &Path,
        answers: &AnswerSet,
        manifest: PackageManifest,
    ) -> Result<InstallerOutcome> {
        let boilerplate = root.join(BOILERPLATE_DIR);
        let dockerfile = root.join("Dockerfile");
        let mut files_touched = vec![dockerfile.clone()];

        match self.project_type {
            ProjectType::Server => {
                fsops::copy_file(&boilerplate.join("aserver.dockerfile"), &dockerfile)?;
                substitute_token(
                    &[dockerfile],
                    PROJECT_NAME_TOKEN,
                    &answers.project_name,
                )?;
            }
            ProjectType::Cronjob => {
                fsops::copy_file(&boilerplate.join("acron.dockerfile"), &dockerfile)?;
                let cron_template = root.join(CRON_TEMPLATE_NAME);
                fsops::copy_file(&boilerplate.join(CRON_TEMPLATE_NAME), &cron_template)?;
                substitute_token(
                    &[dockerfile, cron_template.clone()],
                    PROJECT_NAME_TOKEN,
                    &answers.project_name,
                )?;

                let schedule = root.join(format!("{}-cron", answers.project_name));
                fsops::rename_file(&cron_template, &schedule)?;
                files_touched.push(schedule);
            }
        }

        Ok(InstallerOutcome {
            files_touched,
            ..InstallerOutcome::manifest_only(manifest)
        })
    }
}
