//! The scaffolding pipeline
//!
//! A strict sequence of transforms over the checkout:
//!
//! 1. Bake the node version into every version-parameterized template and
//!    drop the renovate config if it was declined.
//! 2. Branch on the project shape (container build files vs. nothing).
//! 3. Install the baseline CI workflow, rewrite the manifest base fields,
//!    then run the enabled feature installers in a fixed order, threading
//!    the manifest snapshot through each and collecting contributed secrets.
//! 4. Delete the template source tree and write the closing artifacts.
//!
//! One-shot and non-resumable: a fatal error leaves the tree partially
//! transformed.

use std::fs;
use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::answers::{AnswerSet, ProjectShape};
use crate::error::{Result, SetupError};
use crate::fsops;
use crate::installers::{
    ChecksInstaller, CodecovInstaller, DockerInstaller, Installer, JasmineInstaller,
    SemanticReleaseInstaller, SentryInstaller, BOILERPLATE_DIR,
};
use crate::manifest::PackageManifest;
use crate::npm::NpmClient;
use crate::substitute::{substitute_token, NODE_VERSION_TOKEN};

/// Boilerplate files parameterized on the node major version
const NODE_VERSION_FILES: &[&str] = &[
    "checks.yml",
    "codecov.yml",
    "release-nosentry.yml",
    "release-sentry.yml",
    "acron.dockerfile",
    "aserver.dockerfile",
];

/// README title used when the project name was left empty
const FALLBACK_PROJECT_TITLE: &str = "New TS Project";

/// What a completed run produced, for the wizard's closing output
#[derive(Debug)]
pub struct SetupOutcome {
    pub project_name: String,
    /// Secret names the resulting project requires, in the order the
    /// installers contributed them
    pub secrets: Vec<&'static str>,
}

/// Run the full transform against the checkout at `root`.
///
/// `Io`/`NotFound`/`Parse` errors are fatal and halt the sequence; failed
/// npm installs are logged and skipped.
pub async fn run_pipeline(
    root: &Path,
    answers: &AnswerSet,
    npm: &NpmClient,
) -> Result<SetupOutcome> {
    let mut secrets: Vec<&'static str> = Vec::new();

    // Init -> RuntimeConfigured
    apply_node_version(root, answers.node_version)?;
    if !answers.needs_renovate {
        fsops::remove_file(&root.join("renovate.json"))?;
    }

    let manifest_path = root.join("package.json");
    let mut manifest = PackageManifest::load(&manifest_path)?;

    // RuntimeConfigured -> BranchSelected
    if let ProjectShape::Containerized { project_type } = answers.shape {
        let docker = DockerInstaller::new(project_type);
        manifest = run_installer(&docker, root, answers, manifest, npm, &mut secrets).await?;
    }

    // BranchSelected -> FeaturesApplied
    manifest = run_installer(&ChecksInstaller, root, answers, manifest, npm, &mut secrets).await?;

    manifest.set_name(&answers.project_name);
    manifest.remove_script("presetup");
    manifest.remove_script("setup");
    manifest.set_engines(answers.node_version);
    manifest.save(&manifest_path)?;

    if let ProjectShape::Publishable {
        needs_semantic_release: true,
    } = answers.shape
    {
        manifest = run_installer(
            &SemanticReleaseInstaller,
            root,
            answers,
            manifest,
            npm,
            &mut secrets,
        )
        .await?;
    }
    if answers.needs_jasmine {
        manifest =
            run_installer(&JasmineInstaller, root, answers, manifest, npm, &mut secrets).await?;
    }
    if answers.needs_codecov {
        manifest =
            run_installer(&CodecovInstaller, root, answers, manifest, npm, &mut secrets).await?;
    }
    if answers.needs_sentry {
        run_installer(&SentryInstaller, root, answers, manifest, npm, &mut secrets).await?;
    }

    // FeaturesApplied -> Finalized
    fsops::delete_tree(&root.join(BOILERPLATE_DIR))?;

    if !secrets.is_empty() {
        write_secrets_placeholder(&root.join("example.env"), &secrets)?;
    }
    write_readme(&root.join("README.md"), &answers.project_name)?;

    Ok(SetupOutcome {
        project_name: answers.project_name.clone(),
        secrets,
    })
}

/// Apply one installer: file edits first, manifest write-back, then package
/// provisioning. Install failures are best-effort and do not halt the run.
async fn run_installer(
    installer: &dyn Installer,
    root: &Path,
    answers: &AnswerSet,
    manifest: PackageManifest,
    npm: &NpmClient,
    secrets: &mut Vec<&'static str>,
) -> Result<PackageManifest> {
    let outcome = installer.apply(root, answers, manifest)?;
    outcome.manifest.save(&root.join("package.json"))?;
    secrets.extend(outcome.secrets);

    if !installer.packages().is_empty() {
        println!("{}", format!("Installing {}...", installer.name()).blue());
        match npm.install_dev_pinned(installer.packages()).await {
            Ok(()) => println!("{}", "Done :)".green()),
            Err(e) => eprintln!("{} {}", "Warning:".yellow(), e),
        }
    }

    Ok(outcome.manifest)
}

fn apply_node_version(root: &Path, node_version: u32) -> Result<()> {
    let files: Vec<PathBuf> = NODE_VERSION_FILES
        .iter()
        .map(|name| root.join(BOILERPLATE_DIR).join(name))
        .collect();
    substitute_token(&files, NODE_VERSION_TOKEN, &node_version.to_string())
}

fn write_secrets_placeholder(path: &Path, secrets: &[&'static str]) -> Result<()> {
    let body = secrets
        .iter()
        .map(|secret| format!("{}=PLACEHOLDER", secret))
        .collect::<Vec<_>>()
        .join("\n");
    fs::write(path, body)
        .map_err(|e| SetupError::io(format!("failed to write {}", path.display()), e))
}

fn write_readme(path: &Path, project_name: &str) -> Result<()> {
    let title = if project_name.is_empty() {
        FALLBACK_PROJECT_TITLE
    } else {
        project_name
    };
    let body = format!(
        "# {}\n\n*Enter a short description for the project here.*",
        title
    );
    fs::write(path, body)
        .map_err(|e| SetupError::io(format!("failed to write {}", path.display()), e))
}
