//! Semantic-release automation for the publishable-package branch
//!
//! Flips the manifest from a private template to a publicly publishable
//! package and wires the release workflow. Only constructed for
//! `ProjectShape::Publishable`.

use std::path::Path;

use serde_json::{Map, Value};

use super::{Installer, InstallerOutcome, BOILERPLATE_DIR, WORKFLOWS_DIR};
use crate::answers::AnswerSet;
use crate::error::Result;
use crate::fsops;
use crate::manifest::PackageManifest;

pub struct SemanticReleaseInstaller;

impl Installer for SemanticReleaseInstaller {
    fn name(&self) -> &'static str {
        "Semantic Release"
    }

    fn packages(&self) -> &'static [&'static str] {
        &[
            "semantic-release",
            "semantic-release-conventional-commits",
            "@semantic-release/changelog",
            "@semantic-release/git",
        ]
    }

    fn apply(
        &self,
        root: &Path,
        answers: &AnswerSet,
        mut manifest: PackageManifest,
    ) -> Result<InstallerOutcome> {
        let boilerplate = root.join(BOILERPLATE_DIR);
        let workflows = root.join(WORKFLOWS_DIR);
        fsops::ensure_directory(&workflows)?;

        let releaserc = root.join(".releaserc.json");
        fsops::copy_file(&boilerplate.join(".releaserc.json"), &releaserc)?;

        // The release workflow needs the Sentry steps only when error
        // reporting was requested
        let workflow_template = if answers.needs_sentry {
            "release-sentry.yml"
        } else {
            "release-nosentry.yml"
        };
        let release_workflow = workflows.join("release.yml");
        fsops::copy_file(&boilerplate.join(workflow_template), &release_workflow)?;

        manifest.remove("private");
        manifest.set("version", Value::String("1.0.0".into()));
        manifest.set("description", Value::String("Placeholder description".into()));
        manifest.set("main", Value::String("dist/index.js".into()));
        manifest.set("files", Value::Array(vec![Value::String("dist/**/*".into())]));

        let mut publish_config = Map::new();
        publish_config.insert("access".to_string(), Value::String("public".into()));
        publish_config.insert(
            "registry".to_string(),
            Value::String("https://registry.npmjs.org/".into()),
        );
        manifest.set("publishConfig", Value::Object(publish_config));
        manifest.set_script("prepare", "npm run compile");

        Ok(InstallerOutcome {
            manifest,
            secrets: vec!["NPM_TOKEN"],
            files_touched: vec![releaserc, release_workflow],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{AnswerSet, ProjectShape};
    use std::fs;

    fn fixture(root: &Path) {
        let boilerplate = root.join(BOILERPLATE_DIR);
        fs::create_dir_all(&boilerplate).unwrap();
        fs::write(boilerplate.join(".releaserc.json"), "{}").unwrap();
        fs::write(boilerplate.join("release-sentry.yml"), "name: release-sentry").unwrap();
        fs::write(boilerplate.join("release-nosentry.yml"), "name: release").unwrap();
    }

    fn answers(needs_sentry: bool) -> AnswerSet {
        AnswerSet::new(
            false,
            ProjectShape::Publishable {
                needs_semantic_release: true,
            },
            false,
            false,
            needs_sentry,
            "demo",
            20,
        )
    }

    fn private_manifest(tmp: &Path) -> PackageManifest {
        let path = tmp.join("package.json");
        fs::write(&path, r#"{"name":"demo","private":true}"#).unwrap();
        PackageManifest::load(&path).unwrap()
    }

    #[test]
    fn test_apply_makes_manifest_publishable() {
        let tmp = tempfile::tempdir().unwrap();
        fixture(tmp.path());

        let outcome = SemanticReleaseInstaller
            .apply(tmp.path(), &answers(false), private_manifest(tmp.path()))
            .unwrap();

        let manifest = &outcome.manifest;
        assert_eq!(manifest.get("private"), None);
        assert_eq!(manifest.get("version"), Some(&Value::String("1.0.0".into())));
        assert_eq!(manifest.get("main"), Some(&Value::String("dist/index.js".into())));
        assert_eq!(
            manifest.get("publishConfig").unwrap()["registry"],
            Value::String("https://registry.npmjs.org/".into())
        );
        assert_eq!(manifest.script("prepare"), Some("npm run compile"));
        assert_eq!(outcome.secrets, vec!["NPM_TOKEN"]);
    }

    #[test]
    fn test_workflow_variant_follows_sentry_answer() {
        let tmp = tempfile::tempdir().unwrap();
        fixture(tmp.path());

        SemanticReleaseInstaller
            .apply(tmp.path(), &answers(true), private_manifest(tmp.path()))
            .unwrap();
        let workflow =
            fs::read_to_string(tmp.path().join(".github/workflows/release.yml")).unwrap();
        assert_eq!(workflow, "name: release-sentry");

        SemanticReleaseInstaller
            .apply(tmp.path(), &answers(false), private_manifest(tmp.path()))
            .unwrap();
        let workflow =
            fs::read_to_string(tmp.path().join(".github/workflows/release.yml")).unwrap();
        assert_eq!(workflow, "name: release");
    }
}
