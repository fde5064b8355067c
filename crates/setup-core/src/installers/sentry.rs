//! Sentry error reporting
//!
//! Packages and secrets only. The release workflow already branched on the
//! Sentry answer inside the semantic-release installer, so there is no file
//! mutation left to do here.

use std::path::Path;

use super::{Installer, InstallerOutcome};
use crate::answers::AnswerSet;
use crate::error::Result;
use crate::manifest::PackageManifest;

pub struct SentryInstaller;

impl Installer for SentryInstaller {
    fn name(&self) -> &'static str {
        "Sentry"
    }

    fn packages(&self) -> &'static [&'static str] {
        &["@sentry/node", "@sentry/tracing"]
    }

    fn apply(
        &self,
        _root: &Path,
        _answers: &AnswerSet,
        manifest: PackageManifest,
    ) -> Result<InstallerOutcome> {
        Ok(InstallerOutcome {
            secrets: vec!["SENTRY_AUTH_TOKEN", "SENTRY_ORG", "SENTRY_PROJECT"],
            ..InstallerOutcome::manifest_only(manifest)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::answers::{AnswerSet, ProjectShape};
    use std::fs;

    #[test]
    fn test_apply_contributes_three_secrets_and_no_files() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("package.json");
        fs::write(&path, r#"{"name":"demo"}"#).unwrap();
        let manifest = PackageManifest::load(&path).unwrap();

        let answers = AnswerSet::new(
            false,
            ProjectShape::Publishable {
                needs_semantic_release: false,
            },
            false,
            false,
            true,
            "demo",
            20,
        );

        let outcome = SentryInstaller.apply(tmp.path(), &answers, manifest).unwrap();
        assert_eq!(
            outcome.secrets,
            vec!["SENTRY_AUTH_TOKEN", "SENTRY_ORG", "SENTRY_PROJECT"]
        );
        assert!(outcome.files_touched.is_empty());
    }
}
