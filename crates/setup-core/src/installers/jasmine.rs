//! Jasmine unit testing: runner config, starter spec, lint and compiler
//! integration

use std::path::Path;

use serde_json::Value;

use super::{Installer, InstallerOutcome, BOILERPLATE_DIR};
use crate::answers::AnswerSet;
use crate::error::Result;
use crate::fsops;
use crate::manifest::{JsonDocument, PackageManifest};

/// The test-runner invocation registered as the manifest `test` script
pub const TEST_COMMAND: &str = "jasmine-ts --config=jasmine.config.json";

pub struct JasmineInstaller;

impl Installer for JasmineInstaller {
    fn name(&self) -> &'static str {
        "Jasmine"
    }

    fn packages(&self) -> &'static [&'static str] {
        &[
            "jasmine",
            "jasmine-spec-reporter",
            "jasmine-ts",
            "@types/jasmine",
            "eslint-plugin-jasmine",
        ]
    }

    fn apply(
        &self,
        root: &Path,
        _answers: &AnswerSet,
        mut manifest: PackageManifest,
    ) -> Result<InstallerOutcome> {
        let boilerplate = root.join(BOILERPLATE_DIR);

        let runner_config = root.join("jasmine.config.json");
        fsops::copy_file(&boilerplate.join("jasmine.config.json"), &runner_config)?;

        let test_dir = root.join("test");
        fsops::ensure_directory(&test_dir)?;
        let starter_spec = test_dir.join("index.spec.ts");
        fsops::copy_file(&boilerplate.join("index.spec.ts"), &starter_spec)?;

        // Lint the specs with eslint-plugin-jasmine
        let eslintrc_path = root.join(".eslintrc.json");
        let mut eslintrc = JsonDocument::load(&eslintrc_path)?;
        eslintrc.set("plugins", Value::Array(vec![Value::String("jasmine".into())]));
        eslintrc
            .object_mut("env")
            .insert("jasmine".to_string(), Value::Bool(true));
        eslintrc.push_unique("extends", "plugin:jasmine/recommended");
        eslintrc.save(&eslintrc_path)?;

        // Keep the test folder out of the compiled output
        let tsconfig_path = root.join("tsconfig.json");
        let mut tsconfig = JsonDocument::load(&tsconfig_path)?;
        tsconfig.object_mut("compilerOptions").insert(
            "types".to_string(),
            Value::Array(vec![Value::String("jasmine".into())]),
        );
        tsconfig.set(
            "exclude",
            Value::Array(vec![Value::String("test/**/*.ts".into())]),
        );
        tsconfig.save(&tsconfig_path)?;

        manifest.set_script("test", TEST_COMMAND);

        Ok(InstallerOutcome {
            manifest,
            secrets: Vec::new(),
            files_touched: vec![runner_config, starter_spec, eslintrc_path, tsconfig_path],
        })
    }
}
