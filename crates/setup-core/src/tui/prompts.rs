//! The interactive wizard: question flow, pipeline invocation, closing output

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use colored::Colorize;

use crate::answers::{AnswerSet, ProjectShape, ProjectType};
use crate::error::SetupError;
use crate::npm::NpmClient;
use crate::pipeline::run_pipeline;

/// CLI arguments for the wizard
#[derive(Debug, Clone)]
pub struct SetupArgs {
    /// The boilerplate checkout to configure
    pub directory: PathBuf,

    /// Skip npm dependency installation (development/CI use)
    pub skip_install: bool,
}

impl Default for SetupArgs {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            skip_install: false,
        }
    }
}

/// Map a prompt error to the typed abort, leaving real IO failures intact
fn prompt_error(e: io::Error) -> SetupError {
    if e.kind() == io::ErrorKind::Interrupted {
        SetupError::Aborted
    } else {
        SetupError::io("prompt failed".to_string(), e)
    }
}

/// Ask the full question sequence and normalize the input into an
/// [`AnswerSet`].
///
/// All answers, including the branch-specific ones, are collected before any
/// transform runs; cancelling at any question leaves the checkout untouched.
pub fn collect_answers() -> crate::error::Result<AnswerSet> {
    let needs_renovate: bool =
        cliclack::confirm("Does this project need Renovate? (Automatic Dependency Updates)")
            .interact()
            .map_err(prompt_error)?;

    let needs_docker: bool = cliclack::confirm("Does this project need Docker? (Containerisation)")
        .interact()
        .map_err(prompt_error)?;

    let needs_jasmine: bool = cliclack::confirm("Does this project need Jasmine? (Unit Testing)")
        .interact()
        .map_err(prompt_error)?;

    let needs_codecov: bool =
        cliclack::confirm("Does this project need Codecov? (Test Coverage Calculation)")
            .interact()
            .map_err(prompt_error)?;

    let needs_sentry: bool =
        cliclack::confirm("Does this project need Sentry support? (Error Reporting)")
            .initial_value(false)
            .interact()
            .map_err(prompt_error)?;

    let project_name: String = cliclack::input(
        "What is the name of this project? This value will be used in the Dockerfile, \
         package.json and the cronjob (if applicable):",
    )
    .required(false)
    .interact()
    .map_err(prompt_error)?;

    let node_version: String =
        cliclack::input("Which major node version (e.g. 20, 22, 24) should this project use?")
            .default_input("20")
            .validate(|input: &String| {
                if input.parse::<u32>().map(|v| v > 0).unwrap_or(false) {
                    Ok(())
                } else {
                    Err("Enter a positive major version number")
                }
            })
            .interact()
            .map_err(prompt_error)?;
    let node_version: u32 = node_version.parse().unwrap_or(20);

    let shape = if needs_docker {
        let project_type: ProjectType = cliclack::select(
            "How should this project's container run? As a persistent server (i.e. run the \
             main file until it crashes or exits) or a cronjob (i.e. a task that needs to be \
             repeated every X minutes):",
        )
        .item(ProjectType::Server, "Server", "")
        .item(ProjectType::Cronjob, "Cronjob", "")
        .interact()
        .map_err(prompt_error)?;

        ProjectShape::Containerized { project_type }
    } else {
        let needs_semantic_release: bool = cliclack::confirm(
            "Does this project need Semantic Release? (Automatic Releases to NPM)",
        )
        .interact()
        .map_err(prompt_error)?;

        ProjectShape::Publishable {
            needs_semantic_release,
        }
    };

    Ok(AnswerSet::new(
        needs_renovate,
        shape,
        needs_jasmine,
        needs_codecov,
        needs_sentry,
        &project_name,
        node_version,
    ))
}

/// Run the wizard: intro, questions, pipeline, closing output
pub async fn run(args: SetupArgs) -> Result<()> {
    cliclack::intro("Fdebijl's TypeScript BoilerPlate Setup")?;

    let answers = match collect_answers() {
        Ok(answers) => answers,
        Err(SetupError::Aborted) => {
            cliclack::outro("Setup cancelled. The checkout was left untouched.")?;
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    let npm = if args.skip_install {
        cliclack::log::info("Skipping dependency installation")?;
        NpmClient::disabled(&args.directory)
    } else {
        NpmClient::new(&args.directory)
    };

    let outcome = run_pipeline(&args.directory, &answers, &npm).await?;

    println!(
        "{}",
        "\nSetup finished, npm will now remove all setup-related packages. You may have to \
         manually remove the 'postsetup' script from package.json."
            .green()
    );

    if !outcome.secrets.is_empty() {
        println!(
            "{}",
            format!(
                "Add the following secrets to the repository and/or your .env:\n{}",
                outcome.secrets.join("\n")
            )
            .green()
        );
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
