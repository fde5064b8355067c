//! The typed answer set collected by the wizard
//!
//! The prompt layer normalizes raw user input into an [`AnswerSet`] before
//! any transform runs.

use std::fmt;

/// How a containerized project's entry point runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectType {
    /// Run the main file until it crashes or exits
    Server,
    /// A task repeated on a schedule
    Cronjob,
}

impl ProjectType {
    pub fn display_name(&self) -> &'static str {
        match self {
            ProjectType::Server => "Server",
            ProjectType::Cronjob => "Cronjob",
        }
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// The mutually exclusive project shape.
///
/// A project is configured as exactly one of a containerized service or a
/// publishable npm package; the Docker and semantic-release installers can
/// never both apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectShape {
    Containerized { project_type: ProjectType },
    Publishable { needs_semantic_release: bool },
}

impl ProjectShape {
    pub fn is_containerized(&self) -> bool {
        matches!(self, ProjectShape::Containerized { .. })
    }
}

/// Immutable record of the user's decisions, consumed by the pipeline
#[derive(Debug, Clone)]
pub struct AnswerSet {
    /// Keep renovate.json for automatic dependency updates
    pub needs_renovate: bool,
    /// Containerized service vs. publishable package
    pub shape: ProjectShape,
    /// Jasmine unit testing
    pub needs_jasmine: bool,
    /// Codecov test coverage calculation
    pub needs_codecov: bool,
    /// Sentry error reporting
    pub needs_sentry: bool,
    /// Lowercased project name; used in package.json, the Dockerfile and the
    /// cronjob schedule file. May be empty, in which case the README falls
    /// back to a generic title.
    pub project_name: String,
    /// Major node version baked into the CI and container templates
    pub node_version: u32,
}

impl AnswerSet {
    /// Build an answer set, normalizing the project name to lowercase
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        needs_renovate: bool,
        shape: ProjectShape,
        needs_jasmine: bool,
        needs_codecov: bool,
        needs_sentry: bool,
        project_name: &str,
        node_version: u32,
    ) -> Self {
        Self {
            needs_renovate,
            shape,
            needs_jasmine,
            needs_codecov,
            needs_sentry,
            project_name: project_name.trim().to_lowercase(),
            node_version,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn publishable(name: &str) -> AnswerSet {
        AnswerSet::new(
            false,
            ProjectShape::Publishable {
                needs_semantic_release: false,
            },
            false,
            false,
            false,
            name,
            20,
        )
    }

    #[test]
    fn test_project_name_is_lowercased() {
        let answers = publishable("MyProject");
        assert_eq!(answers.project_name, "myproject");
    }

    #[test]
    fn test_project_name_is_trimmed() {
        let answers = publishable("  spaced  ");
        assert_eq!(answers.project_name, "spaced");
    }

    #[test]
    fn test_empty_project_name_is_allowed() {
        let answers = publishable("");
        assert_eq!(answers.project_name, "");
    }

    #[test]
    fn test_shape_exclusivity() {
        let containerized = ProjectShape::Containerized {
            project_type: ProjectType::Cronjob,
        };
        assert!(containerized.is_containerized());
        assert!(!ProjectShape::Publishable {
            needs_semantic_release: true
        }
        .is_containerized());
    }
}
