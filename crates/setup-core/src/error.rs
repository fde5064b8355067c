//! Typed error kinds for the scaffolding pipeline

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can halt (or, for `Install`, be reported by) the pipeline
#[derive(Debug, Error)]
pub enum SetupError {
    /// A file or directory could not be read, written, copied, renamed or
    /// removed. Fatal to the pipeline.
    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    /// A substitution target file does not exist. Fatal to the pipeline;
    /// files earlier in the list are not rolled back.
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// A JSON configuration document is not well-formed. Fatal.
    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// npm exited non-zero. Non-fatal: the pipeline logs it and proceeds.
    #[error("dependency installation failed: {reason}")]
    Install { reason: String },

    /// The user cancelled the question flow before all answers were
    /// collected. No filesystem mutation has happened at this point.
    #[error("setup cancelled")]
    Aborted,
}

impl SetupError {
    /// Wrap an IO error with a human-readable context line
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        SetupError::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SetupError>;
