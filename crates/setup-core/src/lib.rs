//! Setup Core - Library for configuring TypeScript boilerplate checkouts
//!
//! This library turns a freshly cloned boilerplate template into a configured
//! project. It consumes a typed answer set, then runs a fixed sequence of
//! file and manifest transforms and reports which external secrets the
//! resulting project will need.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Transform Utilities** - Filesystem operations, JSON document
//!   editing with a canonical manifest key order, sentinel token substitution
//! - **Layer 2: Feature Installers** - One self-contained unit per optional
//!   feature (Jasmine, Codecov, Semantic Release, Sentry, Docker, CI checks)
//! - **Layer 3: Pipeline** - The orchestrator that sequences the transforms,
//!   threads the manifest snapshot through the enabled installers, and
//!   aggregates the required-secrets list
//! - **Layer 4: CLI/TUI Interface** - Optional cliclack-based prompts
//!   (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based wizard module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use setup_core::{AnswerSet, NpmClient, ProjectShape, run_pipeline};
//!
//! let answers = AnswerSet::new(
//!     false,
//!     ProjectShape::Publishable { needs_semantic_release: true },
//!     true,
//!     true,
//!     false,
//!     "my-project",
//!     20,
//! );
//! let npm = NpmClient::new(checkout_dir);
//! let outcome = run_pipeline(checkout_dir, &answers, &npm).await?;
//! ```

pub mod answers;
pub mod error;
pub mod fsops;
pub mod installers;
pub mod manifest;
pub mod npm;
pub mod pipeline;
pub mod substitute;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use answers::{AnswerSet, ProjectShape, ProjectType};
pub use error::{Result, SetupError};
pub use manifest::{JsonDocument, PackageManifest};
pub use npm::NpmClient;
pub use pipeline::{run_pipeline, SetupOutcome};

#[cfg(feature = "tui")]
pub use tui::{run, SetupArgs};
