//! Error types shared by the document model and the dependency layer.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while reading the shared Lima configuration document.
#[derive(Debug, Error)]
pub enum DocumentError {
    /// The document is not valid YAML or does not have the expected shape.
    #[error("malformed config document: {0}")]
    Malformed(#[from] serde_yaml::Error),

    /// A network template must render exactly one identified network.
    #[error("network template must define exactly one identified network, found {found}")]
    InvalidTemplate { found: usize },
}

/// Errors surfaced by [`Capability::install`](crate::dependency::Capability::install).
#[derive(Debug, Error)]
pub enum DependencyError {
    /// Installation was skipped because a prerequisite is not installed.
    #[error("skipping installation of {dependency} because pre-requisites are missing")]
    PrerequisitesMissing { dependency: String },

    /// An install source file does not exist.
    #[error("install source not found: {}", .path.display())]
    SourceMissing { path: PathBuf },

    /// Underlying filesystem failure, passed through unchanged.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// One or more dependencies of a group failed to install.
    #[error("failed to install dependency group {group}: {}", join_errors(.errors))]
    Group {
        group: String,
        errors: Vec<DependencyError>,
    },
}

impl DependencyError {
    /// Whether this error means "install the prerequisites first" rather than
    /// a filesystem problem.
    pub fn is_prerequisites_missing(&self) -> bool {
        matches!(self, Self::PrerequisitesMissing { .. })
    }
}

fn join_errors(errors: &[DependencyError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
