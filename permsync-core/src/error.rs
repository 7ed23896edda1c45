//! Error types for permsync-core.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while preparing a run: reading inputs and credentials.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The target repository list could not be read.
    #[error("failed to read repository list at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One or more required environment variables are unset or blank.
    #[error("missing required environment variables: {}", vars.join(", "))]
    MissingEnv { vars: Vec<&'static str> },
}
