//! Error types for permsync-directory.

use thiserror::Error;

/// Failures listing organizations. All of them abort the run.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("directory returned HTTP {code} for {url}: {body}")]
    Status { code: u16, url: String, body: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Transport>,
    },

    #[error("invalid organization listing from {url}: {source}")]
    Json {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not read response from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: std::io::Error,
    },
}
