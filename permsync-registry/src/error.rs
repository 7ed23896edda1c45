//! Error types for permsync-registry.

use thiserror::Error;

/// Failures talking to the registry API.
#[derive(Debug, Error)]
pub enum RegistryApiError {
    /// The API answered with a status other than the expected one.
    #[error("registry returned HTTP {code}: {body}")]
    Status { code: u16, body: String },

    /// The request never produced an HTTP response.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: Box<ureq::Transport>,
    },

    /// The response body could not be read or was not JSON.
    #[error("invalid response body: {0}")]
    Body(String),

    #[error("invalid JSON in response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Split a `ureq` error into a status or transport failure for `url`.
pub(crate) fn from_ureq(url: &str, err: ureq::Error) -> RegistryApiError {
    match err {
        ureq::Error::Status(code, response) => RegistryApiError::Status {
            code,
            body: response.into_string().unwrap_or_default(),
        },
        ureq::Error::Transport(transport) => RegistryApiError::Transport {
            url: url.to_string(),
            source: Box::new(transport),
        },
    }
}
