//! Credentials for the two remote services, resolved from the environment.
//!
//! `from_env` reads the process environment; `from_lookup` takes any key lookup
//! so tests never touch global state.

use crate::error::CoreError;

pub const ZENDESK_EMAIL: &str = "ZENDESK_EMAIL";
pub const ZENDESK_TOKEN: &str = "ZENDESK_TOKEN";
pub const ZENDESK_SUBDOMAIN: &str = "ZENDESK_SUBDOMAIN";
pub const QUAY_IO_TOKEN: &str = "QUAY_IO_TOKEN";

/// API-token credentials for the support directory.
#[derive(Clone, PartialEq, Eq)]
pub struct ZendeskCredentials {
    pub email: String,
    pub token: String,
    pub subdomain: String,
}

impl std::fmt::Debug for ZendeskCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZendeskCredentials")
            .field("email", &self.email)
            .field("token", &"<redacted>")
            .field("subdomain", &self.subdomain)
            .finish()
    }
}

/// Everything a run needs to authenticate.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub zendesk: ZendeskCredentials,
    /// OAuth bearer token for the registry API.
    pub quay_token: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("zendesk", &self.zendesk)
            .field("quay_token", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    /// Resolve credentials from the process environment.
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve credentials through `lookup`. Unset and blank values are both
    /// reported, all at once, in [`CoreError::MissingEnv`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let mut require = |key: &'static str| -> String {
            match lookup(key).map(|v| v.trim().to_string()) {
                Some(v) if !v.is_empty() => v,
                _ => {
                    missing.push(key);
                    String::new()
                }
            }
        };

        let email = require(ZENDESK_EMAIL);
        let token = require(ZENDESK_TOKEN);
        let subdomain = require(ZENDESK_SUBDOMAIN);
        let quay_token = require(QUAY_IO_TOKEN);

        if !missing.is_empty() {
            return Err(CoreError::MissingEnv { vars: missing });
        }

        Ok(Self {
            zendesk: ZendeskCredentials {
                email,
                token,
                subdomain,
            },
            quay_token,
        })
    }
}
