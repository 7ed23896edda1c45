//! Zendesk organization listing.
//!
//! `GET {base}/api/v2/organizations.json` returns one page of organizations and a
//! `next_page` URL; pages are followed until `next_page` is null. Only
//! organizations carrying the customer tag are returned.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;

use permsync_core::config::ZendeskCredentials;
use permsync_core::types::Organization;

use crate::error::DirectoryError;

pub const DEFAULT_CUSTOMER_TAG: &str = "current_customer";

/// Source of customer organization records.
pub trait OrganizationDirectory {
    /// Every organization tagged as a current customer, in directory order.
    fn list_customer_organizations(&self) -> Result<Vec<Organization>, DirectoryError>;
}

/// Connection settings for [`ZendeskClient`].
#[derive(Debug, Clone)]
pub struct ZendeskConfig {
    pub credentials: ZendeskCredentials,
    /// Overrides `https://{subdomain}.zendesk.com`.
    pub base_url: Option<String>,
    pub customer_tag: String,
}

impl ZendeskConfig {
    pub fn new(credentials: ZendeskCredentials) -> Self {
        Self {
            credentials,
            base_url: None,
            customer_tag: DEFAULT_CUSTOMER_TAG.to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_customer_tag(mut self, tag: impl Into<String>) -> Self {
        self.customer_tag = tag.into();
        self
    }

    fn resolved_base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("https://{}.zendesk.com", self.credentials.subdomain),
        }
    }
}

#[derive(Debug, Deserialize)]
struct OrganizationPage {
    #[serde(default)]
    organizations: Vec<Organization>,
    #[serde(default)]
    next_page: Option<String>,
}

/// Blocking client for the Zendesk organizations API.
pub struct ZendeskClient {
    agent: ureq::Agent,
    base_url: String,
    authorization: String,
    customer_tag: String,
}

impl ZendeskClient {
    pub fn new(config: ZendeskConfig) -> Self {
        let base_url = config.resolved_base_url();
        let ZendeskConfig {
            credentials,
            customer_tag,
            ..
        } = config;
        Self {
            agent: ureq::AgentBuilder::new().build(),
            base_url,
            authorization: basic_token_auth(&credentials.email, &credentials.token),
            customer_tag,
        }
    }

    fn fetch_page(&self, url: &str) -> Result<OrganizationPage, DirectoryError> {
        let response = self
            .agent
            .get(url)
            .set("Authorization", &self.authorization)
            .set("Accept", "application/json")
            .call()
            .map_err(|err| match err {
                ureq::Error::Status(code, response) => DirectoryError::Status {
                    code,
                    url: url.to_string(),
                    body: response.into_string().unwrap_or_default(),
                },
                ureq::Error::Transport(transport) => DirectoryError::Transport {
                    url: url.to_string(),
                    source: Box::new(transport),
                },
            })?;

        let body = response.into_string().map_err(|source| DirectoryError::Body {
            url: url.to_string(),
            source,
        })?;
        serde_json::from_str(&body).map_err(|source| DirectoryError::Json {
            url: url.to_string(),
            source,
        })
    }
}

impl OrganizationDirectory for ZendeskClient {
    fn list_customer_organizations(&self) -> Result<Vec<Organization>, DirectoryError> {
        let mut customers = Vec::new();
        let mut next = Some(format!("{}/api/v2/organizations.json", self.base_url));

        while let Some(url) = next.take() {
            let page = self.fetch_page(&url)?;
            for org in page.organizations {
                if org.has_tag(&self.customer_tag) {
                    tracing::info!("included organization: {}", org.name);
                    customers.push(org);
                } else {
                    tracing::debug!("skipped organization: {}", org.name);
                }
            }
            next = page.next_page.filter(|n| !n.is_empty());
        }

        Ok(customers)
    }
}

/// `Basic base64("{email}/token:{token}")`, the Zendesk API-token scheme.
fn basic_token_auth(email: &str, token: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{email}/token:{token}")))
}
