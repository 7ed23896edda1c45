//! Registry permission client.
//!
//! | Operation | Request |
//! |---|---|
//! | [`PermissionClient::team_repositories`] | `GET /organization/{org}/team/{team}/permissions` |
//! | [`PermissionClient::grant_repository_permission`] | `PUT /repository/{org}/{repo}/permissions/team/{team}` |
//!
//! Every request carries `Authorization: Bearer <token>`. The token is set once
//! at construction and never refreshed.

use serde::Serialize;

use permsync_core::types::{OrgName, PermissionGrant, RepoName, Role, TeamId};

use crate::error::{from_ureq, RegistryApiError};
use crate::permissions::parse_permissions;

pub const DEFAULT_QUAY_API_URL: &str = "https://quay.io/api/v1";

// ---------------------------------------------------------------------------
// Lookup result
// ---------------------------------------------------------------------------

/// Outcome of reading a team's current repository permissions.
#[derive(Debug)]
pub enum TeamLookup {
    /// The team exists; these are the repositories it can access (possibly none).
    Found(Vec<RepoName>),
    /// The registry has no such team in the organization (HTTP 404).
    NotFound,
    /// Any other failure; the permission set is unknown.
    Failed(RegistryApiError),
}

// ---------------------------------------------------------------------------
// Client trait
// ---------------------------------------------------------------------------

/// The two registry operations reconciliation needs.
pub trait PermissionClient {
    /// Current repositories `team` can access inside `org`.
    fn team_repositories(&self, org: &OrgName, team: &TeamId) -> TeamLookup;

    /// Attach `grant.role` for `grant.team` to `grant.org/grant.repo`.
    ///
    /// Granting an already-granted permission is not distinguished from a new
    /// grant.
    fn grant_repository_permission(&self, grant: &PermissionGrant)
        -> Result<(), RegistryApiError>;
}

// ---------------------------------------------------------------------------
// Quay implementation
// ---------------------------------------------------------------------------

/// Connection settings for [`QuayClient`].
#[derive(Clone)]
pub struct QuayConfig {
    pub base_url: String,
    pub token: String,
}

impl QuayConfig {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_QUAY_API_URL.to_string(),
            token: token.into(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl std::fmt::Debug for QuayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuayConfig")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Serialize)]
struct RoleBody {
    role: Role,
}

/// Blocking HTTP client for the Quay.io permission API.
pub struct QuayClient {
    agent: ureq::Agent,
    base_url: String,
    authorization: String,
}

impl QuayClient {
    pub fn new(config: QuayConfig) -> Self {
        Self {
            agent: ureq::AgentBuilder::new().build(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            authorization: format!("Bearer {}", config.token),
        }
    }

    fn team_permissions_url(&self, org: &OrgName, team: &TeamId) -> String {
        format!("{}/organization/{org}/team/{team}/permissions", self.base_url)
    }

    fn repo_team_permission_url(&self, grant: &PermissionGrant) -> String {
        format!(
            "{}/repository/{}/permissions/team/{}",
            self.base_url,
            grant.repo_path(),
            grant.team
        )
    }

    fn fetch_team_permissions(
        &self,
        url: &str,
    ) -> Result<Option<serde_json::Value>, RegistryApiError> {
        let response = match self
            .agent
            .get(url)
            .set("Authorization", &self.authorization)
            .set("Content-Type", "application/json")
            .call()
        {
            Ok(response) => response,
            Err(ureq::Error::Status(404, _)) => return Ok(None),
            Err(err) => return Err(from_ureq(url, err)),
        };

        let body = response
            .into_string()
            .map_err(|e| RegistryApiError::Body(e.to_string()))?;
        Ok(Some(serde_json::from_str(&body)?))
    }
}

impl PermissionClient for QuayClient {
    fn team_repositories(&self, org: &OrgName, team: &TeamId) -> TeamLookup {
        let url = self.team_permissions_url(org, team);
        match self.fetch_team_permissions(&url) {
            Ok(Some(body)) => {
                let parsed = parse_permissions(&body);
                tracing::debug!(
                    team = %team,
                    repos = parsed.repos.len(),
                    skipped = parsed.skipped,
                    "fetched team permissions"
                );
                TeamLookup::Found(parsed.repos)
            }
            Ok(None) => {
                tracing::warn!("team {team} not found in organization {org}");
                TeamLookup::NotFound
            }
            Err(err) => {
                tracing::error!(team = %team, org = %org, error = ?err, "error fetching team permissions: {err}");
                TeamLookup::Failed(err)
            }
        }
    }

    fn grant_repository_permission(
        &self,
        grant: &PermissionGrant,
    ) -> Result<(), RegistryApiError> {
        let url = self.repo_team_permission_url(grant);
        let response = self
            .agent
            .put(&url)
            .set("Authorization", &self.authorization)
            .set("Content-Type", "application/json")
            .send_json(RoleBody { role: grant.role })
            .map_err(|err| from_ureq(&url, err))?;

        let code = response.status();
        if code != 200 {
            let body = response.into_string().unwrap_or_default();
            return Err(RegistryApiError::Status { code, body });
        }
        tracing::debug!(repo = %grant.repo_path(), team = %grant.team, role = %grant.role, "granted");
        Ok(())
    }
}
