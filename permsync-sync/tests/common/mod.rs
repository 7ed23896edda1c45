//! In-memory fakes for the registry, directory and reporter.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use permsync_core::types::{OrgName, Organization, PermissionGrant, RepoName, TeamId};
use permsync_core::TargetSet;
use permsync_directory::{DirectoryError, OrganizationDirectory};
use permsync_registry::{PermissionClient, RegistryApiError, TeamLookup};
use permsync_sync::{GrantResult, Reporter, RunSummary, SyncError, SyncOptions};
use serde_json::json;

// ---------------------------------------------------------------------------
// Registry
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum FakeTeam {
    Repos(Vec<&'static str>),
    NotFound,
    ServerError,
}

#[derive(Default)]
pub struct FakeRegistry {
    teams: HashMap<String, FakeTeam>,
    failing_repos: HashSet<String>,
    pub lookups: RefCell<Vec<TeamId>>,
    pub grants: RefCell<Vec<PermissionGrant>>,
}

impl FakeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn team(mut self, team: &str, state: FakeTeam) -> Self {
        self.teams.insert(team.to_string(), state);
        self
    }

    /// Grants for `repo` answer HTTP 500.
    pub fn failing_repo(mut self, repo: &str) -> Self {
        self.failing_repos.insert(repo.to_string());
        self
    }

    pub fn granted_repos(&self) -> Vec<String> {
        self.grants
            .borrow()
            .iter()
            .map(|g| g.repo.to_string())
            .collect()
    }
}

impl PermissionClient for FakeRegistry {
    fn team_repositories(&self, _org: &OrgName, team: &TeamId) -> TeamLookup {
        self.lookups.borrow_mut().push(team.clone());
        match self.teams.get(team.as_str()) {
            Some(FakeTeam::Repos(repos)) => {
                TeamLookup::Found(repos.iter().map(|r| RepoName::from(*r)).collect())
            }
            Some(FakeTeam::ServerError) => TeamLookup::Failed(RegistryApiError::Status {
                code: 500,
                body: "internal".to_string(),
            }),
            Some(FakeTeam::NotFound) | None => TeamLookup::NotFound,
        }
    }

    fn grant_repository_permission(
        &self,
        grant: &PermissionGrant,
    ) -> Result<(), RegistryApiError> {
        self.grants.borrow_mut().push(grant.clone());
        if self.failing_repos.contains(grant.repo.as_str()) {
            return Err(RegistryApiError::Status {
                code: 500,
                body: "internal".to_string(),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Directory
// ---------------------------------------------------------------------------

pub struct FakeDirectory {
    orgs: Option<Vec<Organization>>,
}

impl FakeDirectory {
    pub fn with(orgs: Vec<Organization>) -> Self {
        Self { orgs: Some(orgs) }
    }

    pub fn failing() -> Self {
        Self { orgs: None }
    }
}

impl OrganizationDirectory for FakeDirectory {
    fn list_customer_organizations(&self) -> Result<Vec<Organization>, DirectoryError> {
        self.orgs.clone().ok_or_else(|| DirectoryError::Status {
            code: 401,
            url: "fake://organizations".to_string(),
            body: "unauthorized".to_string(),
        })
    }
}

pub fn org(id: u64, name: &str, team: Option<&str>) -> Organization {
    let fields = match team {
        Some(t) => json!({ "quay_io_team_id": t }),
        None => json!({}),
    };
    serde_json::from_value(json!({
        "id": id,
        "name": name,
        "tags": ["current_customer"],
        "organization_fields": fields,
    }))
    .expect("organization fixture")
}

// ---------------------------------------------------------------------------
// Reporter
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct RecordingReporter {
    pub events: Vec<String>,
}

impl RecordingReporter {
    pub fn has(&self, prefix: &str) -> bool {
        self.events.iter().any(|e| e.starts_with(prefix))
    }
}

impl Reporter for RecordingReporter {
    fn organization(&mut self, org: &Organization, team: Option<&TeamId>) {
        match team {
            Some(team) => self.events.push(format!("org:{}:{team}", org.name)),
            None => self.events.push(format!("org:{}:none", org.name)),
        }
    }

    fn team_repositories(&mut self, team: &TeamId, repos: &[RepoName], targets: &TargetSet) {
        let listed: Vec<String> = repos
            .iter()
            .map(|r| {
                let marker = if targets.contains(r.as_str()) { "+" } else { "-" };
                format!("{marker}{r}")
            })
            .collect();
        self.events.push(format!("repos:{team}:{}", listed.join(",")));
    }

    fn lookup_failed(&mut self, team: &TeamId, error: &SyncError) {
        let kind = match error {
            SyncError::TeamNotFound { .. } => "not_found",
            SyncError::TeamLookup { .. } => "error",
            SyncError::Directory(_) => "directory",
        };
        self.events.push(format!("lookup_failed:{team}:{kind}"));
    }

    fn missing_repositories(&mut self, team: &TeamId, missing: &[RepoName]) {
        let names: Vec<&str> = missing.iter().map(RepoName::as_str).collect();
        self.events.push(format!("missing:{team}:{}", names.join(",")));
    }

    fn grant(&mut self, grant: &PermissionGrant, result: &GrantResult) {
        let status = match result {
            GrantResult::Granted => "ok",
            GrantResult::WouldGrant => "would",
            GrantResult::Failed { .. } => "failed",
        };
        self.events.push(format!("grant:{}:{status}", grant.repo_path()));
    }

    fn summary(&mut self, summary: &RunSummary) {
        self.events.push(format!(
            "summary:{}:{}:{}",
            summary.teams.len(),
            summary.failures.len(),
            summary.without_team.len()
        ));
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

pub fn targets(names: &[&str]) -> TargetSet {
    names.iter().map(|n| RepoName::from(*n)).collect()
}

pub fn options() -> SyncOptions {
    SyncOptions {
        registry_org: OrgName::from("dremio"),
        team_field: "quay_io_team_id".to_string(),
        dry_run: false,
    }
}
