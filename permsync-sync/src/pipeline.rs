//! Run driver: one team, or every customer organization.
//!
//! In single-team mode a failed permission lookup is returned as an error so the
//! binary exits non-zero. In all-organizations mode the same failure is
//! recorded in the [`RunSummary`] and the loop moves on to the next
//! organization.

use permsync_core::types::{OrgName, RepoName, TeamId};
use permsync_core::TargetSet;
use permsync_directory::OrganizationDirectory;
use permsync_registry::{PermissionClient, TeamLookup};

use crate::error::SyncError;
use crate::reconcile::{reconcile, ReconcileOutcome};
use crate::report::Reporter;

/// Scope for a pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncScope {
    /// Every customer organization from the directory.
    All,
    /// A single registry team, without consulting the directory.
    Team(TeamId),
}

/// Settings shared by every team in a run.
#[derive(Debug, Clone)]
pub struct SyncOptions {
    /// Registry organization that owns the teams and repositories.
    pub registry_org: OrgName,
    /// Custom field on organization records holding the team identifier.
    pub team_field: String,
    pub dry_run: bool,
}

/// Result of reconciling one team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamSyncResult {
    pub team: TeamId,
    /// Directory organization the team belongs to, if it came from one.
    pub organization: Option<String>,
    pub current: Vec<RepoName>,
    pub outcome: ReconcileOutcome,
}

/// A team that could not be reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeamFailure {
    pub team: TeamId,
    pub organization: Option<String>,
    pub reason: String,
}

/// Everything that happened during a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Organizations examined (0 in single-team mode).
    pub organizations: usize,
    /// Names of organizations with no team identifier configured.
    pub without_team: Vec<String>,
    pub teams: Vec<TeamSyncResult>,
    pub failures: Vec<TeamFailure>,
}

impl RunSummary {
    pub fn granted(&self) -> usize {
        self.teams.iter().map(|t| t.outcome.granted()).sum()
    }

    pub fn would_grant(&self) -> usize {
        self.teams.iter().map(|t| t.outcome.would_grant()).sum()
    }

    pub fn failed_grants(&self) -> usize {
        self.teams.iter().map(|t| t.outcome.failed()).sum()
    }
}

/// Fetch `team`'s repositories, report them, then reconcile.
///
/// A lookup that comes back `NotFound` or `Failed` is reported and returned as
/// an error; reconciliation is not attempted for that team.
pub fn sync_team(
    client: &dyn PermissionClient,
    reporter: &mut dyn Reporter,
    targets: &TargetSet,
    options: &SyncOptions,
    team: &TeamId,
    organization: Option<&str>,
) -> Result<TeamSyncResult, SyncError> {
    let current = match client.team_repositories(&options.registry_org, team) {
        TeamLookup::Found(repos) => repos,
        TeamLookup::NotFound => {
            let err = SyncError::TeamNotFound {
                team: team.clone(),
                org: options.registry_org.clone(),
            };
            reporter.lookup_failed(team, &err);
            return Err(err);
        }
        TeamLookup::Failed(source) => {
            let err = SyncError::TeamLookup {
                team: team.clone(),
                source,
            };
            reporter.lookup_failed(team, &err);
            return Err(err);
        }
    };

    reporter.team_repositories(team, &current, targets);
    let outcome = reconcile(
        client,
        reporter,
        targets,
        &current,
        &options.registry_org,
        team,
        options.dry_run,
    );

    Ok(TeamSyncResult {
        team: team.clone(),
        organization: organization.map(str::to_string),
        current,
        outcome,
    })
}

/// Run the pipeline for `scope`.
///
/// Errors only on a directory failure (all-organizations mode) or a lookup
/// failure (single-team mode).
pub fn run(
    scope: SyncScope,
    directory: &dyn OrganizationDirectory,
    client: &dyn PermissionClient,
    reporter: &mut dyn Reporter,
    targets: &TargetSet,
    options: &SyncOptions,
) -> Result<RunSummary, SyncError> {
    let mut summary = RunSummary::default();

    match scope {
        SyncScope::Team(team) => {
            tracing::info!(team = %team, "processing single team");
            let result = sync_team(client, reporter, targets, options, &team, None)?;
            summary.teams.push(result);
        }
        SyncScope::All => {
            tracing::info!("fetching customer organizations");
            let organizations = directory.list_customer_organizations()?;
            summary.organizations = organizations.len();

            for org in &organizations {
                let Some(team) = org.team_id(&options.team_field) else {
                    reporter.organization(org, None);
                    summary.without_team.push(org.name.clone());
                    continue;
                };
                reporter.organization(org, Some(&team));

                match sync_team(client, reporter, targets, options, &team, Some(&org.name)) {
                    Ok(result) => summary.teams.push(result),
                    Err(err) => {
                        tracing::warn!(
                            organization = %org.name,
                            team = %team,
                            error = %err,
                            "skipping organization"
                        );
                        summary.failures.push(TeamFailure {
                            team,
                            organization: Some(org.name.clone()),
                            reason: err.to_string(),
                        });
                    }
                }
            }
        }
    }

    reporter.summary(&summary);
    Ok(summary)
}
