//! Permission diff and provisioning.
//!
//! `missing = targets - current`, then one read grant per missing repository.
//! Grants run one after another with no transaction around the batch: a failed
//! grant is recorded and the next repository is still attempted, and earlier
//! grants stay in place.

use std::collections::HashSet;

use permsync_core::types::{OrgName, PermissionGrant, RepoName, TeamId};
use permsync_core::TargetSet;
use permsync_registry::PermissionClient;

use crate::report::Reporter;

// ---------------------------------------------------------------------------
// Grant result
// ---------------------------------------------------------------------------

/// Outcome of granting a single repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrantResult {
    /// The registry accepted the grant.
    Granted,
    /// `--dry-run` mode: the grant *would* have been sent.
    WouldGrant,
    /// The registry rejected the grant or could not be reached.
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrantOutcome {
    pub repo: RepoName,
    pub result: GrantResult,
}

/// Every grant attempted for one team, in the order they were attempted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcileOutcome {
    pub grants: Vec<GrantOutcome>,
}

impl ReconcileOutcome {
    pub fn granted(&self) -> usize {
        self.count(|r| matches!(r, GrantResult::Granted))
    }

    pub fn would_grant(&self) -> usize {
        self.count(|r| matches!(r, GrantResult::WouldGrant))
    }

    pub fn failed(&self) -> usize {
        self.count(|r| matches!(r, GrantResult::Failed { .. }))
    }

    pub fn is_noop(&self) -> bool {
        self.grants.is_empty()
    }

    fn count(&self, pred: impl Fn(&GrantResult) -> bool) -> usize {
        self.grants.iter().filter(|g| pred(&g.result)).count()
    }
}

// ---------------------------------------------------------------------------
// Diff
// ---------------------------------------------------------------------------

/// Target repositories the team does not already have, in target-set order.
pub fn missing(targets: &TargetSet, current: &[RepoName]) -> Vec<RepoName> {
    let have: HashSet<&str> = current.iter().map(RepoName::as_str).collect();
    targets
        .iter()
        .filter(|repo| !have.contains(repo.as_str()))
        .cloned()
        .collect()
}

// ---------------------------------------------------------------------------
// Provision
// ---------------------------------------------------------------------------

/// Grant read access to every target repository missing from `current`.
///
/// Never fails as a whole; per-repository failures are in the returned outcome
/// and reported as they happen.
pub fn reconcile(
    client: &dyn PermissionClient,
    reporter: &mut dyn Reporter,
    targets: &TargetSet,
    current: &[RepoName],
    org: &OrgName,
    team: &TeamId,
    dry_run: bool,
) -> ReconcileOutcome {
    let missing = missing(targets, current);
    if missing.is_empty() {
        tracing::debug!(team = %team, "team already has every target repository");
        return ReconcileOutcome::default();
    }
    reporter.missing_repositories(team, &missing);

    let mut outcome = ReconcileOutcome::default();
    for repo in missing {
        let grant = PermissionGrant::read(org, team, &repo);
        let result = if dry_run {
            GrantResult::WouldGrant
        } else {
            match client.grant_repository_permission(&grant) {
                Ok(()) => GrantResult::Granted,
                Err(err) => {
                    tracing::warn!(repo = %grant.repo_path(), team = %team, error = %err, "grant failed");
                    GrantResult::Failed {
                        reason: err.to_string(),
                    }
                }
            }
        };
        reporter.grant(&grant, &result);
        outcome.grants.push(GrantOutcome { repo, result });
    }
    outcome
}
