//! Human-facing run report.
//!
//! The driver and engine emit events through a [`Reporter`] passed in by the
//! caller; nothing here prints directly. Diagnostics go to `tracing` instead.

use permsync_core::types::{Organization, PermissionGrant, RepoName, TeamId};
use permsync_core::TargetSet;

use crate::error::SyncError;
use crate::pipeline::RunSummary;
use crate::reconcile::GrantResult;

/// Receives report events in the order they happen.
pub trait Reporter {
    /// A customer organization was found; `team` is `None` if none is configured.
    fn organization(&mut self, org: &Organization, team: Option<&TeamId>);

    /// Current repositories for `team`, to be shown against `targets`.
    fn team_repositories(&mut self, team: &TeamId, repos: &[RepoName], targets: &TargetSet);

    /// The team's permissions could not be fetched; it will not be reconciled.
    fn lookup_failed(&mut self, team: &TeamId, error: &SyncError);

    /// Repositories about to be granted to `team`. Not called when none are missing.
    fn missing_repositories(&mut self, team: &TeamId, missing: &[RepoName]);

    fn grant(&mut self, grant: &PermissionGrant, result: &GrantResult);

    fn summary(&mut self, _summary: &RunSummary) {}
}
