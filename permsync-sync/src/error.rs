//! Error types for permsync-sync.

use thiserror::Error;

use permsync_core::types::{OrgName, TeamId};
use permsync_directory::DirectoryError;
use permsync_registry::RegistryApiError;

/// Errors that stop a unit of work (one team, or the whole run).
#[derive(Debug, Error)]
pub enum SyncError {
    /// Listing organizations failed; the run cannot continue.
    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// The registry has no such team.
    #[error("team {team} not found in registry organization {org}")]
    TeamNotFound { team: TeamId, org: OrgName },

    /// The team's permissions could not be fetched.
    #[error("failed to fetch team permissions for team {team}: {source}")]
    TeamLookup {
        team: TeamId,
        #[source]
        source: RegistryApiError,
    },
}
