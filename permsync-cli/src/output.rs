//! Console rendering of run events.

use std::io::{self, IsTerminal, Write};

use colored::Colorize;

use permsync_core::types::{Organization, PermissionGrant, RepoName, TeamId};
use permsync_core::TargetSet;
use permsync_sync::{GrantResult, Reporter, RunSummary, SyncError};

/// Prints report lines as they happen. Write errors are ignored.
pub struct ConsoleReporter<W: Write> {
    out: W,
    dry_run: bool,
}

impl ConsoleReporter<io::Stdout> {
    /// Colors are dropped when stdout is not a terminal.
    pub fn stdout(dry_run: bool) -> Self {
        if !io::stdout().is_terminal() {
            colored::control::set_override(false);
        }
        Self::new(io::stdout(), dry_run)
    }
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W, dry_run: bool) -> Self {
        Self { out, dry_run }
    }

    fn prefix(&self) -> &'static str {
        if self.dry_run {
            "[dry-run] "
        } else {
            ""
        }
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn organization(&mut self, org: &Organization, team: Option<&TeamId>) {
        let _ = match team {
            Some(team) => writeln!(self.out, "Organization: {} (team {team})", org.name.bold()),
            None => writeln!(
                self.out,
                "Organization: {} {}",
                org.name.bold(),
                "(no team configured)".dimmed()
            ),
        };
    }

    fn team_repositories(&mut self, team: &TeamId, repos: &[RepoName], targets: &TargetSet) {
        if repos.is_empty() {
            let _ = writeln!(self.out, "No repositories found for team {team}");
            return;
        }
        let _ = writeln!(self.out, "\nRepositories for team {team}:");
        for repo in repos {
            let _ = if targets.contains(repo.as_str()) {
                writeln!(self.out, "  - {repo} (in target list)")
            } else {
                writeln!(self.out, "  - {repo} {}", "(not in target list)".yellow())
            };
        }
    }

    fn lookup_failed(&mut self, team: &TeamId, error: &SyncError) {
        let _ = writeln!(
            self.out,
            "{} Failed to fetch team permissions for team {team}: {error}",
            "✗".red()
        );
    }

    fn missing_repositories(&mut self, team: &TeamId, missing: &[RepoName]) {
        let _ = writeln!(
            self.out,
            "\n{}Repositories to grant for team {team}: {}",
            self.prefix(),
            missing.len()
        );
    }

    fn grant(&mut self, grant: &PermissionGrant, result: &GrantResult) {
        let path = grant.repo_path();
        let team = &grant.team;
        let _ = match result {
            GrantResult::Granted => writeln!(
                self.out,
                "  {} Successfully added {path} to team {team}",
                "✓".green()
            ),
            GrantResult::WouldGrant => writeln!(self.out, "  ~  would add {path} to team {team}"),
            GrantResult::Failed { reason } => writeln!(
                self.out,
                "  {} Failed to add {path} to team {team}: {reason}",
                "✗".red()
            ),
        };
    }

    fn summary(&mut self, summary: &RunSummary) {
        let granted = if self.dry_run {
            format!("{} would be granted", summary.would_grant())
        } else {
            format!("{} granted", summary.granted())
        };
        let _ = writeln!(
            self.out,
            "\n{}{} {} teams reconciled ({granted}, {} failed), {} lookups failed, {} organizations without a team",
            self.prefix(),
            "✓".green(),
            summary.teams.len(),
            summary.failed_grants(),
            summary.failures.len(),
            summary.without_team.len(),
        );
    }
}
