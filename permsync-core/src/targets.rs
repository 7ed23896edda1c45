//! Target repository set — the repositories every customer team should read.
//!
//! The list file is newline-delimited plain text. Lines are trimmed, blank lines
//! are dropped and duplicates collapse, so the resulting set never holds an
//! empty or repeated name.

use std::collections::btree_set;
use std::collections::BTreeSet;
use std::path::Path;

use crate::error::CoreError;
use crate::types::RepoName;

/// Immutable set of desired repository names, loaded once per run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetSet {
    repos: BTreeSet<RepoName>,
}

impl TargetSet {
    /// Parse list-file contents.
    pub fn parse(contents: &str) -> Self {
        let repos = contents
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(RepoName::from)
            .collect();
        Self { repos }
    }

    pub fn contains(&self, repo: &str) -> bool {
        self.repos.contains(repo)
    }

    pub fn len(&self) -> usize {
        self.repos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repos.is_empty()
    }

    pub fn iter(&self) -> btree_set::Iter<'_, RepoName> {
        self.repos.iter()
    }
}

impl<'a> IntoIterator for &'a TargetSet {
    type Item = &'a RepoName;
    type IntoIter = btree_set::Iter<'a, RepoName>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<RepoName> for TargetSet {
    fn from_iter<I: IntoIterator<Item = RepoName>>(iter: I) -> Self {
        Self {
            repos: iter
                .into_iter()
                .filter(|r| !r.0.trim().is_empty())
                .collect(),
        }
    }
}

/// Read the target set from the list file at `path`.
///
/// Returns [`CoreError::Io`] if the file cannot be read; callers treat that as
/// fatal and process nothing.
pub fn load_at(path: &Path) -> Result<TargetSet, CoreError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(TargetSet::parse(&contents))
}
