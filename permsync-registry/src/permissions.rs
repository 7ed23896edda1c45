//! Tolerant parsing of the team-permission listing.
//!
//! Expected shape:
//!
//! ```json
//! { "permissions": [ { "repository": { "name": "engine", ... }, ... }, ... ] }
//! ```
//!
//! Entries that do not carry a `repository.name` string are skipped. Every skip
//! is logged so malformed responses stay visible.

use serde_json::Value;

use permsync_core::types::RepoName;

/// Repository names extracted from a listing, plus the number of entries dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedPermissions {
    pub repos: Vec<RepoName>,
    pub skipped: usize,
}

/// Extract repository names from a permission listing body.
///
/// A body without a `permissions` array yields an empty list.
pub fn parse_permissions(body: &Value) -> ParsedPermissions {
    let Some(entries) = body.get("permissions").and_then(Value::as_array) else {
        tracing::warn!("permission listing has no `permissions` array; treating as empty");
        return ParsedPermissions::default();
    };

    let mut parsed = ParsedPermissions::default();
    for (index, entry) in entries.iter().enumerate() {
        match repository_name(entry) {
            Some(name) => parsed.repos.push(RepoName::from(name)),
            None => {
                tracing::warn!(index, entry = %entry, "skipping malformed permission entry");
                parsed.skipped += 1;
            }
        }
    }
    parsed
}

fn repository_name(entry: &Value) -> Option<&str> {
    entry.get("repository")?.get("name")?.as_str()
}
