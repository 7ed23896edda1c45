//! Domain types shared by the directory, registry and sync crates.
//!
//! Organization records deserialize straight from the directory service's JSON;
//! everything else is built locally from CLI input or registry responses.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Newtypes
// ---------------------------------------------------------------------------

/// Identifier of a registry team, as stored on a customer organization record.
///
/// By convention a 10-character code; the length is not validated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TeamId(pub String);

impl TeamId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for TeamId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for TeamId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

/// A repository name inside a registry organization (without the org prefix).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RepoName(pub String);

impl RepoName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RepoName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for RepoName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for RepoName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl Borrow<str> for RepoName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Registry organization namespace that owns both teams and repositories.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrgName(pub String);

impl OrgName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OrgName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<String> for OrgName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for OrgName {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

// ---------------------------------------------------------------------------
// Permissions
// ---------------------------------------------------------------------------

/// Repository role a team can hold on the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Read,
    Write,
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Read => write!(f, "read"),
            Role::Write => write!(f, "write"),
            Role::Admin => write!(f, "admin"),
        }
    }
}

/// A request to attach `role` for `team` to `org/repo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionGrant {
    pub org: OrgName,
    pub team: TeamId,
    pub repo: RepoName,
    pub role: Role,
}

impl PermissionGrant {
    /// Read-only grant, the only kind this tool issues.
    pub fn read(org: &OrgName, team: &TeamId, repo: &RepoName) -> Self {
        Self {
            org: org.clone(),
            team: team.clone(),
            repo: repo.clone(),
            role: Role::Read,
        }
    }

    /// `org/repo`, the path the registry addresses the repository by.
    pub fn repo_path(&self) -> String {
        format!("{}/{}", self.org, self.repo)
    }
}

// ---------------------------------------------------------------------------
// Organization records
// ---------------------------------------------------------------------------

/// A customer organization from the support directory.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Organization {
    pub id: u64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain_names: Vec<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub organization_fields: BTreeMap<String, Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Organization {
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Reads the team identifier from the custom field `field`.
    ///
    /// Missing, null and blank values all mean "no team configured".
    pub fn team_id(&self, field: &str) -> Option<TeamId> {
        match self.organization_fields.get(field)? {
            Value::String(s) if !s.trim().is_empty() => Some(TeamId::from(s.trim())),
            Value::Number(n) => Some(TeamId(n.to_string())),
            _ => None,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
