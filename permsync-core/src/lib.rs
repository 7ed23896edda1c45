//! permsync core library — domain types, target-set loading, credentials, errors.
//!
//! Public API surface:
//! - [`types`] — newtypes and domain structs shared by every crate
//! - [`targets`] — the desired repository set read from a list file
//! - [`config`] — credentials resolved from the environment
//! - [`error`] — [`CoreError`]

pub mod config;
pub mod error;
pub mod targets;
pub mod types;

pub use config::{Credentials, ZendeskCredentials};
pub use error::CoreError;
pub use targets::TargetSet;
pub use types::{Organization, OrgName, PermissionGrant, RepoName, Role, TeamId};
