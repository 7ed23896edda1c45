//! # permsync-registry
//!
//! Registry permission client: reads a team's repository permissions and grants
//! new ones over the Quay.io REST API.
//!
//! [`PermissionClient`] is the seam the reconciliation engine depends on;
//! [`QuayClient`] is the HTTP implementation.

pub mod client;
pub mod error;
pub mod permissions;

pub use client::{PermissionClient, QuayClient, QuayConfig, TeamLookup, DEFAULT_QUAY_API_URL};
pub use error::RegistryApiError;
