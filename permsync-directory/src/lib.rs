//! # permsync-directory
//!
//! Organization directory client. Lists customer organizations from Zendesk so
//! each one's registry team identifier can be reconciled.

pub mod client;
pub mod error;

pub use client::{OrganizationDirectory, ZendeskClient, ZendeskConfig, DEFAULT_CUSTOMER_TAG};
pub use error::DirectoryError;
