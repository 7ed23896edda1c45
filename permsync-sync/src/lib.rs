//! # permsync-sync
//!
//! Permission reconciliation and run orchestration.
//!
//! Call [`pipeline::run`] with a [`SyncScope`] to reconcile one team or every
//! customer organization. [`reconcile::reconcile`] is the diff-and-grant step
//! on its own.

pub mod error;
pub mod pipeline;
pub mod reconcile;
pub mod report;

pub use error::SyncError;
pub use pipeline::{run, sync_team, RunSummary, SyncOptions, SyncScope, TeamFailure, TeamSyncResult};
pub use reconcile::{missing, reconcile, GrantOutcome, GrantResult, ReconcileOutcome};
pub use report::Reporter;
