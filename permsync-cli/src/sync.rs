//! The sync run: load targets, resolve credentials, reconcile, report.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use permsync_core::{targets, types::OrgName, types::TeamId, Credentials};
use permsync_directory::{ZendeskClient, ZendeskConfig, DEFAULT_CUSTOMER_TAG};
use permsync_registry::{QuayClient, QuayConfig, DEFAULT_QUAY_API_URL};
use permsync_sync::{pipeline, SyncOptions, SyncScope};

use crate::output::ConsoleReporter;

/// Arguments for a sync run.
#[derive(Args, Debug)]
pub struct SyncArgs {
    /// File listing the repositories every team should read, one per line.
    #[arg(long, short = 'i', value_name = "PATH")]
    pub input: PathBuf,

    /// Registry team identifier to process on its own (skips the Zendesk lookup).
    #[arg(long = "org-code", visible_alias = "team", value_name = "TEAM")]
    pub org_code: Option<String>,

    /// Quay.io organization that owns the teams and repositories.
    #[arg(long = "org", env = "QUAY_ORG", default_value = "dremio")]
    pub registry_org: String,

    /// Show what would be granted without granting anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Zendesk tag that marks an organization as a current customer.
    #[arg(long, default_value = DEFAULT_CUSTOMER_TAG)]
    pub customer_tag: String,

    /// Zendesk organization field holding the Quay.io team identifier.
    #[arg(long, default_value = "quay_io_team_id")]
    pub team_field: String,

    /// Quay.io API base URL.
    #[arg(long, env = "QUAY_API_URL", default_value = DEFAULT_QUAY_API_URL)]
    pub quay_url: String,

    /// Zendesk base URL; defaults to https://<ZENDESK_SUBDOMAIN>.zendesk.com.
    #[arg(long, env = "ZENDESK_URL")]
    pub zendesk_url: Option<String>,
}

impl SyncArgs {
    pub fn run(self) -> Result<()> {
        let targets = targets::load_at(&self.input)
            .with_context(|| format!("cannot load target list '{}'", self.input.display()))?;
        tracing::info!(
            "read {} repository names from {}",
            targets.len(),
            self.input.display()
        );

        let credentials = Credentials::from_env().context("cannot set up connections")?;

        let mut zendesk = ZendeskConfig::new(credentials.zendesk.clone())
            .with_customer_tag(self.customer_tag.clone());
        if let Some(url) = &self.zendesk_url {
            zendesk = zendesk.with_base_url(url.clone());
        }
        let directory = ZendeskClient::new(zendesk);
        let registry = QuayClient::new(
            QuayConfig::new(credentials.quay_token.clone()).with_base_url(self.quay_url.clone()),
        );

        let options = SyncOptions {
            registry_org: OrgName::from(self.registry_org.clone()),
            team_field: self.team_field.clone(),
            dry_run: self.dry_run,
        };
        let scope = match self.org_code.as_deref().map(str::trim) {
            Some("") => anyhow::bail!("--org-code must not be blank"),
            Some(team) => SyncScope::Team(TeamId::from(team)),
            None => SyncScope::All,
        };
        let failure = match &scope {
            SyncScope::Team(team) => format!("sync failed for team '{team}'"),
            SyncScope::All => "sync of customer organizations failed".to_string(),
        };

        let mut reporter = ConsoleReporter::stdout(self.dry_run);
        pipeline::run(scope, &directory, &registry, &mut reporter, &targets, &options)
            .context(failure)?;

        Ok(())
    }
}
