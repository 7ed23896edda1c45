//! permsync — grant customer registry teams read access to a target repository list.
//!
//! # Usage
//!
//! ```text
//! permsync --input repos.txt                      # every current-customer organization
//! permsync --input repos.txt --org-code <TEAM>    # a single registry team
//! permsync --input repos.txt --dry-run            # report, grant nothing
//! ```
//!
//! Credentials come from `ZENDESK_EMAIL`, `ZENDESK_TOKEN`, `ZENDESK_SUBDOMAIN`
//! and `QUAY_IO_TOKEN`.

mod output;
mod sync;

use anyhow::Result;
use clap::Parser;

use sync::SyncArgs;

#[derive(Parser, Debug)]
#[command(
    name = "permsync",
    version,
    about = "Sync Quay.io team repository permissions with Zendesk customer organizations",
    long_about = None,
)]
struct Cli {
    #[command(flatten)]
    sync: SyncArgs,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();
    cli.sync.run()
}

fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
