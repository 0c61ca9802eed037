use anyhow::Result;
use clap::Parser;
use tracing::{debug, info};

use hook_to_rest_core::RelayConfig;
use hook_to_rest_core::hooks::{DeliveryOutcome, EnvSnapshot, Identity, Relay};

/// Relay BP_* environment variables to a REST endpoint as one JSON object.
///
/// The name this binary is invoked as selects the hook: a symlink named
/// `southbound-update` POSTs to http://127.0.0.1/api/v1/hook/southbound-update
/// unless BP_HOOK_URL_REDIRECT_SOUTHBOUND_UPDATE is set.
#[derive(Parser, Debug)]
#[command(version)]
pub struct Cli {
    /// Display the REST call, but don't actually make it
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Output verbose logging information
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn config(&self) -> RelayConfig {
        RelayConfig::from_flags(self.dry_run, self.verbose)
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    // argv[0] names the hook, whatever path it was reached through
    let invocation = std::env::args_os()
        .next()
        .map(|arg0| arg0.to_string_lossy().into_owned())
        .unwrap_or_default();
    let identity = Identity::from_invocation(&invocation);
    let env = EnvSnapshot::capture();

    let relay = Relay::new(cli.config(), identity)?;
    let request = relay.prepare(&env)?;

    match relay.deliver(&request).await? {
        DeliveryOutcome::DryRun => info!("display only, POST not sent"),
        DeliveryOutcome::Delivered(status) => debug!("hook delivered ({})", status),
    }

    if !request.warnings.is_empty() {
        debug!(
            "{} value(s) were sent as strings after failing to parse as JSON",
            request.warnings.len()
        );
    }

    Ok(())
}
