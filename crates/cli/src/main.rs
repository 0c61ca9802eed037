use std::io::IsTerminal;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::error;

mod cli;

use cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new(log_directives(cli.verbose))
            }),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Default filter when RUST_LOG is unset. "info" keeps dry-run output
/// visible; -v raises only this tool's own crates to "debug" so HTTP
/// client internals stay at "warn".
fn log_directives(verbose: bool) -> &'static str {
    if verbose {
        "warn,hook_to_rest=debug,hook_to_rest_core=debug"
    } else {
        "warn,hook_to_rest=info,hook_to_rest_core=info"
    }
}

fn run(cli: Cli) -> Result<()> {
    // Exactly one request per run, so a current-thread runtime is enough
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?
        .block_on(cli::run(cli))
}
