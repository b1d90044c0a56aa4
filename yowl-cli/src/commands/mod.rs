//! Subcommand handlers for the `yowl` binary.

pub mod dictate;
pub mod poll;

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use yowl_client::{Client, Outcome};

/// Connection settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct Options {
    client: Client,
    quiet: bool,
}

impl Options {
    pub fn new(socket: Option<PathBuf>, timeout_ms: u64, quiet: bool) -> Self {
        let client = socket.map_or_else(Client::from_env, Client::new);
        let client = match timeout_ms {
            0 => client,
            ms => client.with_timeout(Duration::from_millis(ms)),
        };
        Self { client, quiet }
    }

    pub fn client(&self) -> &Client {
        &self.client
    }
}

/// Print an outcome to stderr and map it to an exit status.
///
/// Confirmations are dropped under `--quiet`; failures never are.
pub fn report(outcome: &Outcome, opts: &Options) -> ExitCode {
    if outcome.is_failure() {
        eprintln!("{outcome}");
        return ExitCode::FAILURE;
    }
    tracing::info!(outcome = %outcome, "command succeeded");
    if !opts.quiet {
        eprintln!("{outcome}");
    }
    ExitCode::SUCCESS
}
