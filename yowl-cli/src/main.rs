//! yowl — dictation from the yowl speech daemon into the terminal.
//!
//! # Usage
//!
//! ```text
//! yowl [--socket <path>] [--timeout-ms <n>] [-q] [ping]
//! yowl start [--interval-ms <n>]
//! yowl stop
//! yowl poll
//! yowl socket-path
//! ```

mod commands;
mod logging;
mod terminal;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use commands::{dictate::StartArgs, Options};
use yowl_client::dispatch;

#[derive(Parser, Debug)]
#[command(
    name = "yowl",
    version,
    about = "Dictate into the terminal through the yowl speech daemon",
    long_about = None,
)]
struct Cli {
    /// Daemon socket (defaults to $YOWL_SOCKET_PATH, then <tmp>/yowl-<uid>.sock).
    #[arg(long, global = true, value_name = "PATH")]
    socket: Option<PathBuf>,

    /// Per-exchange socket timeout in milliseconds (0 disables it).
    #[arg(long, global = true, default_value_t = 2000)]
    timeout_ms: u64,

    /// Only report failures.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Check that the daemon is alive (default).
    Ping,
    /// Start recording and type the transcription into stdout until the
    /// daemon goes idle. Ctrl-C stops recording; a second Ctrl-C quits.
    Start(StartArgs),
    /// Ask the daemon to stop recording.
    Stop,
    /// Drain one transcription delta and print it as JSON.
    Poll,
    /// Print the resolved daemon socket path.
    SocketPath,
}

fn main() -> Result<ExitCode> {
    logging::init();

    let cli = Cli::parse();
    let opts = Options::new(cli.socket, cli.timeout_ms, cli.quiet);
    match cli.command.unwrap_or(Commands::Ping) {
        Commands::Ping => Ok(commands::report(&dispatch::ping(opts.client()), &opts)),
        Commands::Stop => Ok(commands::report(&dispatch::stop(opts.client()), &opts)),
        Commands::Start(args) => commands::dictate::run(args, &opts),
        Commands::Poll => commands::poll::run(&opts),
        Commands::SocketPath => {
            println!("{}", opts.client().socket().display());
            Ok(ExitCode::SUCCESS)
        }
    }
}
