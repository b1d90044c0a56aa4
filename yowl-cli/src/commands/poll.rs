//! `yowl poll` — drain one delta and print it.

use std::process::ExitCode;

use anyhow::{Context, Result};

use super::Options;

pub fn run(opts: &Options) -> Result<ExitCode> {
    let socket = opts.client().socket().display();
    let delta = opts
        .client()
        .poll()
        .with_context(|| format!("failed to poll {socket}"))?;
    println!(
        "{}",
        serde_json::to_string_pretty(&delta).context("failed to render poll delta JSON")?
    );
    Ok(ExitCode::SUCCESS)
}
