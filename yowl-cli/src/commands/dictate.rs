//! `yowl start` — record and stream the transcription into stdout.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use tokio::runtime::{Builder, Runtime};
use tokio::signal::unix::{signal, Signal, SignalKind};

use yowl_client::{
    dispatch, CancelHandle, Client, PollLoop, Scheduler, Sink, StopReason, POLL_INTERVAL,
    STATUS_OK,
};

use super::{report, Options};
use crate::terminal::TerminalSink;

/// Arguments for `yowl start`.
#[derive(Args, Debug)]
pub struct StartArgs {
    /// Delay between polls in milliseconds.
    #[arg(long, default_value_t = POLL_INTERVAL.as_millis() as u64)]
    pub interval_ms: u64,
}

pub fn run(args: StartArgs, opts: &Options) -> Result<ExitCode> {
    let mut poll_loop = PollLoop::new(opts.client().clone())
        .with_interval(Duration::from_millis(args.interval_ms));

    let armed = arm(
        &mut poll_loop,
        TerminalSink::stdout(),
        opts,
        InterruptScheduler::new,
    )?;
    let Some(mut scheduler) = armed else {
        return Ok(ExitCode::FAILURE);
    };

    let reason = poll_loop.run(&mut scheduler);
    let stats = poll_loop.stats();
    tracing::info!(
        ticks = stats.ticks,
        erased = stats.erased,
        inserted = stats.inserted,
        "dictation finished",
    );

    Ok(match reason {
        StopReason::Transport(err) => {
            tracing::warn!(error = %err, "lost connection to daemon during dictation");
            ExitCode::FAILURE
        }
        StopReason::SinkDetached => {
            tracing::warn!("stdout closed during dictation");
            ExitCode::FAILURE
        }
        StopReason::Idle | StopReason::Cancelled | StopReason::Inactive => ExitCode::SUCCESS,
    })
}

/// Build the scheduler, then send `START`.
///
/// The interrupt handler must be in place before the daemon starts
/// recording, otherwise a failed setup or an early Ctrl-C would leave it
/// recording with nobody to stop it. Returns `None` when the start was
/// refused.
fn arm<S, T, F>(
    poll_loop: &mut PollLoop<S>,
    sink: S,
    opts: &Options,
    make_scheduler: F,
) -> Result<Option<T>>
where
    S: Sink,
    F: FnOnce(Client, CancelHandle) -> Result<T>,
{
    let scheduler = make_scheduler(poll_loop.client().clone(), poll_loop.cancel_handle())?;

    let outcome = dispatch(Some("start"), poll_loop, sink);
    report(&outcome, opts);
    Ok((!outcome.is_failure()).then_some(scheduler))
}

/// Sleeps between ticks on a current-thread runtime while listening for
/// SIGINT. The first interrupt sends `STOP` and lets the loop drain until the
/// daemon reports idle; the second cancels the loop outright.
struct InterruptScheduler {
    runtime: Runtime,
    interrupt: Signal,
    client: Client,
    cancel: CancelHandle,
    stop_sent: bool,
}

impl InterruptScheduler {
    fn new(client: Client, cancel: CancelHandle) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .context("failed to build scheduler runtime")?;
        let interrupt = {
            let _guard = runtime.enter();
            signal(SignalKind::interrupt()).context("failed to install Ctrl-C handler")?
        };

        Ok(Self {
            runtime,
            interrupt,
            client,
            cancel,
            stop_sent: false,
        })
    }

    fn on_interrupt(&mut self) {
        if self.stop_sent {
            tracing::info!("second interrupt, abandoning dictation");
            self.cancel.cancel();
            return;
        }
        self.stop_sent = true;

        match self.client.stop() {
            Ok(status) if status == STATUS_OK => {
                tracing::info!("stop requested, draining remaining transcription");
            }
            Ok(status) => {
                tracing::warn!(status = %status, "daemon refused stop");
                self.cancel.cancel();
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to send stop");
                self.cancel.cancel();
            }
        }
    }
}

impl Scheduler for InterruptScheduler {
    fn wait(&mut self, delay: Duration) {
        let interrupt = &mut self.interrupt;
        let interrupted = self.runtime.block_on(async move {
            tokio::select! {
                () = tokio::time::sleep(delay) => false,
                _ = interrupt.recv() => true,
            }
        });
        if interrupted {
            self.on_interrupt();
        }
    }
}
