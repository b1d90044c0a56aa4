//! Reconciliation loop: drains transcription deltas from the daemon and
//! replays them onto a [`Sink`].
//!
//! The loop is `Stopped` until a `START` is accepted, then `Polling` until a
//! poll reports idle, the sink goes away, an exchange fails or the host
//! cancels. Ticks never overlap: the next one is armed only after the
//! previous delta has been applied.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::client::Client;
use crate::error::ClientError;
use crate::protocol::{PollDelta, STATUS_OK};
use crate::sink::Sink;

/// Delay between polls while recording.
pub const POLL_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// A loop is already polling; nothing was sent to the daemon.
    AlreadyRecording,
    /// The daemon answered `START` with something other than `OK`.
    Rejected(String),
}

#[derive(Debug)]
pub enum Tick {
    /// Still recording; tick again after the delay.
    Continue(Duration),
    Stopped(StopReason),
}

#[derive(Debug)]
pub enum StopReason {
    /// The daemon reported idle (or an unreadable poll reply).
    Idle,
    SinkDetached,
    /// An exchange failed. The loop ends quietly; the error is kept for the
    /// host to inspect.
    Transport(ClientError),
    Cancelled,
    /// `tick` was called while no recording was active.
    Inactive,
}

/// Counters for the current recording run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopStats {
    pub ticks: u64,
    pub erased: u64,
    pub inserted: u64,
}

/// Shared flag that stops a running loop before its next re-arm.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn reset(&self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Waits out the delay between two ticks.
pub trait Scheduler {
    fn wait(&mut self, delay: Duration);
}

/// Blocks the calling thread for the delay.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadScheduler;

impl Scheduler for ThreadScheduler {
    fn wait(&mut self, delay: Duration) {
        std::thread::sleep(delay);
    }
}

#[derive(Debug)]
struct LoopState<S> {
    active: bool,
    sink: Option<S>,
}

#[derive(Debug)]
pub struct PollLoop<S> {
    client: Client,
    interval: Duration,
    state: LoopState<S>,
    stats: LoopStats,
    cancel: CancelHandle,
}

impl<S: Sink> PollLoop<S> {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            interval: POLL_INTERVAL,
            state: LoopState {
                active: false,
                sink: None,
            },
            stats: LoopStats::default(),
            cancel: CancelHandle::default(),
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    pub fn stats(&self) -> LoopStats {
        self.stats
    }

    /// The sink of the current or most recent recording.
    pub fn sink(&self) -> Option<&S> {
        self.state.sink.as_ref()
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Ask the daemon to record into `sink`.
    ///
    /// A duplicate start is refused without contacting the daemon and leaves
    /// the running loop untouched.
    pub fn start(&mut self, sink: S) -> Result<StartOutcome, ClientError> {
        if self.state.active {
            tracing::warn!("start requested while already recording");
            return Ok(StartOutcome::AlreadyRecording);
        }

        let status = self.client.start()?;
        if status != STATUS_OK {
            tracing::warn!(status = %status, "daemon refused to start recording");
            return Ok(StartOutcome::Rejected(status));
        }

        self.state = LoopState {
            active: true,
            sink: Some(sink),
        };
        self.stats = LoopStats::default();
        self.cancel.reset();
        tracing::info!(socket = %self.client.socket().display(), "recording started");
        Ok(StartOutcome::Started)
    }

    /// Run one poll and apply its delta.
    pub fn tick(&mut self) -> Tick {
        if !self.state.active {
            return Tick::Stopped(StopReason::Inactive);
        }
        if !self.sink_attached() {
            return Tick::Stopped(self.halt(StopReason::SinkDetached));
        }

        let delta = match self.client.poll() {
            Ok(delta) => delta,
            Err(err) => {
                tracing::debug!(error = %err, "poll failed, ending dictation");
                return Tick::Stopped(self.halt(StopReason::Transport(err)));
            }
        };
        self.stats.ticks += 1;

        if !delta.is_recording() {
            return Tick::Stopped(self.halt(StopReason::Idle));
        }
        if let Some(sink) = self.state.sink.as_mut() {
            apply(sink, &delta, &mut self.stats);
        }
        Tick::Continue(self.interval)
    }

    /// Tick until the loop stops, waiting on `scheduler` between ticks.
    ///
    /// The first tick runs immediately. The cancel flag is checked before
    /// every re-arm.
    pub fn run(&mut self, scheduler: &mut impl Scheduler) -> StopReason {
        loop {
            match self.tick() {
                Tick::Continue(delay) => {
                    if self.cancel.is_cancelled() {
                        return self.halt(StopReason::Cancelled);
                    }
                    scheduler.wait(delay);
                }
                Tick::Stopped(reason) => return reason,
            }
        }
    }

    fn sink_attached(&self) -> bool {
        self.state.sink.as_ref().is_some_and(|s| s.is_attached())
    }

    fn halt(&mut self, reason: StopReason) -> StopReason {
        self.state.active = false;
        tracing::info!(
            reason = ?reason,
            ticks = self.stats.ticks,
            erased = self.stats.erased,
            inserted = self.stats.inserted,
            "dictation loop stopped",
        );
        reason
    }
}

fn apply<S: Sink>(sink: &mut S, delta: &PollDelta, stats: &mut LoopStats) {
    if delta.is_empty() {
        return;
    }
    let count = delta.backspace_count();
    if count > 0 {
        sink.erase(count);
        stats.erased += count as u64;
    }
    if !delta.text().is_empty() {
        sink.insert(delta.text());
        stats.inserted += delta.text().chars().count() as u64;
    }
}
