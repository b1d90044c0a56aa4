//! Client side of the yowl dictation daemon: socket resolution, the line
//! protocol, per-request sessions and the loop that replays streamed
//! transcription onto a text sink.

pub mod client;
pub mod dispatch;
mod error;
pub mod paths;
pub mod poll_loop;
pub mod protocol;
pub mod session;
pub mod sink;

pub use client::Client;
pub use dispatch::{dispatch, Outcome, Verb, FAILURE_MARKER};
pub use error::ClientError;
pub use paths::{socket_path, SOCKET_ENV};
pub use poll_loop::{
    CancelHandle, LoopStats, PollLoop, Scheduler, StartOutcome, StopReason, ThreadScheduler, Tick,
    POLL_INTERVAL,
};
pub use protocol::{Command, PollDelta, RecordingState, STATUS_OK};
pub use session::Session;
pub use sink::{BufferSink, Sink};
