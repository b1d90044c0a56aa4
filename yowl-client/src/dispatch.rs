//! One-shot verb dispatch for host glue (keybindings, CLI).
//!
//! Every verb produces a single [`Outcome`]. Failures render with the
//! [`FAILURE_MARKER`] prefix so the host can show failures and swallow
//! confirmations.

use std::fmt;
use std::str::FromStr;

use crate::client::Client;
use crate::error::ClientError;
use crate::poll_loop::{PollLoop, StartOutcome};
use crate::protocol::STATUS_OK;
use crate::sink::Sink;

pub const FAILURE_MARKER: &str = "ERROR";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verb {
    Start,
    Stop,
    #[default]
    Ping,
}

impl FromStr for Verb {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "start" => Ok(Verb::Start),
            "stop" => Ok(Verb::Stop),
            "ping" => Ok(Verb::Ping),
            other => Err(format!("unknown command: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(String),
    Failure(String),
}

impl Outcome {
    fn success(message: impl Into<String>) -> Self {
        Outcome::Success(message.into())
    }

    fn failure(message: impl Into<String>) -> Self {
        Outcome::Failure(message.into())
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure(_))
    }

    pub fn message(&self) -> &str {
        match self {
            Outcome::Success(message) | Outcome::Failure(message) => message,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Success(message) => f.write_str(message),
            Outcome::Failure(message) => write!(f, "{FAILURE_MARKER} - {message}"),
        }
    }
}

/// Run `verb` (default `ping`) and describe the result.
///
/// `start` arms `poll_loop` with `sink`; the host is expected to drive the
/// loop afterwards. Other verbs ignore the sink.
pub fn dispatch<S: Sink>(verb: Option<&str>, poll_loop: &mut PollLoop<S>, sink: S) -> Outcome {
    let verb = match verb.map(str::parse::<Verb>).unwrap_or(Ok(Verb::Ping)) {
        Ok(verb) => verb,
        Err(message) => return Outcome::failure(message),
    };

    match verb {
        Verb::Start => start(poll_loop, sink),
        Verb::Stop => stop(poll_loop.client()),
        Verb::Ping => ping(poll_loop.client()),
    }
}

fn start<S: Sink>(poll_loop: &mut PollLoop<S>, sink: S) -> Outcome {
    match poll_loop.start(sink) {
        Ok(StartOutcome::Started) => Outcome::success("Recording started"),
        Ok(StartOutcome::AlreadyRecording) => Outcome::failure("already recording"),
        Ok(StartOutcome::Rejected(status)) => Outcome::failure(format!("start failed: {status}")),
        Err(err) => Outcome::failure(describe_error(&err)),
    }
}

/// Ask the daemon to stop recording.
///
/// A running loop keeps polling until the daemon drains and reports idle.
pub fn stop(client: &Client) -> Outcome {
    match client.stop() {
        Ok(status) if status == STATUS_OK => Outcome::success("Recording stopped"),
        Ok(status) => Outcome::failure(format!("stop failed: {status}")),
        Err(err) => Outcome::failure(describe_error(&err)),
    }
}

pub fn ping(client: &Client) -> Outcome {
    match client.ping() {
        Ok(true) => Outcome::success("PONG - daemon is alive"),
        Ok(false) => Outcome::failure("unexpected response from daemon"),
        Err(err) => Outcome::failure(describe_error(&err)),
    }
}

fn describe_error(err: &ClientError) -> String {
    match err {
        ClientError::SocketUnavailable { .. } => "daemon socket not found".to_string(),
        ClientError::ConnectionRejected { .. } => "daemon not responding".to_string(),
        ClientError::TransportFailure { .. } => err.to_string(),
    }
}
